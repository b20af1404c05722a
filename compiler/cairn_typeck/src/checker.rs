//! The checker walks each function once with a stack of lexical scopes.

mod expr;
mod stmt;

use rustc_hash::FxHashMap;

use cairn_ir::{Module, Name, Param, Span, StringInterner, Type};

use crate::{TypeError, TypeErrorKind};

/// Callable signature, shared by user functions and externs.
pub(crate) struct Signature<'m> {
    pub(crate) params: &'m [Param],
    pub(crate) ret: Type,
}

pub(crate) struct Checker<'m> {
    module: &'m Module,
    interner: &'m StringInterner,
    signatures: FxHashMap<Name, Signature<'m>>,
    /// `None` marks a binding whose type could not be determined; uses of it
    /// are not reported again.
    scopes: Vec<FxHashMap<Name, Option<Type>>>,
    current_ret: Type,
    handler_depth: usize,
    errors: Vec<TypeError>,
}

impl<'m> Checker<'m> {
    pub(crate) fn new(module: &'m Module, interner: &'m StringInterner) -> Self {
        Checker {
            module,
            interner,
            signatures: FxHashMap::default(),
            scopes: Vec::new(),
            current_ret: Type::Unit,
            handler_depth: 0,
            errors: Vec::new(),
        }
    }

    pub(crate) fn run(mut self) -> Vec<TypeError> {
        self.collect_signatures();
        let module = self.module;
        for func in &module.functions {
            self.current_ret = func.ret;
            self.push_scope();
            self.check_params(func.params.as_slice());
            self.check_block(&func.body);
            self.pop_scope();
        }
        self.errors
    }

    fn collect_signatures(&mut self) {
        let mut first_seen: FxHashMap<Name, Span> = FxHashMap::default();
        let module = self.module;

        let items = module
            .functions
            .iter()
            .map(|f| (f.name, f.span, f.params.as_slice(), f.ret, false))
            .chain(
                module
                    .externs
                    .iter()
                    .map(|e| (e.name, e.span, e.params.as_slice(), e.ret, true)),
            );

        for (name, span, params, ret, is_extern) in items {
            if let Some(&first) = first_seen.get(&name) {
                self.error(
                    TypeErrorKind::Duplicate {
                        name: self.name(name),
                        first,
                    },
                    span,
                );
                continue;
            }
            first_seen.insert(name, span);

            let context_params = params.iter().filter(|p| p.ty == Type::Context).count();
            if is_extern && (context_params > 0 || ret == Type::Context) {
                self.error(
                    TypeErrorKind::ContextInExtern {
                        function: self.name(name),
                    },
                    span,
                );
            } else if ret == Type::Context {
                self.error(
                    TypeErrorKind::ContextReturn {
                        function: self.name(name),
                    },
                    span,
                );
            }
            if !is_extern && context_params > 1 {
                self.error(
                    TypeErrorKind::MultipleContextParams {
                        function: self.name(name),
                    },
                    span,
                );
            }

            self.signatures.insert(name, Signature { params, ret });
        }
    }

    fn check_params(&mut self, params: &[Param]) {
        let mut seen: FxHashMap<Name, Span> = FxHashMap::default();
        for param in params {
            if let Some(&first) = seen.get(&param.name) {
                self.error(
                    TypeErrorKind::Duplicate {
                        name: self.name(param.name),
                        first,
                    },
                    param.span,
                );
            }
            seen.insert(param.name, param.span);
            self.define(param.name, Some(param.ty));
        }
    }

    fn error(&mut self, kind: TypeErrorKind, span: Span) {
        self.errors.push(TypeError { kind, span });
    }

    fn name(&self, name: Name) -> String {
        self.interner.lookup(name).to_string()
    }

    /// Report `found` not matching `expected`; `None` (already reported)
    /// matches anything.
    fn expect_type(&mut self, expected: Type, found: Option<Type>, span: Span, context: &str) {
        if let Some(found) = found {
            if found != expected {
                self.error(
                    TypeErrorKind::Mismatch {
                        expected,
                        found,
                        context: context.to_string(),
                    },
                    span,
                );
            }
        }
    }

    fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn define(&mut self, name: Name, ty: Option<Type>) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, ty);
        }
    }

    /// Outer `None`: not declared. Inner `None`: declared with an unknown type.
    fn lookup(&self, name: Name) -> Option<Option<Type>> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&name).copied())
    }
}
