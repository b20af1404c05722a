use cairn_ir::{BinaryOp, ExprId, ExprKind, Name, SelectClause, Span, Type};

use super::Checker;
use crate::stack::ensure_sufficient_stack;
use crate::TypeErrorKind;

impl Checker<'_> {
    /// Type of `id`, or `None` when an error has already been reported for it.
    pub(super) fn infer(&mut self, id: ExprId) -> Option<Type> {
        ensure_sufficient_stack(|| self.infer_inner(id))
    }

    fn infer_inner(&mut self, id: ExprId) -> Option<Type> {
        let module = self.module;
        let expr = &module.arena[id];
        match &expr.kind {
            ExprKind::Unit => Some(Type::Unit),
            ExprKind::Bool(_) => Some(Type::Boolean),
            ExprKind::Int(_) => Some(Type::Int32),
            ExprKind::Str(_) => Some(Type::String),
            ExprKind::NewContext => Some(Type::Context),
            ExprKind::Ident(name) => {
                if let Some(ty) = self.lookup(*name) {
                    ty
                } else {
                    self.error(
                        TypeErrorKind::UnknownVariable {
                            name: self.name(*name),
                        },
                        expr.span,
                    );
                    None
                }
            }
            ExprKind::Placeholder => {
                self.error(TypeErrorKind::PlaceholderOutsideCall, expr.span);
                None
            }
            ExprKind::Call { func, args } => self.check_call(*func, args, expr.span),
            ExprKind::Binary { op, left, right } => {
                self.infer_binary(*op, *left, *right, expr.span)
            }
            ExprKind::Neg(operand) => {
                let found = self.infer(*operand);
                self.expect_type(Type::Int32, found, expr.span, "for negation");
                Some(Type::Int32)
            }
            ExprKind::Select(clauses) => self.infer_select(clauses),
        }
    }

    /// Check arity and argument types. Placeholders are accepted for every
    /// parameter except a `Context`.
    fn check_call(&mut self, func: Name, args: &[ExprId], span: Span) -> Option<Type> {
        let module = self.module;
        let (params, ret) = match self.signatures.get(&func) {
            Some(sig) => (sig.params, sig.ret),
            None => {
                self.error(
                    TypeErrorKind::UnknownFunction {
                        name: self.name(func),
                    },
                    span,
                );
                self.infer_args_loosely(args);
                return None;
            }
        };

        if params.len() != args.len() {
            self.error(
                TypeErrorKind::ArityMismatch {
                    name: self.name(func),
                    expected: params.len(),
                    found: args.len(),
                },
                span,
            );
            self.infer_args_loosely(args);
            return Some(ret);
        }

        for (param, &arg) in params.iter().zip(args) {
            let arg_expr = &module.arena[arg];
            if arg_expr.kind == ExprKind::Placeholder {
                if param.ty == Type::Context {
                    self.error(
                        TypeErrorKind::PlaceholderForContext {
                            param: self.name(param.name),
                        },
                        arg_expr.span,
                    );
                }
                continue;
            }
            let found = self.infer(arg);
            let context = format!("for parameter `{}`", self.name(param.name));
            self.expect_type(param.ty, found, arg_expr.span, &context);
        }
        Some(ret)
    }

    /// Visit arguments of a call that is already in error, so nested
    /// problems are still reported.
    fn infer_args_loosely(&mut self, args: &[ExprId]) {
        let module = self.module;
        for &arg in args {
            if module.arena[arg].kind != ExprKind::Placeholder {
                self.infer(arg);
            }
        }
    }

    fn infer_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId, span: Span) -> Option<Type> {
        let fallback = (op.is_comparison() || op.is_logical()).then_some(Type::Boolean);
        let (Some(l), Some(r)) = (self.infer(left), self.infer(right)) else {
            return fallback;
        };
        let result = match op {
            BinaryOp::And | BinaryOp::Or => {
                (l == Type::Boolean && r == Type::Boolean).then_some(Type::Boolean)
            }
            BinaryOp::Eq | BinaryOp::NotEq => {
                (l == r && l != Type::Context).then_some(Type::Boolean)
            }
            BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
                (l == Type::Int32 && r == Type::Int32).then_some(Type::Boolean)
            }
            BinaryOp::Add => match (l, r) {
                (Type::Int32, Type::Int32) => Some(Type::Int32),
                (Type::String, Type::String) => Some(Type::String),
                _ => None,
            },
            BinaryOp::Sub | BinaryOp::Mul => {
                (l == Type::Int32 && r == Type::Int32).then_some(Type::Int32)
            }
        };
        if result.is_none() {
            self.error(
                TypeErrorKind::InvalidOperator {
                    op,
                    left: l,
                    right: r,
                },
                span,
            );
        }
        result.or(fallback)
    }

    /// Each clause binds its call's result in a fresh scope; all handlers
    /// must produce the same type.
    fn infer_select(&mut self, clauses: &[SelectClause]) -> Option<Type> {
        let module = self.module;
        let mut expected: Option<Type> = None;
        for clause in clauses {
            let call = &module.arena[clause.call];
            let call_ty = match &call.kind {
                ExprKind::Call { func, args } => self.check_call(*func, args, call.span),
                _ => None,
            };

            self.push_scope();
            self.define(clause.binding, call_ty);
            self.handler_depth += 1;
            let handler_ty = self.check_handler(&clause.handler);
            self.handler_depth -= 1;
            self.pop_scope();

            match (expected, handler_ty) {
                (None, found) => expected = found,
                (Some(want), Some(found)) if want != found => self.error(
                    TypeErrorKind::SelectHandlerMismatch {
                        expected: want,
                        found,
                    },
                    clause.span,
                ),
                _ => {}
            }
        }
        expected
    }
}
