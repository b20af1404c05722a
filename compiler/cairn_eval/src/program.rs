//! A module ready to run.
//!
//! Loading indexes the definitions, resolves every `extern` against the
//! host registry and records each function's static completion. A loaded
//! program is immutable and can be shared by any number of concurrent runs.

use rustc_hash::FxHashMap;

use cairn_ir::{completion, Completion, ExternFn, Function, Module, Name, Param, SharedInterner, Type};

use crate::errors::{
    duplicate_definition, extern_signature_mismatch, unresolved_extern, EvalError,
};
use crate::externs::{ExternRegistry, ExternSignature};

/// A resolved call target.
#[derive(Copy, Clone, Debug)]
pub enum Callee<'p> {
    User {
        func: &'p Function,
        completion: Completion,
    },
    Extern(&'p ExternFn),
}

impl<'p> Callee<'p> {
    pub fn name(&self) -> Name {
        match self {
            Callee::User { func, .. } => func.name,
            Callee::Extern(ext) => ext.name,
        }
    }

    pub fn params(&self) -> &'p [Param] {
        match self {
            Callee::User { func, .. } => &func.params,
            Callee::Extern(ext) => &ext.params,
        }
    }

    pub fn ret(&self) -> Type {
        match self {
            Callee::User { func, .. } => func.ret,
            Callee::Extern(ext) => ext.ret,
        }
    }

    pub fn doc(&self) -> Option<&'p str> {
        match self {
            Callee::User { func, .. } => func.doc.as_deref(),
            Callee::Extern(ext) => ext.doc.as_deref(),
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Slot {
    User(usize),
    Extern(usize),
}

#[derive(Debug)]
pub struct Program {
    module: Module,
    interner: SharedInterner,
    registry: ExternRegistry,
    index: FxHashMap<Name, Slot>,
    completions: Vec<Completion>,
}

impl Program {
    /// Index `module` and bind its externs.
    ///
    /// Fails with `UnresolvedExtern` when an `extern fn` has no registered
    /// implementation or is registered with a different signature, and
    /// with a runtime error when a name is defined twice.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn load(
        module: Module,
        interner: SharedInterner,
        registry: ExternRegistry,
    ) -> Result<Program, EvalError> {
        let mut index = FxHashMap::default();
        let slots = module
            .functions
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name, f.span, Slot::User(i)))
            .chain(
                module
                    .externs
                    .iter()
                    .enumerate()
                    .map(|(i, e)| (e.name, e.span, Slot::Extern(i))),
            );
        for (name, span, slot) in slots {
            if index.insert(name, slot).is_some() {
                return Err(duplicate_definition(interner.lookup(name)).with_span(span));
            }
        }

        for ext in &module.externs {
            let name = interner.lookup(ext.name);
            let declared = ExternSignature::new(
                &ext.params.iter().map(|p| p.ty).collect::<Vec<_>>(),
                ext.ret,
            );
            match registry.signature(name) {
                None => return Err(unresolved_extern(name).with_span(ext.span)),
                Some(registered) if *registered != declared => {
                    return Err(extern_signature_mismatch(
                        name,
                        format!("declared {declared}, registered {registered}"),
                    )
                    .with_span(ext.span));
                }
                Some(_) => {}
            }
        }

        let completions = module
            .functions
            .iter()
            .map(completion::of_function)
            .collect();

        tracing::debug!(
            functions = module.functions.len(),
            externs = module.externs.len(),
            "program loaded"
        );
        Ok(Program {
            module,
            interner,
            registry,
            index,
            completions,
        })
    }

    pub fn callee(&self, name: Name) -> Option<Callee<'_>> {
        match *self.index.get(&name)? {
            Slot::User(i) => Some(Callee::User {
                func: &self.module.functions[i],
                completion: self.completions[i],
            }),
            Slot::Extern(i) => Some(Callee::Extern(&self.module.externs[i])),
        }
    }

    /// Look up a definition by its source name.
    pub fn callee_by_name(&self, name: &str) -> Option<Callee<'_>> {
        self.callee(self.interner.get(name)?)
    }

    /// Static completion of a user function.
    pub fn completion(&self, name: Name) -> Option<Completion> {
        match self.callee(name)? {
            Callee::User { completion, .. } => Some(completion),
            Callee::Extern(_) => None,
        }
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn registry(&self) -> &ExternRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests;
