//! Host functions reachable through `extern fn` declarations.
//!
//! The registry maps a name to a declared signature and a native callable.
//! Extern calls never touch a context frame or the model: arguments are
//! checked against the registered signature, the callable runs, and its
//! result is checked against the declared return type.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use cairn_ir::Type;

use crate::errors::{
    arity_mismatch, extern_failed, type_mismatch, unresolved_extern, EvalError, EvalResult,
};
use crate::value::Value;

/// A native implementation. `Err` carries a message for the runtime error.
pub type NativeFn = Arc<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

/// Parameter and return types an extern is registered with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternSignature {
    pub params: Vec<Type>,
    pub ret: Type,
}

impl ExternSignature {
    pub fn new(params: &[Type], ret: Type) -> Self {
        ExternSignature {
            params: params.to_vec(),
            ret,
        }
    }
}

impl fmt::Display for ExternSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, ty) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{ty}")?;
        }
        write!(f, ") -> {}", self.ret)
    }
}

#[derive(Clone)]
struct ExternEntry {
    signature: ExternSignature,
    func: NativeFn,
}

/// Name → native callable table supplied by the host at load time.
#[derive(Clone, Default)]
pub struct ExternRegistry {
    entries: FxHashMap<String, ExternEntry>,
}

impl ExternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a native implementation.
    pub fn register<F>(&mut self, name: impl Into<String>, signature: ExternSignature, func: F)
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::trace!(name = %name, %signature, "registering extern");
        self.entries.insert(
            name,
            ExternEntry {
                signature,
                func: Arc::new(func),
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn signature(&self, name: &str) -> Option<&ExternSignature> {
        self.entries.get(name).map(|e| &e.signature)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Call `name` with `args`, checking both sides against the signature.
    pub fn dispatch(&self, name: &str, args: &[Value]) -> EvalResult {
        let entry = self.entries.get(name).ok_or_else(|| unresolved_extern(name))?;
        let signature = &entry.signature;
        if args.len() != signature.params.len() {
            return Err(arity_mismatch(name, signature.params.len(), args.len()));
        }
        for (arg, &ty) in args.iter().zip(&signature.params) {
            if !arg.conforms_to(ty) {
                return Err(type_mismatch(&ty.to_string(), &arg.type_name()));
            }
        }
        let result = (entry.func)(args).map_err(|message| extern_failed(name, message))?;
        if !result.conforms_to(signature.ret) {
            return Err(returned_wrong_type(name, signature.ret, &result));
        }
        Ok(result)
    }
}

#[cold]
fn returned_wrong_type(name: &str, expected: Type, got: &Value) -> EvalError {
    extern_failed(
        name,
        format!("returned {} where {expected} was declared", got.type_name()),
    )
}

impl fmt::Debug for ExternRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests;
