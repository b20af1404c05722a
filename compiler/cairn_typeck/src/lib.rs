//! Load-time static checking.
//!
//! Every expression gets a type from declared signatures and annotations;
//! nothing is inferred across functions. The checker also enforces the
//! structural rules the engine relies on: `_` only as a call argument,
//! `Context` values never injected, returned or passed to natives, and no
//! `return` inside `select` handlers.

mod checker;
mod error;
mod stack;

use cairn_ir::{Module, StringInterner};

pub use error::{TypeError, TypeErrorKind};

/// Check `module`, returning every error found.
#[tracing::instrument(level = "debug", skip_all)]
pub fn check_module(module: &Module, interner: &StringInterner) -> Vec<TypeError> {
    let errors = checker::Checker::new(module, interner).run();
    tracing::debug!(errors = errors.len(), "type check finished");
    errors
}

#[cfg(test)]
mod tests;
