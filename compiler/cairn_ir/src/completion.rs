//! Static completion analysis.
//!
//! Decides from the syntax tree alone whether a function body returns
//! explicitly on every path. A body that may fall through reaches the
//! implicit model call at runtime.

use crate::{Block, Function, Stmt, StmtKind};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Completion {
    /// Every path ends in `return`; the implicit model call never happens.
    AlwaysReturns,
    /// Some path reaches the end of the body.
    MayFallThrough,
}

impl Completion {
    #[inline]
    pub fn always_returns(self) -> bool {
        self == Completion::AlwaysReturns
    }
}

/// Completion of a function body.
pub fn of_function(func: &Function) -> Completion {
    of_block(&func.body)
}

/// Completion of a block: the first statement that always returns makes the
/// rest of the block unreachable.
pub fn of_block(block: &Block) -> Completion {
    if block.stmts.iter().any(|stmt| of_stmt(stmt).always_returns()) {
        Completion::AlwaysReturns
    } else {
        Completion::MayFallThrough
    }
}

fn of_stmt(stmt: &Stmt) -> Completion {
    match &stmt.kind {
        StmtKind::Return(_) => Completion::AlwaysReturns,
        StmtKind::If {
            then_block,
            else_block: Some(else_block),
            ..
        } => {
            if of_block(then_block).always_returns() && of_block(else_block).always_returns() {
                Completion::AlwaysReturns
            } else {
                Completion::MayFallThrough
            }
        }
        // A loop body may run zero times.
        StmtKind::While { .. }
        | StmtKind::If {
            else_block: None, ..
        }
        | StmtKind::Let { .. }
        | StmtKind::Assign { .. }
        | StmtKind::Inject(_)
        | StmtKind::Expr(_) => Completion::MayFallThrough,
    }
}

#[cfg(test)]
mod tests;
