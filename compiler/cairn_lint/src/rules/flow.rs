//! Control flow: code that never runs, loops that never end and
//! conditions that never change.

use cairn_ir::visitor::{self, Visitor};
use cairn_ir::{Block, ExprArena, Function, Stmt, StmtKind};

use super::{contains_return, ConstantFlags};
use crate::{LintCx, LintWarning, WarningKind};

/// Statements after one that never completes, reported once per block.
pub(crate) fn unreachable_code(cx: &LintCx<'_>, function: &Function, out: &mut Vec<LintWarning>) {
    let arena = &cx.module.arena;
    let flags = ConstantFlags::of(function, arena);
    Unreachable { flags: &flags, out }.visit_block(&function.body, arena);
}

/// `while` on a condition that is always true, with no `return` to leave it.
pub(crate) fn infinite_loops(cx: &LintCx<'_>, function: &Function, out: &mut Vec<LintWarning>) {
    let arena = &cx.module.arena;
    let flags = ConstantFlags::of(function, arena);
    for_each_stmt(function, arena, |stmt| {
        if let StmtKind::While { cond, body } = &stmt.kind {
            if flags.value(*cond, arena) == Some(true) && !contains_return(body, arena) {
                out.push(LintWarning::new(WarningKind::InfiniteLoop, arena[*cond].span));
            }
        }
    });
}

/// `if` on a constant, or `while false`.
pub(crate) fn constant_conditions(
    cx: &LintCx<'_>,
    function: &Function,
    out: &mut Vec<LintWarning>,
) {
    let arena = &cx.module.arena;
    let flags = ConstantFlags::of(function, arena);
    for_each_stmt(function, arena, |stmt| {
        let (construct, value, cond) = match &stmt.kind {
            StmtKind::If { cond, .. } => match flags.value(*cond, arena) {
                Some(value) => ("if", value, *cond),
                None => return,
            },
            // `while true` is the loop-until-return idiom.
            StmtKind::While { cond, .. } if flags.value(*cond, arena) == Some(false) => {
                ("while", false, *cond)
            }
            _ => return,
        };
        out.push(LintWarning::new(
            WarningKind::ConstantCondition { construct, value },
            arena[cond].span,
        ));
    });
}

pub(crate) fn empty_blocks(cx: &LintCx<'_>, function: &Function, out: &mut Vec<LintWarning>) {
    for_each_stmt(function, &cx.module.arena, |stmt| {
        let mut check = |construct, block: &Block| {
            if block.stmts.is_empty() {
                out.push(LintWarning::new(WarningKind::EmptyBlock { construct }, block.span));
            }
        };
        match &stmt.kind {
            StmtKind::If {
                then_block,
                else_block,
                ..
            } => {
                check("if", then_block);
                if let Some(else_block) = else_block {
                    check("else", else_block);
                }
            }
            StmtKind::While { body, .. } => check("while", body),
            _ => {}
        }
    });
}

pub(crate) fn empty_function(cx: &LintCx<'_>, function: &Function, out: &mut Vec<LintWarning>) {
    if function.body.stmts.is_empty() {
        out.push(LintWarning::new(
            WarningKind::EmptyFunction {
                name: cx.name(function.name),
            },
            function.span,
        ));
    }
}

/// Call `f` on every statement of `function`, nested ones included.
fn for_each_stmt<'a>(function: &'a Function, arena: &'a ExprArena, f: impl FnMut(&'a Stmt)) {
    struct Each<F>(F);

    impl<'ast, F: FnMut(&'ast Stmt)> Visitor<'ast> for Each<F> {
        fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast ExprArena) {
            (self.0)(stmt);
            visitor::walk_stmt(self, stmt, arena);
        }
    }

    Each(f).visit_block(&function.body, arena);
}

struct Unreachable<'a> {
    flags: &'a ConstantFlags,
    out: &'a mut Vec<LintWarning>,
}

impl Unreachable<'_> {
    fn diverges(&self, stmt: &Stmt, arena: &ExprArena) -> bool {
        match &stmt.kind {
            StmtKind::Return(_) => true,
            StmtKind::If {
                then_block,
                else_block: Some(else_block),
                ..
            } => self.block_diverges(then_block, arena) && self.block_diverges(else_block, arena),
            // Only `return` leaves a loop.
            StmtKind::While { cond, .. } => self.flags.value(*cond, arena) == Some(true),
            _ => false,
        }
    }

    fn block_diverges(&self, block: &Block, arena: &ExprArena) -> bool {
        block.stmts.iter().any(|stmt| self.diverges(stmt, arena))
    }
}

impl<'ast> Visitor<'ast> for Unreachable<'_> {
    fn visit_block(&mut self, block: &'ast Block, arena: &'ast ExprArena) {
        let stop = block
            .stmts
            .iter()
            .position(|stmt| self.diverges(stmt, arena));
        if let Some(stop) = stop {
            if let (Some(first), Some(last)) = (block.stmts.get(stop + 1), block.stmts.last()) {
                self.out.push(LintWarning::new(
                    WarningKind::UnreachableCode {
                        after: block.stmts[stop].span,
                    },
                    first.span.merge(last.span),
                ));
            }
        }
        visitor::walk_block(self, block, arena);
    }
}

#[cfg(test)]
mod tests;
