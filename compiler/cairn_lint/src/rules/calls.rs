//! Calls, injections and `select`.

use cairn_ir::visitor::{self, Visitor};
use cairn_ir::{
    Block, Expr, ExprArena, ExprId, ExprKind, Function, Name, SelectClause, Stmt, StmtKind, Type,
};

use crate::{LintCx, LintWarning, WarningKind};

/// The same literal or variable injected by two statements in a row.
pub(crate) fn duplicate_injections(
    cx: &LintCx<'_>,
    function: &Function,
    out: &mut Vec<LintWarning>,
) {
    Injections { out }.visit_block(&function.body, &cx.module.arena);
}

/// A call whose every argument is `_`, outside `select` candidates where
/// that is the normal form.
pub(crate) fn placeholder_only_calls(
    cx: &LintCx<'_>,
    function: &Function,
    out: &mut Vec<LintWarning>,
) {
    PlaceholderCalls { cx, out }.visit_block(&function.body, &cx.module.arena);
}

pub(crate) fn single_clause_selects(
    cx: &LintCx<'_>,
    function: &Function,
    out: &mut Vec<LintWarning>,
) {
    struct Selects<'a>(&'a mut Vec<LintWarning>);

    impl<'ast> Visitor<'ast> for Selects<'_> {
        fn visit_expr(&mut self, _id: ExprId, expr: &'ast Expr, arena: &'ast ExprArena) {
            if let ExprKind::Select(clauses) = &expr.kind {
                if clauses.len() == 1 {
                    self.0
                        .push(LintWarning::new(WarningKind::SingleClauseSelect, expr.span));
                }
            }
            visitor::walk_expr(self, expr, arena);
        }
    }

    Selects(out).visit_block(&function.body, &cx.module.arena);
}

/// A bare call statement returning `Boolean` or `i32`: only `String`
/// results reach the frame, so the value is lost.
pub(crate) fn unused_return_values(
    cx: &LintCx<'_>,
    function: &Function,
    out: &mut Vec<LintWarning>,
) {
    IgnoredResults { cx, out }.visit_block(&function.body, &cx.module.arena);
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Injected {
    Literal(Name),
    Variable(Name),
}

impl Injected {
    fn of(stmt: &Stmt, arena: &ExprArena) -> Option<Self> {
        match stmt.kind {
            StmtKind::Inject(id) => match arena[id].kind {
                ExprKind::Str(text) => Some(Injected::Literal(text)),
                ExprKind::Ident(name) => Some(Injected::Variable(name)),
                _ => None,
            },
            StmtKind::Expr(id) => match arena[id].kind {
                ExprKind::Str(text) => Some(Injected::Literal(text)),
                _ => None,
            },
            _ => None,
        }
    }
}

struct Injections<'a> {
    out: &'a mut Vec<LintWarning>,
}

impl<'ast> Visitor<'ast> for Injections<'_> {
    fn visit_block(&mut self, block: &'ast Block, arena: &'ast ExprArena) {
        for pair in block.stmts.windows(2) {
            let [first, second] = pair else { continue };
            match (Injected::of(first, arena), Injected::of(second, arena)) {
                (Some(a), Some(b)) if a == b => self.out.push(LintWarning::new(
                    WarningKind::DuplicateInjection { first: first.span },
                    second.span,
                )),
                _ => {}
            }
        }
        visitor::walk_block(self, block, arena);
    }
}

struct PlaceholderCalls<'a, 'm> {
    cx: &'a LintCx<'m>,
    out: &'a mut Vec<LintWarning>,
}

impl<'ast> Visitor<'ast> for PlaceholderCalls<'_, '_> {
    fn visit_expr(&mut self, _id: ExprId, expr: &'ast Expr, arena: &'ast ExprArena) {
        if let ExprKind::Call { func, args } = &expr.kind {
            if !args.is_empty()
                && args
                    .iter()
                    .all(|arg| matches!(arena[*arg].kind, ExprKind::Placeholder))
            {
                self.out.push(LintWarning::new(
                    WarningKind::PlaceholderOnlyCall {
                        callee: self.cx.name(*func),
                        count: args.len(),
                    },
                    expr.span,
                ));
            }
        }
        visitor::walk_expr(self, expr, arena);
    }

    fn visit_select_clause(&mut self, clause: &'ast SelectClause, arena: &'ast ExprArena) {
        // Skip the candidate itself, not its arguments.
        visitor::walk_expr(self, &arena[clause.call], arena);
        self.visit_block(&clause.handler, arena);
    }
}

struct IgnoredResults<'a, 'm> {
    cx: &'a LintCx<'m>,
    out: &'a mut Vec<LintWarning>,
}

impl<'ast> Visitor<'ast> for IgnoredResults<'_, '_> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast ExprArena) {
        if let StmtKind::Expr(id) = stmt.kind {
            if let ExprKind::Call { func, .. } = arena[id].kind {
                if let Some(ty @ (Type::Boolean | Type::Int32)) = self.cx.return_type(func) {
                    self.out.push(LintWarning::new(
                        WarningKind::UnusedReturnValue {
                            callee: self.cx.name(func),
                            ty,
                        },
                        arena[id].span,
                    ));
                }
            }
        }
        visitor::walk_stmt(self, stmt, arena);
    }

    fn visit_select_clause(&mut self, clause: &'ast SelectClause, arena: &'ast ExprArena) {
        self.visit_expr_id(clause.call, arena);
        // The last statement of a handler is the value of the `select`.
        if let Some((value, rest)) = clause.handler.stmts.split_last() {
            for stmt in rest {
                self.visit_stmt(stmt, arena);
            }
            visitor::walk_stmt(self, value, arena);
        }
    }
}

#[cfg(test)]
mod tests;
