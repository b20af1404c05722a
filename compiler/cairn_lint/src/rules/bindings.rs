//! Variable bindings: values that are never read, hidden or thrown away.

use cairn_ir::visitor::{self, Visitor};
use cairn_ir::{
    Block, Expr, ExprArena, ExprId, ExprKind, Function, Name, SelectClause, Span, Stmt, StmtKind,
};
use rustc_hash::{FxHashMap, FxHashSet};

use super::Mentions;
use crate::{LintCx, LintWarning, WarningKind};

/// A `let` binding no expression ever reads. Names starting with `_` are
/// exempt, and parameters are always injected into the frame so they count
/// as used.
pub(crate) fn unused_variables(cx: &LintCx<'_>, function: &Function, out: &mut Vec<LintWarning>) {
    let resolved = Resolver::run(function, &cx.module.arena);
    for (name, span) in resolved.unread {
        let name = cx.name(name);
        if !name.starts_with('_') {
            out.push(LintWarning::new(WarningKind::UnusedVariable { name }, span));
        }
    }
}

/// A `let` in a nested block reusing a name from an enclosing one.
pub(crate) fn shadowed_variables(
    cx: &LintCx<'_>,
    function: &Function,
    out: &mut Vec<LintWarning>,
) {
    let resolved = Resolver::run(function, &cx.module.arena);
    for (name, inner, outer) in resolved.shadowed {
        out.push(LintWarning::new(
            WarningKind::ShadowedVariable {
                name: cx.name(name),
                outer,
            },
            inner,
        ));
    }
}

/// A value written and then written again in the same block before any
/// statement reads it.
pub(crate) fn overwritten_values(
    cx: &LintCx<'_>,
    function: &Function,
    out: &mut Vec<LintWarning>,
) {
    let mut finder = DeadWrites { cx, out };
    finder.visit_block(&function.body, &cx.module.arena);
}

struct Binding {
    name: Name,
    span: Span,
    /// Parameters and `select` results are in scope but never reported.
    tracked: bool,
    read: bool,
}

/// Name resolution over one function body.
#[derive(Default)]
struct Resolver {
    bindings: Vec<Binding>,
    /// Index into `bindings` where each open scope starts.
    scopes: Vec<usize>,
    unread: Vec<(Name, Span)>,
    /// Name, inner declaration, outer declaration.
    shadowed: Vec<(Name, Span, Span)>,
}

impl Resolver {
    fn run(function: &Function, arena: &ExprArena) -> Self {
        let mut resolver = Resolver::default();
        resolver.visit_function(function, arena);
        resolver
    }

    fn push_scope(&mut self) {
        self.scopes.push(self.bindings.len());
    }

    fn pop_scope(&mut self) {
        let start = self.scopes.pop().unwrap_or(0);
        for binding in self.bindings.drain(start..) {
            if binding.tracked && !binding.read {
                self.unread.push((binding.name, binding.span));
            }
        }
    }

    fn declare(&mut self, name: Name, span: Span, tracked: bool) {
        self.bindings.push(Binding {
            name,
            span,
            tracked,
            read: false,
        });
    }
}

impl<'ast> Visitor<'ast> for Resolver {
    fn visit_function(&mut self, function: &'ast Function, arena: &'ast ExprArena) {
        self.push_scope();
        for param in &function.params {
            self.declare(param.name, param.span, false);
        }
        self.visit_block(&function.body, arena);
        self.pop_scope();
    }

    fn visit_block(&mut self, block: &'ast Block, arena: &'ast ExprArena) {
        self.push_scope();
        visitor::walk_block(self, block, arena);
        self.pop_scope();
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast ExprArena) {
        let StmtKind::Let { name, init, .. } = &stmt.kind else {
            visitor::walk_stmt(self, stmt, arena);
            return;
        };
        self.visit_expr_id(*init, arena);
        let scope_start = self.scopes.last().copied().unwrap_or(0);
        let outer = self.bindings[..scope_start]
            .iter()
            .rev()
            .find(|b| b.name == *name);
        if let Some(outer) = outer {
            self.shadowed.push((*name, stmt.span, outer.span));
        }
        self.declare(*name, stmt.span, true);
    }

    fn visit_expr(&mut self, _id: ExprId, expr: &'ast Expr, arena: &'ast ExprArena) {
        if let ExprKind::Ident(name) = expr.kind {
            if let Some(binding) = self.bindings.iter_mut().rev().find(|b| b.name == name) {
                binding.read = true;
            }
        }
        visitor::walk_expr(self, expr, arena);
    }

    fn visit_select_clause(&mut self, clause: &'ast SelectClause, arena: &'ast ExprArena) {
        self.visit_expr_id(clause.call, arena);
        self.push_scope();
        self.declare(clause.binding, clause.span, false);
        visitor::walk_block(self, &clause.handler, arena);
        self.pop_scope();
    }
}

struct DeadWrites<'a, 'm> {
    cx: &'a LintCx<'m>,
    out: &'a mut Vec<LintWarning>,
}

impl<'ast> Visitor<'ast> for DeadWrites<'_, '_> {
    fn visit_block(&mut self, block: &'ast Block, arena: &'ast ExprArena) {
        // Unread writes of this block, by variable.
        let mut pending: FxHashMap<Name, Span> = FxHashMap::default();
        for stmt in &block.stmts {
            match &stmt.kind {
                StmtKind::Let { name, init, .. } => {
                    forget(&mut pending, &Mentions::of_expr(*init, arena));
                    pending.insert(*name, stmt.span);
                }
                StmtKind::Assign { name, value } => {
                    forget(&mut pending, &Mentions::of_expr(*value, arena));
                    if let Some(dead) = pending.insert(*name, stmt.span) {
                        self.out.push(LintWarning::new(
                            WarningKind::OverwrittenValue {
                                name: self.cx.name(*name),
                                overwritten_at: stmt.span,
                            },
                            dead,
                        ));
                    }
                }
                _ => forget(&mut pending, &Mentions::of_stmt(stmt, arena)),
            }
        }
        visitor::walk_block(self, block, arena);
    }
}

fn forget(pending: &mut FxHashMap<Name, Span>, names: &FxHashSet<Name>) {
    pending.retain(|name, _| !names.contains(name));
}

#[cfg(test)]
mod tests;
