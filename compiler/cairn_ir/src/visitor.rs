//! Read-only traversal of a [`Module`].
//!
//! Override the `visit_*` methods for the nodes you care about and call the
//! matching `walk_*` function to keep descending. Children are visited
//! depth-first, left to right; a `select` visits each candidate call before
//! its handler.

use crate::{
    Block, Expr, ExprArena, ExprId, ExprKind, Function, Module, Param, SelectClause, Stmt,
    StmtKind,
};

pub trait Visitor<'ast> {
    fn visit_function(&mut self, function: &'ast Function, arena: &'ast ExprArena) {
        walk_function(self, function, arena);
    }

    fn visit_param(&mut self, _param: &'ast Param) {}

    fn visit_block(&mut self, block: &'ast Block, arena: &'ast ExprArena) {
        walk_block(self, block, arena);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast ExprArena) {
        walk_stmt(self, stmt, arena);
    }

    /// Operator chains nest arbitrarily deep, so the stack is grown here
    /// before descending.
    fn visit_expr_id(&mut self, id: ExprId, arena: &'ast ExprArena) {
        stacker::maybe_grow(256 * 1024, 2 * 1024 * 1024, || {
            self.visit_expr(id, &arena[id], arena);
        });
    }

    fn visit_expr(&mut self, _id: ExprId, expr: &'ast Expr, arena: &'ast ExprArena) {
        walk_expr(self, expr, arena);
    }

    fn visit_select_clause(&mut self, clause: &'ast SelectClause, arena: &'ast ExprArena) {
        walk_select_clause(self, clause, arena);
    }
}

/// Visit every function of `module`.
pub fn walk_module<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, module: &'ast Module) {
    for function in &module.functions {
        visitor.visit_function(function, &module.arena);
    }
}

pub fn walk_function<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    function: &'ast Function,
    arena: &'ast ExprArena,
) {
    for param in &function.params {
        visitor.visit_param(param);
    }
    visitor.visit_block(&function.body, arena);
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    block: &'ast Block,
    arena: &'ast ExprArena,
) {
    for stmt in &block.stmts {
        visitor.visit_stmt(stmt, arena);
    }
}

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    stmt: &'ast Stmt,
    arena: &'ast ExprArena,
) {
    match &stmt.kind {
        StmtKind::Let { init: expr, .. }
        | StmtKind::Assign { value: expr, .. }
        | StmtKind::Inject(expr)
        | StmtKind::Expr(expr)
        | StmtKind::Return(Some(expr)) => visitor.visit_expr_id(*expr, arena),
        StmtKind::Return(None) => {}
        StmtKind::If {
            cond,
            then_block,
            else_block,
        } => {
            visitor.visit_expr_id(*cond, arena);
            visitor.visit_block(then_block, arena);
            if let Some(else_block) = else_block {
                visitor.visit_block(else_block, arena);
            }
        }
        StmtKind::While { cond, body } => {
            visitor.visit_expr_id(*cond, arena);
            visitor.visit_block(body, arena);
        }
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    expr: &'ast Expr,
    arena: &'ast ExprArena,
) {
    match &expr.kind {
        ExprKind::Unit
        | ExprKind::Bool(_)
        | ExprKind::Int(_)
        | ExprKind::Str(_)
        | ExprKind::Ident(_)
        | ExprKind::Placeholder
        | ExprKind::NewContext => {}
        ExprKind::Call { args, .. } => {
            for arg in args {
                visitor.visit_expr_id(*arg, arena);
            }
        }
        ExprKind::Binary { left, right, .. } => {
            visitor.visit_expr_id(*left, arena);
            visitor.visit_expr_id(*right, arena);
        }
        ExprKind::Neg(operand) => visitor.visit_expr_id(*operand, arena),
        ExprKind::Select(clauses) => {
            for clause in clauses {
                visitor.visit_select_clause(clause, arena);
            }
        }
    }
}

pub fn walk_select_clause<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    clause: &'ast SelectClause,
    arena: &'ast ExprArena,
) {
    visitor.visit_expr_id(clause.call, arena);
    visitor.visit_block(&clause.handler, arena);
}
