use super::*;
use crate::{ExprArena, ExprId, Expr, ExprKind, Span};

fn stmt(kind: StmtKind) -> Stmt {
    Stmt {
        kind,
        span: Span::DUMMY,
    }
}

fn block(stmts: Vec<Stmt>) -> Block {
    Block {
        stmts,
        span: Span::DUMMY,
    }
}

fn lit(arena: &mut ExprArena) -> ExprId {
    arena.alloc(Expr::new(ExprKind::Bool(true), Span::DUMMY))
}

#[test]
fn empty_body_falls_through() {
    assert_eq!(of_block(&block(vec![])), Completion::MayFallThrough);
}

#[test]
fn trailing_return_always_returns() {
    let mut arena = ExprArena::new();
    let value = lit(&mut arena);
    let body = block(vec![
        stmt(StmtKind::Inject(value)),
        stmt(StmtKind::Return(Some(value))),
    ]);
    assert_eq!(of_block(&body), Completion::AlwaysReturns);
}

#[test]
fn if_needs_both_branches() {
    let mut arena = ExprArena::new();
    let cond = lit(&mut arena);
    let returning = block(vec![stmt(StmtKind::Return(None))]);

    let one_armed = block(vec![stmt(StmtKind::If {
        cond,
        then_block: returning.clone(),
        else_block: None,
    })]);
    assert_eq!(of_block(&one_armed), Completion::MayFallThrough);

    let both = block(vec![stmt(StmtKind::If {
        cond,
        then_block: returning.clone(),
        else_block: Some(returning.clone()),
    })]);
    assert_eq!(of_block(&both), Completion::AlwaysReturns);

    let half = block(vec![stmt(StmtKind::If {
        cond,
        then_block: returning,
        else_block: Some(block(vec![stmt(StmtKind::Expr(cond))])),
    })]);
    assert_eq!(of_block(&half), Completion::MayFallThrough);
}

#[test]
fn while_body_return_does_not_count() {
    let mut arena = ExprArena::new();
    let cond = lit(&mut arena);
    let body = block(vec![stmt(StmtKind::While {
        cond,
        body: block(vec![stmt(StmtKind::Return(None))]),
    })]);
    assert_eq!(of_block(&body), Completion::MayFallThrough);
}
