use super::*;
use crate::StringInterner;

#[test]
fn arena_hands_out_sequential_ids() {
    let mut arena = ExprArena::new();
    let a = arena.alloc(Expr::new(ExprKind::Int(1), Span::new(0, 1)));
    let b = arena.alloc(Expr::new(ExprKind::Bool(true), Span::new(2, 6)));
    assert_eq!(a.index(), 0);
    assert_eq!(b.index(), 1);
    assert_eq!(arena[b].kind, ExprKind::Bool(true));
    assert_eq!(arena.len(), 2);
}

#[test]
fn context_param_finds_first_handle() {
    let interner = StringInterner::new();
    let func = Function {
        name: interner.intern("greet"),
        params: vec![
            Param {
                name: interner.intern("name"),
                ty: Type::String,
                span: Span::DUMMY,
            },
            Param {
                name: interner.intern("ctx"),
                ty: Type::Context,
                span: Span::DUMMY,
            },
        ],
        ret: Type::String,
        body: Block::default(),
        doc: None,
        span: Span::DUMMY,
    };
    assert_eq!(func.context_param(), Some(1));
}

#[test]
fn operator_classes() {
    assert!(BinaryOp::LtEq.is_comparison());
    assert!(!BinaryOp::Add.is_comparison());
    assert!(BinaryOp::Or.is_logical());
    assert_eq!(BinaryOp::NotEq.as_symbol(), "!=");
}
