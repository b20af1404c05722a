#![allow(clippy::unwrap_used, clippy::panic)]


use cairn_ir::{ExprId, ExprKind, Module, StringInterner};

use crate::{parse_source, ParseOutput};

pub(super) fn parse_ok(source: &str) -> (Module, StringInterner) {
    let interner = StringInterner::new();
    let output = parse_source(source, &interner).unwrap();
    assert!(output.errors.is_empty(), "unexpected errors: {:?}", output.errors);
    (output.module, interner)
}

pub(super) fn parse_err(source: &str) -> ParseOutput {
    let interner = StringInterner::new();
    let output = parse_source(source, &interner).unwrap();
    assert!(output.has_errors(), "expected a parse error for {source:?}");
    output
}

pub(super) fn kind(module: &Module, id: ExprId) -> &ExprKind {
    &module.arena[id].kind
}
