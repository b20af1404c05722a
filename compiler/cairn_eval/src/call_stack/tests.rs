#![allow(clippy::unwrap_used)]

use super::*;
use crate::errors::{undefined_variable, EvalErrorKind};
use cairn_ir::SharedInterner;

fn frame(interner: &StringInterner, name: &str, at: u32) -> CallFrame {
    CallFrame {
        name: interner.intern(name),
        call_span: Some(Span::new(at, at + 1)),
    }
}

#[test]
fn depth_limit_is_enforced() {
    let interner = SharedInterner::new();
    let mut stack = CallStack::new(Some(2));
    stack.push(frame(&interner, "a", 0)).unwrap();
    stack.push(frame(&interner, "b", 1)).unwrap();
    let err = stack.push(frame(&interner, "c", 2)).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 2 });
    assert_eq!(stack.depth(), 2);
}

#[test]
fn unlimited_stack_accepts_deep_chains() {
    let interner = SharedInterner::new();
    let mut stack = CallStack::new(None);
    for i in 0..500 {
        stack.push(frame(&interner, "r", i)).unwrap();
    }
    assert_eq!(stack.depth(), 500);
}

#[test]
fn capture_lists_most_recent_first() {
    let interner = SharedInterner::new();
    let mut stack = CallStack::new(None);
    stack.push(frame(&interner, "main", 0)).unwrap();
    stack.push(frame(&interner, "ask", 5)).unwrap();
    let trace = stack.capture(&interner);
    let names: Vec<&str> = trace.frames().iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["ask", "main"]);
}

#[test]
fn backtrace_is_attached_once() {
    let interner = SharedInterner::new();
    let mut stack = CallStack::new(None);
    stack.push(frame(&interner, "inner", 0)).unwrap();
    let err = stack.attach_backtrace(undefined_variable("x"), &interner);
    stack.pop();
    stack.push(frame(&interner, "other", 1)).unwrap();
    let err = stack.attach_backtrace(err, &interner);
    assert_eq!(err.backtrace.unwrap().frames()[0].name, "inner");
}
