#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn factories_set_kind_and_message() {
    let err = undefined_variable("x");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "x".to_string()
        }
    );
    assert_eq!(err.message, "undefined variable: x");
    assert_eq!(err.to_string(), err.message);
}

#[test]
fn every_kind_has_one_class() {
    assert_eq!(
        type_conformance(Type::Int32, "many").class(),
        ErrorClass::TypeConformance
    );
    assert_eq!(selection_failed("index 4").class(), ErrorClass::Selection);
    assert_eq!(unresolved_extern("fetch").class(), ErrorClass::UnresolvedExtern);
    assert_eq!(
        extern_signature_mismatch("fetch", "arity").class(),
        ErrorClass::UnresolvedExtern
    );
    assert_eq!(aborted().class(), ErrorClass::Aborted);
    assert_eq!(integer_overflow("addition").class(), ErrorClass::Runtime);
    assert_eq!(
        extern_failed("fetch", "timeout").class(),
        ErrorClass::Runtime
    );
}

#[test]
fn frame_errors_convert_to_lifecycle_class() {
    let mut stack = crate::ContextStack::new();
    let frame = stack.push_root();
    stack.pop(frame).unwrap();
    let err: EvalError = stack.pop(frame).unwrap_err().into();
    assert_eq!(err.class(), ErrorClass::FrameLifecycle);
    assert!(err.message.starts_with("context frame misuse"));
}

#[test]
fn conformance_message_quotes_a_bounded_excerpt() {
    let long = "y".repeat(200);
    let err = type_conformance(Type::Boolean, &long);
    assert!(err.message.contains("Boolean"));
    assert!(err.message.ends_with("...\""));
    assert!(err.message.len() < 150);
    match err.kind {
        EvalErrorKind::TypeConformance { response, .. } => assert_eq!(response.len(), 200),
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn innermost_span_is_kept() {
    let err = undefined_function("f")
        .with_span(Span::new(3, 4))
        .with_span(Span::new(0, 10));
    assert_eq!(err.span, Some(Span::new(3, 4)));
}

#[test]
fn arity_message_pluralizes() {
    assert_eq!(arity_mismatch("f", 1, 2).message, "f expects 1 argument, got 2");
    assert_eq!(arity_mismatch("g", 3, 0).message, "g expects 3 arguments, got 0");
}

#[test]
fn backtrace_display_lists_frames_in_order() {
    let trace = EvalBacktrace::new(vec![
        BacktraceFrame {
            name: "main".to_string(),
            span: None,
        },
        BacktraceFrame {
            name: "ask".to_string(),
            span: Some(Span::new(10, 15)),
        },
    ]);
    assert_eq!(
        trace.to_string(),
        "call backtrace:\n  0: main\n  1: ask at 10..15\n"
    );
}
