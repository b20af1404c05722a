#![allow(clippy::unwrap_used)]

use super::*;
use crate::errors::{ErrorClass, EvalErrorKind};
use pretty_assertions::assert_eq;

fn registry() -> ExternRegistry {
    let mut registry = ExternRegistry::new();
    registry.register(
        "shout",
        ExternSignature::new(&[Type::String], Type::String),
        |args| Ok(Value::string(args[0].to_string().to_uppercase())),
    );
    registry.register(
        "liar",
        ExternSignature::new(&[], Type::Int32),
        |_| Ok(Value::string("not a number")),
    );
    registry.register(
        "broken",
        ExternSignature::new(&[], Type::Unit),
        |_| Err("disk on fire".to_string()),
    );
    registry
}

#[test]
fn dispatch_calls_the_native_function() {
    assert_eq!(
        registry().dispatch("shout", &[Value::string("hey")]).unwrap(),
        Value::string("HEY")
    );
}

#[test]
fn unknown_names_are_unresolved() {
    let err = registry().dispatch("missing", &[]).unwrap_err();
    assert_eq!(err.class(), ErrorClass::UnresolvedExtern);
}

#[test]
fn arguments_are_checked_before_the_call() {
    let registry = registry();
    assert!(matches!(
        registry.dispatch("shout", &[]).unwrap_err().kind,
        EvalErrorKind::ArityMismatch { expected: 1, got: 0, .. }
    ));
    assert!(matches!(
        registry.dispatch("shout", &[Value::Int(1)]).unwrap_err().kind,
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn results_must_match_the_declared_return_type() {
    let err = registry().dispatch("liar", &[]).unwrap_err();
    assert!(err.message.contains("returned String where i32 was declared"));
}

#[test]
fn native_failures_become_runtime_errors() {
    let err = registry().dispatch("broken", &[]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ExternFailed {
            name: "broken".to_string(),
            message: "disk on fire".to_string()
        }
    );
}

#[test]
fn names_and_signatures_are_queryable() {
    let registry = registry();
    assert_eq!(registry.names(), ["broken", "liar", "shout"]);
    assert_eq!(
        registry.signature("shout").unwrap().to_string(),
        "(String) -> String"
    );
    assert!(!registry.contains("print"));
}
