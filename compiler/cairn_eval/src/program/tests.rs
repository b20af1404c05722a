#![allow(clippy::unwrap_used)]

use super::*;
use crate::errors::{ErrorClass, EvalErrorKind};
use crate::value::Value;

fn parse(source: &str) -> (Module, SharedInterner) {
    let interner = SharedInterner::new();
    let output = cairn_parse::parse_source(source, &interner).unwrap();
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    (output.module, interner)
}

fn fetch_registry() -> ExternRegistry {
    let mut registry = ExternRegistry::new();
    registry.register(
        "fetch",
        ExternSignature::new(&[Type::String], Type::String),
        |args| Ok(args[0].clone()),
    );
    registry
}

#[test]
fn completions_are_recorded_per_function() {
    let (module, interner) = parse(
        "fn add(ctx, x: i32, y: i32) -> i32 { return x + y }
         fn greet(ctx, name: String) -> String { \"Say hello to \"! name! }",
    );
    let program = Program::load(module, interner.clone(), ExternRegistry::new()).unwrap();
    assert_eq!(
        program.completion(interner.intern("add")),
        Some(Completion::AlwaysReturns)
    );
    assert_eq!(
        program.completion(interner.intern("greet")),
        Some(Completion::MayFallThrough)
    );
}

#[test]
fn externs_resolve_against_the_registry() {
    let (module, interner) = parse("extern fn fetch(url: String) -> String;");
    let program = Program::load(module, interner, fetch_registry()).unwrap();
    let callee = program.callee_by_name("fetch").unwrap();
    assert!(matches!(callee, Callee::Extern(_)));
    assert_eq!(callee.ret(), Type::String);
    assert_eq!(
        program
            .registry()
            .dispatch("fetch", &[Value::string("u")])
            .unwrap(),
        Value::string("u")
    );
}

#[test]
fn missing_extern_fails_to_load() {
    let (module, interner) = parse("extern fn lookup(key: String) -> String;");
    let err = Program::load(module, interner, fetch_registry()).unwrap_err();
    assert_eq!(err.class(), ErrorClass::UnresolvedExtern);
    assert!(err.span.is_some());
}

#[test]
fn mismatched_extern_signature_fails_to_load() {
    let (module, interner) = parse("extern fn fetch(url: String, retries: i32) -> String;");
    let err = Program::load(module, interner, fetch_registry()).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ExternSignatureMismatch { .. }));
    assert_eq!(err.class(), ErrorClass::UnresolvedExtern);
    assert!(err.message.contains("declared (String, i32) -> String"));
}

#[test]
fn duplicate_names_fail_to_load() {
    let (module, interner) = parse(
        "fn fetch() { }
         extern fn fetch(url: String) -> String;",
    );
    let err = Program::load(module, interner, fetch_registry()).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::DuplicateDefinition { .. }));
}

#[test]
fn unknown_names_have_no_callee() {
    let (module, interner) = parse("fn main() { }");
    let program = Program::load(module, interner, ExternRegistry::new()).unwrap();
    assert!(program.callee_by_name("missing").is_none());
    assert!(program.callee_by_name("main").is_some());
}
