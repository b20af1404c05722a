#![allow(clippy::unwrap_used)]

use cairn_diagnostic::ErrorCode;
use cairn_ir::{StringInterner, Type};
use pretty_assertions::assert_eq;

use crate::{check_module, TypeError, TypeErrorKind};

fn check(source: &str) -> Vec<TypeError> {
    let interner = StringInterner::new();
    let output = cairn_parse::parse_source(source, &interner).unwrap();
    assert!(output.errors.is_empty(), "parse errors: {:?}", output.errors);
    check_module(&output.module, &interner)
}

fn kinds(source: &str) -> Vec<TypeErrorKind> {
    check(source).into_iter().map(|e| e.kind).collect()
}

#[test]
fn well_typed_agent_passes() {
    let errors = check(
        r#"
        extern fn search(query: String, limit: i32) -> String
        fn add(ctx, x: i32, y: i32) -> i32 { return x + y }
        fn greet(ctx, name: String) -> String { "Say hello to "! name! }
        fn should_continue(ctx) -> Boolean { "Continue?"! }
        fn main(ctx) {
            let total = add(ctx, 2, 3)
            total!
            let greeting: String = greet(Context::new(), _)
            while should_continue(ctx) {
                greeting = greeting + "!"
            }
            let answer = select {
                search(_, 5) as hits => hits,
                greet(ctx, _) as text => { "picked greet"! text },
            }
            answer!
        }
        "#,
    );
    assert_eq!(errors, vec![]);
}

#[test]
fn argument_and_return_mismatches() {
    let errors = kinds(
        r#"
        fn add(x: i32, y: i32) -> i32 { return "five" }
        fn main() { add(1, true) }
        "#,
    );
    assert_eq!(
        errors,
        vec![
            TypeErrorKind::Mismatch {
                expected: Type::Int32,
                found: Type::String,
                context: "as the return value".into(),
            },
            TypeErrorKind::Mismatch {
                expected: Type::Int32,
                found: Type::Boolean,
                context: "for parameter `y`".into(),
            },
        ]
    );
}

#[test]
fn unknown_names_and_arity() {
    let errors = kinds(
        r#"
        fn one(x: i32) -> i32 { return x }
        fn main() {
            missing()
            one(1, 2)
            nobody!
        }
        "#,
    );
    assert_eq!(errors.len(), 3);
    assert!(matches!(&errors[0], TypeErrorKind::UnknownFunction { name } if name == "missing"));
    assert!(matches!(
        errors[1],
        TypeErrorKind::ArityMismatch {
            expected: 1,
            found: 2,
            ..
        }
    ));
    assert!(matches!(&errors[2], TypeErrorKind::UnknownVariable { name } if name == "nobody"));
}

#[test]
fn let_inside_block_does_not_escape() {
    let errors = kinds(
        r#"
        fn main() {
            let outer = "a"
            if true {
                outer = "b"
                let inner = "c"
            }
            inner!
        }
        "#,
    );
    assert_eq!(
        errors,
        vec![TypeErrorKind::UnknownVariable {
            name: "inner".into()
        }]
    );
}

#[test]
fn placeholder_rules() {
    let errors = kinds(
        r#"
        fn helper(ctx, text: String) -> String { return text }
        fn main(ctx) {
            let x: String = _
            helper(_, "x")
        }
        "#,
    );
    assert_eq!(
        errors,
        vec![
            TypeErrorKind::PlaceholderOutsideCall,
            TypeErrorKind::PlaceholderForContext {
                param: "ctx".into()
            },
        ]
    );
}

#[test]
fn context_restrictions() {
    let errors = kinds(
        r#"
        extern fn native(ctx) -> String
        fn leak(ctx) -> Context { return ctx }
        fn two(a, b) { }
        fn main(ctx) { ctx! }
        "#,
    );
    assert!(errors.contains(&TypeErrorKind::ContextInExtern {
        function: "native".into()
    }));
    assert!(errors.contains(&TypeErrorKind::ContextReturn {
        function: "leak".into()
    }));
    assert!(errors.contains(&TypeErrorKind::MultipleContextParams {
        function: "two".into()
    }));
    assert!(errors.contains(&TypeErrorKind::InjectContext));
}

#[test]
fn conditions_must_be_boolean() {
    let errors = kinds("fn main() { while 1 { } }");
    assert_eq!(
        errors,
        vec![TypeErrorKind::Mismatch {
            expected: Type::Boolean,
            found: Type::Int32,
            context: "for this condition".into(),
        }]
    );
}

#[test]
fn operators_are_typed() {
    let errors = kinds(
        r#"
        fn main() {
            let a = "x" + "y"
            let b = 1 + 2 * 3
            let c = "x" < "y"
            let d = 1 + "y"
        }
        "#,
    );
    assert_eq!(errors.len(), 2);
    assert!(errors
        .iter()
        .all(|e| matches!(e, TypeErrorKind::InvalidOperator { .. })));
}

#[test]
fn select_handler_rules() {
    let errors = kinds(
        r#"
        fn a(text: String) -> String { return text }
        fn b(n: i32) -> i32 { return n }
        fn main() -> String {
            return select {
                a(_) as x => x,
                b(_) as y => { return "early" },
            }
        }
        "#,
    );
    assert!(errors.contains(&TypeErrorKind::ReturnInSelectHandler));
    assert!(errors.contains(&TypeErrorKind::SelectHandlerMismatch {
        expected: Type::String,
        found: Type::Unit,
    }));
}

#[test]
fn duplicates_are_reported_with_codes() {
    let errors = check("fn f() { }\nextern fn f()\nfn g(x: i32, x: i32) { }");
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.code() == ErrorCode::E2005));
    let diag = errors[0].to_diagnostic();
    assert_eq!(diag.labels.len(), 2);
}

#[test]
fn mismatch_diagnostic_names_both_types() {
    let errors = check("fn main(ctx) -> i32 { return true }");
    let diag = errors[0].to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.message, "type mismatch: expected `i32`, found `Boolean`");
    assert_eq!(diag.labels[0].message, "expected `i32` as the return value");
}

#[test]
fn long_operator_chains_are_checked_without_overflow() {
    let mut source = String::from("fn main(ctx) -> i32 { return 0");
    for _ in 0..50_000 {
        source.push_str(" + 1 - 1");
    }
    source.push_str(" }");
    assert_eq!(check(&source), vec![]);

    let mut flags = String::from("fn main(ctx) -> Boolean { return true");
    for _ in 0..50_000 {
        flags.push_str(" && true || false");
    }
    flags.push_str(" }");
    assert_eq!(check(&flags), vec![]);
}
