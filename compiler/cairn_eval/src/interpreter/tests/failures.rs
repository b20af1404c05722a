use cairn_ir::Type;
use pretty_assertions::assert_eq;

use super::{load, load_with, try_load_with};
use crate::cancel::CancelToken;
use crate::errors::{ErrorClass, EvalErrorKind};
use crate::externs::{ExternRegistry, ExternSignature};
use crate::interpreter::Interpreter;
use crate::model::{EchoModel, FnModel, ModelError, ScriptedModel};
use crate::value::Value;

#[test]
fn nonconforming_response_is_a_type_conformance_error() {
    let fixture = load(r#"fn count(ctx) -> i32 { "How many?"! }"#);
    let model = ScriptedModel::new(["lots"]);
    let mut interp = Interpreter::new(&fixture.program, &model);

    let err = interp.call("count", vec![]).unwrap_err();
    assert_eq!(err.class(), ErrorClass::TypeConformance);
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeConformance {
            expected: Type::Int32,
            response: "lots".into(),
        }
    );
    assert_eq!(interp.live_frames(), 0);
}

#[test]
fn missing_extern_fails_at_load() {
    let result = try_load_with(
        "extern fn lookup(key: String) -> String",
        ExternRegistry::new(),
    );
    let err = result.err().unwrap();
    assert_eq!(err.class(), ErrorClass::UnresolvedExtern);
    assert!(matches!(err.kind, EvalErrorKind::UnresolvedExtern { ref name } if name == "lookup"));
}

#[test]
fn mismatched_extern_signature_fails_at_load() {
    let mut registry = ExternRegistry::new();
    registry.register(
        "lookup",
        ExternSignature::new(&[Type::Int32], Type::String),
        |_| Ok(Value::from("")),
    );
    let err = try_load_with("extern fn lookup(key: String) -> String", registry)
        .err()
        .unwrap();
    assert_eq!(err.class(), ErrorClass::UnresolvedExtern);
    assert!(matches!(
        err.kind,
        EvalErrorKind::ExternSignatureMismatch { .. }
    ));
}

#[test]
fn failing_extern_surfaces_its_message() {
    let mut registry = ExternRegistry::new();
    registry.register(
        "explode",
        ExternSignature::new(&[], Type::String),
        |_| Err("boom".to_string()),
    );
    let fixture = load_with(
        r#"
        extern fn explode() -> String
        fn main(ctx) -> String { return explode() }
        "#,
        registry,
    );
    let mut interp = Interpreter::new(&fixture.program, &EchoModel);
    let err = interp.run_main().unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ExternFailed {
            name: "explode".into(),
            message: "boom".into(),
        }
    );
    assert_eq!(interp.live_frames(), 0);
}

#[test]
fn transport_failure_is_a_runtime_error() {
    let fixture = load(r#"fn ask(ctx) -> String { "Anyone there?"! }"#);
    let model = FnModel::new(|_| Err(ModelError::Transport("connection refused".into())));
    let mut interp = Interpreter::new(&fixture.program, &model);

    let err = interp.call("ask", vec![]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::ModelUnavailable { .. }));
    assert_eq!(err.class(), ErrorClass::Runtime);
}

#[test]
fn backtrace_lists_the_most_recent_call_first() {
    let fixture = load(
        "fn leaf(ctx) -> i32 { return 2147483647 + 1 }
         fn middle(ctx) -> i32 { return leaf(ctx) }
         fn top(ctx) -> i32 { return middle(ctx) }",
    );
    let mut interp = Interpreter::new(&fixture.program, &EchoModel);

    let err = interp.call("top", vec![]).unwrap_err();
    let names: Vec<_> = err
        .backtrace
        .as_ref()
        .unwrap()
        .frames()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["leaf", "middle", "top"]);
    assert_eq!(interp.live_frames(), 0);
}

#[test]
fn cancelled_token_aborts_before_the_first_statement() {
    let fixture = load(r#"fn main(ctx) { "never seen"! }"#);
    let token = CancelToken::new();
    token.cancel();
    let model = ScriptedModel::default();
    let mut interp = Interpreter::builder(&fixture.program, &model)
        .cancel_token(token)
        .build();

    let err = interp.run_main().unwrap_err();
    assert_eq!(err.class(), ErrorClass::Aborted);
    assert_eq!(model.request_count(), 0);
    assert_eq!(interp.live_frames(), 0);
}

#[test]
fn cancellation_mid_run_unwinds_every_frame() {
    let fixture = load(
        r#"
        extern fn print(message: String)
        fn more(ctx) -> Boolean { "More?"! }
        fn worker(ctx) {
            while more(ctx) {
                print("working")
            }
            return
        }
        fn main(ctx) {
            worker(ctx)
            return
        }
        "#,
    );
    let token = CancelToken::new();
    let trigger = token.clone();
    let model = FnModel::new(move |_| {
        trigger.cancel();
        Ok("true".to_string())
    });
    let mut interp = Interpreter::builder(&fixture.program, &model)
        .cancel_token(token)
        .build();

    let err = interp.run_main().unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::Aborted);
    assert_eq!(interp.stats().condition, 1);
    assert_eq!(fixture.output(), "");
    assert_eq!(interp.live_frames(), 0);
    assert_eq!(interp.call_depth(), 0);
}

#[test]
fn cancelled_client_aborts_the_run() {
    let fixture = load(r#"fn ask(ctx) -> String { "Hello?"! }"#);
    let model = FnModel::new(|_| Err(ModelError::Cancelled));
    let mut interp = Interpreter::new(&fixture.program, &model);

    let err = interp.call("ask", vec![]).unwrap_err();
    assert_eq!(err.class(), ErrorClass::Aborted);
    assert_eq!(interp.live_frames(), 0);
}
