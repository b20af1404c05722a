//! Loading and running programs through the driver.

use cairn_diagnostic::ErrorCode;
use cairn_eval::{ErrorClass, ScriptedModel, Value};
use cairnc::host::host_registry;
use cairnc::problem::eval_error_to_diagnostic;
use cairnc::{compile, load, run_program, RunLimits};
use pretty_assertions::assert_eq;

use crate::common::load_program;

const RESEARCHER: &str = r#"
extern fn print(message: String)

# Look something up.
fn lookup(ctx, topic: String) -> String { return "notes on " + topic }

fn summarize(ctx, notes: String) -> String {
    "Summarize these notes in one line:"!
    notes!
}

fn keep_researching(ctx) -> Boolean { "Is more research needed?"! }

fn main(ctx) -> String {
    "You are a careful researcher."!
    let rounds = 0
    while keep_researching(ctx) {
        rounds = rounds + 1
        let found = select {
            lookup(ctx, _) as notes => notes,
            summarize(ctx, _) as line => line,
        }
        print(found)
    }
    return summarize(Context::new(), "done")
}
"#;

#[test]
fn agent_runs_against_scripted_answers() {
    let (program, printed) = load_program(RESEARCHER);
    let model = ScriptedModel::new([
        "true",
        r#"{"selection": 0, "arguments": {"topic": "tides"}}"#,
        "false",
        "All done.",
    ]);

    let outcome = run_program(&program, &model, RunLimits::default());

    assert_eq!(outcome.result.unwrap(), Value::from("All done."));
    assert_eq!(printed.get_output(), "notes on tides\n");
    assert_eq!(outcome.stats.condition, 2);
    assert_eq!(outcome.stats.select, 1);
    assert_eq!(outcome.stats.implicit_return, 1);
    assert_eq!(outcome.live_frames, 0);

    let last = model.requests().pop().unwrap();
    assert_eq!(
        last.context_text(),
        "Summarize these notes in one line:\ndone"
    );
}

#[test]
fn runtime_failures_map_to_runtime_codes() {
    let (program, _) = load_program(RESEARCHER);
    let model = ScriptedModel::new(["perhaps"]);

    let outcome = run_program(&program, &model, RunLimits::default());
    let err = outcome.result.unwrap_err();
    assert_eq!(err.class(), ErrorClass::TypeConformance);
    assert_eq!(eval_error_to_diagnostic(&err).code, ErrorCode::E6001);
    assert_eq!(outcome.live_frames, 0);
}

#[test]
fn depth_limit_applies_to_runs() {
    let (program, _) = load_program(
        "fn spin(ctx, n: i32) -> i32 { return spin(ctx, n + 1) }
         fn main(ctx) -> i32 { return spin(ctx, 0) }",
    );
    let outcome = run_program(
        &program,
        &ScriptedModel::default(),
        RunLimits { max_depth: Some(16) },
    );
    let err = outcome.result.unwrap_err();
    assert_eq!(eval_error_to_diagnostic(&err).code, ErrorCode::E6009);
    assert!(err.backtrace.is_some_and(|bt| !bt.is_empty()));
}

#[test]
fn unknown_externs_fail_to_load() {
    let compiled = compile("extern fn fetch(url: String) -> String\nfn main(ctx) { return }").unwrap();
    let printed = cairn_eval::silent_handler();
    let diag = load(compiled, host_registry(printed)).unwrap_err();
    assert_eq!(diag.code, ErrorCode::E2010);
    assert!(diag.message.contains("fetch"));
}

#[test]
fn host_externs_have_the_declared_signatures() {
    let compiled = compile(
        "extern fn print(message: String)
         extern fn input(prompt: String) -> String
         fn main(ctx) { return }",
    )
    .unwrap();
    assert!(load(compiled, host_registry(cairn_eval::silent_handler())).is_ok());

    let compiled = compile("extern fn input(prompt: String) -> i32\nfn main(ctx) { return }").unwrap();
    let diag = load(compiled, host_registry(cairn_eval::silent_handler())).unwrap_err();
    assert_eq!(diag.code, ErrorCode::E2010);
}

#[test]
fn long_operator_chains_check_and_run() {
    let mut source = String::from("fn main(ctx) -> i32 { return 0");
    for _ in 0..50_000 {
        source.push_str(" + 1 - 1");
    }
    source.push_str(" }");

    let (program, _) = load_program(&source);
    let outcome = run_program(&program, &ScriptedModel::default(), RunLimits::default());
    assert_eq!(outcome.result.unwrap(), Value::from(0));
}
