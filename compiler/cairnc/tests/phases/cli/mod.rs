//! Whole-file runs through the `run` command.

use cairn_eval::Value;
use cairnc::commands::{check_input, run_file, run_files};
use cairnc::{Input, ModelSpec, OutputFormat, RunConfig};
use pretty_assertions::assert_eq;

use crate::common::{path_of, temp_file};

const GREETER: &str = r#"
extern fn print(message: String)

fn greet(ctx, name: String) -> String {
    "Greet this person:"!
    name!
}

fn main(ctx) -> String {
    print("starting")
    return greet(ctx, "Ada")
}
"#;

fn config_for(paths: &[String]) -> RunConfig {
    RunConfig {
        inputs: paths.iter().cloned().map(Input::File).collect(),
        ..RunConfig::default()
    }
}

fn run_path(path: &str, config: &RunConfig) -> cairnc::commands::FileReport {
    run_file(&Input::File(path.to_string()), config, true)
}

#[test]
fn echo_model_answers_with_the_frame() {
    let file = temp_file(GREETER, ".crn");
    let path = path_of(&file);

    let report = run_path(&path, &config_for(&[path.clone()]));

    assert!(report.succeeded(), "{report:?}");
    assert_eq!(report.value, Some(Value::from("Greet this person:\nAda")));
    assert_eq!(report.printed, "starting\n");
    assert_eq!(report.stats.unwrap().implicit_return, 1);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn replay_model_reads_answers_in_order() {
    let file = temp_file(GREETER, ".crn");
    let answers = temp_file("Hello, Ada!\\nWelcome.\n", ".txt");
    let path = path_of(&file);
    let config = RunConfig {
        model: ModelSpec::Replay(answers.path().to_path_buf()),
        ..config_for(&[path.clone()])
    };

    let report = run_path(&path, &config);

    assert_eq!(report.value, Some(Value::from("Hello, Ada!\nWelcome.")));
}

#[test]
fn exhausted_replay_reports_a_diagnostic() {
    let file = temp_file(GREETER, ".crn");
    let answers = temp_file("", ".txt");
    let path = path_of(&file);
    let config = RunConfig {
        model: ModelSpec::Replay(answers.path().to_path_buf()),
        ..config_for(&[path.clone()])
    };

    let report = run_path(&path, &config);

    assert!(!report.succeeded());
    assert!(report.stats.is_some());
    let rendered = String::from_utf8(report.diagnostics).unwrap();
    assert!(rendered.contains("E6005"), "{rendered}");
}

#[test]
fn missing_files_fail_before_compiling() {
    let path = "/nonexistent/agent.crn".to_string();
    let report = run_path(&path, &config_for(&[path.clone()]));

    assert!(!report.succeeded());
    assert!(report.error.unwrap().contains("cannot find file"));
    assert!(report.stats.is_none());
}

#[test]
fn compile_errors_are_rendered() {
    let file = temp_file("fn main(ctx) { let x: i32 = \"no\" }", ".crn");
    let path = path_of(&file);

    let report = run_path(&path, &config_for(&[path.clone()]));

    assert_eq!(report.value, None);
    assert!(report.stats.is_none());
    let rendered = String::from_utf8(report.diagnostics).unwrap();
    assert!(rendered.contains("E2001"), "{rendered}");
}

#[test]
fn several_files_run_together() {
    let first = temp_file(GREETER, ".crn");
    let second = temp_file("fn main(ctx) -> i32 { return 7 }", ".crn");
    let config = config_for(&[path_of(&first), path_of(&second)]);

    assert!(config.runs_in_parallel());
    assert!(run_files(&config));
}

#[test]
fn one_failing_file_fails_the_run() {
    let good = temp_file("fn main(ctx) { return }", ".crn");
    let bad = temp_file("fn helper(ctx) { return }", ".crn");
    let config = RunConfig {
        parallel: false,
        ..config_for(&[path_of(&good), path_of(&bad)])
    };

    assert!(!run_files(&config));
}

#[test]
fn warnings_are_rendered_without_failing_the_run() {
    let file = temp_file(
        "fn main(ctx) -> i32 {\n    let scratch = 1\n    return 2\n}",
        ".crn",
    );
    let path = path_of(&file);

    let config = RunConfig {
        format: OutputFormat::Json,
        ..config_for(&[path.clone()])
    };

    let report = run_path(&path, &config);

    assert_eq!(report.value, Some(Value::from(2)));
    assert!(report.failure.is_none());
    let rendered = String::from_utf8(report.diagnostics).unwrap();
    let lines: Vec<serde_json::Value> = rendered
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 1, "{rendered}");
    assert_eq!(lines[0]["code"], "W2001");
    assert_eq!(lines[0]["message"], "unused variable `scratch`");
    assert_eq!(lines[0]["labels"][0]["line"], 2);
}

#[test]
fn inline_source_runs_like_a_file() {
    let config = RunConfig::from_args_and_env(
        &["--inline".to_string(), "fn main(ctx) -> i32 { return 6 * 7 }".to_string()],
        None,
    )
    .unwrap();

    let report = run_file(&config.inputs[0], &config, true);

    assert_eq!(report.path, "<inline>");
    assert_eq!(report.value, Some(Value::from(42)));
    assert!(run_files(&config));
}

#[test]
fn check_accepts_programs_with_warnings() {
    let clean = Input::Inline("fn main(ctx) { if true { \"hi\"! } }".to_string());
    assert!(check_input(&clean, OutputFormat::Json));

    let broken = Input::Inline("fn main(ctx) { undefined! }".to_string());
    assert!(!check_input(&broken, OutputFormat::Json));
}

#[test]
fn json_reports_name_the_stopping_error() {
    let file = temp_file("fn main(ctx) {\n    let x: i32 = \"no\"\n}", ".crn");
    let path = path_of(&file);
    let report = run_path(&path, &config_for(&[path.clone()]));
    let json = report.to_json();
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"]["code"], "E2001");
    assert_eq!(json["error"]["phase"], "check");
    assert_eq!(json["error"]["line"], 2);
    assert_eq!(
        json["error"]["message"],
        "type mismatch: expected `i32`, found `String`"
    );

    let answers = temp_file("", ".txt");
    let runnable = temp_file(GREETER, ".crn");
    let path = path_of(&runnable);
    let config = RunConfig {
        model: ModelSpec::Replay(answers.path().to_path_buf()),
        ..config_for(&[path.clone()])
    };
    let json = run_path(&path, &config).to_json();
    assert_eq!(json["error"]["code"], "E6005");
    assert_eq!(json["error"]["phase"], "runtime");

    let missing = "/nonexistent/agent.crn";
    let json = run_path(missing, &config_for(&[missing.to_string()])).to_json();
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("cannot find file"));
    assert!(json["error"]["code"].is_null());
}

#[test]
fn successful_json_reports_have_no_error() {
    let file = temp_file("fn main(ctx) -> i32 { return 7 }", ".crn");
    let path = path_of(&file);
    let json = run_path(&path, &config_for(&[path.clone()])).to_json();
    assert_eq!(json["ok"], true);
    assert_eq!(json["value"], "7");
    assert!(json["error"].is_null());
}
