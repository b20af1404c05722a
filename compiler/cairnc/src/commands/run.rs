//! The `run` command: check, load and run `main` of one or more files.

use std::io::{self, Write};

use rayon::prelude::*;
use serde_json::json;

use cairn_diagnostic::span_utils::line_number;
use cairn_diagnostic::{Diagnostic, ErrorCode};
use cairn_eval::{buffer_handler, stdout_handler, InvocationStats, Value};

use super::{read_input, render_diagnostics, write_stderr};
use crate::config::{Input, OutputFormat, RunConfig};
use crate::host::host_registry;
use crate::models::build_model;
use crate::pipeline::{compile, load, run_program, RunLimits};
use crate::problem::{eval_error_to_diagnostic, phase_of};

/// The first error of the phase that stopped a program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub code: ErrorCode,
    pub message: String,
    /// 1-based line of the primary label.
    pub line: Option<u32>,
}

impl Failure {
    fn first_error(diagnostics: &[Diagnostic], source: &str) -> Option<Self> {
        let diagnostic = diagnostics.iter().find(|d| d.is_error())?;
        Some(Failure {
            code: diagnostic.code,
            message: diagnostic.message.clone(),
            line: diagnostic
                .primary_span()
                .map(|span| line_number(source, span)),
        })
    }
}

/// What happened to one input.
#[derive(Debug)]
pub struct FileReport {
    pub path: String,
    /// The value `main` returned; `None` when any phase failed.
    pub value: Option<Value>,
    pub stats: Option<InvocationStats>,
    /// `print` output captured while the run was buffered.
    pub printed: String,
    /// Rendered warnings and errors, written to stderr.
    pub diagnostics: Vec<u8>,
    /// The error that stopped the pipeline.
    pub failure: Option<Failure>,
    /// A failure outside the pipeline, e.g. an unreadable file.
    pub error: Option<String>,
}

impl FileReport {
    fn new(path: &str) -> Self {
        FileReport {
            path: path.to_string(),
            value: None,
            stats: None,
            printed: String::new(),
            diagnostics: Vec::new(),
            failure: None,
            error: None,
        }
    }

    fn failed(path: &str, message: String) -> Self {
        FileReport {
            error: Some(message),
            ..Self::new(path)
        }
    }

    pub fn succeeded(&self) -> bool {
        self.value.is_some()
    }

    /// The `--format=json` line for this input. `error` carries the code,
    /// phase, message and line of the error that stopped it, or only a
    /// message for failures outside the pipeline.
    pub fn to_json(&self) -> serde_json::Value {
        let error = match (&self.failure, &self.error) {
            (Some(failure), _) => json!({
                "code": failure.code.as_str(),
                "phase": phase_of(failure.code),
                "message": failure.message,
                "line": failure.line,
            }),
            (None, Some(message)) => json!({ "message": message }),
            (None, None) => serde_json::Value::Null,
        };
        let stats = self.stats.map(|s| {
            json!({
                "implicit_return": s.implicit_return,
                "param_fill": s.param_fill,
                "condition": s.condition,
                "select": s.select,
                "total": s.total(),
            })
        });
        json!({
            "file": self.path,
            "ok": self.succeeded(),
            "value": self.value.as_ref().map(ToString::to_string),
            "output": self.printed,
            "error": error,
            "stats": stats,
        })
    }
}

/// Run every input in `config`. Returns whether all of them succeeded.
///
/// Several inputs run on the rayon pool with their output buffered, then
/// reported in the order given.
pub fn run_files(config: &RunConfig) -> bool {
    if config.runs_in_parallel() {
        tracing::debug!(inputs = config.inputs.len(), "running inputs in parallel");
        let reports: Vec<FileReport> = config
            .inputs
            .par_iter()
            .map(|input| run_file(input, config, true))
            .collect();
        reports
            .iter()
            .fold(true, |ok, report| report_file(report, config) && ok)
    } else {
        let capture = config.format == OutputFormat::Json;
        config.inputs.iter().fold(true, |ok, input| {
            let report = run_file(input, config, capture);
            report_file(&report, config) && ok
        })
    }
}

/// Run one input. With `capture`, `print` output is kept in the report
/// instead of going straight to stdout.
pub fn run_file(input: &Input, config: &RunConfig, capture: bool) -> FileReport {
    let name = input.name();
    let _span = tracing::info_span!("run", file = name).entered();

    let source = match read_input(input) {
        Ok(source) => source,
        Err(msg) => return FileReport::failed(name, msg),
    };
    let mut report = FileReport::new(name);
    let mut diagnostics = Vec::new();
    execute(&source, config, capture, &mut report, &mut diagnostics);
    if !diagnostics.is_empty() {
        report.failure = Failure::first_error(&diagnostics, &source);
        report.diagnostics = render_diagnostics(&diagnostics, name, &source, config.format);
    }
    report
}

/// Compile, load and run `source`, collecting warnings and the first
/// failing phase's errors in `diagnostics`.
fn execute(
    source: &str,
    config: &RunConfig,
    capture: bool,
    report: &mut FileReport,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut compiled = match compile(source) {
        Ok(compiled) => compiled,
        Err(errors) => {
            diagnostics.extend(errors);
            return;
        }
    };
    diagnostics.append(&mut compiled.warnings);

    let printer = if capture {
        buffer_handler()
    } else {
        stdout_handler()
    };
    let program = match load(compiled, host_registry(printer.clone())) {
        Ok(program) => program,
        Err(diagnostic) => {
            diagnostics.push(diagnostic);
            return;
        }
    };

    let model = match build_model(&config.model) {
        Ok(model) => model,
        Err(msg) => {
            report.error = Some(msg);
            return;
        }
    };

    let outcome = run_program(
        &program,
        &*model,
        RunLimits {
            max_depth: config.max_depth,
        },
    );
    debug_assert_eq!(outcome.live_frames, 0, "frames leaked by a finished run");

    report.stats = Some(outcome.stats);
    report.printed = printer.get_output();
    match outcome.result {
        Ok(value) => report.value = Some(value),
        Err(err) => diagnostics.push(eval_error_to_diagnostic(&err)),
    }
}

/// Write `report` out; returns whether the file succeeded.
fn report_file(report: &FileReport, config: &RunConfig) -> bool {
    match config.format {
        OutputFormat::Human => report_human(report, config),
        OutputFormat::Json => report_json(report),
    }
    write_stderr(&report.diagnostics);
    report.succeeded()
}

fn report_human(report: &FileReport, config: &RunConfig) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(report.printed.as_bytes());
    if let Some(value) = report.value.as_ref().filter(|v| **v != Value::Unit) {
        if config.inputs.len() > 1 {
            let _ = writeln!(stdout, "{}: {value}", report.path);
        } else {
            let _ = writeln!(stdout, "{value}");
        }
    }
    let _ = stdout.flush();

    if let Some(msg) = &report.error {
        eprintln!("error: {msg}");
    }
    if let Some(stats) = report.stats.filter(|_| config.stats) {
        eprintln!(
            "{}: {} model invocation{} (implicit_return {}, param_fill {}, condition {}, select {})",
            report.path,
            stats.total(),
            if stats.total() == 1 { "" } else { "s" },
            stats.implicit_return,
            stats.param_fill,
            stats.condition,
            stats.select,
        );
    }
}

fn report_json(report: &FileReport) {
    println!("{}", report.to_json());
}
