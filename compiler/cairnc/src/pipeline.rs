//! Front end and run helpers shared by the commands.

use cairn_diagnostic::Diagnostic;
use cairn_eval::{
    EvalError, ExternRegistry, Interpreter, InvocationStats, ModelClient, Program, Value,
};
use cairn_ir::{Module, SharedInterner};
use cairn_lint::LintWarning;
use cairn_typeck::TypeError;

use crate::problem::load_error_to_diagnostic;

/// A module that lexed, parsed and checked cleanly.
#[derive(Debug)]
pub struct Compiled {
    pub module: Module,
    pub interner: SharedInterner,
    /// Static analysis warnings, in source order. They never stop a run.
    pub warnings: Vec<Diagnostic>,
}

/// Lex, parse and statically check `source`.
///
/// Lexer failures stop before parsing. Parse errors stop before checking,
/// since the checker would only report follow-on errors for skipped items.
/// Every diagnostic of the failing phase is returned. A module that checks
/// cleanly is linted, and the warnings travel with it.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn compile(source: &str) -> Result<Compiled, Vec<Diagnostic>> {
    let interner = SharedInterner::new();
    let output = cairn_parse::parse_source(source, &interner)?;
    if output.has_errors() {
        return Err(output.diagnostics());
    }
    let errors = cairn_typeck::check_module(&output.module, &interner);
    if !errors.is_empty() {
        return Err(errors.iter().map(TypeError::to_diagnostic).collect());
    }
    let warnings = cairn_lint::lint_module(&output.module, &interner)
        .iter()
        .map(LintWarning::to_diagnostic)
        .collect();
    Ok(Compiled {
        module: output.module,
        interner,
        warnings,
    })
}

/// Bind a compiled module's externs against `registry`.
pub fn load(compiled: Compiled, registry: ExternRegistry) -> Result<Program, Diagnostic> {
    Program::load(compiled.module, compiled.interner, registry)
        .map_err(|err| load_error_to_diagnostic(&err))
}

/// Limits for one run.
#[derive(Copy, Clone, Debug, Default)]
pub struct RunLimits {
    pub max_depth: Option<usize>,
}

/// Result of running `main` once.
#[derive(Debug)]
pub struct RunOutcome {
    pub result: Result<Value, EvalError>,
    pub stats: InvocationStats,
    /// Frames still allocated after the run; always zero.
    pub live_frames: usize,
}

/// Run `main` of `program` against `model`.
pub fn run_program(program: &Program, model: &dyn ModelClient, limits: RunLimits) -> RunOutcome {
    let mut builder = Interpreter::builder(program, model);
    if let Some(depth) = limits.max_depth {
        builder = builder.max_depth(depth);
    }
    let mut interpreter = builder.build();
    let result = interpreter.run_main();
    if let Err(err) = &result {
        tracing::debug!(class = ?err.class(), %err, "run failed");
    }
    RunOutcome {
        result,
        stats: interpreter.stats(),
        live_frames: interpreter.live_frames(),
    }
}
