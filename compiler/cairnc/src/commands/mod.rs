//! Command handlers for the `cairn` CLI.
//!
//! Each submodule implements one command. Shared helpers for reading files
//! and rendering diagnostics live here.

use std::io::{self, IsTerminal, Write};

use cairn_diagnostic::{ColorMode, Diagnostic, DiagnosticEmitter, JsonEmitter, TerminalEmitter};

use crate::config::{Input, OutputFormat};

mod check;
mod debug;
mod run;

pub use check::check_input;
pub use debug::{describe_module, lex_file, parse_file};
pub use run::{run_file, run_files, Failure, FileReport};

/// Read a source file, describing the failure in user terms.
pub fn read_source(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("cannot read '{path}': {e}"),
    })
}

/// Source text of `input`.
pub fn read_input(input: &Input) -> Result<String, String> {
    match input {
        Input::File(path) => read_source(path),
        Input::Inline(source) => Ok(source.clone()),
    }
}

/// Read a file or exit with status 1.
fn read_file(path: &str) -> String {
    match read_source(path) {
        Ok(content) => content,
        Err(msg) => {
            eprintln!("error: {msg}");
            std::process::exit(1);
        }
    }
}

/// Render `diagnostics` for `path` into a buffer.
///
/// Runs on worker threads render into memory so their output can be
/// written in file order afterwards.
pub fn render_diagnostics(
    diagnostics: &[Diagnostic],
    path: &str,
    source: &str,
    format: OutputFormat,
) -> Vec<u8> {
    let mut out = Vec::new();
    match format {
        OutputFormat::Human => {
            let colors = ColorMode::Auto.should_use_colors(io::stderr().is_terminal());
            let mut emitter = TerminalEmitter::new(&mut out, colors).with_source(path, source);
            emitter.emit_all(diagnostics);
            let errors = diagnostics.iter().filter(|d| d.is_error()).count();
            emitter.emit_summary(errors, diagnostics.len() - errors);
            emitter.flush();
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(&mut out).with_source(source);
            emitter.emit_all(diagnostics);
            emitter.flush();
        }
    }
    out
}

fn write_stderr(bytes: &[u8]) {
    let mut stderr = io::stderr().lock();
    let _ = stderr.write_all(bytes);
    let _ = stderr.flush();
}
