//! The `check` command: lex, parse, statically check and lint a program.

use super::{read_input, render_diagnostics, write_stderr};
use crate::config::{Input, OutputFormat};
use crate::pipeline::compile;

/// Check `input`, reporting every error of the first failing phase, or the
/// lint warnings of a clean program. Returns whether it has no errors.
pub fn check_input(input: &Input, format: OutputFormat) -> bool {
    let name = input.name();
    let source = match read_input(input) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("error: {msg}");
            return false;
        }
    };
    match compile(&source) {
        Ok(compiled) => {
            if !compiled.warnings.is_empty() {
                write_stderr(&render_diagnostics(&compiled.warnings, name, &source, format));
            }
            if format == OutputFormat::Human {
                let functions = compiled.module.functions.len();
                let externs = compiled.module.externs.len();
                println!("OK: {name} ({functions} functions, {externs} externs)");
            }
            true
        }
        Err(diagnostics) => {
            write_stderr(&render_diagnostics(&diagnostics, name, &source, format));
            false
        }
    }
}
