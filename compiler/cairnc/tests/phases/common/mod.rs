//! Shared helpers for phase tests.

use std::io::Write;

use cairn_diagnostic::{Diagnostic, ErrorCode};
use cairn_eval::{buffer_handler, Program, SharedPrintHandler};
use cairnc::host::host_registry;
use cairnc::{compile, load};
use tempfile::NamedTempFile;

/// Compile and load `source` with the CLI's host externs, `print`
/// writing to the returned buffer.
pub fn load_program(source: &str) -> (Program, SharedPrintHandler) {
    let printed = buffer_handler();
    let compiled = compile(source).unwrap_or_else(|diags| panic!("{diags:#?}"));
    let program = load(compiled, host_registry(printed.clone())).unwrap();
    (program, printed)
}

/// Diagnostics of a source that must fail to compile.
pub fn compile_errors(source: &str) -> Vec<Diagnostic> {
    compile(source).err().expect("source compiled cleanly")
}

pub fn codes(diagnostics: &[Diagnostic]) -> Vec<ErrorCode> {
    diagnostics.iter().map(|d| d.code).collect()
}

/// Write `text` to a temporary file with the given suffix.
pub fn temp_file(text: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn path_of(file: &NamedTempFile) -> String {
    file.path().to_str().unwrap().to_string()
}
