//! Externs the CLI provides to every program.

use std::io::{self, BufRead, Write};

use cairn_eval::{register_print, ExternRegistry, ExternSignature, SharedPrintHandler, Value};
use cairn_ir::Type;

/// Registry with `print` writing to `printer` and `input` reading stdin.
pub fn host_registry(printer: SharedPrintHandler) -> ExternRegistry {
    let mut registry = ExternRegistry::new();
    register_print(&mut registry, printer);
    registry.register(
        "input",
        ExternSignature::new(&[Type::String], Type::String),
        |args| {
            let prompt = args.first().and_then(Value::as_str).unwrap_or_default();
            read_line(prompt).map(Value::Str).map_err(|err| err.to_string())
        },
    );
    registry
}

/// Show `prompt` on stderr and read one line from stdin, without its line
/// terminator.
fn read_line(prompt: &str) -> io::Result<String> {
    let mut stderr = io::stderr().lock();
    write!(stderr, "{prompt}")?;
    stderr.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}
