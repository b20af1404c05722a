#![allow(clippy::unwrap_used)]

mod failures;
mod frames;

use cairn_ir::{Module, SharedInterner};

use crate::builtins::register_print;
use crate::errors::EvalError;
use crate::externs::ExternRegistry;
use crate::print_handler::{buffer_handler, SharedPrintHandler};
use crate::program::Program;

/// A checked program plus the buffer its `print` extern writes to.
struct Fixture {
    program: Program,
    printed: SharedPrintHandler,
}

impl Fixture {
    fn output(&self) -> String {
        self.printed.get_output()
    }
}

fn parse_checked(source: &str) -> (Module, SharedInterner) {
    let interner = SharedInterner::new();
    let output = cairn_parse::parse_source(source, &interner).unwrap();
    assert!(output.errors.is_empty(), "parse errors: {:?}", output.errors);
    let errors = cairn_typeck::check_module(&output.module, &interner);
    assert!(errors.is_empty(), "type errors: {errors:?}");
    (output.module, interner)
}

fn try_load_with(source: &str, mut registry: ExternRegistry) -> Result<Fixture, EvalError> {
    let (module, interner) = parse_checked(source);
    let printed = buffer_handler();
    register_print(&mut registry, printed.clone());
    let program = Program::load(module, interner, registry)?;
    Ok(Fixture { program, printed })
}

fn load_with(source: &str, registry: ExternRegistry) -> Fixture {
    try_load_with(source, registry).unwrap()
}

fn load(source: &str) -> Fixture {
    load_with(source, ExternRegistry::new())
}
