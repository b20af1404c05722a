//! Diagnostic emitters.
//!
//! - [`TerminalEmitter`]: human-readable, optionally coloured, with source
//!   snippets when the file text is attached
//! - [`JsonEmitter`]: one JSON object per line for tooling

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    fn flush(&mut self);

    /// Closing `aborting due to N previous errors` line.
    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}
