//! Diagnostic reporting shared by every phase of the Cairn toolchain.
//!
//! Phases build [`Diagnostic`]s with an [`ErrorCode`]; the CLI renders them
//! through a [`DiagnosticEmitter`].

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod span_utils;

pub use diagnostic::{type_mismatch, Diagnostic, Label, Severity};
pub use emitter::{ColorMode, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
pub use error_code::ErrorCode;
