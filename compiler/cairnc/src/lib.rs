//! The Cairn driver.
//!
//! Source text flows through a fixed pipeline:
//!
//! ```text
//! source ──► cairn_lexer::lex ──► cairn_parse::parse ──► cairn_typeck::check_module
//!                                                              │
//!                                                              ▼
//!     Program::load (extern binding) ◄── cairn_lint::lint_module (warnings)
//!              │
//!              ▼
//!     Interpreter::run_main
//! ```
//!
//! Every failure along the way is turned into a [`cairn_diagnostic::Diagnostic`]
//! and rendered by the emitter the command selected. Lint warnings are
//! rendered the same way but never stop a run.

pub mod commands;
pub mod config;
pub mod host;
pub mod models;
pub mod pipeline;
pub mod problem;
pub mod tracing_setup;

pub use config::{Input, ModelSpec, OutputFormat, RunConfig};
pub use pipeline::{compile, load, run_program, Compiled, RunLimits, RunOutcome};
