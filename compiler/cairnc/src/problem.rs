//! Engine errors as diagnostics.
//!
//! Lives in the driver because neither `cairn_eval` nor `cairn_diagnostic`
//! depends on the other.
//!
//! # Error codes
//!
//! - E2005, E2010: failures while loading a program (duplicate names,
//!   externs without a matching registration)
//! - E6001–E6006: one code per runtime error class
//! - E6007: general evaluation errors
//! - E6008, E6009: overflow and recursion limit
//! - E9001: frame lifecycle violations, which are engine defects

use cairn_diagnostic::{Diagnostic, ErrorCode};
use cairn_eval::{EvalError, EvalErrorKind};

/// Convert a runtime error into a diagnostic.
///
/// The primary label sits on the error span; notes and the call backtrace
/// follow as notes.
pub fn eval_error_to_diagnostic(err: &EvalError) -> Diagnostic {
    with_context(Diagnostic::error(error_code_for_kind(&err.kind)), err)
}

/// Convert an error from `Program::load` into a diagnostic.
pub fn load_error_to_diagnostic(err: &EvalError) -> Diagnostic {
    let code = match err.kind {
        EvalErrorKind::DuplicateDefinition { .. } => ErrorCode::E2005,
        EvalErrorKind::UnresolvedExtern { .. } | EvalErrorKind::ExternSignatureMismatch { .. } => {
            ErrorCode::E2010
        }
        ref kind => error_code_for_kind(kind),
    };
    with_context(Diagnostic::error(code), err)
}

/// The pipeline phase an error code belongs to, as reported in JSON output.
pub fn phase_of(code: ErrorCode) -> &'static str {
    if code.is_lexer_error() {
        "lex"
    } else if code.is_parser_error() {
        "parse"
    } else if code.is_check_error() {
        "check"
    } else if code.is_runtime_error() {
        "runtime"
    } else if code.is_internal() {
        "internal"
    } else {
        "lint"
    }
}

pub fn error_code_for_kind(kind: &EvalErrorKind) -> ErrorCode {
    match kind {
        EvalErrorKind::TypeConformance { .. } => ErrorCode::E6001,
        EvalErrorKind::Selection { .. } => ErrorCode::E6002,
        EvalErrorKind::UnresolvedExtern { .. } | EvalErrorKind::ExternSignatureMismatch { .. } => {
            ErrorCode::E6003
        }
        EvalErrorKind::Aborted => ErrorCode::E6004,
        EvalErrorKind::ModelUnavailable { .. } => ErrorCode::E6005,
        EvalErrorKind::ExternFailed { .. } => ErrorCode::E6006,
        EvalErrorKind::IntegerOverflow { .. } => ErrorCode::E6008,
        EvalErrorKind::StackOverflow { .. } => ErrorCode::E6009,
        EvalErrorKind::FrameLifecycle { .. } => ErrorCode::E9001,
        EvalErrorKind::UndefinedVariable { .. }
        | EvalErrorKind::UndefinedFunction { .. }
        | EvalErrorKind::DuplicateDefinition { .. }
        | EvalErrorKind::ArityMismatch { .. }
        | EvalErrorKind::MissingEntryPoint { .. }
        | EvalErrorKind::InvalidEntryPoint { .. }
        | EvalErrorKind::TypeMismatch { .. }
        | EvalErrorKind::InvalidBinaryOp { .. }
        | EvalErrorKind::PlaceholderOutsideCall
        | EvalErrorKind::ContextNotInjectable
        | EvalErrorKind::ReturnInSelectHandler => ErrorCode::E6007,
    }
}

fn with_context(diag: Diagnostic, err: &EvalError) -> Diagnostic {
    let mut diag = diag.with_message(&err.message);
    if let Some(span) = err.span {
        diag = diag.with_label(span, label_for_kind(&err.kind));
    }
    for note in &err.notes {
        diag = diag.with_note(&note.message);
    }
    if let Some(bt) = &err.backtrace {
        if !bt.is_empty() {
            diag = diag.with_note(bt.to_string().trim_end());
        }
    }
    if let Some(help) = help_for_kind(&err.kind) {
        diag = diag.with_help(help);
    }
    diag
}

fn label_for_kind(kind: &EvalErrorKind) -> &'static str {
    match kind {
        EvalErrorKind::TypeConformance { .. } => "the model's answer for this call",
        EvalErrorKind::Selection { .. } => "while choosing a candidate here",
        EvalErrorKind::UnresolvedExtern { .. } | EvalErrorKind::ExternSignatureMismatch { .. } => {
            "declared here"
        }
        EvalErrorKind::ExternFailed { .. } => "in this extern call",
        EvalErrorKind::ModelUnavailable { .. } => "while asking the model here",
        EvalErrorKind::IntegerOverflow { .. } => "this operation overflowed",
        EvalErrorKind::StackOverflow { .. } => "this call exceeded the depth limit",
        EvalErrorKind::DuplicateDefinition { .. } => "defined again here",
        EvalErrorKind::Aborted => "cancelled here",
        _ => "runtime error here",
    }
}

fn help_for_kind(kind: &EvalErrorKind) -> Option<String> {
    match kind {
        EvalErrorKind::TypeConformance { expected, .. } => Some(format!(
            "the reply must be a plain {expected} value; nothing is coerced"
        )),
        EvalErrorKind::UnresolvedExtern { name } => Some(format!(
            "register a native function named `{name}` with the host"
        )),
        EvalErrorKind::StackOverflow { .. } => {
            Some("raise the limit with --max-depth or add a base case".to_string())
        }
        EvalErrorKind::InvalidEntryPoint { .. } => {
            Some("declare `fn main(ctx)` with only a Context parameter".to_string())
        }
        _ => None,
    }
}
