//! Runtime errors raised while executing a Cairn program.
//!
//! `EvalErrorKind` carries the structured data for each failure; factory
//! functions populate both `kind` and the human-readable `message`, and
//! [`EvalErrorKind::class`] sorts every kind into the coarse taxonomy hosts
//! match on.

use std::fmt;

use cairn_ir::{BinaryOp, Span, Type};

use crate::context_stack::FrameError;
use crate::model::{ConformanceError, ModelError, SelectionError};
use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Longest slice of a model response quoted in an error message.
const RESPONSE_EXCERPT: usize = 80;

/// Coarse error class.
///
/// Every `EvalErrorKind` maps to exactly one class. Hosts that only care
/// about "what went wrong" match on this instead of the full kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// A model response could not be parsed into the requested type.
    TypeConformance,
    /// A `select` decision was malformed, out of range or ill-typed.
    Selection,
    /// An extern was missing from the registry or registered with a
    /// different signature.
    UnresolvedExtern,
    /// A frame was used after release or released out of order.
    FrameLifecycle,
    /// The run was cancelled.
    Aborted,
    /// Everything else: undefined names, arithmetic, host failures.
    Runtime,
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Model protocol
    TypeConformance {
        expected: Type,
        response: String,
    },
    Selection {
        reason: String,
    },
    ModelUnavailable {
        message: String,
    },

    // Externs
    UnresolvedExtern {
        name: String,
    },
    ExternSignatureMismatch {
        name: String,
        detail: String,
    },
    ExternFailed {
        name: String,
        message: String,
    },

    // Frames
    FrameLifecycle {
        detail: String,
    },

    // Names and calls
    UndefinedVariable {
        name: String,
    },
    UndefinedFunction {
        name: String,
    },
    DuplicateDefinition {
        name: String,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    MissingEntryPoint {
        name: String,
    },
    InvalidEntryPoint {
        name: String,
        reason: String,
    },
    StackOverflow {
        depth: usize,
    },

    // Values
    TypeMismatch {
        expected: String,
        got: String,
    },
    InvalidBinaryOp {
        op: BinaryOp,
        left: String,
        right: String,
    },
    IntegerOverflow {
        operation: String,
    },
    PlaceholderOutsideCall,
    ContextNotInjectable,
    ReturnInSelectHandler,

    Aborted,
}

impl EvalErrorKind {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::TypeConformance { .. } => ErrorClass::TypeConformance,
            Self::Selection { .. } => ErrorClass::Selection,
            Self::UnresolvedExtern { .. } | Self::ExternSignatureMismatch { .. } => {
                ErrorClass::UnresolvedExtern
            }
            Self::FrameLifecycle { .. } => ErrorClass::FrameLifecycle,
            Self::Aborted => ErrorClass::Aborted,
            Self::ModelUnavailable { .. }
            | Self::ExternFailed { .. }
            | Self::UndefinedVariable { .. }
            | Self::UndefinedFunction { .. }
            | Self::DuplicateDefinition { .. }
            | Self::ArityMismatch { .. }
            | Self::MissingEntryPoint { .. }
            | Self::InvalidEntryPoint { .. }
            | Self::StackOverflow { .. }
            | Self::TypeMismatch { .. }
            | Self::InvalidBinaryOp { .. }
            | Self::IntegerOverflow { .. }
            | Self::PlaceholderOutsideCall
            | Self::ContextNotInjectable
            | Self::ReturnInSelectHandler => ErrorClass::Runtime,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeConformance { expected, response } => {
                write!(
                    f,
                    "model response does not conform to {expected}: {:?}",
                    excerpt(response)
                )
            }
            Self::Selection { reason } => write!(f, "invalid select decision: {reason}"),
            Self::ModelUnavailable { message } => write!(f, "model invocation failed: {message}"),

            Self::UnresolvedExtern { name } => {
                write!(f, "extern function `{name}` has no registered implementation")
            }
            Self::ExternSignatureMismatch { name, detail } => {
                write!(f, "extern function `{name}` is registered with a different signature: {detail}")
            }
            Self::ExternFailed { name, message } => {
                write!(f, "extern function `{name}` failed: {message}")
            }

            Self::FrameLifecycle { detail } => write!(f, "context frame misuse: {detail}"),

            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::UndefinedFunction { name } => write!(f, "undefined function: {name}"),
            Self::DuplicateDefinition { name } => {
                write!(f, "`{name}` is defined more than once")
            }
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::MissingEntryPoint { name } => write!(f, "no function named `{name}`"),
            Self::InvalidEntryPoint { name, reason } => {
                write!(f, "`{name}` cannot be used as an entry point: {reason}")
            }
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }

            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::InvalidBinaryOp { op, left, right } => write!(
                f,
                "operator `{}` cannot be applied to {left} and {right}",
                op.as_symbol()
            ),
            Self::IntegerOverflow { operation } => {
                write!(f, "integer overflow in {operation}")
            }
            Self::PlaceholderOutsideCall => {
                write!(f, "`_` can only appear as a call argument")
            }
            Self::ContextNotInjectable => write!(f, "a Context cannot be injected into a frame"),
            Self::ReturnInSelectHandler => {
                write!(f, "`return` is not allowed inside a select handler")
            }

            Self::Aborted => write!(f, "execution was cancelled"),
        }
    }
}

fn excerpt(response: &str) -> String {
    match response.char_indices().nth(RESPONSE_EXCERPT) {
        Some((cut, _)) => format!("{}...", &response[..cut]),
        None => response.to_string(),
    }
}

/// Additional context note attached to an error.
#[derive(Clone, Debug)]
pub struct EvalNote {
    pub message: String,
    pub span: Option<Span>,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span: Some(span),
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug)]
pub struct BacktraceFrame {
    /// Function name.
    pub name: String,
    /// Source location of the call site.
    pub span: Option<Span>,
}

/// Immutable snapshot of the call stack at an error site.
#[derive(Clone, Debug, Default)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "call backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()` for factory
    /// created errors.
    pub message: String,
    /// Source location where the error occurred.
    pub span: Option<Span>,
    /// Call chain at the error site, most recent call first.
    pub backtrace: Option<EvalBacktrace>,
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            backtrace: None,
            notes: Vec::new(),
        }
    }

    #[inline]
    pub fn class(&self) -> ErrorClass {
        self.kind.class()
    }

    /// Attach a source span unless one is already present.
    ///
    /// The innermost span wins: errors are raised close to their cause and
    /// re-wrapped on the way out.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<FrameError> for EvalError {
    #[cold]
    fn from(err: FrameError) -> Self {
        EvalError::from_kind(EvalErrorKind::FrameLifecycle {
            detail: err.to_string(),
        })
    }
}

impl From<ConformanceError> for EvalError {
    #[cold]
    fn from(err: ConformanceError) -> Self {
        type_conformance(err.expected, &err.response)
    }
}

impl From<SelectionError> for EvalError {
    #[cold]
    fn from(err: SelectionError) -> Self {
        selection_failed(err)
    }
}

// Model protocol

/// The model's text could not be parsed as `expected`.
#[cold]
pub fn type_conformance(expected: Type, response: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeConformance {
        expected,
        response: response.to_string(),
    })
}

#[cold]
pub fn selection_failed(reason: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Selection {
        reason: reason.to_string(),
    })
}

#[cold]
pub fn model_unavailable(err: &ModelError) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModelUnavailable {
        message: err.to_string(),
    })
}

// Externs

#[cold]
pub fn unresolved_extern(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnresolvedExtern {
        name: name.to_string(),
    })
}

#[cold]
pub fn extern_signature_mismatch(name: &str, detail: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExternSignatureMismatch {
        name: name.to_string(),
        detail: detail.into(),
    })
}

#[cold]
pub fn extern_failed(name: &str, message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ExternFailed {
        name: name.to_string(),
        message: message.into(),
    })
}

// Names and calls

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn duplicate_definition(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateDefinition {
        name: name.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn missing_entry_point(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingEntryPoint {
        name: name.to_string(),
    })
}

#[cold]
pub fn invalid_entry_point(name: &str, reason: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidEntryPoint {
        name: name.to_string(),
        reason: reason.into(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

// Values

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

#[cold]
pub fn invalid_binary_op(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidBinaryOp {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn placeholder_outside_call() -> EvalError {
    EvalError::from_kind(EvalErrorKind::PlaceholderOutsideCall)
}

#[cold]
pub fn context_not_injectable() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ContextNotInjectable)
}

#[cold]
pub fn return_in_select_handler() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReturnInSelectHandler)
}

#[cold]
pub fn aborted() -> EvalError {
    EvalError::from_kind(EvalErrorKind::Aborted)
}

#[cfg(test)]
mod tests;
