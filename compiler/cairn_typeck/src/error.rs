use std::fmt;

use cairn_diagnostic::{Diagnostic, ErrorCode};
use cairn_ir::{BinaryOp, Span, Type};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeErrorKind {
    Mismatch {
        expected: Type,
        found: Type,
        context: String,
    },
    UnknownVariable {
        name: String,
    },
    UnknownFunction {
        name: String,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    Duplicate {
        name: String,
        first: Span,
    },
    InvalidOperator {
        op: BinaryOp,
        left: Type,
        right: Type,
    },
    PlaceholderOutsideCall,
    PlaceholderForContext {
        param: String,
    },
    ContextReturn {
        function: String,
    },
    ContextInExtern {
        function: String,
    },
    MultipleContextParams {
        function: String,
    },
    InjectContext,
    SelectHandlerMismatch {
        expected: Type,
        found: Type,
    },
    ReturnInSelectHandler,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeError {
    pub kind: TypeErrorKind,
    pub span: Span,
}

impl TypeError {
    pub fn code(&self) -> ErrorCode {
        match self.kind {
            TypeErrorKind::Mismatch { .. } | TypeErrorKind::InvalidOperator { .. } => {
                ErrorCode::E2001
            }
            TypeErrorKind::UnknownVariable { .. } => ErrorCode::E2002,
            TypeErrorKind::UnknownFunction { .. } => ErrorCode::E2003,
            TypeErrorKind::ArityMismatch { .. } => ErrorCode::E2004,
            TypeErrorKind::Duplicate { .. } => ErrorCode::E2005,
            TypeErrorKind::PlaceholderOutsideCall | TypeErrorKind::PlaceholderForContext { .. } => {
                ErrorCode::E2006
            }
            TypeErrorKind::ContextReturn { .. }
            | TypeErrorKind::ContextInExtern { .. }
            | TypeErrorKind::MultipleContextParams { .. }
            | TypeErrorKind::InjectContext => ErrorCode::E2007,
            TypeErrorKind::SelectHandlerMismatch { .. } => ErrorCode::E2008,
            TypeErrorKind::ReturnInSelectHandler => ErrorCode::E2009,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        if let TypeErrorKind::Mismatch {
            expected,
            found,
            context,
        } = &self.kind
        {
            return cairn_diagnostic::type_mismatch(
                self.span,
                &expected.to_string(),
                &found.to_string(),
                context,
            );
        }
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match &self.kind {
            TypeErrorKind::Duplicate { first, .. } => diag
                .with_label(self.span, "redefined here")
                .with_secondary_label(*first, "first defined here"),
            TypeErrorKind::PlaceholderOutsideCall => diag
                .with_label(self.span, "not a call argument")
                .with_note("`_` asks the model to fill a parameter, so it only works as an argument"),
            TypeErrorKind::ContextInExtern { .. } => diag
                .with_label(self.span, "declared here")
                .with_note("native functions run outside the context stack"),
            TypeErrorKind::ReturnInSelectHandler => diag
                .with_label(self.span, "inside a select handler")
                .with_help("return the whole select instead: `return select { ... }`"),
            _ => diag.with_label(self.span, "here"),
        }
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeErrorKind::Mismatch {
                expected, found, ..
            } => write!(f, "type mismatch: expected `{expected}`, found `{found}`"),
            TypeErrorKind::UnknownVariable { name } => write!(f, "unknown variable `{name}`"),
            TypeErrorKind::UnknownFunction { name } => write!(f, "unknown function `{name}`"),
            TypeErrorKind::ArityMismatch {
                name,
                expected,
                found,
            } => {
                let noun = if *expected == 1 { "argument" } else { "arguments" };
                write!(f, "`{name}` takes {expected} {noun}, but {found} were given")
            }
            TypeErrorKind::Duplicate { name, .. } => {
                write!(f, "`{name}` is defined more than once")
            }
            TypeErrorKind::InvalidOperator { op, left, right } => write!(
                f,
                "operator `{}` cannot be applied to `{left}` and `{right}`",
                op.as_symbol()
            ),
            TypeErrorKind::PlaceholderOutsideCall => {
                write!(f, "`_` can only be used as a call argument")
            }
            TypeErrorKind::PlaceholderForContext { param } => {
                write!(f, "the model cannot fill `Context` parameter `{param}`")
            }
            TypeErrorKind::ContextReturn { function } => {
                write!(f, "`{function}` cannot return a `Context`")
            }
            TypeErrorKind::ContextInExtern { function } => {
                write!(f, "extern `{function}` cannot take or return a `Context`")
            }
            TypeErrorKind::MultipleContextParams { function } => {
                write!(f, "`{function}` declares more than one `Context` parameter")
            }
            TypeErrorKind::InjectContext => write!(f, "a `Context` cannot be injected"),
            TypeErrorKind::SelectHandlerMismatch { expected, found } => write!(
                f,
                "select handlers disagree: expected `{expected}`, found `{found}`"
            ),
            TypeErrorKind::ReturnInSelectHandler => {
                write!(f, "`return` is not allowed inside a select handler")
            }
        }
    }
}
