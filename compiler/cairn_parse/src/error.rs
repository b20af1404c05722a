use std::fmt;

use cairn_diagnostic::{Diagnostic, ErrorCode};
use cairn_ir::Span;

/// What the parser was working on when an error occurred, for
/// "while parsing ..." notes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorContext {
    FunctionDef,
    ExternDecl,
    Parameters,
    TypeAnnotation,
    Block,
    Statement,
    Expression,
    SelectClause,
}

impl ErrorContext {
    pub fn description(self) -> &'static str {
        match self {
            ErrorContext::FunctionDef => "a function definition",
            ErrorContext::ExternDecl => "an extern declaration",
            ErrorContext::Parameters => "a parameter list",
            ErrorContext::TypeAnnotation => "a type annotation",
            ErrorContext::Block => "a block",
            ErrorContext::Statement => "a statement",
            ErrorContext::Expression => "an expression",
            ErrorContext::SelectClause => "a select clause",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedToken { expected: String, found: String },
    UnexpectedEof { expected: String },
    ExpectedExpression { found: String },
    UnclosedDelimiter { delimiter: char, open: Span },
    NestingTooDeep,
    /// A `select` arm whose left side is not a call.
    InvalidSelectClause,
    UnknownType { name: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub context: Option<ErrorContext>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError {
            kind,
            span,
            context: None,
        }
    }

    /// Record the innermost construct being parsed. Outer contexts do not
    /// overwrite an inner one.
    #[must_use]
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            ParseErrorKind::UnexpectedToken { .. } | ParseErrorKind::UnexpectedEof { .. } => {
                ErrorCode::E1001
            }
            ParseErrorKind::ExpectedExpression { .. } => ErrorCode::E1002,
            ParseErrorKind::UnclosedDelimiter { .. } => ErrorCode::E1003,
            ParseErrorKind::NestingTooDeep => ErrorCode::E1004,
            ParseErrorKind::InvalidSelectClause => ErrorCode::E1005,
            ParseErrorKind::UnknownType { .. } => ErrorCode::E1006,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(self.to_string());
        diag = match &self.kind {
            ParseErrorKind::UnclosedDelimiter { delimiter, open } => diag
                .with_label(self.span, "expected a closing delimiter here")
                .with_secondary_label(*open, format!("`{delimiter}` opened here")),
            ParseErrorKind::InvalidSelectClause => diag
                .with_label(self.span, "expected a function call")
                .with_help("write each arm as `tool(args) as name => handler`"),
            ParseErrorKind::UnknownType { .. } => diag
                .with_label(self.span, "unknown type")
                .with_note("types are `String`, `Boolean`, `i32`, `Context` and `()`"),
            _ => diag.with_label(self.span, "here"),
        };
        if let Some(context) = self.context {
            diag = diag.with_note(format!("while parsing {}", context.description()));
        }
        diag
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ParseErrorKind::UnexpectedEof { expected } => {
                write!(f, "expected {expected}, found end of file")
            }
            ParseErrorKind::ExpectedExpression { found } => {
                write!(f, "expected an expression, found {found}")
            }
            ParseErrorKind::UnclosedDelimiter { delimiter, .. } => {
                write!(f, "unclosed delimiter `{delimiter}`")
            }
            ParseErrorKind::NestingTooDeep => write!(f, "nesting is too deep"),
            ParseErrorKind::InvalidSelectClause => {
                write!(f, "each select arm must start with a function call")
            }
            ParseErrorKind::UnknownType { name } => write!(f, "unknown type `{name}`"),
        }
    }
}
