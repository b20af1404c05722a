use std::fmt;

use cairn_diagnostic::{Diagnostic, ErrorCode};
use cairn_ir::{Span, Type};

/// Every analysis the linter runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Lint {
    UnusedVariable,
    UnreachableCode,
    InfiniteLoop,
    EmptyBlock,
    EmptyFunction,
    DuplicateInjection,
    PlaceholderOnlyCall,
    SingleClauseSelect,
    ConstantCondition,
    ShadowedVariable,
    OverwrittenValue,
    UnusedReturnValue,
}

impl Lint {
    pub fn name(self) -> &'static str {
        match self {
            Lint::UnusedVariable => "unused-variable",
            Lint::UnreachableCode => "unreachable-code",
            Lint::InfiniteLoop => "infinite-loop",
            Lint::EmptyBlock => "empty-block",
            Lint::EmptyFunction => "empty-function",
            Lint::DuplicateInjection => "duplicate-injection",
            Lint::PlaceholderOnlyCall => "placeholder-only-call",
            Lint::SingleClauseSelect => "single-clause-select",
            Lint::ConstantCondition => "constant-condition",
            Lint::ShadowedVariable => "shadowed-variable",
            Lint::OverwrittenValue => "overwritten-value",
            Lint::UnusedReturnValue => "unused-return-value",
        }
    }

    pub fn code(self) -> ErrorCode {
        match self {
            Lint::UnusedVariable => ErrorCode::W2001,
            Lint::UnreachableCode => ErrorCode::W2002,
            Lint::InfiniteLoop => ErrorCode::W2003,
            Lint::EmptyBlock => ErrorCode::W2004,
            Lint::EmptyFunction => ErrorCode::W2005,
            Lint::DuplicateInjection => ErrorCode::W2006,
            Lint::PlaceholderOnlyCall => ErrorCode::W2007,
            Lint::SingleClauseSelect => ErrorCode::W2008,
            Lint::ConstantCondition => ErrorCode::W2009,
            Lint::ShadowedVariable => ErrorCode::W2010,
            Lint::OverwrittenValue => ErrorCode::W2011,
            Lint::UnusedReturnValue => ErrorCode::W2012,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarningKind {
    UnusedVariable {
        name: String,
    },
    /// `after` is the statement that never completes.
    UnreachableCode {
        after: Span,
    },
    InfiniteLoop,
    /// `construct` is `if`, `else` or `while`.
    EmptyBlock {
        construct: &'static str,
    },
    EmptyFunction {
        name: String,
    },
    DuplicateInjection {
        first: Span,
    },
    PlaceholderOnlyCall {
        callee: String,
        count: usize,
    },
    SingleClauseSelect,
    ConstantCondition {
        construct: &'static str,
        value: bool,
    },
    ShadowedVariable {
        name: String,
        outer: Span,
    },
    /// The warning points at the dead write; `overwritten_at` is the next one.
    OverwrittenValue {
        name: String,
        overwritten_at: Span,
    },
    UnusedReturnValue {
        callee: String,
        ty: Type,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LintWarning {
    pub kind: WarningKind,
    pub span: Span,
}

impl LintWarning {
    pub fn new(kind: WarningKind, span: Span) -> Self {
        LintWarning { kind, span }
    }

    pub fn lint(&self) -> Lint {
        match self.kind {
            WarningKind::UnusedVariable { .. } => Lint::UnusedVariable,
            WarningKind::UnreachableCode { .. } => Lint::UnreachableCode,
            WarningKind::InfiniteLoop => Lint::InfiniteLoop,
            WarningKind::EmptyBlock { .. } => Lint::EmptyBlock,
            WarningKind::EmptyFunction { .. } => Lint::EmptyFunction,
            WarningKind::DuplicateInjection { .. } => Lint::DuplicateInjection,
            WarningKind::PlaceholderOnlyCall { .. } => Lint::PlaceholderOnlyCall,
            WarningKind::SingleClauseSelect => Lint::SingleClauseSelect,
            WarningKind::ConstantCondition { .. } => Lint::ConstantCondition,
            WarningKind::ShadowedVariable { .. } => Lint::ShadowedVariable,
            WarningKind::OverwrittenValue { .. } => Lint::OverwrittenValue,
            WarningKind::UnusedReturnValue { .. } => Lint::UnusedReturnValue,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.lint().code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::warning(self.code()).with_message(self.to_string());
        match &self.kind {
            WarningKind::UnusedVariable { name } => diag
                .with_label(self.span, "never read")
                .with_help(format!("prefix it with an underscore if this is intended: `_{name}`")),
            WarningKind::UnreachableCode { after } => diag
                .with_label(self.span, "this code never runs")
                .with_secondary_label(*after, "execution never continues past this statement"),
            WarningKind::InfiniteLoop => diag
                .with_label(self.span, "loop condition is always true")
                .with_note("the body has no `return`, so the loop only ends on a runtime error"),
            WarningKind::EmptyBlock { .. } => diag.with_label(self.span, "this block is empty"),
            WarningKind::EmptyFunction { .. } => diag
                .with_label(self.span, "nothing is injected before the result is produced")
                .with_note("every call goes straight to the model"),
            WarningKind::DuplicateInjection { first } => diag
                .with_label(self.span, "injected again here")
                .with_secondary_label(*first, "first injected here"),
            WarningKind::PlaceholderOnlyCall { count, .. } => {
                let noun = if *count == 1 { "argument is a placeholder" } else { "arguments are placeholders" };
                diag.with_label(self.span, format!("all {count} {noun}"))
            }
            WarningKind::SingleClauseSelect => diag
                .with_label(self.span, "only one tool to choose from")
                .with_help("call the tool directly instead"),
            WarningKind::ConstantCondition { value, .. } => {
                diag.with_label(self.span, format!("this condition is always {value}"))
            }
            WarningKind::ShadowedVariable { outer, .. } => diag
                .with_label(self.span, "inner variable declared here")
                .with_secondary_label(*outer, "outer variable declared here"),
            WarningKind::OverwrittenValue { overwritten_at, .. } => diag
                .with_label(self.span, "value never read")
                .with_secondary_label(*overwritten_at, "overwritten here"),
            WarningKind::UnusedReturnValue { ty, .. } => diag
                .with_label(self.span, "return value not used")
                .with_note(format!(
                    "a bare call only injects `String` results; this one returns `{ty}`"
                )),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            WarningKind::UnusedVariable { name } => write!(f, "unused variable `{name}`"),
            WarningKind::UnreachableCode { .. } => f.write_str("unreachable code"),
            WarningKind::InfiniteLoop => f.write_str("potential infinite loop"),
            WarningKind::EmptyBlock { construct } => write!(f, "empty `{construct}` block"),
            WarningKind::EmptyFunction { name } => write!(f, "function `{name}` has an empty body"),
            WarningKind::DuplicateInjection { .. } => {
                f.write_str("duplicate consecutive injection")
            }
            WarningKind::PlaceholderOnlyCall { callee, .. } => {
                write!(f, "call to `{callee}` uses only placeholders")
            }
            WarningKind::SingleClauseSelect => f.write_str("select with only one clause"),
            WarningKind::ConstantCondition { construct, .. } => {
                write!(f, "`{construct}` condition is constant")
            }
            WarningKind::ShadowedVariable { name, .. } => {
                write!(f, "variable `{name}` shadows an outer declaration")
            }
            WarningKind::OverwrittenValue { name, .. } => {
                write!(f, "value assigned to `{name}` is overwritten before being read")
            }
            WarningKind::UnusedReturnValue { callee, .. } => {
                write!(f, "return value of `{callee}` is ignored")
            }
        }
    }
}
