use std::fmt;

use serde::Serialize;

/// Stable identifier for every diagnostic.
///
/// The first digit names the phase:
/// - E0xxx: lexer
/// - E1xxx: parser
/// - E2xxx: static checks and program loading
/// - E6xxx: runtime
/// - E9xxx: internal defects
/// - W2xxx: static analysis warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum ErrorCode {
    // Lexer
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Integer literal out of `i32` range
    E0003,
    /// Invalid escape sequence
    E0004,

    // Parser
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Unclosed delimiter
    E1003,
    /// Nesting too deep
    E1004,
    /// Malformed `select` clause
    E1005,
    /// Unknown type name
    E1006,

    // Static checks
    /// Type mismatch
    E2001,
    /// Unknown variable
    E2002,
    /// Unknown function
    E2003,
    /// Wrong number of arguments
    E2004,
    /// Duplicate definition
    E2005,
    /// Placeholder outside an argument position
    E2006,
    /// Invalid use of a `Context` value
    E2007,
    /// `select` handlers disagree on their type
    E2008,
    /// `return` inside a `select` handler
    E2009,
    /// `extern` without a matching native binding
    E2010,

    // Runtime
    /// Model text does not conform to the target type
    E6001,
    /// Invalid tool selection
    E6002,
    /// Unresolved extern at dispatch
    E6003,
    /// Run aborted
    E6004,
    /// Model client failure
    E6005,
    /// Native extern reported a failure
    E6006,
    /// General evaluation error
    E6007,
    /// Integer overflow
    E6008,
    /// Recursion limit exceeded
    E6009,

    // Internal
    /// Context frame lifecycle violation
    E9001,

    // Static analysis warnings
    /// Unused variable
    W2001,
    /// Unreachable code
    W2002,
    /// Potential infinite loop
    W2003,
    /// Empty block
    W2004,
    /// Empty function body
    W2005,
    /// Duplicate consecutive injection
    W2006,
    /// Call made only of placeholders
    W2007,
    /// `select` with a single clause
    W2008,
    /// Constant condition
    W2009,
    /// Shadowed variable
    W2010,
    /// Value overwritten before being read
    W2011,
    /// Unused return value
    W2012,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E9001 => "E9001",
            ErrorCode::W2001 => "W2001",
            ErrorCode::W2002 => "W2002",
            ErrorCode::W2003 => "W2003",
            ErrorCode::W2004 => "W2004",
            ErrorCode::W2005 => "W2005",
            ErrorCode::W2006 => "W2006",
            ErrorCode::W2007 => "W2007",
            ErrorCode::W2008 => "W2008",
            ErrorCode::W2009 => "W2009",
            ErrorCode::W2010 => "W2010",
            ErrorCode::W2011 => "W2011",
            ErrorCode::W2012 => "W2012",
        }
    }

    pub fn is_lexer_error(self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_check_error(self) -> bool {
        self.as_str().starts_with("E2")
    }

    pub fn is_runtime_error(self) -> bool {
        self.as_str().starts_with("E6")
    }

    pub fn is_internal(self) -> bool {
        self.as_str().starts_with("E9")
    }

    pub fn is_warning(self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
