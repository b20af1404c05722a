//! Runtime values.

use std::fmt;

use cairn_ir::Type;

use crate::context_stack::FrameId;

/// A handle to a context frame as seen by Cairn code.
///
/// `Fresh` is the value of `Context::new()`: passing it to a call makes the
/// callee's frame a root. `Frame` refers to a frame that is live for as long
/// as the activation holding the handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContextRef {
    Fresh,
    Frame(FrameId),
}

/// A value produced by evaluating an expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Unit,
    Bool(bool),
    Int(i32),
    Str(String),
    Context(ContextRef),
}

impl Value {
    #[inline]
    pub fn string(text: impl Into<String>) -> Self {
        Value::Str(text.into())
    }

    /// The value of `Context::new()`.
    #[inline]
    pub fn new_context() -> Self {
        Value::Context(ContextRef::Fresh)
    }

    pub fn ty(&self) -> Type {
        match self {
            Value::Unit => Type::Unit,
            Value::Bool(_) => Type::Boolean,
            Value::Int(_) => Type::Int32,
            Value::Str(_) => Type::String,
            Value::Context(_) => Type::Context,
        }
    }

    /// Type name used in runtime error messages.
    pub fn type_name(&self) -> String {
        self.ty().to_string()
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Text appended to a frame when this value is injected.
    ///
    /// Context handles have no textual form and return `None`.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Context(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Whether this value conforms to a declared type.
    #[inline]
    pub fn conforms_to(&self, ty: Type) -> bool {
        self.ty() == ty
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => f.write_str("()"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Context(_) => f.write_str("<context>"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}
