use std::fmt;

/// Declared type of a parameter, binding or return value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    /// `()`: no meaningful value.
    Unit,
    Boolean,
    Int32,
    String,
    /// Opaque handle to a context frame.
    Context,
}

impl Type {
    /// Resolve a type keyword as written in source. `()` is handled by the
    /// parser since it is two tokens.
    pub fn from_keyword(name: &str) -> Option<Type> {
        match name {
            "String" => Some(Type::String),
            "Boolean" => Some(Type::Boolean),
            "i32" => Some(Type::Int32),
            "Context" => Some(Type::Context),
            _ => None,
        }
    }

    /// Whether model text can ever be parsed into this type.
    #[inline]
    pub fn is_model_parsable(self) -> bool {
        !matches!(self, Type::Context)
    }

    /// Whether values of this type can be stringified into a context frame.
    #[inline]
    pub fn is_injectable(self) -> bool {
        !matches!(self, Type::Context)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Type::Unit => "()",
            Type::Boolean => "Boolean",
            Type::Int32 => "i32",
            Type::String => "String",
            Type::Context => "Context",
        };
        f.write_str(text)
    }
}
