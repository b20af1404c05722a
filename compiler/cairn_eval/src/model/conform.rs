//! Conversion of raw model text into typed values.

use cairn_ir::Type;

use crate::value::Value;

/// The response could not be read as the target type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot read {response:?} as {expected}")]
pub struct ConformanceError {
    pub expected: Type,
    pub response: String,
}

/// Parse `raw` into a value of type `target`.
///
/// | target    | accepted text                                 |
/// |-----------|-----------------------------------------------|
/// | `String`  | the raw text, verbatim                        |
/// | `Boolean` | `true` / `false`, ASCII case-insensitive      |
/// | `i32`     | a base-10 integer in range                    |
/// | `()`      | anything                                      |
/// | `Context` | nothing                                       |
///
/// Booleans and integers ignore surrounding whitespace. Nothing else is
/// coerced.
pub fn parse_response(raw: &str, target: Type) -> Result<Value, ConformanceError> {
    let reject = || ConformanceError {
        expected: target,
        response: raw.to_string(),
    };
    match target {
        Type::String => Ok(Value::Str(raw.to_string())),
        Type::Unit => Ok(Value::Unit),
        Type::Boolean => {
            let text = raw.trim();
            if text.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if text.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(reject())
            }
        }
        Type::Int32 => raw.trim().parse::<i32>().map(Value::Int).map_err(|_| reject()),
        Type::Context => Err(reject()),
    }
}
