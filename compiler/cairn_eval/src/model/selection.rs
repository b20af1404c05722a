//! Decoding of `select` decisions.
//!
//! A decision is a JSON object `{"selection": <index>, "arguments": {...}}`
//! naming a candidate by its zero-based position and supplying a value for
//! each of that candidate's placeholder parameters. A bare integer is
//! accepted when the chosen candidate has no placeholders.

use rustc_hash::FxHashMap;
use serde::Deserialize;

use cairn_ir::Type;

use super::Candidate;
use crate::value::Value;

/// A validated choice among the offered candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionDecision {
    /// Zero-based candidate index, always in range.
    pub index: usize,
    /// One value per placeholder parameter of the chosen candidate, keyed by
    /// parameter name and already typed.
    pub arguments: FxHashMap<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("response is not a selection: {0}")]
    Malformed(String),
    #[error("selection {index} is out of range for {count} candidate(s)")]
    OutOfRange { index: i64, count: usize },
    #[error("candidate `{candidate}` needs arguments for its `_` parameters")]
    ArgumentsRequired { candidate: String },
    #[error("no value for parameter `{param}` of `{candidate}`")]
    MissingArgument { candidate: String, param: String },
    #[error("`{candidate}` has no placeholder parameter named `{param}`")]
    UnexpectedArgument { candidate: String, param: String },
    #[error("parameter `{param}` expects {expected}, got {found}")]
    IllTyped {
        param: String,
        expected: Type,
        found: String,
    },
}

#[derive(Deserialize)]
struct RawDecision {
    selection: i64,
    #[serde(default)]
    arguments: serde_json::Map<String, serde_json::Value>,
}

/// Parse and validate a decision against the offered candidates.
pub fn parse_selection(
    raw: &str,
    candidates: &[Candidate],
) -> Result<SelectionDecision, SelectionError> {
    let text = strip_code_fence(raw.trim());

    let decision = match text.parse::<i64>() {
        Ok(selection) => RawDecision {
            selection,
            arguments: serde_json::Map::new(),
        },
        Err(_) => serde_json::from_str::<RawDecision>(text)
            .map_err(|e| SelectionError::Malformed(e.to_string()))?,
    };

    let index = usize::try_from(decision.selection)
        .ok()
        .filter(|&i| i < candidates.len())
        .ok_or(SelectionError::OutOfRange {
            index: decision.selection,
            count: candidates.len(),
        })?;
    let candidate = &candidates[index];

    if decision.arguments.is_empty() && candidate.has_placeholders() {
        return Err(SelectionError::ArgumentsRequired {
            candidate: candidate.function.clone(),
        });
    }

    for name in decision.arguments.keys() {
        if !candidate.placeholders().any(|p| &p.name == name) {
            return Err(SelectionError::UnexpectedArgument {
                candidate: candidate.function.clone(),
                param: name.clone(),
            });
        }
    }

    let mut arguments = FxHashMap::default();
    for param in candidate.placeholders() {
        let json = decision
            .arguments
            .get(&param.name)
            .ok_or_else(|| SelectionError::MissingArgument {
                candidate: candidate.function.clone(),
                param: param.name.clone(),
            })?;
        let value = typed_argument(json, param.ty).ok_or_else(|| SelectionError::IllTyped {
            param: param.name.clone(),
            expected: param.ty,
            found: json.to_string(),
        })?;
        arguments.insert(param.name.clone(), value);
    }

    Ok(SelectionDecision { index, arguments })
}

/// Convert one JSON argument without coercion between kinds.
fn typed_argument(json: &serde_json::Value, ty: Type) -> Option<Value> {
    match (ty, json) {
        (Type::String, serde_json::Value::String(s)) => Some(Value::Str(s.clone())),
        (Type::Boolean, serde_json::Value::Bool(b)) => Some(Value::Bool(*b)),
        (Type::Int32, serde_json::Value::Number(n)) => {
            n.as_i64().and_then(|n| i32::try_from(n).ok()).map(Value::Int)
        }
        (Type::Unit, serde_json::Value::Null) => Some(Value::Unit),
        _ => None,
    }
}

/// Models often wrap JSON in a Markdown fence; accept ```json ... ```.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
