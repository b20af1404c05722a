//! Model invocation protocol.
//!
//! The interpreter never talks to a provider directly. It builds a
//! [`ModelRequest`] from a materialized frame and a target, hands it to a
//! [`ModelClient`], and parses the raw text that comes back:
//!
//! - [`parse_response`] turns text into a [`Value`] of the target type
//! - [`parse_selection`] turns text into a [`SelectionDecision`] for `select`
//!
//! Both are pure; transport, retries and rate limits belong to the client.

mod conform;
mod selection;
mod stub;

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use cairn_ir::Type;

use crate::context_stack::ContentItem;

pub use conform::{parse_response, ConformanceError};
pub use selection::{parse_selection, SelectionDecision, SelectionError};
pub use stub::{EchoModel, FnModel, ScriptedModel};

/// Why a model was asked for text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvocationMode {
    /// A function body ran to completion without `return`.
    ImplicitReturn { function: String },
    /// A call site passed `_` for `parameter`.
    ParamFill { function: String, parameter: String },
    /// The implicit return of a `Boolean` function used as an `if`/`while`
    /// guard.
    Condition { function: String },
    /// A `select` expression needs a decision.
    Select,
}

impl InvocationMode {
    /// Short name used in logs and statistics.
    pub fn label(&self) -> &'static str {
        match self {
            InvocationMode::ImplicitReturn { .. } => "implicit_return",
            InvocationMode::ParamFill { .. } => "param_fill",
            InvocationMode::Condition { .. } => "condition",
            InvocationMode::Select => "select",
        }
    }
}

fn serialize_type<S: Serializer>(ty: &Type, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(ty)
}

/// One parameter of a `select` candidate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CandidateParam {
    pub name: String,
    #[serde(rename = "type", serialize_with = "serialize_type")]
    pub ty: Type,
    /// The model must supply this value.
    pub placeholder: bool,
}

/// A call offered to the model by `select`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub function: String,
    pub params: Vec<CandidateParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Candidate {
    pub fn placeholders(&self) -> impl Iterator<Item = &CandidateParam> {
        self.params.iter().filter(|p| p.placeholder)
    }

    pub fn has_placeholders(&self) -> bool {
        self.params.iter().any(|p| p.placeholder)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", param.name, param.ty)?;
            if param.placeholder {
                f.write_str(" = _")?;
            }
        }
        f.write_str(")")
    }
}

/// What the response must be parsed into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Type(#[serde(serialize_with = "serialize_type")] Type),
    Selection(Vec<Candidate>),
}

/// Everything a client needs to answer one invocation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelRequest {
    pub mode: InvocationMode,
    /// Materialized frame, root first.
    pub items: Vec<ContentItem>,
    pub target: Target,
}

impl ModelRequest {
    /// The frame as plain text: each item with trailing whitespace removed,
    /// one per line.
    pub fn context_text(&self) -> String {
        let mut text = String::new();
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(item.text.trim_end());
        }
        text
    }

    pub fn target_type(&self) -> Option<Type> {
        match &self.target {
            Target::Type(ty) => Some(*ty),
            Target::Selection(_) => None,
        }
    }

    pub fn candidates(&self) -> &[Candidate] {
        match &self.target {
            Target::Selection(candidates) => candidates,
            Target::Type(_) => &[],
        }
    }

    /// Instruction appended after the frame text.
    pub fn instruction(&self) -> String {
        match &self.target {
            Target::Selection(candidates) => selection_instruction(candidates),
            Target::Type(ty) => {
                let ask = match &self.mode {
                    InvocationMode::ParamFill {
                        function,
                        parameter,
                    } => format!("Provide the `{parameter}` argument for `{function}`."),
                    InvocationMode::Condition { function } => {
                        format!("Decide whether `{function}` holds.")
                    }
                    InvocationMode::ImplicitReturn { function } => {
                        format!("Produce the result of `{function}`.")
                    }
                    InvocationMode::Select => String::new(),
                };
                format!("{ask} {}", type_hint(*ty)).trim().to_string()
            }
        }
    }

    /// Frame text followed by the instruction.
    pub fn prompt(&self) -> String {
        let context = self.context_text();
        if context.is_empty() {
            self.instruction()
        } else {
            format!("{context}\n\n{}", self.instruction())
        }
    }
}

fn type_hint(ty: Type) -> &'static str {
    match ty {
        Type::String => "Respond with the text only.",
        Type::Boolean => "Respond with only true or false.",
        Type::Int32 => "Respond with only a whole number.",
        Type::Unit => "Any response is accepted.",
        Type::Context => "",
    }
}

fn selection_instruction(candidates: &[Candidate]) -> String {
    let mut text = String::from(
        "SELECT: Choose one of the following options. Respond with ONLY a JSON object \
         {\"selection\": <number>, \"arguments\": {<name>: <value>}} giving a value for \
         every parameter marked `_`:\n",
    );
    for (index, candidate) in candidates.iter().enumerate() {
        text.push_str(&format!("{index}: {candidate}"));
        if let Some(doc) = &candidate.doc {
            text.push_str("  # ");
            text.push_str(&doc.replace('\n', " "));
        }
        text.push('\n');
    }
    text
}

/// Failure to obtain any text from the model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("transport failed: {0}")]
    Transport(String),
    #[error("no scripted response left for {0} request")]
    Exhausted(&'static str),
    #[error("the model interaction was cancelled")]
    Cancelled,
}

/// A blocking round trip to a language model.
pub trait ModelClient: Send + Sync {
    fn send(&self, request: &ModelRequest) -> Result<String, ModelError>;
}

impl<T: ModelClient + ?Sized> ModelClient for &T {
    fn send(&self, request: &ModelRequest) -> Result<String, ModelError> {
        (**self).send(request)
    }
}

impl<T: ModelClient + ?Sized> ModelClient for Box<T> {
    fn send(&self, request: &ModelRequest) -> Result<String, ModelError> {
        (**self).send(request)
    }
}

impl<T: ModelClient + ?Sized> ModelClient for Arc<T> {
    fn send(&self, request: &ModelRequest) -> Result<String, ModelError> {
        (**self).send(request)
    }
}
