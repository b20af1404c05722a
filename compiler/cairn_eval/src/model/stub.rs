//! Deterministic model clients for tests and offline runs.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde_json::json;

use cairn_ir::Type;

use super::{ModelClient, ModelError, ModelRequest, Target};

/// Answers every typed request with the rendered frame text.
///
/// For a selection it picks the first candidate, filling `String`
/// placeholders with the frame text and other placeholders with a zero
/// value of their type.
#[derive(Copy, Clone, Debug, Default)]
pub struct EchoModel;

impl ModelClient for EchoModel {
    fn send(&self, request: &ModelRequest) -> Result<String, ModelError> {
        let context = request.context_text();
        match &request.target {
            Target::Type(_) => Ok(context),
            Target::Selection(candidates) => {
                let Some(first) = candidates.first() else {
                    return Ok("0".to_string());
                };
                let mut arguments = serde_json::Map::new();
                for param in first.placeholders() {
                    let value = match param.ty {
                        Type::String => json!(context),
                        Type::Boolean => json!(false),
                        Type::Int32 => json!(0),
                        Type::Unit | Type::Context => serde_json::Value::Null,
                    };
                    arguments.insert(param.name.clone(), value);
                }
                Ok(json!({ "selection": 0, "arguments": arguments }).to_string())
            }
        }
    }
}

/// Replays queued responses in order and records every request.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedModel {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedModel {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue one more response.
    pub fn push(&self, response: impl Into<String>) {
        self.responses.lock().push_back(response.into());
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().len()
    }
}

impl ModelClient for ScriptedModel {
    fn send(&self, request: &ModelRequest) -> Result<String, ModelError> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .ok_or(ModelError::Exhausted(request.mode.label()))
    }
}

/// Adapts a closure into a model client.
pub struct FnModel<F>(pub F);

impl<F> FnModel<F>
where
    F: Fn(&ModelRequest) -> Result<String, ModelError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        FnModel(f)
    }
}

impl<F> ModelClient for FnModel<F>
where
    F: Fn(&ModelRequest) -> Result<String, ModelError> + Send + Sync,
{
    fn send(&self, request: &ModelRequest) -> Result<String, ModelError> {
        (self.0)(request)
    }
}
