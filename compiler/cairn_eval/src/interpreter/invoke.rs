//! Requests to the model client.

use cairn_ir::{Function, Name, Param, Span, Type};

use super::{CallSite, Interpreter};
use crate::context_stack::FrameId;
use crate::errors::{aborted, model_unavailable, EvalError, EvalResult};
use crate::model::{
    parse_response, parse_selection, Candidate, InvocationMode, ModelError, ModelRequest,
    SelectionDecision, Target,
};

impl<'p> Interpreter<'p> {
    /// ParamFill: ask for `param` of `callee` from the caller's frame.
    pub(super) fn fill_parameter(&mut self, callee: Name, param: &Param, span: Span) -> EvalResult {
        let mode = InvocationMode::ParamFill {
            function: self.name(callee).to_string(),
            parameter: self.name(param.name).to_string(),
        };
        let frame = self.active_frame()?;
        self.invoke(frame, param.ty, mode)
            .map_err(|err| err.with_span(span))
    }

    /// ImplicitReturn, or Condition for a `Boolean` function guarding an
    /// `if`/`while`, against the returning function's own frame.
    pub(super) fn invoke_implicit(&mut self, func: &Function, site: CallSite) -> EvalResult {
        let function = self.name(func.name).to_string();
        let mode = if site == CallSite::Condition && func.ret == Type::Boolean {
            InvocationMode::Condition { function }
        } else {
            InvocationMode::ImplicitReturn { function }
        };
        let frame = self.active_frame()?;
        self.invoke(frame, func.ret, mode)
    }

    fn invoke(&mut self, frame: FrameId, target: Type, mode: InvocationMode) -> EvalResult {
        let request = ModelRequest {
            mode,
            items: self.contexts.materialize(frame)?,
            target: Target::Type(target),
        };
        let raw = self.send(&request)?;
        let value = parse_response(&raw, target)?;
        tracing::debug!(mode = request.mode.label(), %value, "model response accepted");
        Ok(value)
    }

    /// Select: ask for a decision among `candidates` from the active frame.
    pub(super) fn choose(
        &mut self,
        candidates: Vec<Candidate>,
        span: Span,
    ) -> Result<SelectionDecision, EvalError> {
        let frame = self.active_frame()?;
        let request = ModelRequest {
            mode: InvocationMode::Select,
            items: self.contexts.materialize(frame)?,
            target: Target::Selection(candidates),
        };
        let raw = self.send(&request).map_err(|err| err.with_span(span))?;
        let decision = parse_selection(&raw, request.candidates())
            .map_err(|err| EvalError::from(err).with_span(span))?;
        tracing::info!(
            index = decision.index,
            choice = %request.candidates()[decision.index].function,
            "select decision"
        );
        Ok(decision)
    }

    fn send(&mut self, request: &ModelRequest) -> Result<String, EvalError> {
        self.stats.record(&request.mode);
        tracing::debug!(
            mode = request.mode.label(),
            items = request.items.len(),
            target = ?request.target_type(),
            "invoking model"
        );
        self.model.send(request).map_err(|err| match err {
            ModelError::Cancelled => aborted(),
            other => model_unavailable(&other),
        })
    }
}
