//! `InterpreterBuilder` for configuring a run.

use super::{CallPhase, InvocationStats, Interpreter};
use crate::call_stack::CallStack;
use crate::cancel::CancelToken;
use crate::context_stack::ContextStack;
use crate::environment::Environment;
use crate::model::ModelClient;
use crate::program::Program;

pub struct InterpreterBuilder<'p> {
    program: &'p Program,
    model: &'p dyn ModelClient,
    max_depth: Option<usize>,
    cancel: Option<CancelToken>,
}

impl<'p> InterpreterBuilder<'p> {
    pub fn new(program: &'p Program, model: &'p dyn ModelClient) -> Self {
        Self {
            program,
            model,
            max_depth: None,
            cancel: None,
        }
    }

    /// Limit the depth of nested user calls. Unlimited by default.
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Share an abort flag with the host.
    #[must_use]
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn build(self) -> Interpreter<'p> {
        Interpreter {
            program: self.program,
            model: self.model,
            contexts: ContextStack::new(),
            call_stack: CallStack::new(self.max_depth),
            cancel: self.cancel.unwrap_or_default(),
            stats: InvocationStats::default(),
            env: Environment::new(),
            frame: None,
            function: None,
            phase: CallPhase::Exited,
        }
    }
}
