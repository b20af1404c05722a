//! Tree-walking interpreter for Cairn agents.
//!
//! One `Interpreter` is one run: it owns the [`ContextStack`] of frames, the
//! live [`CallStack`] and the bindings of the call currently executing.
//! Every user call moves through a fixed sequence of phases:
//!
//! - `Entering`: arguments are resolved in the caller, `_` placeholders are
//!   filled by the model from the caller's frame, and the callee's frame is
//!   allocated (a child of the caller's, or a root for `Context::new()`)
//! - `BodyExecuting`: statements run in order against the callee's frame
//! - `Returning`: an explicit `return` yields its value; falling off the end
//!   asks the model once for a value of the declared return type
//! - `Exited`: the frame and bindings are released and the caller's are
//!   restored
//!
//! The caller's activation is parked while a callee runs and put back by an
//! RAII guard, so frames are released on every exit path: normal return,
//! runtime error or cancellation.
//!
//! - `call`: dispatch and the phase sequence
//! - `stmt`: statements, injection, conditions
//! - `expr`: expressions and operators
//! - `select`: tool dispatch
//! - `invoke`: requests to the model client

mod builder;
mod call;
mod expr;
mod invoke;
mod scope_guard;
mod select;
mod stmt;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use smallvec::SmallVec;

use cairn_ir::{Function, Name, Type};

use crate::call_stack::CallStack;
use crate::cancel::CancelToken;
use crate::context_stack::{ContextStack, FrameError, FrameId};
use crate::environment::Environment;
use crate::errors::{
    aborted, arity_mismatch, invalid_entry_point, missing_entry_point, undefined_function,
    EvalError, EvalResult,
};
use crate::model::{InvocationMode, ModelClient};
use crate::program::{Callee, Program};
use crate::value::Value;

/// Name of the function `run_main` starts from.
const ENTRY_POINT: &str = "main";

/// Argument values of one call.
pub(crate) type ArgValues = SmallVec<[Value; 4]>;

/// Phase of the active call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallPhase {
    Entering,
    BodyExecuting,
    Returning,
    Exited,
}

impl CallPhase {
    fn next(self) -> Option<CallPhase> {
        match self {
            CallPhase::Entering => Some(CallPhase::BodyExecuting),
            CallPhase::BodyExecuting => Some(CallPhase::Returning),
            CallPhase::Returning => Some(CallPhase::Exited),
            CallPhase::Exited => None,
        }
    }
}

/// How the value of a call is consumed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum CallSite {
    /// An ordinary expression.
    Value,
    /// The guard of an `if` or `while`.
    Condition,
    /// A call made by the host through [`Interpreter::call`].
    Host,
}

/// Number of model invocations per mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InvocationStats {
    pub implicit_return: usize,
    pub param_fill: usize,
    pub condition: usize,
    pub select: usize,
}

impl InvocationStats {
    pub fn total(&self) -> usize {
        self.implicit_return + self.param_fill + self.condition + self.select
    }

    pub(crate) fn record(&mut self, mode: &InvocationMode) {
        let counter = match mode {
            InvocationMode::ImplicitReturn { .. } => &mut self.implicit_return,
            InvocationMode::ParamFill { .. } => &mut self.param_fill,
            InvocationMode::Condition { .. } => &mut self.condition,
            InvocationMode::Select => &mut self.select,
        };
        *counter += 1;
    }
}

pub struct Interpreter<'p> {
    pub(crate) program: &'p Program,
    pub(crate) model: &'p dyn ModelClient,
    pub(crate) contexts: ContextStack,
    pub(crate) call_stack: CallStack,
    pub(crate) cancel: CancelToken,
    pub(crate) stats: InvocationStats,
    /// Bindings of the active call.
    pub(crate) env: Environment,
    /// Frame of the active call; `None` while no call is running.
    pub(crate) frame: Option<FrameId>,
    pub(crate) function: Option<&'p Function>,
    pub(crate) phase: CallPhase,
}

impl<'p> Interpreter<'p> {
    pub fn builder(program: &'p Program, model: &'p dyn ModelClient) -> InterpreterBuilder<'p> {
        InterpreterBuilder::new(program, model)
    }

    pub fn new(program: &'p Program, model: &'p dyn ModelClient) -> Self {
        Self::builder(program, model).build()
    }

    /// Run `main`. Its parameters, if any, must all be `Context` and each
    /// receives a fresh root frame.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_main(&mut self) -> EvalResult {
        let program = self.program;
        let callee = program
            .callee_by_name(ENTRY_POINT)
            .ok_or_else(|| missing_entry_point(ENTRY_POINT))?;
        let Callee::User { func, .. } = callee else {
            return Err(invalid_entry_point(ENTRY_POINT, "it is declared extern"));
        };
        if func.params.iter().any(|p| p.ty != Type::Context) {
            return Err(invalid_entry_point(
                ENTRY_POINT,
                "only Context parameters can be supplied by the host",
            ));
        }
        let args = func.params.iter().map(|_| Value::new_context()).collect();
        self.dispatch(callee, args, None, CallSite::Host)
    }

    /// Call a user function or extern by name.
    ///
    /// `args` may either cover every parameter, or omit the `Context`
    /// parameters, which then receive `Context::new()`.
    pub fn call(&mut self, name: &str, args: Vec<Value>) -> EvalResult {
        let program = self.program;
        let callee = program
            .callee_by_name(name)
            .ok_or_else(|| undefined_function(name))?;
        let params = callee.params();
        let contexts = params.iter().filter(|p| p.ty == Type::Context).count();
        let given = args.len();
        let args: ArgValues = if contexts > 0 && given + contexts == params.len() {
            let mut values = args.into_iter();
            params
                .iter()
                .map(|p| {
                    if p.ty == Type::Context {
                        Some(Value::new_context())
                    } else {
                        values.next()
                    }
                })
                .collect::<Option<_>>()
                .ok_or_else(|| arity_mismatch(name, params.len(), given))?
        } else if given == params.len() {
            args.into_iter().collect()
        } else {
            return Err(arity_mismatch(name, params.len(), given));
        };
        self.dispatch(callee, args, None, CallSite::Host)
    }

    /// Model invocations made so far.
    pub fn stats(&self) -> InvocationStats {
        self.stats
    }

    /// Frames currently allocated. Zero whenever no call is running.
    pub fn live_frames(&self) -> usize {
        self.contexts.live_count()
    }

    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub(crate) fn check_cancelled(&self) -> Result<(), EvalError> {
        if self.cancel.is_cancelled() {
            tracing::warn!(depth = self.call_stack.depth(), "run cancelled");
            return Err(aborted());
        }
        Ok(())
    }

    /// Frame of the call currently executing.
    pub(crate) fn active_frame(&self) -> Result<FrameId, EvalError> {
        self.frame
            .ok_or_else(|| EvalError::from(FrameError::NoActiveFrame))
    }

    #[inline]
    pub(crate) fn name(&self, name: Name) -> &'static str {
        self.program.interner().lookup(name)
    }

    pub(crate) fn transition(&mut self, next: CallPhase) {
        debug_assert_eq!(
            self.phase.next(),
            Some(next),
            "invalid call phase transition"
        );
        tracing::trace!(
            function = self.function.map_or("", |f| self.name(f.name)),
            from = ?self.phase,
            to = ?next,
            "call phase"
        );
        self.phase = next;
    }

    pub(crate) fn attach_backtrace(&self, err: EvalError) -> EvalError {
        self.call_stack.attach_backtrace(err, self.program.interner())
    }
}

#[cfg(test)]
mod tests;
