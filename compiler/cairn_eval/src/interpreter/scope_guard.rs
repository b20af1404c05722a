//! RAII guards for interpreter state.
//!
//! - [`ScopedInterpreter`] pops a block scope when dropped.
//! - [`ActiveCall`] parks the caller's activation while a callee runs and
//!   restores it when dropped, releasing the callee's frame and call-stack
//!   entry on every exit path.
//!
//! Both hold `&mut Interpreter` and implement `Deref`/`DerefMut`, so code
//! inside a guard uses the interpreter as usual.

use std::ops::{Deref, DerefMut};

use cairn_ir::Function;

use super::{CallPhase, Interpreter};
use crate::context_stack::{FrameError, FrameId};
use crate::environment::Environment;
use crate::errors::EvalError;

/// Pops the innermost environment scope on drop.
pub struct ScopedInterpreter<'guard, 'p> {
    interpreter: &'guard mut Interpreter<'p>,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl<'p> Deref for ScopedInterpreter<'_, 'p> {
    type Target = Interpreter<'p>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

/// The caller's state, parked while a callee runs.
struct ParkedActivation<'p> {
    env: Environment,
    frame: Option<FrameId>,
    function: Option<&'p Function>,
    phase: CallPhase,
}

/// A user call in progress.
///
/// Created once the callee's frame and call-stack entry exist. Dropping the
/// guard without [`ActiveCall::finish`] still releases both; that is the
/// error and cancellation path.
pub(crate) struct ActiveCall<'guard, 'p> {
    interpreter: &'guard mut Interpreter<'p>,
    parked: Option<ParkedActivation<'p>>,
    frame: FrameId,
}

impl ActiveCall<'_, '_> {
    /// Leave the `Exited` phase and release the callee's frame.
    pub(super) fn finish(mut self) -> Result<(), EvalError> {
        self.interpreter.transition(CallPhase::Exited);
        self.release().map_err(EvalError::from)
    }

    fn release(&mut self) -> Result<(), FrameError> {
        let Some(parked) = self.parked.take() else {
            return Ok(());
        };
        let interpreter = &mut *self.interpreter;
        interpreter.env = parked.env;
        interpreter.frame = parked.frame;
        interpreter.function = parked.function;
        interpreter.phase = parked.phase;
        interpreter.call_stack.pop();
        interpreter.contexts.pop(self.frame)
    }
}

impl Drop for ActiveCall<'_, '_> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::error!(%err, "frame release failed while unwinding a call");
        }
    }
}

impl<'p> Deref for ActiveCall<'_, 'p> {
    type Target = Interpreter<'p>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ActiveCall<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'p> Interpreter<'p> {
    /// Push a block scope that is popped when the guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_, 'p> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` inside a fresh block scope.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_, 'p>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Make `func` running in `frame` the active call.
    ///
    /// The caller must already have pushed the call-stack entry; the guard
    /// pops it together with the frame.
    pub(super) fn activate(&mut self, func: &'p Function, frame: FrameId) -> ActiveCall<'_, 'p> {
        let parked = ParkedActivation {
            env: std::mem::take(&mut self.env),
            frame: self.frame.replace(frame),
            function: self.function.replace(func),
            phase: std::mem::replace(&mut self.phase, CallPhase::Entering),
        };
        tracing::trace!(function = self.name(func.name), %frame, "call phase entering");
        ActiveCall {
            interpreter: self,
            parked: Some(parked),
            frame,
        }
    }
}
