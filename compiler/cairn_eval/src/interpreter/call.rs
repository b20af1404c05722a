//! Call dispatch and the per-call phase sequence.

use cairn_ir::{Completion, ExprId, ExprKind, ExternFn, Function, Name, Span, Type};

use super::stmt::Flow;
use super::{ArgValues, CallPhase, CallSite, Interpreter};
use crate::call_stack::CallFrame;
use crate::context_stack::FrameId;
use crate::errors::{arity_mismatch, type_mismatch, undefined_function, EvalError, EvalResult};
use crate::program::Callee;
use crate::stack::ensure_sufficient_stack;
use crate::value::{ContextRef, Value};

fn spanned(err: EvalError, span: Option<Span>) -> EvalError {
    match span {
        Some(span) => err.with_span(span),
        None => err,
    }
}

impl<'p> Interpreter<'p> {
    /// Evaluate `func(args)` written in the active call.
    ///
    /// This is the `Entering` phase for the callee: concrete arguments are
    /// evaluated in order and each `_` is filled by the model from the
    /// caller's frame before the callee's frame exists.
    pub(super) fn eval_call(
        &mut self,
        func: Name,
        args: &'p [ExprId],
        span: Span,
        site: CallSite,
    ) -> EvalResult {
        let program = self.program;
        let callee = program
            .callee(func)
            .ok_or_else(|| undefined_function(self.name(func)).with_span(span))?;
        let params = callee.params();
        if params.len() != args.len() {
            return Err(arity_mismatch(self.name(func), params.len(), args.len()).with_span(span));
        }

        let arena = &program.module().arena;
        let mut values = ArgValues::with_capacity(args.len());
        for (param, &arg) in params.iter().zip(args) {
            let value = if matches!(arena[arg].kind, ExprKind::Placeholder) {
                self.fill_parameter(func, param, span)?
            } else {
                self.eval_expr(arg)?
            };
            values.push(value);
        }
        self.dispatch(callee, values, Some(span), site)
    }

    /// Run a resolved callee with already-evaluated arguments.
    pub(super) fn dispatch(
        &mut self,
        callee: Callee<'p>,
        args: ArgValues,
        span: Option<Span>,
        site: CallSite,
    ) -> EvalResult {
        match callee {
            Callee::Extern(ext) => self.call_extern(ext, &args, span),
            Callee::User { func, completion } => ensure_sufficient_stack(|| {
                self.call_function(func, completion, args, span, site)
            }),
        }
    }

    /// Externs bypass frames and the model entirely.
    fn call_extern(&mut self, ext: &ExternFn, args: &[Value], span: Option<Span>) -> EvalResult {
        let name = self.name(ext.name);
        tracing::debug!(name, args = args.len(), "dispatching extern");
        self.program
            .registry()
            .dispatch(name, args)
            .map_err(|err| spanned(err, span))
    }

    fn call_function(
        &mut self,
        func: &'p Function,
        completion: Completion,
        args: ArgValues,
        span: Option<Span>,
        site: CallSite,
    ) -> EvalResult {
        let name = self.name(func.name);
        let _span =
            tracing::debug_span!("call", function = name, depth = self.call_stack.depth())
                .entered();

        if args.len() != func.params.len() {
            return Err(spanned(
                arity_mismatch(name, func.params.len(), args.len()),
                span,
            ));
        }
        for (param, arg) in func.params.iter().zip(&args) {
            if !arg.conforms_to(param.ty) {
                return Err(spanned(
                    type_mismatch(&param.ty.to_string(), &arg.type_name()),
                    span,
                ));
            }
        }

        let frame = self.enter_frame(func, &args).map_err(|err| spanned(err, span))?;
        if let Err(err) = self.call_stack.push(CallFrame {
            name: func.name,
            call_span: span,
        }) {
            self.contexts.pop(frame)?;
            return Err(spanned(err, span));
        }

        let mut call = self.activate(func, frame);
        for (param, value) in func.params.iter().zip(args) {
            let value = if param.ty == Type::Context {
                Value::Context(ContextRef::Frame(frame))
            } else {
                value
            };
            call.env.define(param.name, value);
        }

        let value = call
            .run_body(func, completion, site)
            .map_err(|err| spanned(call.attach_backtrace(err), span))?;
        call.finish()?;
        Ok(value)
    }

    /// Allocate the callee's frame.
    ///
    /// A `Context::new()` argument makes a root frame; a frame handle makes
    /// a child of that frame; otherwise the frame is a child of the caller's.
    fn enter_frame(&mut self, func: &Function, args: &[Value]) -> Result<FrameId, EvalError> {
        let handle = func.context_param().and_then(|i| args.get(i));
        let frame = match handle {
            Some(Value::Context(ContextRef::Fresh)) => self.contexts.push_root(),
            Some(Value::Context(ContextRef::Frame(parent))) => self.contexts.push_child(*parent)?,
            _ => match self.frame {
                Some(caller) => self.contexts.push_child(caller)?,
                None => self.contexts.push_root(),
            },
        };
        Ok(frame)
    }

    /// `BodyExecuting` then `Returning`.
    fn run_body(&mut self, func: &'p Function, completion: Completion, site: CallSite) -> EvalResult {
        self.transition(CallPhase::BodyExecuting);
        let flow = self.exec_block(&func.body)?;
        self.transition(CallPhase::Returning);
        let value = match flow {
            Flow::Return(value) => value,
            Flow::Normal => {
                debug_assert!(
                    !completion.always_returns(),
                    "body marked always-returning fell through"
                );
                self.invoke_implicit(func, site)?
            }
        };
        if !value.conforms_to(func.ret) {
            return Err(type_mismatch(&func.ret.to_string(), &value.type_name()));
        }
        Ok(value)
    }
}
