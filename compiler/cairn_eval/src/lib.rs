//! Execution engine for Cairn agent programs.
//!
//! A loaded [`Program`] is run by an [`Interpreter`], which owns the
//! [`ContextStack`] of frames for one run and talks to the language model
//! through a [`ModelClient`]. Calls follow a fixed lifecycle: arguments are
//! resolved against the caller's frame, the body executes in a fresh frame,
//! and a body that falls off its end asks the model for the return value.
//!
//! - [`context_stack`]: per-run arena of frames with parent links
//! - [`model`]: the request/response protocol and response conformance
//! - [`externs`]: host functions declared with `extern fn`
//! - [`interpreter`]: statement and expression execution

mod builtins;
mod call_stack;
mod cancel;
pub mod context_stack;
mod environment;
mod errors;
pub mod externs;
pub mod interpreter;
pub mod model;
mod operators;
mod print_handler;
mod program;
mod stack;
mod value;

pub use builtins::register_print;
pub use call_stack::{CallFrame, CallStack};
pub use cancel::CancelToken;
pub use context_stack::{ContentItem, ContextStack, FrameError, FrameId, ItemOrigin};
pub use environment::{Environment, UndefinedBinding};
pub use errors::{
    aborted, arity_mismatch, context_not_injectable, duplicate_definition, extern_failed,
    extern_signature_mismatch, integer_overflow, invalid_binary_op, invalid_entry_point,
    missing_entry_point, model_unavailable, placeholder_outside_call, recursion_limit_exceeded,
    return_in_select_handler, selection_failed, type_conformance, type_mismatch,
    undefined_function, undefined_variable, unresolved_extern, BacktraceFrame, ErrorClass,
    EvalBacktrace, EvalError, EvalErrorKind, EvalNote, EvalResult,
};
pub use externs::{ExternRegistry, ExternSignature, NativeFn};
pub use interpreter::{Interpreter, InterpreterBuilder, InvocationStats};
pub use model::{
    Candidate, CandidateParam, EchoModel, FnModel, InvocationMode, ModelClient, ModelError,
    ModelRequest, ScriptedModel, SelectionDecision, Target,
};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use program::{Callee, Program};
pub use stack::ensure_sufficient_stack;
pub use value::{ContextRef, Value};
