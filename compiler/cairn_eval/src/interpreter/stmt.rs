//! Statement execution.

use cairn_ir::{Block, ExprId, ExprKind, Span, Stmt, StmtKind};

use super::{CallSite, Interpreter};
use crate::context_stack::{ContentItem, ItemOrigin};
use crate::environment::UndefinedBinding;
use crate::errors::{context_not_injectable, type_mismatch, undefined_variable, EvalError};
use crate::value::Value;

/// How a statement or block finished.
#[derive(Debug)]
pub(super) enum Flow {
    Normal,
    Return(Value),
}

impl<'p> Interpreter<'p> {
    /// Run `block` in the current scope, checking for cancellation before
    /// every statement.
    pub(super) fn exec_block(&mut self, block: &'p Block) -> Result<Flow, EvalError> {
        for stmt in &block.stmts {
            self.check_cancelled()?;
            if let Flow::Return(value) = self.exec_stmt(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Run `block` in a child scope sharing the call's frame.
    fn exec_scoped_block(&mut self, block: &'p Block) -> Result<Flow, EvalError> {
        self.with_env_scope(|scoped| scoped.exec_block(block))
    }

    pub(super) fn exec_stmt(&mut self, stmt: &'p Stmt) -> Result<Flow, EvalError> {
        match &stmt.kind {
            StmtKind::Let { name, init, .. } => {
                let value = self.eval_expr(*init)?;
                self.env.define(*name, value);
            }
            StmtKind::Assign { name, value } => {
                let value = self.eval_expr(*value)?;
                self.env
                    .assign(*name, value)
                    .map_err(|UndefinedBinding| {
                        undefined_variable(self.name(*name)).with_span(stmt.span)
                    })?;
            }
            StmtKind::Inject(expr) => {
                let value = self.eval_expr(*expr)?;
                self.inject(*expr, &value, stmt.span)?;
            }
            StmtKind::Expr(expr) => {
                let value = self.eval_expr(*expr)?;
                if let Value::Str(_) = value {
                    self.inject(*expr, &value, stmt.span)?;
                }
            }
            StmtKind::If {
                cond,
                then_block,
                else_block,
            } => {
                if self.eval_condition(*cond)? {
                    return self.exec_scoped_block(then_block);
                }
                if let Some(else_block) = else_block {
                    return self.exec_scoped_block(else_block);
                }
            }
            StmtKind::While { cond, body } => loop {
                self.check_cancelled()?;
                if !self.eval_condition(*cond)? {
                    break;
                }
                if let Flow::Return(value) = self.exec_scoped_block(body)? {
                    return Ok(Flow::Return(value));
                }
            },
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(*expr)?,
                    None => Value::Unit,
                };
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Evaluate an `if`/`while` guard.
    ///
    /// A guard that is a direct call uses the `Condition` site, so a
    /// `Boolean` function that falls through asks the model in condition
    /// mode.
    pub(super) fn eval_condition(&mut self, cond: ExprId) -> Result<bool, EvalError> {
        let program = self.program;
        let expr = &program.module().arena[cond];
        let value = match &expr.kind {
            ExprKind::Call { func, args } => {
                self.eval_call(*func, args, expr.span, CallSite::Condition)?
            }
            _ => self.eval_expr(cond)?,
        };
        value
            .as_bool()
            .ok_or_else(|| type_mismatch("Boolean", &value.type_name()).with_span(expr.span))
    }

    /// Append the text of `value` to the active frame.
    fn inject(&mut self, expr: ExprId, value: &Value, span: Span) -> Result<(), EvalError> {
        let text = value
            .render()
            .ok_or_else(|| context_not_injectable().with_span(span))?;
        let origin = self.origin_of(expr);
        let frame = self.active_frame()?;
        tracing::trace!(%frame, ?origin, text = %text, "inject");
        self.contexts.append(frame, ContentItem { origin, text })?;
        Ok(())
    }

    fn origin_of(&self, expr: ExprId) -> ItemOrigin {
        let program = self.program;
        match &program.module().arena[expr].kind {
            ExprKind::Ident(name)
                if self
                    .function
                    .is_some_and(|f| f.params.iter().any(|p| p.name == *name)) =>
            {
                ItemOrigin::Parameter(self.name(*name).to_string())
            }
            ExprKind::Call { func, .. } => ItemOrigin::CallResult(self.name(*func).to_string()),
            _ => ItemOrigin::Injected,
        }
    }
}
