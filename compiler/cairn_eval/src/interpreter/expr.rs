//! Expression evaluation.

use cairn_ir::{BinaryOp, ExprId, ExprKind, Span};

use super::{CallSite, Interpreter};
use crate::errors::{invalid_binary_op, placeholder_outside_call, undefined_variable, EvalResult};
use crate::operators::{evaluate_binary, negate};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

impl<'p> Interpreter<'p> {
    pub(super) fn eval_expr(&mut self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_expr_inner(id))
    }

    fn eval_expr_inner(&mut self, id: ExprId) -> EvalResult {
        let program = self.program;
        let expr = &program.module().arena[id];
        let span = expr.span;
        match &expr.kind {
            ExprKind::Unit => Ok(Value::Unit),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Int(n) => Ok(Value::Int(*n)),
            ExprKind::Str(text) => Ok(Value::string(self.name(*text))),
            ExprKind::Ident(name) => self
                .env
                .lookup(*name)
                .ok_or_else(|| undefined_variable(self.name(*name)).with_span(span)),
            ExprKind::Placeholder => Err(placeholder_outside_call().with_span(span)),
            ExprKind::NewContext => Ok(Value::new_context()),
            ExprKind::Call { func, args } => self.eval_call(*func, args, span, CallSite::Value),
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, *left, *right, span),
            ExprKind::Neg(operand) => {
                let value = self.eval_expr(*operand)?;
                negate(value).map_err(|err| err.with_span(span))
            }
            ExprKind::Select(clauses) => self.eval_select(clauses, span),
        }
    }

    fn eval_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId, span: Span) -> EvalResult {
        let lhs = self.eval_expr(left)?;
        if op.is_logical() {
            return self.eval_logical(op, &lhs, right, span);
        }
        let rhs = self.eval_expr(right)?;
        evaluate_binary(op, lhs, rhs).map_err(|err| err.with_span(span))
    }

    /// `&&` and `||`: the right operand runs only when it decides the result.
    fn eval_logical(&mut self, op: BinaryOp, lhs: &Value, right: ExprId, span: Span) -> EvalResult {
        let Some(l) = lhs.as_bool() else {
            return Err(invalid_binary_op(op, &lhs.type_name(), "Boolean").with_span(span));
        };
        let short_circuit = match op {
            BinaryOp::And => !l,
            _ => l,
        };
        if short_circuit {
            return Ok(Value::Bool(l));
        }
        let rhs = self.eval_expr(right)?;
        rhs.as_bool()
            .map(Value::Bool)
            .ok_or_else(|| invalid_binary_op(op, "Boolean", &rhs.type_name()).with_span(span))
    }
}
