//! `select`: let the model pick one of several calls.
//!
//! Candidates are described from their signatures alone; no argument of
//! any candidate is evaluated before the decision. Only the chosen call's
//! concrete arguments run, the model's values fill its placeholders, and
//! the handler runs in a child scope with the result bound.

use cairn_ir::{Block, ExprId, ExprKind, Name, SelectClause, Span, StmtKind};

use super::stmt::Flow;
use super::{ArgValues, CallSite, Interpreter};
use crate::errors::{
    arity_mismatch, return_in_select_handler, selection_failed, undefined_function,
    EvalError, EvalResult,
};
use crate::model::{Candidate, CandidateParam};
use crate::program::Callee;
use crate::value::Value;

impl<'p> Interpreter<'p> {
    pub(super) fn eval_select(&mut self, clauses: &'p [SelectClause], span: Span) -> EvalResult {
        let mut candidates = Vec::with_capacity(clauses.len());
        for clause in clauses {
            let (callee, args) = self.clause_call(clause)?;
            candidates.push(self.describe(callee, args));
        }

        let decision = self.choose(candidates, span)?;
        let clause = &clauses[decision.index];
        let (callee, args) = self.clause_call(clause)?;
        let call_span = self.program.module().arena[clause.call].span;

        let program = self.program;
        let arena = &program.module().arena;
        let mut values = ArgValues::with_capacity(args.len());
        for (param, &arg) in callee.params().iter().zip(args) {
            let value = if matches!(arena[arg].kind, ExprKind::Placeholder) {
                let name = self.name(param.name);
                decision.arguments.get(name).cloned().ok_or_else(|| {
                    selection_failed(format!("no value for parameter `{name}`"))
                        .with_span(call_span)
                })?
            } else {
                self.eval_expr(arg)?
            };
            values.push(value);
        }

        let result = self.dispatch(callee, values, Some(call_span), CallSite::Value)?;
        self.with_env_scope(|scoped| {
            scoped.env.define(clause.binding, result);
            scoped.eval_handler(&clause.handler)
        })
    }

    /// Resolve a clause's call expression to its callee and arguments.
    fn clause_call(
        &self,
        clause: &'p SelectClause,
    ) -> Result<(Callee<'p>, &'p [ExprId]), EvalError> {
        let program = self.program;
        let expr = &program.module().arena[clause.call];
        let ExprKind::Call { func, args } = &expr.kind else {
            return Err(selection_failed("select clause is not a call").with_span(expr.span));
        };
        let callee = self.lookup_callee(*func, expr.span)?;
        if callee.params().len() != args.len() {
            return Err(
                arity_mismatch(self.name(*func), callee.params().len(), args.len())
                    .with_span(expr.span),
            );
        }
        Ok((callee, args.as_slice()))
    }

    fn lookup_callee(&self, func: Name, span: Span) -> Result<Callee<'p>, EvalError> {
        let program = self.program;
        program
            .callee(func)
            .ok_or_else(|| undefined_function(self.name(func)).with_span(span))
    }

    fn describe(&self, callee: Callee<'p>, args: &[ExprId]) -> Candidate {
        let arena = &self.program.module().arena;
        Candidate {
            function: self.name(callee.name()).to_string(),
            params: callee
                .params()
                .iter()
                .zip(args)
                .map(|(param, &arg)| CandidateParam {
                    name: self.name(param.name).to_string(),
                    ty: param.ty,
                    placeholder: matches!(arena[arg].kind, ExprKind::Placeholder),
                })
                .collect(),
            doc: callee.doc().map(str::to_string),
        }
    }

    /// Run a handler. Its last bare expression is the value of the
    /// `select`; without one the value is `()`.
    fn eval_handler(&mut self, handler: &'p Block) -> EvalResult {
        let Some((last, init)) = handler.stmts.split_last() else {
            return Ok(Value::Unit);
        };
        for stmt in init {
            self.check_cancelled()?;
            if let Flow::Return(_) = self.exec_stmt(stmt)? {
                return Err(return_in_select_handler().with_span(stmt.span));
            }
        }
        self.check_cancelled()?;
        if let StmtKind::Expr(expr) = last.kind {
            return self.eval_expr(expr);
        }
        match self.exec_stmt(last)? {
            Flow::Normal => Ok(Value::Unit),
            Flow::Return(_) => Err(return_in_select_handler().with_span(last.span)),
        }
    }
}
