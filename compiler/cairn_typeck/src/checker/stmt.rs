use cairn_ir::{Block, ExprId, Stmt, StmtKind, Type};

use super::Checker;
use crate::TypeErrorKind;

impl Checker<'_> {
    pub(super) fn check_block(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.check_stmt(stmt);
        }
    }

    fn check_scoped_block(&mut self, block: &Block) {
        self.push_scope();
        self.check_block(block);
        self.pop_scope();
    }

    /// Value type of a `select` handler: its trailing bare expression, or
    /// `()` when it ends with anything else.
    pub(super) fn check_handler(&mut self, block: &Block) -> Option<Type> {
        let Some((last, init)) = block.stmts.split_last() else {
            return Some(Type::Unit);
        };
        for stmt in init {
            self.check_stmt(stmt);
        }
        if let StmtKind::Expr(value) = last.kind {
            self.infer(value)
        } else {
            self.check_stmt(last);
            Some(Type::Unit)
        }
    }

    fn check_condition(&mut self, cond: ExprId) {
        let found = self.infer(cond);
        let span = self.module.arena[cond].span;
        self.expect_type(Type::Boolean, found, span, "for this condition");
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        let module = self.module;
        match &stmt.kind {
            StmtKind::Let { name, ty, init } => {
                let found = self.infer(*init);
                if let Some(annotated) = ty {
                    let span = module.arena[*init].span;
                    self.expect_type(*annotated, found, span, "for this binding");
                    self.define(*name, Some(*annotated));
                } else {
                    self.define(*name, found);
                }
            }
            StmtKind::Assign { name, value } => {
                let found = self.infer(*value);
                match self.lookup(*name) {
                    Some(Some(declared)) => {
                        let span = module.arena[*value].span;
                        self.expect_type(declared, found, span, "for this assignment");
                    }
                    Some(None) => {}
                    None => self.error(
                        TypeErrorKind::UnknownVariable {
                            name: self.name(*name),
                        },
                        stmt.span,
                    ),
                }
            }
            StmtKind::Inject(value) => {
                if self.infer(*value) == Some(Type::Context) {
                    let span = module.arena[*value].span;
                    self.error(TypeErrorKind::InjectContext, span);
                }
            }
            StmtKind::Expr(value) => {
                self.infer(*value);
            }
            StmtKind::If {
                cond,
                then_block,
                else_block,
            } => {
                self.check_condition(*cond);
                self.check_scoped_block(then_block);
                if let Some(else_block) = else_block {
                    self.check_scoped_block(else_block);
                }
            }
            StmtKind::While { cond, body } => {
                self.check_condition(*cond);
                self.check_scoped_block(body);
            }
            StmtKind::Return(value) => {
                if self.handler_depth > 0 {
                    self.error(TypeErrorKind::ReturnInSelectHandler, stmt.span);
                }
                let (found, span) = match value {
                    Some(value) => (self.infer(*value), module.arena[*value].span),
                    None => (Some(Type::Unit), stmt.span),
                };
                self.expect_type(self.current_ret, found, span, "as the return value");
            }
        }
    }
}
