//! Arena-allocated syntax tree.
//!
//! Expressions live in a flat [`ExprArena`] and refer to each other through
//! [`ExprId`] indices. Statements and blocks are owned directly by their
//! parents since they are never shared.

use std::fmt;
use std::ops::Index;

use crate::{Name, Span, Type};

/// Index into an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// Flat storage for every expression of a module.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    pub fn new() -> Self {
        ExprArena { exprs: Vec::new() }
    }

    /// Store `expr` and return its id.
    ///
    /// # Panics
    /// Panics if a module holds more than `u32::MAX` expressions.
    pub fn alloc(&mut self, expr: Expr) -> ExprId {
        let id = u32::try_from(self.exprs.len())
            .unwrap_or_else(|_| panic!("expression arena exceeded {} entries", u32::MAX));
        self.exprs.push(expr);
        ExprId(id)
    }

    #[inline]
    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

impl Index<ExprId> for ExprArena {
    type Output = Expr;

    fn index(&self, id: ExprId) -> &Expr {
        self.get(id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// `()`
    Unit,
    Bool(bool),
    Int(i32),
    /// String literal, escapes already resolved.
    Str(Name),
    Ident(Name),
    /// `_` in argument position: the model supplies the value.
    Placeholder,
    /// `Context::new()`: requests a parentless frame for the callee.
    NewContext,
    Call {
        func: Name,
        args: Vec<ExprId>,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Neg(ExprId),
    Select(Vec<SelectClause>),
}

/// One `call as name => handler` arm of a `select`.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectClause {
    /// Always an `ExprKind::Call`.
    pub call: ExprId,
    pub binding: Name,
    /// `=> expr` is parsed as a block holding a single expression statement.
    pub handler: Block,
    pub span: Span,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Let {
        name: Name,
        ty: Option<Type>,
        init: ExprId,
    },
    Assign {
        name: Name,
        value: ExprId,
    },
    /// `expr!`: stringify and append to the active frame.
    Inject(ExprId),
    /// Bare expression statement. A `String` value is appended to the frame.
    Expr(ExprId),
    If {
        cond: ExprId,
        then_block: Block,
        else_block: Option<Block>,
    },
    While {
        cond: ExprId,
        body: Block,
    },
    Return(Option<ExprId>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Name,
    pub ty: Type,
    pub span: Span,
}

/// User-defined function: context- and model-eligible.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub name: Name,
    pub params: Vec<Param>,
    pub ret: Type,
    pub body: Block,
    pub doc: Option<String>,
    pub span: Span,
}

impl Function {
    /// Index of the first `Context`-typed parameter, if any.
    pub fn context_param(&self) -> Option<usize> {
        self.params.iter().position(|p| p.ty == Type::Context)
    }
}

/// `extern fn` declaration: dispatched to a native implementation.
#[derive(Clone, Debug, PartialEq)]
pub struct ExternFn {
    pub name: Name,
    pub params: Vec<Param>,
    pub ret: Type,
    pub doc: Option<String>,
    pub span: Span,
}

/// A parsed source file.
#[derive(Clone, Debug, Default)]
pub struct Module {
    pub functions: Vec<Function>,
    pub externs: Vec<ExternFn>,
    pub arena: ExprArena,
}

impl Module {
    pub fn function(&self, name: Name) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn extern_fn(&self, name: Name) -> Option<&ExternFn> {
        self.externs.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests;
