//! Intermediate representation shared by every Cairn phase.
//!
//! - [`Name`] and [`StringInterner`]: interned identifiers and string literals
//! - [`Span`]: byte ranges into the source file
//! - [`Type`]: the closed set of declared types
//! - [`ast`]: the arena-allocated syntax tree produced by the parser
//! - [`completion`]: static "does this body always return" analysis
//! - [`visitor`]: read-only traversal for analyses over the tree

pub mod ast;
pub mod completion;
mod interner;
mod name;
mod span;
mod ty;
pub mod visitor;

pub use ast::{
    BinaryOp, Block, Expr, ExprArena, ExprId, ExprKind, ExternFn, Function, Module, Param,
    SelectClause, Stmt, StmtKind,
};
pub use completion::Completion;
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;
pub use ty::Type;
