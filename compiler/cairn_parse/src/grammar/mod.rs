//! Grammar productions, split by construct.

mod expr;
mod item;
mod stmt;

use cairn_ir::{ExternFn, Function};

pub(crate) enum Item {
    Function(Function),
    Extern(ExternFn),
}
