//! The individual analyses, grouped by what they look at.

pub(crate) mod bindings;
pub(crate) mod calls;
pub(crate) mod flow;

use cairn_ir::visitor::{self, Visitor};
use cairn_ir::{
    Block, Expr, ExprArena, ExprId, ExprKind, Function, Name, Param, SelectClause, Stmt, StmtKind,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// Variables that hold the same boolean literal for the whole function:
/// every `let` binds that literal and nothing assigns to them.
pub(crate) struct ConstantFlags {
    values: FxHashMap<Name, bool>,
}

impl ConstantFlags {
    pub(crate) fn of(function: &Function, arena: &ExprArena) -> Self {
        let mut finder = FlagFinder::default();
        finder.visit_function(function, arena);
        let values = finder
            .candidates
            .into_iter()
            .filter(|(name, _)| !finder.disqualified.contains(name))
            .filter_map(|(name, value)| Some((name, value?)))
            .collect();
        ConstantFlags { values }
    }

    /// Value of `id` if it is a boolean literal or a constant flag.
    pub(crate) fn value(&self, id: ExprId, arena: &ExprArena) -> Option<bool> {
        match arena[id].kind {
            ExprKind::Bool(value) => Some(value),
            ExprKind::Ident(name) => self.values.get(&name).copied(),
            _ => None,
        }
    }
}

#[derive(Default)]
struct FlagFinder {
    /// `None` once two `let`s disagree.
    candidates: FxHashMap<Name, Option<bool>>,
    disqualified: FxHashSet<Name>,
}

impl<'ast> Visitor<'ast> for FlagFinder {
    fn visit_param(&mut self, param: &'ast Param) {
        self.disqualified.insert(param.name);
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast ExprArena) {
        match &stmt.kind {
            StmtKind::Let { name, init, .. } => match arena[*init].kind {
                ExprKind::Bool(value) => {
                    let entry = self.candidates.entry(*name).or_insert(Some(value));
                    if *entry != Some(value) {
                        *entry = None;
                    }
                }
                _ => {
                    self.disqualified.insert(*name);
                }
            },
            StmtKind::Assign { name, .. } => {
                self.disqualified.insert(*name);
            }
            _ => {}
        }
        visitor::walk_stmt(self, stmt, arena);
    }

    fn visit_select_clause(&mut self, clause: &'ast SelectClause, arena: &'ast ExprArena) {
        self.disqualified.insert(clause.binding);
        visitor::walk_select_clause(self, clause, arena);
    }
}

/// Whether `block` contains a `return` at any depth.
pub(crate) fn contains_return(block: &Block, arena: &ExprArena) -> bool {
    struct Finder(bool);

    impl<'ast> Visitor<'ast> for Finder {
        fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast ExprArena) {
            if matches!(stmt.kind, StmtKind::Return(_)) {
                self.0 = true;
            } else if !self.0 {
                visitor::walk_stmt(self, stmt, arena);
            }
        }
    }

    let mut finder = Finder(false);
    finder.visit_block(block, arena);
    finder.0
}

/// Every variable read or written by a statement or expression, including
/// inside nested blocks and `select` handlers.
#[derive(Default)]
pub(crate) struct Mentions(FxHashSet<Name>);

impl Mentions {
    pub(crate) fn of_stmt(stmt: &Stmt, arena: &ExprArena) -> FxHashSet<Name> {
        let mut mentions = Mentions::default();
        mentions.visit_stmt(stmt, arena);
        mentions.0
    }

    pub(crate) fn of_expr(id: ExprId, arena: &ExprArena) -> FxHashSet<Name> {
        let mut mentions = Mentions::default();
        mentions.visit_expr_id(id, arena);
        mentions.0
    }
}

impl<'ast> Visitor<'ast> for Mentions {
    fn visit_stmt(&mut self, stmt: &'ast Stmt, arena: &'ast ExprArena) {
        if let StmtKind::Let { name, .. } | StmtKind::Assign { name, .. } = &stmt.kind {
            self.0.insert(*name);
        }
        visitor::walk_stmt(self, stmt, arena);
    }

    fn visit_expr(&mut self, _id: ExprId, expr: &'ast Expr, arena: &'ast ExprArena) {
        if let ExprKind::Ident(name) = expr.kind {
            self.0.insert(name);
        }
        visitor::walk_expr(self, expr, arena);
    }
}
