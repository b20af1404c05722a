//! Static analysis warnings.
//!
//! Runs on modules that already type-check. Each rule looks at one function
//! at a time and reports [`LintWarning`]s; none of them changes what a
//! program does when it runs.

mod rules;
mod warning;

use cairn_ir::{Function, Module, Name, StringInterner, Type};

pub use warning::{Lint, LintWarning, WarningKind};

/// The module under analysis, shared by every rule.
pub(crate) struct LintCx<'m> {
    pub(crate) module: &'m Module,
    interner: &'m StringInterner,
}

impl LintCx<'_> {
    pub(crate) fn name(&self, name: Name) -> String {
        self.interner.lookup(name).to_string()
    }

    /// Declared return type of a function or extern named `callee`.
    pub(crate) fn return_type(&self, callee: Name) -> Option<Type> {
        self.module
            .function(callee)
            .map(|f| f.ret)
            .or_else(|| self.module.extern_fn(callee).map(|e| e.ret))
    }
}

type Rule = fn(&LintCx<'_>, &Function, &mut Vec<LintWarning>);

const RULES: [(Lint, Rule); 12] = [
    (Lint::UnusedVariable, rules::bindings::unused_variables),
    (Lint::UnreachableCode, rules::flow::unreachable_code),
    (Lint::InfiniteLoop, rules::flow::infinite_loops),
    (Lint::EmptyBlock, rules::flow::empty_blocks),
    (Lint::EmptyFunction, rules::flow::empty_function),
    (Lint::DuplicateInjection, rules::calls::duplicate_injections),
    (Lint::PlaceholderOnlyCall, rules::calls::placeholder_only_calls),
    (Lint::SingleClauseSelect, rules::calls::single_clause_selects),
    (Lint::ConstantCondition, rules::flow::constant_conditions),
    (Lint::ShadowedVariable, rules::bindings::shadowed_variables),
    (Lint::OverwrittenValue, rules::bindings::overwritten_values),
    (Lint::UnusedReturnValue, rules::calls::unused_return_values),
];

/// Run every rule over `module`. Warnings come back in source order.
#[tracing::instrument(level = "debug", skip_all)]
pub fn lint_module(module: &Module, interner: &StringInterner) -> Vec<LintWarning> {
    let cx = LintCx { module, interner };
    let mut warnings = Vec::new();
    for function in &module.functions {
        for (lint, rule) in RULES {
            let before = warnings.len();
            rule(&cx, function, &mut warnings);
            if warnings.len() > before {
                tracing::trace!(
                    lint = lint.name(),
                    function = cx.interner.lookup(function.name),
                    found = warnings.len() - before,
                    "rule fired"
                );
            }
        }
    }
    warnings.sort_by_key(|w| (w.span.start, w.span.end, w.lint()));
    tracing::debug!(warnings = warnings.len(), "lint finished");
    warnings
}
