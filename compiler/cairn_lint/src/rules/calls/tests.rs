use pretty_assertions::assert_eq;

use cairn_ir::Type;

use crate::tests::{flagged, lint};
use crate::{Lint, WarningKind};

// Duplicate injections

#[test]
fn repeated_literal_or_variable_is_reported() {
    let source = r#"
        fn main(ctx, topic: String) {
            "Be concise."!
            "Be concise."
            topic!
            topic!
        }
        "#;
    assert_eq!(
        flagged(Lint::DuplicateInjection, source),
        vec!["\"Be concise.\"", "topic!"]
    );
}

#[test]
fn only_adjacent_statements_count() {
    let source = r#"
        fn main(ctx, topic: String) {
            topic!
            "and then"!
            topic!
            "Again"!
            if true { "Again"! }
        }
        "#;
    assert_eq!(flagged(Lint::DuplicateInjection, source), Vec::<&str>::new());
}

#[test]
fn first_injection_is_a_secondary_label() {
    let source = "fn main(ctx) {\n    \"hi\"!\n    \"hi\"!\n}";
    let warnings: Vec<_> = lint(source)
        .into_iter()
        .filter(|w| w.lint() == Lint::DuplicateInjection)
        .collect();
    let diag = warnings[0].to_diagnostic();
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.labels[1].message, "first injected here");
    assert_eq!(diag.labels[1].span.slice(source), "\"hi\"!");
}

// Placeholder-only calls

#[test]
fn call_made_only_of_placeholders_is_reported() {
    let source = r#"
        extern fn search(query: String, limit: i32) -> String
        fn main(ctx) {
            let a = search(_, _)
            let b = search(_, 5)
            a!
            b!
        }
        "#;
    let warnings: Vec<_> = lint(source)
        .into_iter()
        .filter(|w| w.lint() == Lint::PlaceholderOnlyCall)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].span.slice(source), "search(_, _)");
    assert_eq!(
        warnings[0].kind,
        WarningKind::PlaceholderOnlyCall {
            callee: "search".to_string(),
            count: 2
        }
    );
}

#[test]
fn select_candidates_may_be_all_placeholders() {
    let source = r#"
        extern fn search(query: String) -> String
        extern fn lookup(key: String) -> String
        fn main(ctx) {
            let found = select {
                search(_) as hits => hits,
                lookup(_) as entry => { lookup(_) },
            }
            found!
        }
        "#;
    assert_eq!(flagged(Lint::PlaceholderOnlyCall, source), vec!["lookup(_)"]);
}

// Single-clause select

#[test]
fn select_with_one_clause_is_reported() {
    let source = r#"
        extern fn search(query: String) -> String
        fn main(ctx) {
            let found = select { search(_) as hits => hits }
            found!
            let either = select {
                search(_) as hits => hits,
                search("default") as fallback => fallback,
            }
            either!
        }
        "#;
    assert_eq!(
        flagged(Lint::SingleClauseSelect, source),
        vec!["select { search(_) as hits => hits }"]
    );
}

// Unused return values

#[test]
fn ignored_boolean_and_integer_results_are_reported() {
    let source = r#"
        extern fn count(text: String) -> i32
        fn approve(ctx) -> Boolean { "Approve?"! }
        fn describe(ctx) -> String { "Describe it."! }
        fn main(ctx) {
            count("words")
            approve(ctx)
            describe(ctx)
            let kept = count("more")
            kept!
        }
        "#;
    let kinds: Vec<_> = lint(source)
        .into_iter()
        .filter(|w| w.lint() == Lint::UnusedReturnValue)
        .map(|w| w.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            WarningKind::UnusedReturnValue {
                callee: "count".to_string(),
                ty: Type::Int32
            },
            WarningKind::UnusedReturnValue {
                callee: "approve".to_string(),
                ty: Type::Boolean
            },
        ]
    );
}

#[test]
fn handler_values_are_used_by_the_select() {
    let source = r#"
        extern fn score(text: String) -> i32
        fn main(ctx) -> i32 {
            return select {
                score(_) as points => { score("again") score("final") },
                score("x") as other => other,
            }
        }
        "#;
    assert_eq!(
        flagged(Lint::UnusedReturnValue, source),
        vec!["score(\"again\")"]
    );
}
