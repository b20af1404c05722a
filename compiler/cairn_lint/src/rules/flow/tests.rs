use pretty_assertions::assert_eq;

use crate::tests::{flagged, lint};
use crate::{Lint, WarningKind};

// Unreachable code

#[test]
fn statements_after_return_are_one_warning() {
    let source = r#"
        fn answer(ctx) -> i32 {
            return 42;
            "never"!
            "still never"!
        }
        "#;
    let warnings: Vec<_> = lint(source)
        .into_iter()
        .filter(|w| w.lint() == Lint::UnreachableCode)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].span.slice(source),
        "\"never\"!\n            \"still never\"!"
    );
    let WarningKind::UnreachableCode { after } = &warnings[0].kind else {
        panic!("unexpected warning {:?}", warnings[0]);
    };
    assert_eq!(after.slice(source), "return 42");
}

#[test]
fn if_else_returning_on_both_paths_diverges() {
    let source = r#"
        fn pick(ctx, flag: Boolean) -> String {
            if flag { return "yes" } else { return "no" }
            "unreachable"!
        }
        "#;
    assert_eq!(
        flagged(Lint::UnreachableCode, source),
        vec!["\"unreachable\"!"]
    );
}

#[test]
fn if_without_else_falls_through() {
    let source = r#"
        fn pick(ctx, flag: Boolean) -> String {
            if flag { return "yes" }
            "maybe"!
        }
        "#;
    assert_eq!(flagged(Lint::UnreachableCode, source), Vec::<&str>::new());
}

#[test]
fn loops_on_true_only_end_by_returning() {
    let source = r#"
        fn done(ctx) -> Boolean { "Done?"! }
        fn main(ctx) -> String {
            while true {
                if done(ctx) { return "finished" }
            }
            "after the loop"!
        }
        "#;
    assert_eq!(
        flagged(Lint::UnreachableCode, source),
        vec!["\"after the loop\"!"]
    );
}

#[test]
fn nested_blocks_are_checked() {
    let source = r#"
        fn main(ctx, flag: Boolean) {
            if flag {
                return;
                "inside"!
            }
            "outside"!
        }
        "#;
    assert_eq!(flagged(Lint::UnreachableCode, source), vec!["\"inside\"!"]);
}

// Infinite loops

#[test]
fn loop_on_true_without_return_is_reported() {
    let source = r#"
        fn main(ctx) {
            while true {
                "Think harder."!
            }
        }
        "#;
    assert_eq!(flagged(Lint::InfiniteLoop, source), vec!["true"]);
}

#[test]
fn constant_flags_count_as_true() {
    let source = r#"
        fn main(ctx) {
            let running = true
            while running {
                "Again."!
            }
        }
        "#;
    assert_eq!(flagged(Lint::InfiniteLoop, source), vec!["running"]);
}

#[test]
fn loops_that_return_or_change_their_flag_are_fine() {
    let source = r#"
        fn done(ctx) -> Boolean { "Done?"! }
        fn main(ctx) -> String {
            let running = true
            while running {
                running = done(ctx)
            }
            while true {
                return "stop"
            }
        }
        "#;
    assert_eq!(flagged(Lint::InfiniteLoop, source), Vec::<&str>::new());
}

// Constant conditions

#[test]
fn literal_and_flag_conditions_are_reported() {
    let source = r#"
        fn main(ctx) {
            let verbose = false
            if true { "always"! }
            if verbose { "never"! }
            while false { "skipped"! }
        }
        "#;
    let warnings: Vec<_> = lint(source)
        .into_iter()
        .filter(|w| w.lint() == Lint::ConstantCondition)
        .map(|w| w.kind)
        .collect();
    assert_eq!(
        warnings,
        vec![
            WarningKind::ConstantCondition {
                construct: "if",
                value: true
            },
            WarningKind::ConstantCondition {
                construct: "if",
                value: false
            },
            WarningKind::ConstantCondition {
                construct: "while",
                value: false
            },
        ]
    );
}

#[test]
fn flags_bound_differently_are_not_constant() {
    let source = r#"
        fn check(ctx) -> Boolean { "Check?"! }
        fn main(ctx, strict: Boolean) {
            let mode = true
            if true { let mode = false }
            if mode { "a"! }
            let live = check(ctx)
            if live { "b"! }
            if strict { "c"! }
        }
        "#;
    assert_eq!(flagged(Lint::ConstantCondition, source), vec!["true"]);
}

// Empty blocks and functions

#[test]
fn empty_branches_and_loop_bodies_are_reported() {
    let source = r#"
        fn ready(ctx) -> Boolean { "Ready?"! }
        fn main(ctx) {
            if ready(ctx) { } else { "not yet"! }
            if ready(ctx) { "go"! } else { }
            while ready(ctx) { }
        }
        "#;
    let kinds: Vec<_> = lint(source)
        .into_iter()
        .filter(|w| w.lint() == Lint::EmptyBlock)
        .map(|w| w.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            WarningKind::EmptyBlock { construct: "if" },
            WarningKind::EmptyBlock { construct: "else" },
            WarningKind::EmptyBlock { construct: "while" },
        ]
    );
}

#[test]
fn empty_function_is_reported() {
    let source = r#"
        fn brainstorm(ctx) -> String { }
        fn main(ctx) { brainstorm(ctx)! }
        "#;
    let warnings: Vec<_> = lint(source)
        .into_iter()
        .filter(|w| w.lint() == Lint::EmptyFunction)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].kind,
        WarningKind::EmptyFunction {
            name: "brainstorm".to_string()
        }
    );
    assert_eq!(
        warnings[0].span.slice(source),
        "fn brainstorm(ctx) -> String { }"
    );
}
