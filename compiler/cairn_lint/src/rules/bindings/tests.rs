use pretty_assertions::assert_eq;

use crate::tests::{flagged, lint};
use crate::{Lint, WarningKind};

// Unused variables

#[test]
fn unread_let_is_reported() {
    let source = r#"
        fn main(ctx) {
            let kept = "kept"
            let dropped = "dropped"
            kept!
        }
        "#;
    assert_eq!(
        flagged(Lint::UnusedVariable, source),
        vec![r#"let dropped = "dropped""#]
    );
}

#[test]
fn parameters_and_underscored_names_are_exempt() {
    let source = r#"
        fn summarize(ctx, topic: String, depth: i32) -> String {
            let _scratch = 1
            "Summarize the material above."!
        }
        "#;
    assert_eq!(flagged(Lint::UnusedVariable, source), Vec::<&str>::new());
}

#[test]
fn assignment_is_not_a_read() {
    let source = r#"
        fn main(ctx) {
            let count = 0
            count = 1
        }
        "#;
    assert_eq!(flagged(Lint::UnusedVariable, source), vec!["let count = 0"]);
}

#[test]
fn reads_resolve_to_the_innermost_binding() {
    let source = r#"
        fn main(ctx) {
            let note = "outer"
            if true {
                let note = "inner"
                note!
            }
        }
        "#;
    assert_eq!(
        flagged(Lint::UnusedVariable, source),
        vec![r#"let note = "outer""#]
    );
}

#[test]
fn select_bindings_hide_outer_variables() {
    let source = r#"
        extern fn search(query: String) -> String
        fn main(ctx) {
            let hits = "none"
            let found = select {
                search(_) as hits => hits,
                search("fallback") as other => other,
            }
            found!
        }
        "#;
    assert_eq!(
        flagged(Lint::UnusedVariable, source),
        vec![r#"let hits = "none""#]
    );
}

#[test]
fn reads_inside_loops_and_handlers_count() {
    let source = r#"
        extern fn search(query: String) -> String
        fn keep_going(ctx) -> Boolean { "More?"! }
        fn main(ctx) {
            let query = "rust"
            let limit = 3
            while keep_going(ctx) {
                limit = limit - 1
            }
            let found = select {
                search(query) as hits => { hits },
            }
            found!
        }
        "#;
    assert_eq!(flagged(Lint::UnusedVariable, source), Vec::<&str>::new());
}

// Shadowing

#[test]
fn inner_let_shadowing_outer_is_reported() {
    let source = r#"
        fn main(ctx) {
            let answer = "first"
            if true {
                let answer = "second"
                answer!
            }
            answer!
        }
        "#;
    let warnings: Vec<_> = lint(source)
        .into_iter()
        .filter(|w| w.lint() == Lint::ShadowedVariable)
        .collect();
    assert_eq!(warnings.len(), 1);
    let WarningKind::ShadowedVariable { name, outer } = &warnings[0].kind else {
        panic!("unexpected warning {:?}", warnings[0]);
    };
    assert_eq!(name, "answer");
    assert_eq!(outer.slice(source), r#"let answer = "first""#);
    assert_eq!(warnings[0].span.slice(source), r#"let answer = "second""#);
}

#[test]
fn parameters_can_be_shadowed() {
    let source = r#"
        fn main(ctx, name: String) {
            let name = name + "!"
            name!
        }
        "#;
    assert_eq!(
        flagged(Lint::ShadowedVariable, source),
        vec![r#"let name = name + "!""#]
    );
}

#[test]
fn rebinding_in_the_same_block_is_not_shadowing() {
    let source = r#"
        fn main(ctx) {
            let text = "a"
            text!
            let text = text + "b"
            text!
        }
        "#;
    assert_eq!(flagged(Lint::ShadowedVariable, source), Vec::<&str>::new());
}

// Overwritten values

#[test]
fn write_before_read_is_reported_on_the_dead_write() {
    let source = r#"
        fn main(ctx) {
            let status = "pending"
            status = "running"
            status = "done"
            status!
        }
        "#;
    let warnings: Vec<_> = lint(source)
        .into_iter()
        .filter(|w| w.lint() == Lint::OverwrittenValue)
        .collect();
    let spans: Vec<&str> = warnings.iter().map(|w| w.span.slice(source)).collect();
    assert_eq!(spans, vec![r#"let status = "pending""#, r#"status = "running""#]);
    let WarningKind::OverwrittenValue { overwritten_at, .. } = &warnings[1].kind else {
        panic!("unexpected warning {:?}", warnings[1]);
    };
    assert_eq!(overwritten_at.slice(source), r#"status = "done""#);
}

#[test]
fn reads_between_writes_keep_the_value() {
    let source = r#"
        fn main(ctx) {
            let step = 1
            step = step + 1
            let label = "a"
            label!
            label = "b"
            if step > 1 { label! }
            label = "c"
            label!
        }
        "#;
    assert_eq!(flagged(Lint::OverwrittenValue, source), Vec::<&str>::new());
}

#[test]
fn nested_blocks_are_checked_on_their_own() {
    let source = r#"
        fn keep_going(ctx) -> Boolean { "More?"! }
        fn main(ctx) {
            let total = 0
            while keep_going(ctx) {
                total = 1
                total = 2
            }
            total!
        }
        "#;
    assert_eq!(flagged(Lint::OverwrittenValue, source), vec!["total = 1"]);
}
