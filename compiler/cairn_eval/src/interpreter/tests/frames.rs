use pretty_assertions::assert_eq;

use super::load;
use crate::context_stack::{ContentItem, ItemOrigin};
use crate::interpreter::Interpreter;
use crate::model::{EchoModel, ScriptedModel};
use crate::value::Value;

#[test]
fn callee_frame_is_invisible_to_the_caller() {
    let fixture = load(
        r#"
        fn inner(ctx) -> String {
            "secret notes"!
            return "done"
        }
        fn outer(ctx) -> String {
            "visible"!
            let result = inner(ctx)
        }
        "#,
    );
    let model = ScriptedModel::new(["final"]);
    let mut interp = Interpreter::new(&fixture.program, &model);

    assert_eq!(interp.call("outer", vec![]).unwrap(), Value::from("final"));
    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].context_text(), "visible");
}

#[test]
fn child_frame_sees_its_ancestors() {
    let fixture = load(
        r#"
        fn inner(ctx) -> String { "inner"! }
        fn outer(ctx) -> String {
            "outer"!
            return inner(ctx)
        }
        "#,
    );
    let mut interp = Interpreter::new(&fixture.program, &EchoModel);
    assert_eq!(
        interp.call("outer", vec![]).unwrap(),
        Value::from("outer\ninner")
    );
}

#[test]
fn fresh_context_starts_a_root_frame() {
    let fixture = load(
        r#"
        fn inner(ctx) -> String { "inner"! }
        fn outer(ctx) -> String {
            "outer"!
            return inner(Context::new())
        }
        "#,
    );
    let mut interp = Interpreter::new(&fixture.program, &EchoModel);
    assert_eq!(interp.call("outer", vec![]).unwrap(), Value::from("inner"));
    assert_eq!(interp.live_frames(), 0);
}

#[test]
fn siblings_do_not_share_frames() {
    let fixture = load(
        r#"
        fn first(ctx) -> String {
            "first sibling"!
            return "one"
        }
        fn second(ctx) -> String { "second sibling"! }
        fn parent(ctx) -> String {
            "parent"!
            let a = first(ctx)
            return second(ctx)
        }
        "#,
    );
    let model = ScriptedModel::new(["two"]);
    let mut interp = Interpreter::new(&fixture.program, &model);

    assert_eq!(interp.call("parent", vec![]).unwrap(), Value::from("two"));
    assert_eq!(
        model.requests()[0].context_text(),
        "parent\nsecond sibling"
    );
}

#[test]
fn injected_items_record_their_origin() {
    let fixture = load(
        r#"
        fn lookup(ctx) -> String { return "42 results" }
        fn report(ctx, topic: String) -> String {
            "Report on"!
            topic!
            lookup(ctx)!
        }
        "#,
    );
    let model = ScriptedModel::new(["report text"]);
    let mut interp = Interpreter::new(&fixture.program, &model);

    interp.call("report", vec![Value::from("rust")]).unwrap();

    assert_eq!(
        model.requests()[0].items,
        vec![
            ContentItem::injected("Report on"),
            ContentItem {
                origin: ItemOrigin::Parameter("topic".into()),
                text: "rust".into(),
            },
            ContentItem {
                origin: ItemOrigin::CallResult("lookup".into()),
                text: "42 results".into(),
            },
        ]
    );
}

#[test]
fn bare_strings_are_injected_and_other_values_rendered() {
    let fixture = load(
        r#"
        fn tally(ctx) -> String {
            "Counts so far:"
            3!
            true!
        }
        "#,
    );
    let mut interp = Interpreter::new(&fixture.program, &EchoModel);
    assert_eq!(
        interp.call("tally", vec![]).unwrap(),
        Value::from("Counts so far:\n3\ntrue")
    );
}

#[test]
fn frames_are_released_after_every_call() {
    let fixture = load(
        r#"
        fn leaf(ctx) -> i32 { return 1 }
        fn branch(ctx) -> i32 { return leaf(ctx) + leaf(Context::new()) }
        fn main(ctx) -> i32 { return branch(ctx) + branch(ctx) }
        "#,
    );
    let mut interp = Interpreter::new(&fixture.program, &EchoModel);
    assert_eq!(interp.run_main().unwrap(), Value::Int(4));
    assert_eq!(interp.live_frames(), 0);
    assert_eq!(interp.call_depth(), 0);
}
