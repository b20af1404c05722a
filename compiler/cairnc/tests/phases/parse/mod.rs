//! Front-end behaviour as the driver sees it.

use cairn_diagnostic::ErrorCode;
use cairn_ir::StringInterner;
use cairnc::commands::describe_module;
use cairnc::compile;
use pretty_assertions::assert_eq;

use crate::common::{codes, compile_errors};

#[test]
fn clean_source_compiles() {
    let compiled = compile(
        r#"
        extern fn print(message: String)
        # Greets someone by name.
        fn greet(ctx, name: String) -> String { "Say hello to "! name! }
        fn main(ctx) { print(greet(ctx, "Ada")) return }
        "#,
    )
    .unwrap();
    assert_eq!(compiled.module.functions.len(), 2);
    assert_eq!(compiled.module.externs.len(), 1);
}

#[test]
fn lexer_errors_stop_the_pipeline() {
    let diags = compile_errors("fn main(ctx) { \"never closed }");
    assert_eq!(codes(&diags), vec![ErrorCode::E0001]);
}

#[test]
fn every_broken_item_is_reported() {
    let diags = compile_errors("fn a( { }\nfn b() -> Nope { }\nfn c() { }");
    assert_eq!(diags.len(), 2);
    assert!(diags[0].code.as_str().starts_with("E1"), "{:?}", diags[0]);
    assert_eq!(diags[1].code, ErrorCode::E1006);
}

#[test]
fn static_errors_use_check_codes() {
    let diags = compile_errors(
        r#"
        fn helper(ctx, text: String) -> String { return text }
        fn main(ctx) {
            let n: i32 = "five"
            missing()
            helper(_, "x")
        }
        "#,
    );
    assert_eq!(
        codes(&diags),
        vec![ErrorCode::E2001, ErrorCode::E2003, ErrorCode::E2006]
    );
}

#[test]
fn definitions_are_described_one_per_line() {
    let interner = StringInterner::new();
    let output = cairn_parse::parse_source(
        r#"
        extern fn search(query: String, limit: i32) -> String
        # Decide whether to keep going.
        fn more(ctx) -> Boolean { "More?"! }
        fn main(ctx) {
            "Start"!
            return
        }
        "#,
        &interner,
    )
    .unwrap();
    assert_eq!(
        describe_module(&output.module, &interner),
        "extern fn search(query: String, limit: i32) -> String\n\
         # Decide whether to keep going.\n\
         fn more(ctx: Context) -> Boolean (1 statement)\n\
         fn main(ctx: Context) (2 statements)\n"
    );
}
