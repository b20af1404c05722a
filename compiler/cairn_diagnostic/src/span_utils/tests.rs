use super::*;

const SOURCE: &str = "fn main() {\n    \"hi\"!\n}\n";

#[test]
fn line_col_is_one_based() {
    let index = LineIndex::build(SOURCE);
    assert_eq!(index.line_col(0), (1, 1));
    assert_eq!(index.line_col(3), (1, 4));
    assert_eq!(index.line_col(12), (2, 1));
    assert_eq!(index.line_col(16), (2, 5));
}

#[test]
fn line_text_strips_newline() {
    let index = LineIndex::build(SOURCE);
    assert_eq!(index.line_text(SOURCE, 2), "    \"hi\"!");
    assert_eq!(index.line_text(SOURCE, 3), "}");
    assert_eq!(index.line_text(SOURCE, 99), "");
}

#[test]
fn line_number_of_span() {
    assert_eq!(line_number(SOURCE, Span::new(18, 22)), 2);
}
