use super::Span;

#[test]
fn merge_covers_both() {
    let merged = Span::new(4, 9).merge(Span::new(1, 6));
    assert_eq!(merged, Span::new(1, 9));
}

#[test]
fn slice_in_and_out_of_range() {
    let src = "fn main() {}";
    assert_eq!(Span::new(3, 7).slice(src), "main");
    assert_eq!(Span::new(20, 30).slice(src), "");
}

#[test]
fn len_and_empty() {
    assert_eq!(Span::new(2, 5).len(), 3);
    assert!(Span::DUMMY.is_empty());
    assert_eq!(Span::from_range(3..8), Span::new(3, 8));
}
