use super::*;

fn depth(n: u32) -> u32 {
    ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
}

#[test]
fn passes_through_the_result() {
    assert_eq!(ensure_sufficient_stack(|| 42), 42);
}

#[test]
fn deep_recursion_does_not_overflow() {
    assert_eq!(depth(100_000), 100_000);
}
