//! Stack growth for checking deeply nested expressions.
//!
//! Operator chains parse into left-leaning trees of any depth, and the
//! checker walks them recursively.

/// Run `f`, growing the stack first if less than 256KB remains.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(256 * 1024, 2 * 1024 * 1024, f)
}
