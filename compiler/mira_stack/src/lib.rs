//! Stack growth for the recursive parser and evaluator.
//!
//! Parenthesized expressions, right-nested `^` chains and callable
//! invocations all recurse on the native stack. Deeply nested input would
//! overflow it long before the evaluator's call-depth limit is reached, so
//! recursive entry points wrap themselves in [`ensure_sufficient_stack`].
//!
//! On wasm32 these are passthroughs.

/// Grow when less than this much stack is left.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
pub const GROWTH: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
