//! Stack growth for the recursive phases.
//!
//! The parser descends once per precedence level and nesting level, and the
//! evaluator once per expression node and call. Deeply nested input (long
//! right-leaning operator chains, deep recursion in scripts) can exhaust the
//! native stack before the interpreter's own call-depth limit triggers.
//! Wrapping those entry points in [`ensure_sufficient_stack`] moves the
//! work onto a freshly allocated segment when the current one runs low.
//!
//! On `wasm32` the wrapper is a plain call.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone is left.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Bytes of stack left on the current segment, if the platform reports it.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
