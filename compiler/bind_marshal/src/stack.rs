//! Stack growth for recursion over template nesting.
//!
//! Ignore checking and element marshalling recurse once per template
//! argument level. Real headers stay shallow, but generated or adversarial
//! input (`vector<vector<...>>` a few thousand deep) must not overflow.

/// Remaining stack below which a new segment is allocated.
const RED_ZONE: usize = 64 * 1024;

/// Size of each newly allocated stack segment.
const GROWTH: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
pub(crate) fn with_stack_guard<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}
