//! Stack growth for deeply recursive reading and evaluation.
//!
//! The evaluator recurses once per nested form and several times per user
//! function call. Wrapping those recursion points in
//! [`ensure_sufficient_stack`] lets deep user recursion allocate more native
//! stack instead of aborting the process; the configured call-depth limit
//! still bounds runaway recursion.

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
