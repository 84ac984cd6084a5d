//! Stack safety for recursive walks over expression DAGs.
//!
//! Expressions produced by symbolic execution can nest tens of thousands of
//! levels deep (long `Concat` chains, long `Add` spines). The scanner, the
//! printer and structural comparison all recurse on the expression shape, so
//! each recursive step goes through [`ensure_sufficient_stack`].
//!
//! - **Native targets**: grows the stack on demand with `stacker`.
//! - **WASM targets**: plain call.
//!
//! ```text
//! fn walk(&mut self, e: ExprId) {
//!     ensure_sufficient_stack(|| {
//!         for kid in self.arena.kids(e) {
//!             self.walk(kid);
//!         }
//!     });
//! }
//! ```

/// Grow the stack when less than this much remains (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the remaining space is below the red zone.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
