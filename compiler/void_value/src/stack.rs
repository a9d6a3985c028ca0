//! Stack headroom for recursive walks over nested object maps.
//!
//! Deep clone, structural equality and dumps recurse once per nesting
//! level. On native targets the stack grows on demand; on WASM the closure
//! runs directly.

/// Minimum stack space to keep available (100KB red zone).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
