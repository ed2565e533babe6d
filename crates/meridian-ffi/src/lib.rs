//! C FFI bindings for Meridian execution contexts.
//!
//! Contexts live in a process-wide slot+generation handle table and are
//! referred to from C by opaque `u64` handles. Every entry point returns
//! an [`MrdStatus`] as `i32`, writes results through out-pointers, and
//! catches panics at the boundary. Stale and double-destroyed handles
//! report [`MrdStatus::InvalidHandle`] instead of touching freed memory.
//!
//! The header `include/meridian.h` is generated by `build.rs`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an entry-point body, converting a panic into `MrdStatus::Panicked`.
///
/// `return` inside the block returns from the entry point with that status.
macro_rules! ffi_guard {
    ($body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(status) => status,
            Err(_) => $crate::status::MrdStatus::Panicked as i32,
        }
    };
}

/// Lock a table mutex, returning `MrdStatus::InternalError` if poisoned.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(_) => return $crate::status::MrdStatus::InternalError as i32,
        }
    };
}

pub mod allocator;
pub mod context;
pub(crate) mod handle;
pub mod logger;
pub mod status;

pub use allocator::MrdAllocator;
pub use logger::MrdLogFn;
pub use status::MrdStatus;
