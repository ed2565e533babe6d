//! C-compatible status codes.

use meridian_core::ContextError;

/// Status code returned by every FFI function.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MrdStatus {
    /// Success.
    Ok = 0,
    /// Handle is invalid or was already destroyed.
    InvalidHandle = -1,
    /// An argument is null, out of range, or not valid UTF-8.
    InvalidArgument = -2,
    /// The context's allocator could not provide a block.
    AllocationFailed = -3,
    /// Caller-provided buffer is too small.
    BufferTooSmall = -4,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -5,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<&ContextError> for MrdStatus {
    fn from(e: &ContextError) -> Self {
        match e {
            ContextError::AllocationFailed { .. } => MrdStatus::AllocationFailed,
        }
    }
}
