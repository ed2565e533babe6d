//! Error types for context construction.
//!
//! Allocation failure while building or cloning a context is the only
//! fallible path in the core; configuration problems are normalized,
//! never reported.

use std::error::Error;
use std::fmt;

/// Errors from creating or cloning an execution context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextError {
    /// The context's allocator could not provide a block.
    AllocationFailed {
        /// Size of the failed request in bytes.
        size: usize,
        /// Alignment of the failed request in bytes.
        align: usize,
    },
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { size, align } => {
                write!(f, "allocation failed: {size} bytes (align {align})")
            }
        }
    }
}

impl Error for ContextError {}
