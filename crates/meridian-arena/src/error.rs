//! Allocation error types.

use std::error::Error;
use std::fmt;

use meridian_core::ContextError;

/// Errors that can occur when placing a value through an [`Allocator`](crate::Allocator).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The allocator returned no block.
    AllocationFailed {
        /// Number of bytes requested.
        size: usize,
        /// Alignment requested.
        align: usize,
    },
    /// The allocator returned a block that does not satisfy the alignment.
    ///
    /// The block has already been handed back to the allocator.
    Misaligned {
        /// Alignment requested.
        align: usize,
        /// Address that was returned.
        addr: usize,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { size, align } => {
                write!(f, "allocator returned no block for {size} bytes (align {align})")
            }
            Self::Misaligned { align, addr } => {
                write!(f, "allocator returned {addr:#x}, not aligned to {align}")
            }
        }
    }
}

impl Error for ArenaError {}

impl From<ArenaError> for ContextError {
    fn from(e: ArenaError) -> Self {
        match e {
            ArenaError::AllocationFailed { size, align } => {
                ContextError::AllocationFailed { size, align }
            }
            ArenaError::Misaligned { align, .. } => ContextError::AllocationFailed {
                size: 0,
                align,
            },
        }
    }
}
