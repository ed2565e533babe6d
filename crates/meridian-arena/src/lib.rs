//! Pluggable allocation for Meridian execution contexts.
//!
//! A context does not allocate its shared state from the global heap
//! directly: it goes through an [`Allocator`] supplied at creation, so an
//! accelerated backend can place that state in memory the device can see
//! (shared virtual memory) and be told when the host maps it.
//!
//! # Ownership
//!
//! ```text
//! AllocatorRef (Arc<dyn Allocator>)
//! └── AllocBox<T>  (one value, freed through the same allocator on drop)
//!     └── MappedGuard (notify_map(true) .. notify_map(false) bracket)
//! ```
//!
//! An [`AllocBox`] holds a strong reference to the allocator that produced
//! its block, so a block can never outlive its allocator and can never be
//! released through a different one.
//!
//! All `unsafe` code in this crate lives in the private `raw` module.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod allocator;
pub mod error;
mod raw;

pub use allocator::{same_allocator, system_allocator, Allocator, AllocatorRef, SystemAllocator};
pub use error::ArenaError;
pub use raw::{AllocBox, MappedGuard};
