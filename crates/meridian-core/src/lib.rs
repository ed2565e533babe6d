//! Core types and traits for the Meridian transformation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every other Meridian crate: stable
//! identifiers for contexts, kernels, and source files, log levels,
//! error types, network settings, and the collaborator traits a
//! context calls out through ([`Logger`], [`FileManager`], [`FileFinder`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod level;
pub mod network;
pub mod traits;

pub use error::ContextError;
pub use id::{ContextId, KernelId, SourceFile};
pub use level::{parse_debug_level, DebugLevel, LogLevel};
pub use network::{parse_network_flag, GridChunkCacheConfig, NetworkSettings};
pub use traits::{FileFinder, FileManager, Logger};
