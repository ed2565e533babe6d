//! Execution context for Meridian transformation operations.
//!
//! An [`ExecutionContext`] is the unit of configuration and resource
//! ownership that every operation references instead of global state:
//! allocator, shared state block, logging, search paths, network and
//! cache settings, and a lazily created [`ExtendedContext`].
//!
//! # Threading
//!
//! Contexts are not internally synchronized. Mutation needs `&mut`, so
//! one context cannot be written from two threads at once. A thread that
//! needs its own context clones one ([`ExecutionContext::try_clone`]);
//! the clone shares no mutable state with its source. The process-wide
//! default ([`ExecutionContext::global`]) is built exactly once and is
//! read-only afterwards.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod env;
pub mod extended;
pub mod file_manager;
pub mod logger;
pub mod search_path;
pub mod shared;

pub use context::{ContextOptions, ExecutionContext, TmercAlgorithm};
pub use env::EnvSource;
pub use extended::ExtendedContext;
pub use file_manager::DefaultFileManager;
pub use logger::{default_logger, FacadeLogger};
pub use search_path::SearchPaths;
pub use shared::SharedState;
