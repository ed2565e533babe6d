//! Meridian: execution contexts and pipeline introspection for
//! coordinate transformations.
//!
//! This is the facade crate re-exporting the public API of the Meridian
//! sub-crates. For most users, adding `meridian` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use meridian::prelude::*;
//!
//! fn fwd(c: Coord) -> Coord { c }
//! fn inv(c: Coord) -> Coord { c }
//!
//! let mut ctx = ExecutionContext::create(None).unwrap();
//! ctx.set_search_paths(["/usr/share/meridian"]);
//! let worker = ctx.try_clone().unwrap();
//!
//! // A pipeline whose Helmert step carries forward and inverse 3D kernels.
//! let helmert = OperationNode::new("helmert", BasicKind::local("helmert"), source_file!(), &ctx)
//!     .with_kernels(
//!         KernelSlots::empty()
//!             .with(KernelSlot::Fwd3d, Kernel::new(kernel_id!(fwd), fwd))
//!             .with(KernelSlot::Inv3d, Kernel::new(kernel_id!(inv), inv)),
//!     );
//! let pipeline = BasicKind::recursive("pipeline");
//! let mut root = OperationNode::new("pipeline", pipeline, source_file!(), &ctx)
//!     .with_sub_operation(SubOperationRole::Helmert, helmert);
//!
//! let result = scan_pipeline(&root);
//! assert_eq!(result.kernels().len(), 2);
//!
//! // Run the same operation under an independent context.
//! assign_context(Some(&mut root), &worker);
//! assert_eq!(root.context().id(), worker.id());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `meridian-core` | IDs, log levels, errors, collaborator traits, network settings |
//! | [`arena`] | `meridian-arena` | `Allocator` trait and `AllocBox` |
//! | [`context`] | `meridian-context` | `ExecutionContext`, search paths, extended context |
//! | [`operation`] | `meridian-operation` | Operation nodes, `assign_context`, pipeline scanner |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`meridian-core`).
pub use meridian_core as types;

/// Pluggable allocation (`meridian-arena`).
pub use meridian_arena as arena;

/// Execution contexts (`meridian-context`).
pub use meridian_context as context;

/// Operation nodes, context propagation, and scanning (`meridian-operation`).
pub use meridian_operation as operation;

pub use meridian_core::{kernel_id, source_file};

/// Common imports for typical Meridian usage.
///
/// ```rust
/// use meridian::prelude::*;
/// ```
pub mod prelude {
    pub use meridian_arena::{Allocator, AllocatorRef};
    pub use meridian_context::{ContextOptions, EnvSource, ExecutionContext, SearchPaths};
    pub use meridian_core::{
        kernel_id, source_file, ContextError, ContextId, DebugLevel, KernelId, LogLevel, Logger,
        SourceFile,
    };
    pub use meridian_operation::{
        assign_context, scan_pipeline, BasicKind, Coord, Kernel, KernelSlot, KernelSlots,
        NoopKind, OperationKind, OperationNode, ScanMode, ScanResult, SubOperationRole,
    };
}
