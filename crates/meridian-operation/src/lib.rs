//! Operation nodes, context propagation, and pipeline kernel scanning.
//!
//! An [`OperationNode`] is one transformation step: up to six kernel
//! slots, a declared list of sub-operations by [`SubOperationRole`], a
//! list of fallback alternatives, and an [`OperationKind`] that carries
//! per-kind data. Nodes borrow the [`ExecutionContext`] they run under.
//!
//! Two walks are defined over nodes:
//!
//! - [`assign_context`] rebinds a node and all of its alternatives to a
//!   new context, running each kind's reassignment hook on the way.
//! - [`scan_pipeline`] collects the distinct kernels a pipeline invokes
//!   and the source files they come from, for building a specialized
//!   dispatch table.
//!
//! [`ExecutionContext`]: meridian_context::ExecutionContext

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod gridshift;
pub mod kernel;
pub mod kind;
pub mod node;
pub mod propagate;
pub mod scan;

pub use gridshift::{GridRef, GridShiftDirection, GridShiftKind};
pub use kernel::{Coord, Kernel, KernelFn, KernelSlot, KernelSlots};
pub use kind::{BasicKind, NoopKind, OperationKind, ScanMode};
pub use node::{OperationNode, SubOperationRole};
pub use propagate::assign_context;
pub use scan::{scan_local, scan_noop, scan_pipeline, scan_recursive, ScanResult};
