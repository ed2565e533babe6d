//! The [`OperationKind`] trait: per-kind data and behavior of a node.

use std::any::Any;

use meridian_context::ExecutionContext;

/// How the scanner treats a node of a given kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScanMode {
    /// Contributes nothing (no invocable kernel of its own).
    Skip,
    /// Only the node's own kernel slots.
    Local,
    /// Own kernel slots, then each declared sub-operation in role order.
    #[default]
    Recursive,
}

/// Behavior attached to an [`OperationNode`](crate::OperationNode).
///
/// # Contract
///
/// - [`scan_mode`](Self::scan_mode) is consulted whenever the node is
///   scanned, as a root or as a sub-operation.
/// - [`reassign_context`](Self::reassign_context) is called after the
///   node's context and shared-state references have been switched.
///   Kinds that cache data bound to a context (loaded grids, database
///   handles) rebind it here. The default does nothing.
///
/// # Examples
///
/// ```
/// use meridian_operation::{OperationKind, ScanMode};
///
/// struct Affine;
///
/// impl OperationKind for Affine {
///     fn name(&self) -> &str { "affine" }
///     fn scan_mode(&self) -> ScanMode { ScanMode::Local }
/// }
///
/// assert_eq!(Affine.scan_mode(), ScanMode::Local);
/// ```
pub trait OperationKind: Any + Send + Sync {
    /// Short name of the operation kind (e.g. `"helmert"`).
    fn name(&self) -> &str;

    /// Scan behavior for nodes of this kind.
    fn scan_mode(&self) -> ScanMode {
        ScanMode::Recursive
    }

    /// Rebind context-scoped data to `ctx`.
    fn reassign_context(&mut self, ctx: &ExecutionContext) {
        let _ = ctx;
    }
}

/// A kind with no per-context data: only a name and a scan mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BasicKind {
    name: &'static str,
    mode: ScanMode,
}

impl BasicKind {
    /// A kind scanned with `mode`.
    pub const fn new(name: &'static str, mode: ScanMode) -> Self {
        Self { name, mode }
    }

    /// A leaf kind that only contributes its own kernels.
    pub const fn local(name: &'static str) -> Self {
        Self::new(name, ScanMode::Local)
    }

    /// A composite kind (e.g. a pipeline or a concatenated operation).
    pub const fn recursive(name: &'static str) -> Self {
        Self::new(name, ScanMode::Recursive)
    }
}

impl OperationKind for BasicKind {
    fn name(&self) -> &str {
        self.name
    }

    fn scan_mode(&self) -> ScanMode {
        self.mode
    }
}

/// The no-op kind: a declared but inert sub-operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoopKind;

impl OperationKind for NoopKind {
    fn name(&self) -> &str {
        "noop"
    }

    fn scan_mode(&self) -> ScanMode {
        ScanMode::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scan_mode_is_recursive() {
        struct Pipeline;
        impl OperationKind for Pipeline {
            fn name(&self) -> &str {
                "pipeline"
            }
        }
        assert_eq!(Pipeline.scan_mode(), ScanMode::Recursive);
    }

    #[test]
    fn basic_kinds() {
        assert_eq!(BasicKind::local("cart").scan_mode(), ScanMode::Local);
        assert_eq!(BasicKind::recursive("pipeline").scan_mode(), ScanMode::Recursive);
        assert_eq!(BasicKind::local("cart").name(), "cart");
        assert_eq!(NoopKind.scan_mode(), ScanMode::Skip);
        assert_eq!(NoopKind.name(), "noop");
    }
}
