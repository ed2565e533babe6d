//! [`OperationNode`]: one transformation step and its links.

use std::fmt;

use indexmap::IndexMap;
use meridian_context::{ExecutionContext, SharedState};
use meridian_core::SourceFile;

use crate::kernel::KernelSlots;
use crate::kind::OperationKind;

/// Named position of a sub-operation inside a composed operation.
///
/// Variant order is the order the scanner visits sub-operations in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubOperationRole {
    /// Axis order / unit normalisation.
    AxisSwap,
    /// Geographic to geocentric Cartesian conversion.
    Cartesian,
    /// Geocentric Cartesian to WGS84 datum shift.
    CartesianToWgs84,
    /// Seven/fourteen-parameter Helmert transform.
    Helmert,
    /// Horizontal grid shift.
    HorizontalGridShift,
    /// Vertical grid shift.
    VerticalGridShift,
}

impl SubOperationRole {
    /// Every role, in scan order.
    pub const ALL: [SubOperationRole; 6] = [
        SubOperationRole::AxisSwap,
        SubOperationRole::Cartesian,
        SubOperationRole::CartesianToWgs84,
        SubOperationRole::Helmert,
        SubOperationRole::HorizontalGridShift,
        SubOperationRole::VerticalGridShift,
    ];
}

impl fmt::Display for SubOperationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AxisSwap => "axisswap",
            Self::Cartesian => "cart",
            Self::CartesianToWgs84 => "cart_wgs84",
            Self::Helmert => "helmert",
            Self::HorizontalGridShift => "hgridshift",
            Self::VerticalGridShift => "vgridshift",
        };
        f.write_str(name)
    }
}

/// A transformation step.
///
/// A node borrows the context it runs under (and that context's shared
/// state) for `'ctx`; the context therefore outlives every node bound to
/// it and cannot be mutated while bound. The node owns its kernel slots,
/// its kind, its sub-operations, and its alternatives. Alternatives are
/// fallback operations tried when this one does not apply; they form a
/// tree owned by the root, so the alternative relation has no cycles.
pub struct OperationNode<'ctx> {
    name: String,
    pub(crate) context: &'ctx ExecutionContext,
    pub(crate) shared: &'ctx SharedState,
    kernels: KernelSlots,
    source_file: SourceFile,
    pub(crate) kind: Box<dyn OperationKind>,
    sub_operations: IndexMap<SubOperationRole, OperationNode<'ctx>>,
    pub(crate) alternatives: Vec<OperationNode<'ctx>>,
}

impl<'ctx> OperationNode<'ctx> {
    /// A node of `kind` defined in `source_file`, bound to `context`.
    pub fn new(
        name: impl Into<String>,
        kind: impl OperationKind,
        source_file: SourceFile,
        context: &'ctx ExecutionContext,
    ) -> Self {
        Self {
            name: name.into(),
            context,
            shared: context.shared(),
            kernels: KernelSlots::empty(),
            source_file,
            kind: Box::new(kind),
            sub_operations: IndexMap::new(),
            alternatives: Vec::new(),
        }
    }

    /// Builder form of setting the kernel slots.
    #[must_use]
    pub fn with_kernels(mut self, kernels: KernelSlots) -> Self {
        self.kernels = kernels;
        self
    }

    /// Builder form of [`set_sub_operation`](Self::set_sub_operation).
    #[must_use]
    pub fn with_sub_operation(mut self, role: SubOperationRole, node: OperationNode<'ctx>) -> Self {
        self.set_sub_operation(role, node);
        self
    }

    /// Builder form of [`push_alternative`](Self::push_alternative).
    #[must_use]
    pub fn with_alternative(mut self, node: OperationNode<'ctx>) -> Self {
        self.push_alternative(node);
        self
    }

    /// Operation name (e.g. the definition string it was built from).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Context this node is bound to.
    pub fn context(&self) -> &'ctx ExecutionContext {
        self.context
    }

    /// Shared state of the bound context.
    pub fn shared(&self) -> &'ctx SharedState {
        self.shared
    }

    /// Kernel slots.
    pub fn kernels(&self) -> &KernelSlots {
        &self.kernels
    }

    /// Mutable kernel slots.
    pub fn kernels_mut(&mut self) -> &mut KernelSlots {
        &mut self.kernels
    }

    /// File the node's kernels are defined in.
    pub fn source_file(&self) -> SourceFile {
        self.source_file
    }

    /// The node's kind.
    pub fn kind(&self) -> &dyn OperationKind {
        &*self.kind
    }

    /// Mutable access to the node's kind.
    pub fn kind_mut(&mut self) -> &mut dyn OperationKind {
        &mut *self.kind
    }

    /// The kind as a concrete type, if it is one.
    pub fn kind_as<K: OperationKind>(&self) -> Option<&K> {
        let any: &dyn std::any::Any = &*self.kind;
        any.downcast_ref()
    }

    /// Declare (or replace) the sub-operation in `role`.
    pub fn set_sub_operation(
        &mut self,
        role: SubOperationRole,
        node: OperationNode<'ctx>,
    ) -> Option<OperationNode<'ctx>> {
        let previous = self.sub_operations.insert(role, node);
        self.sub_operations.sort_unstable_keys();
        previous
    }

    /// Remove the sub-operation in `role`.
    pub fn remove_sub_operation(&mut self, role: SubOperationRole) -> Option<OperationNode<'ctx>> {
        self.sub_operations.shift_remove(&role)
    }

    /// Sub-operation in `role`, if declared.
    pub fn sub_operation(&self, role: SubOperationRole) -> Option<&OperationNode<'ctx>> {
        self.sub_operations.get(&role)
    }

    /// Mutable sub-operation in `role`, if declared.
    pub fn sub_operation_mut(
        &mut self,
        role: SubOperationRole,
    ) -> Option<&mut OperationNode<'ctx>> {
        self.sub_operations.get_mut(&role)
    }

    /// Declared sub-operations in role order.
    pub fn sub_operations(&self) -> impl Iterator<Item = (SubOperationRole, &OperationNode<'ctx>)> {
        self.sub_operations.iter().map(|(role, node)| (*role, node))
    }

    /// Append a fallback operation.
    pub fn push_alternative(&mut self, node: OperationNode<'ctx>) {
        self.alternatives.push(node);
    }

    /// Fallback operations, in preference order.
    pub fn alternatives(&self) -> &[OperationNode<'ctx>] {
        &self.alternatives
    }

    /// Mutable fallback operations.
    pub fn alternatives_mut(&mut self) -> &mut [OperationNode<'ctx>] {
        &mut self.alternatives
    }
}

impl fmt::Debug for OperationNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationNode")
            .field("name", &self.name)
            .field("kind", &self.kind.name())
            .field("context", &self.context.id())
            .field("kernels", &self.kernels)
            .field("source_file", &self.source_file)
            .field("sub_operations", &self.sub_operations)
            .field("alternatives", &self.alternatives)
            .finish()
    }
}
