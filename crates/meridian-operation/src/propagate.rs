//! Rebinding an operation (and its fallbacks) to another context.

use meridian_context::ExecutionContext;
use meridian_core::LogLevel;
use smallvec::SmallVec;

use crate::node::OperationNode;

/// Rebind `node` and all of its alternatives, transitively, to `context`.
///
/// For each node reached: the context reference is switched, the
/// shared-state reference is re-derived from `context`, and the kind's
/// [`reassign_context`](crate::OperationKind::reassign_context) hook
/// runs. Sub-operations are not visited; they keep their own binding.
///
/// An absent node is a no-op. Reassigning to the context a node is
/// already bound to is idempotent.
pub fn assign_context<'ctx>(
    node: Option<&mut OperationNode<'ctx>>,
    context: &'ctx ExecutionContext,
) {
    let Some(root) = node else {
        return;
    };
    let mut pending: SmallVec<[&mut OperationNode<'ctx>; 8]> = SmallVec::new();
    pending.push(root);
    let mut visited = 0usize;
    while let Some(current) = pending.pop() {
        current.context = context;
        current.shared = context.shared();
        current.kind.reassign_context(context);
        visited += 1;
        pending.extend(current.alternatives.iter_mut());
    }
    if context.enabled(LogLevel::Trace) {
        context.log(
            LogLevel::Trace,
            &format!("assigned {} operation(s) to {}", visited, context.id()),
        );
    }
}

impl<'ctx> OperationNode<'ctx> {
    /// Method form of [`assign_context`].
    pub fn assign_context(&mut self, context: &'ctx ExecutionContext) {
        assign_context(Some(self), context);
    }
}
