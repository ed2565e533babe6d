//! The secondary state block every context owns.

/// Mutable per-context state placed through the context's allocator.
///
/// Cloning a context value-copies this block into a fresh allocation,
/// so two contexts never alias one `SharedState`. Operations read it
/// through the shared-state reference they derive from their context.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SharedState {
    /// Last error number raised on this context; 0 means none pending.
    pub last_errno: i32,
    /// Whether grid-shift operations should postpone opening their grids
    /// until first use.
    pub defer_grid_opening: bool,
}

impl SharedState {
    /// Whether an error is pending.
    pub fn error_pending(&self) -> bool {
        self.last_errno != 0
    }
}
