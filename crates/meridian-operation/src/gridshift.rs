//! Horizontal and vertical grid-shift kinds.
//!
//! Grid-shift operations are the kinds that hold context-bound data:
//! each loaded grid remembers the context it was opened under, and
//! opening can be deferred until first use when the context asks for it.
//! Both are refreshed by the reassignment hook.

use std::path::{Path, PathBuf};

use meridian_context::ExecutionContext;
use meridian_core::{kernel_id, source_file, ContextId, LogLevel, SourceFile};

use crate::kernel::{Coord, Kernel, KernelSlot, KernelSlots};
use crate::kind::{OperationKind, ScanMode};

/// Which component a grid shift corrects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridShiftDirection {
    /// Latitude/longitude offsets.
    Horizontal,
    /// Height offsets.
    Vertical,
}

/// A named grid bound to the context it was opened under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridRef {
    name: String,
    path: Option<PathBuf>,
    context: ContextId,
}

impl GridRef {
    /// Grid name as given in the operation definition.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolved location, or `None` if the grid could not be found.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Context this grid is currently bound to.
    pub fn context(&self) -> ContextId {
        self.context
    }
}

/// Per-operation data of a grid-shift node.
#[derive(Clone, Debug)]
pub struct GridShiftKind {
    direction: GridShiftDirection,
    grid_names: Vec<String>,
    grids: Vec<GridRef>,
    t_epoch: f64,
    t_final: f64,
    defer_grid_opening: bool,
}

impl GridShiftKind {
    /// Set up a grid shift under `ctx`.
    ///
    /// Grids are opened immediately unless `ctx`'s shared state asks for
    /// deferred opening, in which case they are opened on first
    /// [`ensure_open`](Self::ensure_open).
    pub fn new<I, S>(direction: GridShiftDirection, grid_names: I, ctx: &ExecutionContext) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kind = Self {
            direction,
            grid_names: grid_names.into_iter().map(Into::into).collect(),
            grids: Vec::new(),
            t_epoch: 0.0,
            t_final: 0.0,
            defer_grid_opening: ctx.shared().defer_grid_opening,
        };
        if !kind.defer_grid_opening {
            kind.open_grids(ctx);
        }
        kind
    }

    /// Restrict the shift to observations before `t_epoch`, for an
    /// event that happened at `t_epoch` and is corrected to `t_final`.
    /// A zero in either bound disables the restriction.
    #[must_use]
    pub fn with_time_window(mut self, t_epoch: f64, t_final: f64) -> Self {
        self.t_epoch = t_epoch;
        self.t_final = t_final;
        self
    }

    /// Which component this shift corrects.
    pub fn direction(&self) -> GridShiftDirection {
        self.direction
    }

    /// Grids opened so far.
    pub fn grids(&self) -> &[GridRef] {
        &self.grids
    }

    /// Whether opening is still pending.
    pub fn is_deferred(&self) -> bool {
        self.defer_grid_opening
    }

    /// Whether an observation at epoch `t` falls inside the time window.
    pub fn applies_at(&self, t: f64) -> bool {
        if self.t_final == 0.0 || self.t_epoch == 0.0 {
            return true;
        }
        t < self.t_epoch && self.t_final > self.t_epoch
    }

    /// Open deferred grids now.
    pub fn ensure_open(&mut self, ctx: &ExecutionContext) {
        if self.defer_grid_opening {
            self.open_grids(ctx);
        }
    }

    /// The kernel slots grid-shift nodes carry.
    pub fn kernels(&self) -> KernelSlots {
        match self.direction {
            GridShiftDirection::Horizontal => KernelSlots::empty()
                .with(KernelSlot::Fwd3d, Kernel::new(kernel_id!(hgrid_forward_3d), passthrough))
                .with(KernelSlot::Inv3d, Kernel::new(kernel_id!(hgrid_inverse_3d), passthrough))
                .with(KernelSlot::Fwd4d, Kernel::new(kernel_id!(hgrid_forward_4d), passthrough))
                .with(KernelSlot::Inv4d, Kernel::new(kernel_id!(hgrid_inverse_4d), passthrough)),
            GridShiftDirection::Vertical => KernelSlots::empty()
                .with(KernelSlot::Fwd3d, Kernel::new(kernel_id!(vgrid_forward_3d), passthrough))
                .with(KernelSlot::Inv3d, Kernel::new(kernel_id!(vgrid_inverse_3d), passthrough))
                .with(KernelSlot::Fwd4d, Kernel::new(kernel_id!(vgrid_forward_4d), passthrough))
                .with(KernelSlot::Inv4d, Kernel::new(kernel_id!(vgrid_inverse_4d), passthrough)),
        }
    }

    /// Source file the grid-shift kernels are compiled from.
    pub fn source_file() -> SourceFile {
        source_file!()
    }

    fn open_grids(&mut self, ctx: &ExecutionContext) {
        ctx.log(
            LogLevel::Debug,
            &format!("opening {} grid(s) under {}", self.grid_names.len(), ctx.id()),
        );
        self.grids = self
            .grid_names
            .iter()
            .map(|name| GridRef {
                name: name.clone(),
                path: resolve(ctx, name),
                context: ctx.id(),
            })
            .collect();
        self.defer_grid_opening = false;
    }
}

impl OperationKind for GridShiftKind {
    fn name(&self) -> &str {
        match self.direction {
            GridShiftDirection::Horizontal => "hgridshift",
            GridShiftDirection::Vertical => "vgridshift",
        }
    }

    fn scan_mode(&self) -> ScanMode {
        ScanMode::Local
    }

    fn reassign_context(&mut self, ctx: &ExecutionContext) {
        for grid in &mut self.grids {
            grid.context = ctx.id();
        }
        if self.defer_grid_opening && !ctx.shared().defer_grid_opening {
            self.open_grids(ctx);
        }
    }
}

/// File finder first, then the context's search paths.
fn resolve(ctx: &ExecutionContext, name: &str) -> Option<PathBuf> {
    if let Some(found) = ctx.file_finder().and_then(|finder| finder.find(name)) {
        return Some(found);
    }
    ctx.search_paths()
        .iter()
        .map(|dir| Path::new(dir).join(name))
        .find(|candidate| candidate.is_file())
}

// Grid interpolation lives with the grid readers; the kernel entry
// points here only carry identity.
fn passthrough(coord: Coord) -> Coord {
    coord
}
