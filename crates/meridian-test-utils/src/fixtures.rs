//! Reusable operation fixtures.
//!
//! Kernels here are identity routines; only their identities matter to
//! the scanner. Each leaf builder places its kernels in a distinct
//! [`SourceFile`] so file provenance can be asserted.
//!
//! - [`cart_helmert_pipeline`]: kernels on Cartesian and Helmert only.
//! - [`kernel_free_pipeline`]: every role declared, no kernel anywhere.
//! - [`full_pipeline`]: every role declared with forward/inverse 3D kernels.
//! - [`with_alternatives`]: attach fallback chains to a root.

use meridian_context::ExecutionContext;
use meridian_core::{kernel_id, KernelId, SourceFile};
use meridian_operation::{
    BasicKind, Coord, Kernel, KernelSlot, KernelSlots, NoopKind, OperationNode, SubOperationRole,
};

pub const PIPELINE_FILE: SourceFile = SourceFile::new("src/pipeline.rs");
pub const AXISSWAP_FILE: SourceFile = SourceFile::new("src/conversions/axisswap.rs");
pub const CART_FILE: SourceFile = SourceFile::new("src/conversions/cart.rs");
pub const CART_WGS84_FILE: SourceFile = SourceFile::new("src/transformations/cart_wgs84.rs");
pub const HELMERT_FILE: SourceFile = SourceFile::new("src/transformations/helmert.rs");
pub const HGRID_FILE: SourceFile = SourceFile::new("src/transformations/hgridshift.rs");
pub const VGRID_FILE: SourceFile = SourceFile::new("src/transformations/vgridshift.rs");

pub const CART_FWD: KernelId = kernel_id!(cart_forward_3d);
pub const CART_INV: KernelId = kernel_id!(cart_inverse_3d);
pub const HELMERT_FWD: KernelId = kernel_id!(helmert_forward_3d);
pub const HELMERT_INV: KernelId = kernel_id!(helmert_inverse_3d);

fn identity(coord: Coord) -> Coord {
    coord
}

/// An identity kernel carrying `id`.
pub fn kernel(id: KernelId) -> Kernel {
    Kernel::new(id, identity)
}

/// Forward and inverse 3D slots filled.
pub fn slots_3d(fwd: KernelId, inv: KernelId) -> KernelSlots {
    KernelSlots::empty()
        .with(KernelSlot::Fwd3d, kernel(fwd))
        .with(KernelSlot::Inv3d, kernel(inv))
}

/// A leaf node scanned locally.
pub fn leaf<'c>(
    name: &'static str,
    file: SourceFile,
    kernels: KernelSlots,
    ctx: &'c ExecutionContext,
) -> OperationNode<'c> {
    OperationNode::new(name, BasicKind::local(name), file, ctx).with_kernels(kernels)
}

/// An empty pipeline root.
pub fn pipeline_root(ctx: &ExecutionContext) -> OperationNode<'_> {
    OperationNode::new("pipeline", BasicKind::recursive("pipeline"), PIPELINE_FILE, ctx)
}

/// Axis swap as a no-op, kernel-free Cartesian-to-WGS84, and kernels on
/// Cartesian and Helmert only.
pub fn cart_helmert_pipeline(ctx: &ExecutionContext) -> OperationNode<'_> {
    pipeline_root(ctx)
        .with_sub_operation(
            SubOperationRole::AxisSwap,
            OperationNode::new("axisswap", NoopKind, AXISSWAP_FILE, ctx),
        )
        .with_sub_operation(
            SubOperationRole::Cartesian,
            leaf("cart", CART_FILE, slots_3d(CART_FWD, CART_INV), ctx),
        )
        .with_sub_operation(
            SubOperationRole::CartesianToWgs84,
            leaf("cart_wgs84", CART_WGS84_FILE, KernelSlots::empty(), ctx),
        )
        .with_sub_operation(
            SubOperationRole::Helmert,
            leaf("helmert", HELMERT_FILE, slots_3d(HELMERT_FWD, HELMERT_INV), ctx),
        )
}

/// Every role declared, no kernel present anywhere.
pub fn kernel_free_pipeline(ctx: &ExecutionContext) -> OperationNode<'_> {
    let files = role_files();
    SubOperationRole::ALL
        .into_iter()
        .zip(files)
        .fold(pipeline_root(ctx), |root, (role, (name, file))| {
            root.with_sub_operation(role, leaf(name, file, KernelSlots::empty(), ctx))
        })
}

/// Every role declared, each with its own forward/inverse 3D kernels.
pub fn full_pipeline(ctx: &ExecutionContext) -> OperationNode<'_> {
    let kernels = [
        (kernel_id!(axisswap_forward_3d), kernel_id!(axisswap_inverse_3d)),
        (CART_FWD, CART_INV),
        (kernel_id!(cart_wgs84_forward_3d), kernel_id!(cart_wgs84_inverse_3d)),
        (HELMERT_FWD, HELMERT_INV),
        (kernel_id!(hgrid_forward_3d), kernel_id!(hgrid_inverse_3d)),
        (kernel_id!(vgrid_forward_3d), kernel_id!(vgrid_inverse_3d)),
    ];
    SubOperationRole::ALL
        .into_iter()
        .zip(role_files())
        .zip(kernels)
        .fold(
            pipeline_root(ctx),
            |root, ((role, (name, file)), (fwd, inv))| {
                root.with_sub_operation(role, leaf(name, file, slots_3d(fwd, inv), ctx))
            },
        )
}

/// Attach `width` alternatives to `root`, each carrying a chain of
/// `depth` nested alternatives below it.
pub fn with_alternatives<'c>(
    mut root: OperationNode<'c>,
    width: usize,
    depth: usize,
    ctx: &'c ExecutionContext,
) -> OperationNode<'c> {
    for _ in 0..width {
        let mut chain = pipeline_root(ctx);
        for _ in 0..depth {
            chain = pipeline_root(ctx).with_alternative(chain);
        }
        root.push_alternative(chain);
    }
    root
}

fn role_files() -> [(&'static str, SourceFile); 6] {
    [
        ("axisswap", AXISSWAP_FILE),
        ("cart", CART_FILE),
        ("cart_wgs84", CART_WGS84_FILE),
        ("helmert", HELMERT_FILE),
        ("hgridshift", HGRID_FILE),
        ("vgridshift", VGRID_FILE),
    ]
}
