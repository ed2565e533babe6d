//! Benchmark profiles for Meridian contexts and pipeline scanning.
//!
//! - [`configured_context`]: a context with a realistic amount of configuration.
//! - [`nested_pipeline`]: pipelines nested `depth` levels through their
//!   Cartesian role, every level with kernels on all six roles.
//! - [`alternative_forest`]: a root with `width` fallback chains of `depth`.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use meridian_context::{ContextOptions, EnvSource, ExecutionContext};
use meridian_core::{kernel_id, ContextError, KernelId, SourceFile};
use meridian_operation::{
    BasicKind, Coord, Kernel, KernelSlot, KernelSlots, OperationNode, SubOperationRole,
};

const PIPELINE_FILE: SourceFile = SourceFile::new("src/pipeline.rs");

const ROLE_KERNELS: [(SubOperationRole, KernelId, KernelId, SourceFile); 6] = [
    (
        SubOperationRole::AxisSwap,
        kernel_id!(axisswap_forward),
        kernel_id!(axisswap_inverse),
        SourceFile::new("src/conversions/axisswap.rs"),
    ),
    (
        SubOperationRole::Cartesian,
        kernel_id!(cart_forward),
        kernel_id!(cart_inverse),
        SourceFile::new("src/conversions/cart.rs"),
    ),
    (
        SubOperationRole::CartesianToWgs84,
        kernel_id!(cart_wgs84_forward),
        kernel_id!(cart_wgs84_inverse),
        SourceFile::new("src/transformations/cart_wgs84.rs"),
    ),
    (
        SubOperationRole::Helmert,
        kernel_id!(helmert_forward),
        kernel_id!(helmert_inverse),
        SourceFile::new("src/transformations/helmert.rs"),
    ),
    (
        SubOperationRole::HorizontalGridShift,
        kernel_id!(hgrid_forward),
        kernel_id!(hgrid_inverse),
        SourceFile::new("src/transformations/hgridshift.rs"),
    ),
    (
        SubOperationRole::VerticalGridShift,
        kernel_id!(vgrid_forward),
        kernel_id!(vgrid_inverse),
        SourceFile::new("src/transformations/vgridshift.rs"),
    ),
];

fn identity(coord: Coord) -> Coord {
    coord
}

/// A context with `n_paths` search paths, a CA bundle, and networking on.
///
/// Environment variables are ignored so runs are reproducible.
pub fn configured_context(n_paths: usize) -> Result<ExecutionContext, ContextError> {
    let mut ctx = ExecutionContext::with_options(ContextOptions {
        env: EnvSource::empty(),
        ..ContextOptions::default()
    })?;
    ctx.set_search_paths((0..n_paths).map(|i| format!("/usr/local/share/meridian/grids/{i:04}")));
    ctx.set_ca_bundle_path("/etc/ssl/certs/ca-certificates.crt");
    ctx.set_network_enabled(true);
    Ok(ctx)
}

/// One pipeline level with 3D kernels on every role, nested `depth`
/// times through the Cartesian role.
pub fn nested_pipeline(ctx: &ExecutionContext, depth: usize) -> OperationNode<'_> {
    let mut root = level(ctx, None);
    for _ in 0..depth {
        root = level(ctx, Some(root));
    }
    root
}

fn level<'c>(ctx: &'c ExecutionContext, inner: Option<OperationNode<'c>>) -> OperationNode<'c> {
    let mut root =
        OperationNode::new("pipeline", BasicKind::recursive("pipeline"), PIPELINE_FILE, ctx);
    for (role, fwd, inv, file) in ROLE_KERNELS {
        let slots = KernelSlots::empty()
            .with(KernelSlot::Fwd3d, Kernel::new(fwd, identity))
            .with(KernelSlot::Inv3d, Kernel::new(inv, identity));
        let leaf = OperationNode::new(role.to_string(), BasicKind::local("leaf"), file, ctx)
            .with_kernels(slots);
        root.set_sub_operation(role, leaf);
    }
    if let Some(inner) = inner {
        root.set_sub_operation(SubOperationRole::Cartesian, inner);
    }
    root
}

/// A root with `width` alternatives, each a chain `depth` deep.
pub fn alternative_forest(ctx: &ExecutionContext, width: usize, depth: usize) -> OperationNode<'_> {
    let mut root = nested_pipeline(ctx, 0);
    for _ in 0..width {
        let mut chain = nested_pipeline(ctx, 0);
        for _ in 0..depth {
            chain = nested_pipeline(ctx, 0).with_alternative(chain);
        }
        root.push_alternative(chain);
    }
    root
}
