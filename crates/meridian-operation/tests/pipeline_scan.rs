//! Scanner behavior over fixture pipelines.

use std::collections::BTreeSet;

use meridian_context::{ContextOptions, EnvSource, ExecutionContext};
use meridian_core::KernelId;
use meridian_operation::{
    scan_pipeline, GridShiftDirection, GridShiftKind, KernelSlot, KernelSlots, OperationNode,
    SubOperationRole,
};
use meridian_test_utils::fixtures::{
    self, CART_FILE, CART_FWD, CART_INV, HELMERT_FILE, HELMERT_FWD, HELMERT_INV,
};
use proptest::prelude::*;

fn ctx() -> ExecutionContext {
    ExecutionContext::with_options(ContextOptions {
        env: EnvSource::empty(),
        ..ContextOptions::default()
    })
    .unwrap()
}

#[test]
fn cart_and_helmert_only() {
    let ctx = ctx();
    let root = fixtures::cart_helmert_pipeline(&ctx);
    let result = scan_pipeline(&root);

    let mut expected = vec![CART_FWD, CART_INV, HELMERT_FWD, HELMERT_INV];
    expected.sort();
    assert_eq!(result.sorted_kernels(), expected);

    let mut files = vec![CART_FILE, HELMERT_FILE];
    files.sort();
    assert_eq!(result.sorted_files(), files);
}

#[test]
fn kernel_free_pipeline_scans_empty() {
    let ctx = ctx();
    let root = fixtures::kernel_free_pipeline(&ctx);
    let result = scan_pipeline(&root);
    assert!(result.is_empty());
    assert!(result.kernels().is_empty());
    assert!(result.files().is_empty());
}

#[test]
fn scanning_is_idempotent() {
    let ctx = ctx();
    let root = fixtures::full_pipeline(&ctx);
    let first = scan_pipeline(&root);
    let second = scan_pipeline(&root);
    assert_eq!(first, second);
    assert_eq!(first.kernels().len(), 12);
    assert_eq!(first.files().len(), 6);
}

#[test]
fn root_kernels_count_with_sub_operations() {
    let ctx = ctx();
    let root = fixtures::cart_helmert_pipeline(&ctx)
        .with_kernels(fixtures::slots_3d(
            meridian_core::kernel_id!(pipeline_forward),
            meridian_core::kernel_id!(pipeline_inverse),
        ));
    let result = root.scan();
    assert_eq!(result.kernels().len(), 6);
    assert!(result.files().contains(&fixtures::PIPELINE_FILE));
}

#[test]
fn grid_shift_sub_operation_contributes_its_kernels() {
    let ctx = ctx();
    let kind = GridShiftKind::new(GridShiftDirection::Horizontal, ["ntv2.gsb"], &ctx);
    let kernels = kind.kernels();
    let hgrid = OperationNode::new("hgridshift", kind, GridShiftKind::source_file(), &ctx)
        .with_kernels(kernels);
    let root = fixtures::pipeline_root(&ctx)
        .with_sub_operation(SubOperationRole::HorizontalGridShift, hgrid);

    let result = scan_pipeline(&root);
    assert_eq!(result.kernels().len(), 4);
    assert_eq!(result.sorted_files(), vec![GridShiftKind::source_file()]);
}

#[test]
fn nested_pipelines_are_followed() {
    let ctx = ctx();
    let inner = fixtures::cart_helmert_pipeline(&ctx);
    let outer =
        fixtures::pipeline_root(&ctx).with_sub_operation(SubOperationRole::Cartesian, inner);
    assert_eq!(scan_pipeline(&outer).kernels().len(), 4);
}

#[test]
fn scans_run_concurrently_on_a_shared_graph() {
    let ctx = ctx();
    let root = fixtures::full_pipeline(&ctx);
    let expected = scan_pipeline(&root);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| scan_pipeline(&root))).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}

// Kernel pool the property draws from, one identity per slot per role.
const POOL: [KernelId; 6] = [
    meridian_core::kernel_id!(k0),
    meridian_core::kernel_id!(k1),
    meridian_core::kernel_id!(k2),
    meridian_core::kernel_id!(k3),
    meridian_core::kernel_id!(k4),
    meridian_core::kernel_id!(k5),
];

proptest! {
    #[test]
    fn scan_matches_present_slots(
        mask in prop::collection::vec(prop::collection::vec(any::<Option<usize>>(), 6), 6),
    ) {
        let ctx = ctx();
        let mut root = fixtures::pipeline_root(&ctx);
        let mut expected_kernels = BTreeSet::new();
        let mut expected_files = BTreeSet::new();

        for (role, slots) in SubOperationRole::ALL.into_iter().zip(&mask) {
            let mut kernels = KernelSlots::empty();
            for (slot, pick) in KernelSlot::ALL.into_iter().zip(slots) {
                if let Some(i) = pick {
                    let id = POOL[i % POOL.len()];
                    kernels.set(slot, fixtures::kernel(id));
                    expected_kernels.insert(id);
                }
            }
            let file = meridian_core::SourceFile::new(match role {
                SubOperationRole::AxisSwap => "a.rs",
                SubOperationRole::Cartesian => "b.rs",
                SubOperationRole::CartesianToWgs84 => "c.rs",
                SubOperationRole::Helmert => "d.rs",
                SubOperationRole::HorizontalGridShift => "e.rs",
                SubOperationRole::VerticalGridShift => "f.rs",
            });
            if !kernels.is_empty() {
                expected_files.insert(file);
            }
            root.set_sub_operation(role, fixtures::leaf("leaf", file, kernels, &ctx));
        }

        let result = scan_pipeline(&root);
        let kernels: BTreeSet<_> = result.kernels().iter().copied().collect();
        let files: BTreeSet<_> = result.files().iter().copied().collect();
        prop_assert_eq!(kernels, expected_kernels);
        prop_assert_eq!(files, expected_files);
    }
}
