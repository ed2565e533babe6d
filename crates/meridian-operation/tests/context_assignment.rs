//! Context reassignment across alternative chains.

use std::sync::Arc;

use meridian_context::{ContextOptions, EnvSource, ExecutionContext};
use meridian_core::{DebugLevel, LogLevel};
use meridian_operation::{assign_context, GridShiftDirection, GridShiftKind, OperationNode};
use meridian_test_utils::{fixtures, RecordingLogger};

fn ctx() -> ExecutionContext {
    ExecutionContext::with_options(ContextOptions {
        env: EnvSource::empty(),
        ..ContextOptions::default()
    })
    .unwrap()
}

fn all_bound_to(node: &OperationNode<'_>, ctx: &ExecutionContext) -> bool {
    std::ptr::eq(node.context(), ctx)
        && std::ptr::eq(node.shared(), ctx.shared())
        && node.alternatives().iter().all(|alt| all_bound_to(alt, ctx))
}

#[test]
fn root_and_two_alternatives_follow_the_new_context() {
    let a = ctx();
    let b = ctx();
    let mut root = fixtures::cart_helmert_pipeline(&a)
        .with_alternative(fixtures::kernel_free_pipeline(&a))
        .with_alternative(fixtures::full_pipeline(&a));

    assign_context(Some(&mut root), &b);
    assert!(all_bound_to(&root, &b));

    assign_context(Some(&mut root), &b);
    assert!(all_bound_to(&root, &b));
}

#[test]
fn deep_and_wide_alternative_trees() {
    let a = ctx();
    let b = ctx();
    let mut root = fixtures::with_alternatives(fixtures::pipeline_root(&a), 5, 20, &a);
    root.assign_context(&b);
    assert!(all_bound_to(&root, &b));
}

#[test]
fn switching_back_restores_the_original_binding() {
    let a = ctx();
    let b = ctx();
    let mut root = fixtures::with_alternatives(fixtures::pipeline_root(&a), 2, 2, &a);
    root.assign_context(&b);
    root.assign_context(&a);
    assert!(all_bound_to(&root, &a));
}

#[test]
fn grid_shift_alternative_rebinds_its_grids() {
    let a = ctx();
    let b = ctx();
    let hgrid = OperationNode::new(
        "hgridshift",
        GridShiftKind::new(GridShiftDirection::Horizontal, ["nzgd2kgrid0005.gsb"], &a),
        GridShiftKind::source_file(),
        &a,
    );
    let mut root = fixtures::pipeline_root(&a).with_alternative(hgrid);
    root.assign_context(&b);

    let kind = root.alternatives()[0]
        .kind_as::<GridShiftKind>()
        .expect("grid shift kind");
    assert!(kind.grids().iter().all(|g| g.context() == b.id()));
}

#[test]
fn reassignment_is_traced_on_the_new_context() {
    let a = ctx();
    let mut b = ctx();
    let logger = Arc::new(RecordingLogger::new());
    b.set_logger(logger.clone());
    b.set_debug_level(DebugLevel::clamped(LogLevel::Trace as i64));

    let mut root = fixtures::with_alternatives(fixtures::pipeline_root(&a), 2, 0, &a);
    root.assign_context(&b);
    let messages = logger.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].0, LogLevel::Trace);
    assert!(messages[0].1.contains("3 operation(s)"));
}
