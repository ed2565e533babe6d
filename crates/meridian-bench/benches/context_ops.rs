//! Criterion micro-benchmarks for context creation, cloning, and search-path updates.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use meridian_bench::configured_context;
use meridian_context::{ContextOptions, EnvSource, ExecutionContext};
use meridian_test_utils::CountingAllocator;

fn bench_create(c: &mut Criterion) {
    c.bench_function("context_create", |b| {
        b.iter(|| {
            let ctx = ExecutionContext::with_options(ContextOptions {
                env: EnvSource::empty(),
                ..ContextOptions::default()
            })
            .unwrap();
            black_box(ctx.id());
        });
    });
}

fn bench_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("context_clone");
    for n_paths in [0usize, 8, 64] {
        let ctx = configured_context(n_paths).unwrap();
        ctx.extended();
        group.bench_with_input(BenchmarkId::from_parameter(n_paths), &ctx, |b, ctx| {
            b.iter(|| black_box(ctx.try_clone().unwrap()));
        });
    }
    group.finish();
}

fn bench_clone_counting_allocator(c: &mut Criterion) {
    let allocator = Arc::new(CountingAllocator::new());
    let ctx = ExecutionContext::with_options(ContextOptions {
        allocator: Some(allocator.clone()),
        env: EnvSource::empty(),
        ..ContextOptions::default()
    })
    .unwrap();
    c.bench_function("context_clone_counting_allocator", |b| {
        b.iter(|| black_box(ctx.try_clone().unwrap()));
    });
    assert_eq!(allocator.live(), 1);
}

fn bench_set_search_paths(c: &mut Criterion) {
    let paths: Vec<String> = (0..32).map(|i| format!("/opt/meridian/{i}")).collect();
    let mut ctx = configured_context(0).unwrap();
    c.bench_function("set_search_paths_32", |b| {
        b.iter(|| {
            ctx.set_search_paths(&paths);
            black_box(ctx.search_paths().c_views().len());
        });
    });
}

criterion_group!(
    benches,
    bench_create,
    bench_clone,
    bench_clone_counting_allocator,
    bench_set_search_paths
);
criterion_main!(benches);
