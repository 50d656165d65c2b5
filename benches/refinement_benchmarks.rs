use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wl_refine::algo::{stable_coloring, ColorCompaction, ColoringOptions};
use wl_refine::graph::GraphStore;

/// Random digraph over `num_labels` edge labels
fn random_store(num_nodes: usize, num_labels: u64) -> GraphStore {
    let mut rng = StdRng::seed_from_u64(num_nodes as u64);
    let mut store = GraphStore::with_nodes(num_nodes, None, true).unwrap();
    for src in 0..num_nodes {
        for _ in 0..rng.gen_range(0..=6) {
            let dst = rng.gen_range(0..num_nodes);
            store.add_edge(src, dst, rng.gen_range(0..num_labels)).unwrap();
        }
    }
    store
}

fn dense() -> ColoringOptions {
    ColoringOptions {
        compaction: ColorCompaction::Dense,
        ..Default::default()
    }
}

/// Benchmark refinement of sparse random digraphs
fn bench_random_graphs(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine_random");

    for size in [100, 1000, 10_000].iter() {
        let store = random_store(*size, 2);
        let options = dense();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let result = stable_coloring(&store, &options).unwrap();
                criterion::black_box(result.num_colors());
            });
        });
    }
    group.finish();
}

/// Star graphs: one node sees every other node
fn bench_hub_degree(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine_hub");

    for leaves in [64, 1000, 100_000].iter() {
        let src = vec![0; *leaves];
        let dst: Vec<usize> = (1..=*leaves).collect();
        let store = GraphStore::from_parts(leaves + 1, None, &src, &dst, None, true).unwrap();
        let options = dense();
        group.bench_with_input(BenchmarkId::from_parameter(leaves), leaves, |b, _| {
            b.iter(|| criterion::black_box(stable_coloring(&store, &options).unwrap().num_colors()));
        });
    }
    group.finish();
}

/// Raw colors against signature numbering on a short path
fn bench_path_compaction(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine_path");
    let n = 8;
    let src: Vec<usize> = (0..n - 1).collect();
    let dst: Vec<usize> = (1..n).collect();
    let store = GraphStore::from_parts(n, None, &src, &dst, None, true).unwrap();

    for (name, compaction) in [("raw", ColorCompaction::Raw), ("dense", ColorCompaction::Dense)] {
        let options = ColoringOptions {
            compaction,
            ..Default::default()
        };
        group.bench_function(name, |b| {
            b.iter(|| {
                let result = stable_coloring(&store, &options).unwrap();
                criterion::black_box(result.iterations);
            });
        });
    }
    group.finish();
}

/// Rayon pool versus the calling thread
fn bench_parallelism(c: &mut Criterion) {
    let mut group = c.benchmark_group("refine_parallelism");
    let store = random_store(20_000, 2);

    for (name, parallel) in [("parallel", true), ("sequential", false)] {
        let options = ColoringOptions {
            parallel,
            ..dense()
        };
        group.bench_function(name, |b| {
            b.iter(|| criterion::black_box(stable_coloring(&store, &options).unwrap().num_colors()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_random_graphs,
    bench_hub_degree,
    bench_path_compaction,
    bench_parallelism
);
criterion_main!(benches);
