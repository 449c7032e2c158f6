use criterion::{criterion_group, criterion_main, Criterion};
use jabeja_core::RngHandle;
use jabeja_graph::{gen_random_adjacency, ColoredGraph, InitialColoring};

fn bench_degree(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(42);
    let adjacency = gen_random_adjacency(2_000, 10_000, &mut rng).unwrap();
    let graph =
        ColoredGraph::with_coloring(adjacency, InitialColoring::RoundRobin, 4, &mut rng).unwrap();

    c.bench_function("degree_all_nodes", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for node in graph.nodes() {
                total += graph.degree(node, node.color());
            }
            total
        })
    });
}

criterion_group!(benches, bench_degree);
criterion_main!(benches);
