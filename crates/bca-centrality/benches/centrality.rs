use bca_centrality::{analyze, betweenness_centrality};
use bca_core::{WeightedGraph, config::CentralityConfig};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [100, 300, 1_000];
const OUT_DEGREE: usize = 4;

/// Sparse random digraph with roughly `OUT_DEGREE` out-edges per vertex.
fn random_graph(n: usize, seed: u64) -> WeightedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut g = WeightedGraph::with_capacity(n, n * OUT_DEGREE);
    for i in 0..n {
        g.add_vertex(&format!("v{i}"));
    }
    for i in 0..n {
        for _ in 0..OUT_DEGREE {
            let j = rng.gen_range(0..n);
            if i == j {
                continue;
            }
            let w = f64::from(rng.gen_range(1u32..=10));
            // Duplicate pairs are rejected; the sampled degree is approximate.
            let _ = g.add_edge(&format!("v{i}"), &format!("v{j}"), w);
        }
    }
    g
}

fn bench_betweenness(c: &mut Criterion) {
    let mut group = c.benchmark_group("betweenness");
    group.sample_size(10);

    for n in SIZES {
        let g = random_graph(n, 0xBCA0 + n as u64);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("compute", n), &g, |b, g| {
            b.iter(|| black_box(betweenness_centrality(g)));
        });
        group.bench_with_input(BenchmarkId::new("analyze_prune", n), &g, |b, g| {
            b.iter(|| {
                let mut copy = g.clone();
                black_box(analyze(&mut copy, &CentralityConfig::default()))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_betweenness);
criterion_main!(benches);
