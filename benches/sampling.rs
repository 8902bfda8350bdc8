use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lightcore::{generate_with_rng, proposal_distribution};
use ndarray::Array2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn points(n: usize, d: usize) -> Array2<f64> {
    Array2::from_shape_fn((n, d), |(i, j)| ((i * 31 + j * 17) % 97) as f64 * 0.25)
}

fn bench_proposal(c: &mut Criterion) {
    let mut group = c.benchmark_group("proposal");
    let d = 16;

    for &n in &[1_000, 10_000, 100_000] {
        let pts = points(n, d);
        group.bench_function(format!("n{}_d{}", n, d), |b| {
            b.iter(|| {
                black_box(proposal_distribution(black_box(pts.view())).ok());
            })
        });
    }
    group.finish();
}

fn bench_coreset(c: &mut Criterion) {
    let mut group = c.benchmark_group("coreset");
    let n = 100_000;
    let d = 16;
    let pts = points(n, d);

    for &m in &[100, 1_000, 10_000] {
        group.bench_function(format!("n{}_d{}_m{}", n, d, m), |b| {
            let mut rng = ChaCha8Rng::seed_from_u64(0);
            b.iter(|| {
                black_box(generate_with_rng(black_box(pts.view()), m, &mut rng).ok());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_proposal, bench_coreset);
criterion_main!(benches);
