//! Estimate a statistic of a large point set from a small coreset.
//!
//! Builds two well-separated Gaussian-ish blobs plus a handful of outliers,
//! then compares the exact mean squared norm with the coreset estimate at a
//! few coreset sizes.

use lightcore::CoresetSampler;
use ndarray::{Array2, ArrayView1};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let n = 50_000;
    let d = 8;
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let points = Array2::from_shape_fn((n, d), |(i, _)| {
        let center = if i % 2 == 0 { -5.0 } else { 5.0 };
        let spread = if i % 1_000 == 0 { 40.0 } else { 1.0 };
        center + spread * (rng.random::<f64>() - 0.5)
    });

    let sq_norm = |row: ArrayView1<'_, f64>| row.dot(&row);
    let exact = points.rows().into_iter().map(sq_norm).sum::<f64>() / n as f64;
    println!("exact mean ||x||^2 = {exact:.4}");

    let sampler = CoresetSampler::new().with_seed(7);
    for m in [100, 1_000, 10_000] {
        let coreset = sampler.sample(points.view(), m)?;
        let estimate = coreset.weighted_sum(sq_norm) / n as f64;
        println!(
            "m={m:>6}  estimate={estimate:.4}  rel.err={:.2e}",
            (estimate - exact).abs() / exact
        );
    }

    Ok(())
}
