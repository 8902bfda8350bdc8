//! Lightweight coreset construction.
//!
//! Draws `m` rows with replacement from the proposal in [`crate::proposal`] and
//! gives each drawn row the inverse-probability weight
//!
//! \[
//! w = \frac{1}{m \, q_i}
//! \]
//!
//! so that \( \sum_m w_m f(x_{i_m}) \) is an unbiased estimate of
//! \( \sum_i f(x_i) \) for any function \(f\) of a row.
//!
//! Notes:
//! - `generate_with_rng` and seeded [`CoresetSampler`]s are deterministic.
//! - `generate` calls `rand::rng()` internally and is not reproducible.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;

use crate::error::CoresetError;
use crate::proposal::{self, Proposal};

/// A weighted subset of a point set.
#[derive(Debug, Clone, PartialEq)]
pub struct Coreset {
    points: Array2<f64>,
    weights: Array1<f64>,
    indices: Vec<usize>,
}

impl Coreset {
    /// Drawn rows, shape `(m, D)`, in draw order.
    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }

    /// Importance weight of each drawn row, length `m`.
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// Source row index of each drawn row.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Reciprocal of the proposal probability of each drawn row, `weights * m`.
    pub fn inverse_probabilities(&self) -> Array1<f64> {
        let m = self.len() as f64;
        self.weights.mapv(|w| w * m)
    }

    /// Number of drawn rows.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always false: a coreset has at least one row.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Dimensionality of the rows.
    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    /// Split into `(points, weights)`.
    pub fn into_parts(self) -> (Array2<f64>, Array1<f64>) {
        (self.points, self.weights)
    }

    /// Importance-sampling estimate of \( \sum_i f(x_i) \) over the full set.
    pub fn weighted_sum<F>(&self, mut f: F) -> f64
    where
        F: FnMut(ArrayView1<'_, f64>) -> f64,
    {
        self.points
            .rows()
            .into_iter()
            .zip(self.weights.iter())
            .map(|(row, &w)| w * f(row))
            .sum()
    }

    /// Self-normalized estimate of the mean of `f` over the full set.
    ///
    /// Divides [`Coreset::weighted_sum`] by the total weight rather than by N,
    /// which trades a small bias for lower variance.
    pub fn weighted_mean<F>(&self, f: F) -> f64
    where
        F: FnMut(ArrayView1<'_, f64>) -> f64,
    {
        self.weighted_sum(f) / self.weights.sum()
    }
}

/// Build a coreset of `target_size` rows using the thread-local RNG.
pub fn generate(points: ArrayView2<'_, f64>, target_size: usize) -> Result<Coreset, CoresetError> {
    let mut rng = rand::rng();
    generate_with_rng(points, target_size, &mut rng)
}

/// Build a coreset of `target_size` rows with a caller-supplied RNG.
///
/// # Errors
///
/// Returns an error if `target_size == 0`, if `points` has no rows or no
/// columns, or if any coordinate is not finite. Nothing is drawn in that case.
pub fn generate_with_rng<R: Rng + ?Sized>(
    points: ArrayView2<'_, f64>,
    target_size: usize,
    rng: &mut R,
) -> Result<Coreset, CoresetError> {
    generate_inner(points, target_size, rng, false)
}

fn generate_inner<R: Rng + ?Sized>(
    points: ArrayView2<'_, f64>,
    target_size: usize,
    rng: &mut R,
    parallel: bool,
) -> Result<Coreset, CoresetError> {
    if target_size == 0 {
        return Err(CoresetError::EmptyTarget);
    }

    let proposal = proposal::build(points, parallel)?;
    tracing::debug!(
        n = points.nrows(),
        dim = points.ncols(),
        target_size,
        degenerate = proposal.is_degenerate(),
        "building coreset"
    );

    draw(points, &proposal, target_size, rng)
}

fn draw<R: Rng + ?Sized>(
    points: ArrayView2<'_, f64>,
    proposal: &Proposal,
    target_size: usize,
    rng: &mut R,
) -> Result<Coreset, CoresetError> {
    let q = proposal.probabilities();
    let dist = WeightedIndex::<f64>::new(q.iter().copied())
        .map_err(|e| CoresetError::Distribution(e.to_string()))?;

    let indices: Vec<usize> = (0..target_size).map(|_| dist.sample(rng)).collect();

    let m = target_size as f64;
    let weights: Array1<f64> = indices.iter().map(|&i| 1.0 / (q[i] * m)).collect();

    Ok(Coreset {
        points: points.select(Axis(0), &indices),
        weights,
        indices,
    })
}

/// Reusable coreset builder holding an optional seed.
#[derive(Debug, Clone, Default)]
pub struct CoresetSampler {
    seed: Option<u64>,
    parallel: bool,
}

impl CoresetSampler {
    /// A sampler that draws from the thread-local RNG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the seed so every call draws the same coreset for the same input.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Compute per-row deviations on the rayon pool.
    ///
    /// Draws still come from one RNG, so seeded output is unchanged.
    #[cfg(feature = "parallel")]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Seed in use, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Build a coreset of `target_size` rows from `points`.
    pub fn sample(
        &self,
        points: ArrayView2<'_, f64>,
        target_size: usize,
    ) -> Result<Coreset, CoresetError> {
        match self.seed {
            Some(s) => {
                let mut rng = StdRng::seed_from_u64(s);
                generate_inner(points, target_size, &mut rng, self.parallel)
            }
            None => {
                let mut rng = rand::rng();
                generate_inner(points, target_size, &mut rng, self.parallel)
            }
        }
    }
}
