//! Proposal distribution for lightweight coresets.
//!
//! Each point \(x_i\) gets the sampling probability
//!
//! \[
//! q_i = \tfrac{1}{2} \cdot \frac{\lVert x_i - \mu \rVert^2}{\sum_j \lVert x_j - \mu \rVert^2}
//!     + \tfrac{1}{2} \cdot \frac{1}{N}
//! \]
//!
//! where \( \mu \) is the mean of the point set. The first term favors points far
//! from the mean; the uniform term keeps every \(q_i \ge 1/(2N)\), which bounds the
//! largest importance weight by \(2N / m\) for a coreset of size \(m\).
//!
//! ## References
//!
//! - Bachem, Lucic, Krause (2018): *Scalable k-Means Clustering via Lightweight Coresets*.
//!
//! Notes:
//! - When every point coincides with the mean the sensitivity term is 0/0. The
//!   distribution then falls back to uniform, which is the limit of the formula.

use ndarray::{Array1, ArrayView1, ArrayView2, Axis, Zip};

use crate::error::CoresetError;

/// Weight given to each of the sensitivity and uniform terms.
pub const MIX: f64 = 0.5;

/// Categorical distribution over the rows of a point set.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    probabilities: Array1<f64>,
    total_deviation: f64,
}

impl Proposal {
    /// Per-row sampling probabilities (length N, sums to 1).
    pub fn probabilities(&self) -> &Array1<f64> {
        &self.probabilities
    }

    /// Sum of squared distances from the centroid.
    pub fn total_deviation(&self) -> f64 {
        self.total_deviation
    }

    /// True when all points coincide and the uniform fallback was used.
    pub fn is_degenerate(&self) -> bool {
        self.total_deviation == 0.0
    }

    /// Number of rows the distribution ranges over.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Always false for a validated proposal.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }
}

/// Coordinate-wise mean of the rows.
///
/// Returns a zero-length vector when there are no rows.
pub fn centroid(points: ArrayView2<'_, f64>) -> Array1<f64> {
    points
        .mean_axis(Axis(0))
        .unwrap_or_else(|| Array1::zeros(0))
}

#[inline]
fn squared_distance(
    row: ArrayView1<'_, f64>,
    origin: ArrayView1<'_, f64>,
    offset: ArrayView1<'_, f64>,
) -> f64 {
    row.iter()
        .zip(origin.iter())
        .zip(offset.iter())
        .map(|((&x, &o), &c)| {
            let d = (x - o) - c;
            d * d
        })
        .sum()
}

/// Squared Euclidean distance of every row to `center`.
///
/// Errors if `center.len()` differs from the number of columns.
pub fn squared_deviations(
    points: ArrayView2<'_, f64>,
    center: ArrayView1<'_, f64>,
) -> Result<Array1<f64>, CoresetError> {
    if center.len() != points.ncols() {
        return Err(CoresetError::DimensionMismatch {
            expected: points.ncols(),
            got: center.len(),
        });
    }
    let offset = Array1::zeros(center.len());
    Ok(deviations(points, center, offset.view(), false))
}

/// Mean of `row - origin` over all rows.
///
/// Rows equal to `origin` contribute exact zeros, so a set of identical rows
/// yields a zero offset regardless of magnitude.
fn mean_offset(points: ArrayView2<'_, f64>, origin: ArrayView1<'_, f64>) -> Array1<f64> {
    let mut acc = Array1::<f64>::zeros(points.ncols());
    for row in points.rows() {
        Zip::from(&mut acc)
            .and(row)
            .and(origin)
            .for_each(|a, &x, &o| *a += x - o);
    }
    let n = points.nrows() as f64;
    acc.mapv_into(|a| a / n)
}

// Distances to `origin + offset`, computed as `(x - origin) - offset`.
fn deviations(
    points: ArrayView2<'_, f64>,
    origin: ArrayView1<'_, f64>,
    offset: ArrayView1<'_, f64>,
    parallel: bool,
) -> Array1<f64> {
    let mut out = Array1::zeros(points.nrows());
    fill_rows(&mut out, points, origin, offset, parallel);
    out
}

#[cfg(feature = "parallel")]
fn fill_rows(
    out: &mut Array1<f64>,
    points: ArrayView2<'_, f64>,
    origin: ArrayView1<'_, f64>,
    offset: ArrayView1<'_, f64>,
    parallel: bool,
) {
    let zip = Zip::from(out).and(points.rows());
    if parallel {
        zip.par_for_each(|d, row| *d = squared_distance(row, origin, offset));
    } else {
        zip.for_each(|d, row| *d = squared_distance(row, origin, offset));
    }
}

#[cfg(not(feature = "parallel"))]
fn fill_rows(
    out: &mut Array1<f64>,
    points: ArrayView2<'_, f64>,
    origin: ArrayView1<'_, f64>,
    offset: ArrayView1<'_, f64>,
    _parallel: bool,
) {
    Zip::from(out)
        .and(points.rows())
        .for_each(|d, row| *d = squared_distance(row, origin, offset));
}

/// Reject empty or non-finite point sets.
fn validate_points(points: ArrayView2<'_, f64>) -> Result<(), CoresetError> {
    if points.nrows() == 0 {
        return Err(CoresetError::NoPoints);
    }
    if points.ncols() == 0 {
        return Err(CoresetError::ZeroDimension);
    }
    if let Some(((row, col), _)) = points.indexed_iter().find(|(_, x)| !x.is_finite()) {
        return Err(CoresetError::NonFinitePoint { row, col });
    }
    Ok(())
}

/// Build the mixed sensitivity/uniform proposal for `points`.
///
/// Errors if the point set is empty, has zero columns, or contains a
/// non-finite coordinate.
pub fn proposal_distribution(points: ArrayView2<'_, f64>) -> Result<Proposal, CoresetError> {
    build(points, false)
}

pub(crate) fn build(points: ArrayView2<'_, f64>, parallel: bool) -> Result<Proposal, CoresetError> {
    validate_points(points)?;

    let n = points.nrows() as f64;
    // Measure about the first row so coincident points give exact zeros.
    let origin = points.row(0);
    let offset = mean_offset(points, origin);
    let d = deviations(points, origin, offset.view(), parallel);
    let total = d.sum();

    if !total.is_finite() {
        return Err(CoresetError::NonFiniteDeviation);
    }

    let uniform = 1.0 / n;
    let probabilities = if total == 0.0 {
        tracing::debug!(n = points.nrows(), "all points coincide; using uniform proposal");
        Array1::from_elem(points.nrows(), uniform)
    } else {
        d.mapv(|di| MIX * (di / total + uniform))
    };

    Ok(Proposal {
        probabilities,
        total_deviation: total,
    })
}
