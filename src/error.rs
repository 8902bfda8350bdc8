//! Errors for coreset construction.

use thiserror::Error;

/// Reasons a coreset cannot be built from the given input.
///
/// Every variant is reported before any output is produced.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CoresetError {
    /// Requested coreset size is zero.
    #[error("target size must be > 0")]
    EmptyTarget,
    /// The point set has no rows.
    #[error("point set must contain at least one point")]
    NoPoints,
    /// The point set has no columns.
    #[error("points must have at least one dimension")]
    ZeroDimension,
    /// A center vector does not match the dimensionality of the points.
    #[error("center has {got} dimensions, points have {expected}")]
    DimensionMismatch { expected: usize, got: usize },
    /// A coordinate is NaN or infinite.
    #[error("coordinate at row {row}, column {col} is not finite")]
    NonFinitePoint { row: usize, col: usize },
    /// The total squared deviation from the centroid overflowed.
    #[error("total squared deviation is not finite")]
    NonFiniteDeviation,
    /// The categorical sampler rejected the proposal distribution.
    #[error("invalid proposal distribution: {0}")]
    Distribution(String),
}
