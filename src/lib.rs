//! `lightcore`: lightweight coresets.
//!
//! Reduces an N×D point set to a small weighted sample whose weighted sums
//! approximate sums over the full set. Useful as a cheap first pass before
//! running something expensive (k-means, mixture fitting) on a massive dataset.
//!
//! Exposed modules:
//! - `proposal`: centroid, squared deviations, and the mixed sampling distribution.
//! - `coreset`: importance-weighted draws and the [`Coreset`] output type.
//! - `error`: [`CoresetError`].
//!
//! ```rust
//! use lightcore::CoresetSampler;
//! use ndarray::array;
//!
//! let points = array![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [8.0, 9.0]];
//! let coreset = CoresetSampler::new().with_seed(7).sample(points.view(), 3).unwrap();
//!
//! assert_eq!(coreset.points().dim(), (3, 2));
//! assert!(coreset.weights().iter().all(|&w| w > 0.0));
//! ```

#![forbid(unsafe_code)]

pub mod coreset;
pub mod error;
pub mod proposal;

pub use coreset::{generate, generate_with_rng, Coreset, CoresetSampler};
pub use error::CoresetError;
pub use proposal::{centroid, proposal_distribution, squared_deviations, Proposal};
