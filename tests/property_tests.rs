use lightcore::{generate_with_rng, proposal_distribution, CoresetError, CoresetSampler};
use ndarray::Array2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn point_set() -> impl Strategy<Value = Array2<f64>> {
    (1usize..40, 1usize..6).prop_flat_map(|(n, d)| {
        prop::collection::vec(-1e3f64..1e3, n * d).prop_map(move |data| {
            Array2::from_shape_vec((n, d), data).expect("shape matches data length")
        })
    })
}

proptest! {
    #[test]
    fn prop_shapes_match_request(
        pts in point_set(),
        m in 1usize..64,
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cs = generate_with_rng(pts.view(), m, &mut rng).expect("valid input");

        prop_assert_eq!(cs.points().dim(), (m, pts.ncols()));
        prop_assert_eq!(cs.weights().len(), m);
        prop_assert_eq!(cs.indices().len(), m);
    }

    #[test]
    fn prop_weights_positive_and_bounded(
        pts in point_set(),
        m in 1usize..64,
        seed in any::<u64>(),
    ) {
        let n = pts.nrows() as f64;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cs = generate_with_rng(pts.view(), m, &mut rng).expect("valid input");

        // q_i >= 1/(2N), so w <= 2N/m.
        let bound = 2.0 * n / m as f64;
        for &w in cs.weights() {
            prop_assert!(w.is_finite());
            prop_assert!(w > 0.0);
            prop_assert!(w <= bound * (1.0 + 1e-9), "w={} bound={}", w, bound);
        }
    }

    #[test]
    fn prop_distribution_sums_to_one(pts in point_set()) {
        let p = proposal_distribution(pts.view()).expect("valid input");

        prop_assert_eq!(p.len(), pts.nrows());
        prop_assert!(p.probabilities().iter().all(|&q| q > 0.0 && q.is_finite()));
        let sum: f64 = p.probabilities().sum();
        prop_assert!((sum - 1.0).abs() < 1e-9, "sum was {}", sum);
    }

    #[test]
    fn prop_rows_are_drawn_from_input(
        pts in point_set(),
        m in 1usize..32,
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cs = generate_with_rng(pts.view(), m, &mut rng).expect("valid input");

        for (row, &i) in cs.points().rows().into_iter().zip(cs.indices()) {
            prop_assert!(i < pts.nrows());
            prop_assert_eq!(row, pts.row(i));
        }
    }

    #[test]
    fn prop_seed_reproduces_output(
        pts in point_set(),
        m in 1usize..32,
        seed in any::<u64>(),
    ) {
        let sampler = CoresetSampler::new().with_seed(seed);
        let a = sampler.sample(pts.view(), m).expect("valid input");
        let b = sampler.sample(pts.view(), m).expect("valid input");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_coincident_points_are_uniform(
        row in prop::collection::vec(-1e300f64..1e300, 1..6),
        n in 1usize..50,
    ) {
        let d = row.len();
        let pts = Array2::from_shape_fn((n, d), |(_, j)| row[j]);
        let p = proposal_distribution(pts.view()).expect("valid input");

        prop_assert!(p.is_degenerate());
        let uniform = 1.0 / n as f64;
        for &q in p.probabilities() {
            prop_assert_eq!(q, uniform);
        }
    }
}

#[test]
fn zero_target_never_produces_output() {
    let pts = Array2::from_elem((5, 2), 1.0);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert_eq!(
        generate_with_rng(pts.view(), 0, &mut rng),
        Err(CoresetError::EmptyTarget)
    );
}
