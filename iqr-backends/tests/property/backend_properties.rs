use iqr_backends::{DistanceRatioRanker, LinearNnIndex};
use iqr_core::config::RankerConfig;
use iqr_core::descriptor::DescriptorElement;
use iqr_core::traits::{INearestNeighborIndex, IRelevancyRanker};
use proptest::prelude::*;

fn vectors(dim: usize, count: usize) -> impl Strategy<Value = Vec<Vec<f32>>> {
    proptest::collection::vec(
        proptest::collection::vec(-100.0f32..100.0, dim),
        1..=count,
    )
}

// ── Ranker probabilities always land in [0, 1] ────────────────────────────

proptest! {
    #[test]
    fn probabilities_are_bounded(
        pos in vectors(3, 4),
        neg in vectors(3, 4),
        pool in vectors(3, 16),
    ) {
        let ranker = DistanceRatioRanker::new(&RankerConfig::default());
        let probs = ranker.rank(&pos, &neg, &pool).unwrap();
        prop_assert_eq!(probs.len(), pool.len());
        for p in probs {
            prop_assert!((0.0..=1.0).contains(&p), "probability out of range: {}", p);
        }
    }

    #[test]
    fn pool_member_equal_to_positive_scores_at_least_half(
        pos in proptest::collection::vec(-100.0f32..100.0, 3),
        neg in vectors(3, 4),
    ) {
        let ranker = DistanceRatioRanker::new(&RankerConfig::default());
        let probs = ranker
            .rank(&[pos.clone()], &neg, &[pos])
            .unwrap();
        prop_assert!(probs[0] >= 0.5 - 1e-9);
    }
}

// ── Linear index: result counts clipped, distances non-decreasing ─────────

proptest! {
    #[test]
    fn query_results_clipped_and_sorted(
        rows in vectors(3, 24),
        query in proptest::collection::vec(-100.0f32..100.0, 3),
        k in 1usize..32,
    ) {
        let elements = rows
            .into_iter()
            .enumerate()
            .map(|(i, v)| DescriptorElement::new(format!("e{i:03}"), v));
        let index = LinearNnIndex::build(elements).unwrap();

        let hits = index.query(&query, k).unwrap();
        prop_assert!(hits.len() <= k);
        prop_assert!(hits.len() <= index.count());
        for w in hits.windows(2) {
            prop_assert!(w[0].1 <= w[1].1, "distances must be non-decreasing");
        }
    }
}
