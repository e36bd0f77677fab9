use std::sync::Arc;

use iqr_backends::{DistanceRatioRanker, LinearNnIndex, MemoryDescriptorStore};
use iqr_core::config::RankerConfig;
use iqr_core::descriptor::DescriptorElement;
use iqr_session::{AdjudicationUpdate, IqrSession};
use proptest::prelude::*;

const UNIVERSE: usize = 8;

fn corpus() -> Vec<DescriptorElement> {
    (0..UNIVERSE)
        .map(|i| DescriptorElement::new(format!("u{i}"), vec![i as f32, (i * i) as f32]))
        .collect()
}

/// Session whose working index covers the whole corpus, so every universe
/// id resolves for adjudication.
fn covered_session() -> IqrSession {
    let store = Arc::new(MemoryDescriptorStore::from_elements(corpus()));
    let index = Arc::new(LinearNnIndex::build(corpus()).unwrap());
    let mut session = IqrSession::new();
    session.add_external_positive(DescriptorElement::new("u0", vec![0.0, 0.0]));
    session
        .initialize(index.as_ref(), store.as_ref(), UNIVERSE)
        .unwrap();
    session
}

fn id_list() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec((0..UNIVERSE).prop_map(|i| format!("u{i}")), 0..5)
}

// ── Disjointness holds under arbitrary adjudication sequences ─────────────

proptest! {
    #[test]
    fn adjudication_sets_stay_disjoint(
        updates in proptest::collection::vec(
            (id_list(), id_list(), id_list(), id_list()),
            1..12,
        )
    ) {
        let mut session = covered_session();
        for (add_positive, add_negative, remove_positive, remove_negative) in updates {
            session
                .adjudicate(&AdjudicationUpdate {
                    add_positive,
                    add_negative,
                    remove_positive,
                    remove_negative,
                })
                .unwrap();

            let pos = session.positive_ids();
            let neg = session.negative_ids();
            for id in &pos {
                prop_assert!(
                    !neg.contains(id),
                    "id {} is in both adjudication sets",
                    id
                );
            }
        }
    }
}

// ── Slice access never panics and always clips ────────────────────────────

proptest! {
    #[test]
    fn ordered_slice_is_clipped_for_any_bounds(
        i in 0usize..32,
        j in 0usize..32,
        refined in proptest::bool::ANY,
    ) {
        let mut session = covered_session();
        if refined {
            let ranker = DistanceRatioRanker::new(&RankerConfig::default());
            session.refine(&ranker).unwrap();
        }

        let len = session
            .ordered_results()
            .map(|r| r.len())
            .unwrap_or(0);
        let slice = session.ordered_slice(i, j);
        prop_assert!(slice.len() <= len.saturating_sub(i.min(len)));
        prop_assert!(slice.len() <= j.saturating_sub(i));
    }
}

// ── Refinement output ordering is a total invariant ───────────────────────

proptest! {
    #[test]
    fn refine_output_is_sorted_and_deterministic(
        negatives in id_list(),
    ) {
        let mut session = covered_session();
        // u0 stays positive; anything else may go negative.
        let negatives: Vec<String> =
            negatives.into_iter().filter(|id| id != "u0").collect();
        session
            .adjudicate(&AdjudicationUpdate {
                add_negative: negatives,
                ..Default::default()
            })
            .unwrap();

        let ranker = DistanceRatioRanker::new(&RankerConfig::default());
        session.refine(&ranker).unwrap();
        let first = session.ordered_results().unwrap();
        for w in first.windows(2) {
            prop_assert!(w[0].1 >= w[1].1, "non-increasing probabilities");
            if w[0].1 == w[1].1 {
                prop_assert!(w[0].0 < w[1].0, "ties break by ascending id");
            }
        }

        session.refine(&ranker).unwrap();
        let second = session.ordered_results().unwrap();
        prop_assert_eq!(&*first, &*second, "re-refine with same labels is stable");
    }
}
