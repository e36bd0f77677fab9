//! Distance-ratio relevancy ranker.
//!
//! Scores each pool vector by how much closer it sits to the nearest
//! positive exemplar than to the nearest negative one:
//! `p = (d_neg + s) / (d_pos + d_neg + 2s)` with smoothing `s`. Without
//! negatives the probability decays with distance to the nearest positive,
//! `p = s' / (s' + d_pos)` with `s' = 1`. Deterministic and training-free;
//! stands in for heavier learned rankers behind the same trait.

use iqr_core::config::RankerConfig;
use iqr_core::errors::{IqrError, IqrResult};
use iqr_core::traits::{IRelevancyRanker, IRelevancyRankerFactory};

/// Reference relevancy ranker. Rebuilt per refine by its factory.
pub struct DistanceRatioRanker {
    smoothing: f64,
}

impl DistanceRatioRanker {
    pub fn new(config: &RankerConfig) -> Self {
        Self {
            smoothing: config.smoothing,
        }
    }
}

fn l2(a: &[f32], b: &[f32]) -> IqrResult<f64> {
    if a.len() != b.len() {
        return Err(IqrError::ranking(format!(
            "dimension mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    let mut s = 0.0f64;
    for i in 0..a.len() {
        let d = (a[i] - b[i]) as f64;
        s += d * d;
    }
    Ok(s.sqrt())
}

fn min_distance(v: &[f32], exemplars: &[Vec<f32>]) -> IqrResult<f64> {
    let mut best = f64::INFINITY;
    for e in exemplars {
        let d = l2(v, e)?;
        if d < best {
            best = d;
        }
    }
    Ok(best)
}

impl IRelevancyRanker for DistanceRatioRanker {
    fn rank(
        &self,
        positives: &[Vec<f32>],
        negatives: &[Vec<f32>],
        pool: &[Vec<f32>],
    ) -> IqrResult<Vec<f64>> {
        if positives.is_empty() {
            return Err(IqrError::ranking("no positive exemplars to train on"));
        }

        let mut probabilities = Vec::with_capacity(pool.len());
        for v in pool {
            let d_pos = min_distance(v, positives)?;
            let p = if negatives.is_empty() {
                1.0 / (1.0 + d_pos)
            } else {
                let d_neg = min_distance(v, negatives)?;
                (d_neg + self.smoothing) / (d_pos + d_neg + 2.0 * self.smoothing)
            };
            probabilities.push(p);
        }
        Ok(probabilities)
    }

    fn name(&self) -> &str {
        "distance-ratio"
    }
}

/// Factory capturing the ranker configuration; one fresh ranker per refine.
pub struct DistanceRatioRankerFactory {
    config: RankerConfig,
}

impl DistanceRatioRankerFactory {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }
}

impl IRelevancyRankerFactory for DistanceRatioRankerFactory {
    fn build(&self) -> Box<dyn IRelevancyRanker> {
        Box::new(DistanceRatioRanker::new(&self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranker() -> DistanceRatioRanker {
        DistanceRatioRanker::new(&RankerConfig::default())
    }

    #[test]
    fn positive_exemplar_scores_above_far_pool_member() {
        let pos = vec![vec![0.0, 0.0]];
        let pool = vec![vec![0.0, 0.0], vec![10.0, 10.0]];
        let p = ranker().rank(&pos, &[], &pool).unwrap();
        assert!(p[0] > p[1]);
        assert_eq!(p[0], 1.0);
    }

    #[test]
    fn member_near_negative_scores_below_half() {
        let pos = vec![vec![0.0, 0.0]];
        let neg = vec![vec![10.0, 0.0]];
        let pool = vec![vec![9.0, 0.0]];
        let p = ranker().rank(&pos, &neg, &pool).unwrap();
        assert!(p[0] < 0.5);
    }

    #[test]
    fn no_positives_is_a_ranking_error() {
        let err = ranker().rank(&[], &[], &[vec![0.0]]).unwrap_err();
        assert!(matches!(err, IqrError::Ranking { .. }));
    }

    #[test]
    fn dimension_mismatch_is_a_ranking_error() {
        let err = ranker()
            .rank(&[vec![0.0, 0.0]], &[], &[vec![0.0]])
            .unwrap_err();
        assert!(err.to_string().contains("dimension mismatch"));
    }
}
