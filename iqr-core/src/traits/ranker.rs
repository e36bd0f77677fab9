use crate::errors::IqrResult;

/// Relevancy ranker: trains on labeled vectors and scores a pool.
pub trait IRelevancyRanker: Send + Sync {
    /// Produce one relevance probability in `[0, 1]` per pool vector, in
    /// pool order. `positives` is never empty; `negatives` may be.
    fn rank(
        &self,
        positives: &[Vec<f32>],
        negatives: &[Vec<f32>],
        pool: &[Vec<f32>],
    ) -> IqrResult<Vec<f64>>;

    /// Human-readable ranker name.
    fn name(&self) -> &str;
}

/// Builds a fresh ranker per refinement, so each refine trains a new model
/// on the current adjudications.
pub trait IRelevancyRankerFactory: Send + Sync {
    fn build(&self) -> Box<dyn IRelevancyRanker>;
}
