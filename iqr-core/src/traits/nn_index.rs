use crate::descriptor::DescriptorElement;
use crate::errors::IqrResult;

/// Approximate (or exact) nearest-neighbor index over stored descriptors.
///
/// Read-only from the session core's perspective; implementations must be
/// safe for concurrent queries.
pub trait INearestNeighborIndex: Send + Sync {
    /// Return the `k` stored descriptors closest to `vector`, ordered by
    /// ascending distance. A query vector already in the index returns
    /// itself at distance zero. Fewer than `k` results are returned when
    /// the index holds fewer than `k` descriptors.
    fn query(&self, vector: &[f32], k: usize) -> IqrResult<Vec<(DescriptorElement, f32)>>;

    /// Number of descriptors indexed.
    fn count(&self) -> usize;
}
