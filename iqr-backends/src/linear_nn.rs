//! Exact, exhaustive nearest-neighbor index.
//!
//! Linear scan with squared-L2 distance. Exact rather than approximate,
//! which makes working-index seeding deterministic; adequate up to a few
//! hundred thousand descriptors.

use iqr_core::descriptor::DescriptorElement;
use iqr_core::errors::{IqrError, IqrResult};
use iqr_core::traits::INearestNeighborIndex;
use tracing::debug;

/// Flat index over owned descriptor rows.
#[derive(Debug)]
pub struct LinearNnIndex {
    elements: Vec<DescriptorElement>,
    dim: usize,
}

impl LinearNnIndex {
    /// Build from descriptors with computed vectors. Uncomputed (empty)
    /// vectors are skipped; the first kept element fixes dimensionality
    /// and mismatched rows are rejected.
    pub fn build(elements: impl IntoIterator<Item = DescriptorElement>) -> IqrResult<Self> {
        let mut kept: Vec<DescriptorElement> = Vec::new();
        let mut dim = 0usize;
        for e in elements {
            if !e.has_vector() {
                continue;
            }
            if dim == 0 {
                dim = e.vector.len();
            } else if e.vector.len() != dim {
                return Err(IqrError::initialization(format!(
                    "descriptor '{}' has dimension {} but index dimension is {dim}",
                    e.id,
                    e.vector.len()
                )));
            }
            kept.push(e);
        }
        debug!(count = kept.len(), dim, "built linear NN index");
        Ok(Self { elements: kept, dim })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }
}

#[inline]
fn l2_sq(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let mut s = 0.0f32;
    for i in 0..a.len() {
        let d = a[i] - b[i];
        s += d * d;
    }
    s
}

impl INearestNeighborIndex for LinearNnIndex {
    fn query(&self, vector: &[f32], k: usize) -> IqrResult<Vec<(DescriptorElement, f32)>> {
        if self.elements.is_empty() {
            return Err(IqrError::initialization(
                "nearest-neighbor index is unpopulated",
            ));
        }
        if vector.len() != self.dim {
            return Err(IqrError::initialization(format!(
                "query dimension {} does not match index dimension {}",
                vector.len(),
                self.dim
            )));
        }

        let mut hits: Vec<(DescriptorElement, f32)> = self
            .elements
            .iter()
            .map(|e| (e.clone(), l2_sq(vector, &e.vector)))
            .collect();
        // Ascending distance; equal distances break by id so queries are
        // fully deterministic.
        hits.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.id.cmp(&b.0.id))
        });
        hits.truncate(k);
        Ok(hits)
    }

    fn count(&self) -> usize {
        self.elements.len()
    }
}
