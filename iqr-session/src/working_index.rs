//! Session-scoped working index, built by seeded nearest-neighbor
//! expansion over the positive adjudications.

use std::collections::HashMap;

use iqr_core::descriptor::DescriptorElement;
use iqr_core::errors::{IqrError, IqrResult};
use iqr_core::traits::{IDescriptorStore, INearestNeighborIndex};
use tracing::debug;

/// Bounded in-memory subset of the corpus used for ranking during one IQR
/// session. Rebuilt wholesale on every initialize; no incremental merge.
#[derive(Debug, Default)]
pub struct WorkingIndex {
    entries: HashMap<String, DescriptorElement>,
}

impl WorkingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh working index from the union of each positive's `k`
    /// nearest neighbors, plus every positive the store itself knows.
    ///
    /// Set semantics: neighbors shared between positives contribute once,
    /// so the result holds between `k` entries (total overlap) and
    /// `k * positives.len()` (no overlap). Fails with an initialization
    /// error when there are no positives, a positive has no computed
    /// vector, or the NN index is unpopulated; the caller's previous
    /// working index is untouched in every failure case because the build
    /// happens entirely in this fresh value.
    pub fn seed(
        positives: &[DescriptorElement],
        nn_index: &dyn INearestNeighborIndex,
        store: &dyn IDescriptorStore,
        k: usize,
    ) -> IqrResult<Self> {
        if positives.is_empty() {
            return Err(IqrError::initialization(
                "no positive adjudications to seed from",
            ));
        }
        if nn_index.count() == 0 {
            return Err(IqrError::initialization(
                "nearest-neighbor index is unpopulated",
            ));
        }

        let mut entries = HashMap::new();
        for pos in positives {
            if !pos.has_vector() {
                return Err(IqrError::initialization(format!(
                    "positive '{}' has no computed descriptor vector",
                    pos.id
                )));
            }
            let neighbors = nn_index.query(&pos.vector, k).map_err(|e| match e {
                init @ IqrError::Initialization { .. } => init,
                other => IqrError::initialization(other.to_string()),
            })?;
            for (neighbor, _distance) in neighbors {
                entries.insert(neighbor.id.clone(), neighbor);
            }
            // Every store-known positive belongs in the index even when the
            // NN query happens not to return it.
            if store.has(&pos.id) && !entries.contains_key(&pos.id) {
                let elem = store.get(&pos.id)?;
                entries.insert(elem.id.clone(), elem);
            }
        }

        debug!(
            positives = positives.len(),
            k,
            size = entries.len(),
            "seeded working index"
        );
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&DescriptorElement> {
        self.entries.get(id)
    }

    /// All member identifiers, in no particular order.
    pub fn ids(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DescriptorElement> {
        self.entries.values()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
