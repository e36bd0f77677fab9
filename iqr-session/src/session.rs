//! IqrSession: the per-user refinement state machine.
//!
//! Lifecycle: created → seeded (initialize) → ranked (refine), with
//! initialize/refine repeatable in any order their preconditions allow,
//! and reset returning to the created-equivalent state without changing
//! the session uuid.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use iqr_core::descriptor::DescriptorElement;
use iqr_core::errors::{IqrError, IqrResult};
use iqr_core::traits::{IDescriptorStore, INearestNeighborIndex, IRelevancyRanker};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::working_index::WorkingIndex;

/// One batch of adjudication changes. Removals are applied before
/// additions, and positive additions before negative ones, so an id can
/// move between sets in a single call and a conflicting add of the same id
/// to both sides deterministically lands negative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjudicationUpdate {
    pub add_positive: Vec<String>,
    pub add_negative: Vec<String>,
    pub remove_positive: Vec<String>,
    pub remove_negative: Vec<String>,
}

impl AdjudicationUpdate {
    fn referenced_ids(&self) -> impl Iterator<Item = &String> {
        self.add_positive
            .iter()
            .chain(self.add_negative.iter())
            .chain(self.remove_positive.iter())
            .chain(self.remove_negative.iter())
    }
}

/// Per-session IQR state: adjudication sets, uploaded example descriptors,
/// the working index, and the latest ordered ranking.
///
/// Not internally synchronized; the [`crate::SessionController`] wraps
/// each session in its own mutex and serializes every operation.
pub struct IqrSession {
    uuid: Uuid,
    /// Positive adjudications, id → descriptor. Disjoint from `negatives`.
    positives: HashMap<String, DescriptorElement>,
    /// Negative adjudications, id → descriptor. Disjoint from `positives`.
    negatives: HashMap<String, DescriptorElement>,
    /// Descriptors supplied directly by the caller (uploaded example
    /// data), resolvable by adjudication even before any initialize.
    external_examples: HashMap<String, DescriptorElement>,
    working_index: WorkingIndex,
    /// Latest ordered (id, probability) ranking. `Arc` so a reader holds a
    /// complete snapshot across a concurrent replacement.
    results: Option<Arc<Vec<(String, f64)>>>,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

impl IqrSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            positives: HashMap::new(),
            negatives: HashMap::new(),
            external_examples: HashMap::new(),
            working_index: WorkingIndex::new(),
            results: None,
            created_at: now,
            last_active: now,
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active(&self) -> DateTime<Utc> {
        self.last_active
    }

    /// Bump the activity timestamp. Called by the controller on every
    /// serialized operation.
    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    /// Positive adjudication ids, sorted.
    pub fn positive_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.positives.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Negative adjudication ids, sorted.
    pub fn negative_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.negatives.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Ids of caller-uploaded example descriptors, sorted.
    pub fn external_example_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.external_examples.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn working_index(&self) -> &WorkingIndex {
        &self.working_index
    }

    /// Register an uploaded example descriptor and adjudicate it positive.
    pub fn add_external_positive(&mut self, descriptor: DescriptorElement) {
        let id = descriptor.id.clone();
        self.external_examples.insert(id.clone(), descriptor.clone());
        self.negatives.remove(&id);
        self.positives.insert(id, descriptor);
    }

    /// Resolve an adjudication target to a descriptor: working index
    /// first, then uploaded examples, then the existing adjudication sets
    /// (so ids can be removed or moved after the index was rebuilt away
    /// from under them).
    fn resolve(&self, id: &str) -> IqrResult<DescriptorElement> {
        self.working_index
            .get(id)
            .or_else(|| self.external_examples.get(id))
            .or_else(|| self.positives.get(id))
            .or_else(|| self.negatives.get(id))
            .cloned()
            .ok_or_else(|| IqrError::not_found(id))
    }

    /// Apply one batch of adjudication changes.
    ///
    /// Every referenced id is resolved before anything mutates, so an
    /// unresolvable id fails the whole call with `NotFound` and leaves the
    /// session untouched. Application order: removals, then positive
    /// additions, then negative additions. Adding an id to one set removes
    /// it from the other, keeping the sets disjoint. Working-index
    /// membership is never affected.
    pub fn adjudicate(&mut self, update: &AdjudicationUpdate) -> IqrResult<()> {
        let mut resolved: HashMap<String, DescriptorElement> = HashMap::new();
        for id in update.referenced_ids() {
            if !resolved.contains_key(id) {
                resolved.insert(id.clone(), self.resolve(id)?);
            }
        }

        for id in &update.remove_positive {
            self.positives.remove(id);
        }
        for id in &update.remove_negative {
            self.negatives.remove(id);
        }
        for id in &update.add_positive {
            self.negatives.remove(id);
            self.positives.insert(id.clone(), resolved[id].clone());
        }
        for id in &update.add_negative {
            self.positives.remove(id);
            self.negatives.insert(id.clone(), resolved[id].clone());
        }

        debug!(
            session = %self.uuid,
            positives = self.positives.len(),
            negatives = self.negatives.len(),
            "adjudications updated"
        );
        Ok(())
    }

    /// Rebuild the working index from the `k` nearest neighbors of every
    /// positive. Wholesale replacement; on failure the previous working
    /// index remains in place untouched.
    pub fn initialize(
        &mut self,
        nn_index: &dyn INearestNeighborIndex,
        store: &dyn IDescriptorStore,
        k: usize,
    ) -> IqrResult<()> {
        let positives: Vec<DescriptorElement> = self.positives.values().cloned().collect();
        let seeded = WorkingIndex::seed(&positives, nn_index, store, k)?;
        self.working_index = seeded;
        Ok(())
    }

    /// Train the ranker on current adjudications and re-rank the working
    /// index. The stored ordered result is replaced only on success; any
    /// ranker failure surfaces as a ranking error and the prior result
    /// remains the reported state.
    pub fn refine(&mut self, ranker: &dyn IRelevancyRanker) -> IqrResult<()> {
        if self.positives.is_empty() || self.working_index.is_empty() {
            return Err(IqrError::InsufficientLabels {
                positives: self.positives.len(),
                working_index_size: self.working_index.len(),
            });
        }

        let pos_vectors: Vec<Vec<f32>> =
            self.positives.values().map(|d| d.vector.clone()).collect();
        let neg_vectors: Vec<Vec<f32>> =
            self.negatives.values().map(|d| d.vector.clone()).collect();

        let mut pool_ids: Vec<String> = Vec::with_capacity(self.working_index.len());
        let mut pool_vectors: Vec<Vec<f32>> = Vec::with_capacity(self.working_index.len());
        for elem in self.working_index.iter() {
            pool_ids.push(elem.id.clone());
            pool_vectors.push(elem.vector.clone());
        }

        let probabilities = ranker
            .rank(&pos_vectors, &neg_vectors, &pool_vectors)
            .map_err(|e| match e {
                ranking @ IqrError::Ranking { .. } => ranking,
                other => IqrError::ranking(other.to_string()),
            })?;

        let mut scored: Vec<(String, f64)> =
            pool_ids.into_iter().zip(probabilities).collect();
        // Descending probability; equal probabilities break by ascending id
        // so refinement output is deterministic.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        debug!(
            session = %self.uuid,
            ranked = scored.len(),
            ranker = ranker.name(),
            "refinement complete"
        );
        self.results = Some(Arc::new(scored));
        Ok(())
    }

    /// Latest ordered ranking, or `None` before the first successful
    /// refine. The returned snapshot stays intact across later refines.
    pub fn ordered_results(&self) -> Option<Arc<Vec<(String, f64)>>> {
        self.results.clone()
    }

    /// The `[i, j)` slice of the ordered ranking, clipped to the available
    /// length. Empty when `i` is past the end or no refine has happened.
    pub fn ordered_slice(&self, i: usize, j: usize) -> Vec<(String, f64)> {
        match &self.results {
            Some(results) => {
                let len = results.len();
                let start = i.min(len);
                let end = j.min(len);
                results[start..end.max(start)].to_vec()
            }
            None => Vec::new(),
        }
    }

    /// Vectors of all positive adjudications (uploaded examples included),
    /// for state export.
    pub fn positive_vectors(&self) -> Vec<Vec<f32>> {
        self.positives.values().map(|d| d.vector.clone()).collect()
    }

    /// Vectors of all negative adjudications, for state export.
    pub fn negative_vectors(&self) -> Vec<Vec<f32>> {
        self.negatives.values().map(|d| d.vector.clone()).collect()
    }

    /// Clear adjudications, uploaded examples, working index, and the
    /// ordered result. The session uuid is unchanged.
    pub fn reset(&mut self) {
        self.positives.clear();
        self.negatives.clear();
        self.external_examples.clear();
        self.working_index.clear();
        self.results = None;
        debug!(session = %self.uuid, "session reset");
    }
}

impl Default for IqrSession {
    fn default() -> Self {
        Self::new()
    }
}
