//! In-memory descriptor store.

use std::collections::HashMap;

use iqr_core::descriptor::DescriptorElement;
use iqr_core::errors::{IqrError, IqrResult};
use iqr_core::traits::IDescriptorStore;

/// Descriptor store backed by a plain map.
///
/// Built once at startup, then shared read-only behind an `Arc`; no
/// interior mutability is needed for the concurrent-read contract.
#[derive(Debug, Default)]
pub struct MemoryDescriptorStore {
    elements: HashMap<String, DescriptorElement>,
}

impl MemoryDescriptorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an iterator of descriptors. Later duplicates of
    /// an id replace earlier ones.
    pub fn from_elements(elements: impl IntoIterator<Item = DescriptorElement>) -> Self {
        Self {
            elements: elements.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }

    /// Insert a descriptor (startup/ingest time only).
    pub fn insert(&mut self, element: DescriptorElement) {
        self.elements.insert(element.id.clone(), element);
    }
}

impl IDescriptorStore for MemoryDescriptorStore {
    fn has(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn get(&self, id: &str) -> IqrResult<DescriptorElement> {
        self.elements
            .get(id)
            .cloned()
            .ok_or_else(|| IqrError::not_found(id))
    }

    fn len(&self) -> usize {
        self.elements.len()
    }

    fn ids(&self) -> Vec<String> {
        self.elements.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_id_is_not_found() {
        let store = MemoryDescriptorStore::new();
        let err = store.get("nope").unwrap_err();
        assert!(matches!(err, IqrError::NotFound { .. }));
    }

    #[test]
    fn duplicate_id_keeps_last_vector() {
        let store = MemoryDescriptorStore::from_elements([
            DescriptorElement::new("a", vec![1.0]),
            DescriptorElement::new("a", vec![2.0]),
        ]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().vector, vec![2.0]);
    }
}
