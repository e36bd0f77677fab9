//! DescriptorElement: one corpus item's feature vector.

use serde::{Deserialize, Serialize};

/// A fixed-dimension feature descriptor for one corpus item.
///
/// The identifier is opaque, stable, and unique across the corpus.
/// Descriptors are immutable once computed; sessions and indexes pass
/// clones around rather than mutating shared state. An empty vector marks
/// a descriptor whose features have not been computed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorElement {
    pub id: String,
    pub vector: Vec<f32>,
}

impl DescriptorElement {
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
        }
    }

    /// Whether the feature vector has been computed.
    pub fn has_vector(&self) -> bool {
        !self.vector.is_empty()
    }

    /// Vector dimensionality (0 when uncomputed).
    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_vector_is_uncomputed() {
        let d = DescriptorElement::new("a", vec![]);
        assert!(!d.has_vector());
        assert_eq!(d.dimensions(), 0);
    }

    #[test]
    fn serde_round_trip_preserves_id_and_vector() {
        let d = DescriptorElement::new("item-1", vec![0.1, 0.2, 0.3]);
        let json = serde_json::to_string(&d).unwrap();
        let back: DescriptorElement = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
