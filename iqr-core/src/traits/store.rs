use crate::descriptor::DescriptorElement;
use crate::errors::IqrResult;

/// Read-only corpus of computed descriptors, keyed by stable identifier.
///
/// Shared across all sessions without additional locking; implementations
/// must be safe for concurrent reads.
pub trait IDescriptorStore: Send + Sync {
    /// Whether a descriptor exists for the identifier.
    fn has(&self, id: &str) -> bool;

    /// Fetch the descriptor for an identifier, `NotFound` otherwise.
    fn get(&self, id: &str) -> IqrResult<DescriptorElement>;

    /// Number of descriptors in the store.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All identifiers known to the store.
    fn ids(&self) -> Vec<String>;
}
