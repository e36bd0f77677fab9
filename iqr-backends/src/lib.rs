//! # iqr-backends
//!
//! In-process reference implementations of the `iqr-core` capability
//! traits. Production deployments point the engine at their own store,
//! ANN index, and ranker; these implementations keep the engine runnable
//! (and fully testable) without external services.

pub mod linear_nn;
pub mod memory_store;
pub mod ranker;

pub use linear_nn::LinearNnIndex;
pub use memory_store::MemoryDescriptorStore;
pub use ranker::{DistanceRatioRanker, DistanceRatioRankerFactory};
