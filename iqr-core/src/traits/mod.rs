//! Capability traits consumed by the session core.
//!
//! Concrete implementations are swapped in at process-configuration time;
//! `iqr-backends` ships in-process reference implementations.

pub mod nn_index;
pub mod ranker;
pub mod store;

pub use nn_index::INearestNeighborIndex;
pub use ranker::{IRelevancyRanker, IRelevancyRankerFactory};
pub use store::IDescriptorStore;
