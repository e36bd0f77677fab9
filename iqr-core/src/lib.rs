//! # iqr-core
//!
//! Foundation crate for the IQR (Interactive Query Refinement) engine.
//! Defines descriptor types, capability traits, errors, config, and
//! constants. Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod descriptor;
pub mod errors;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{IqrConfig, RankerConfig};
pub use descriptor::DescriptorElement;
pub use errors::{IqrError, IqrResult};
pub use traits::{
    IDescriptorStore, INearestNeighborIndex, IRelevancyRanker, IRelevancyRankerFactory,
};
