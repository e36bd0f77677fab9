//! Configuration for the IQR engine.
//!
//! All fields are serde-defaulted so partial TOML files work; defaults
//! live in [`crate::constants`].

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::{IqrError, IqrResult};

/// Relevancy ranker configuration, handed to the ranker factory on every
/// refine so each refinement trains a fresh model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    /// Smoothing added to distances so zero-distance pool members score
    /// finite probabilities.
    pub smoothing: f64,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            smoothing: constants::DEFAULT_RANKER_SMOOTHING,
        }
    }
}

/// Top-level IQR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IqrConfig {
    /// Neighbors to pull from the NN index per positive exemplar when
    /// seeding a working index. Determines working index size: between
    /// this value and this value times the positive count, depending on
    /// neighbor overlap.
    pub pos_seed_neighbors: usize,
    /// Ranker construction parameters.
    pub ranker: RankerConfig,
    /// Idle seconds before a session becomes eligible for eviction.
    pub session_max_idle_secs: u64,
}

impl Default for IqrConfig {
    fn default() -> Self {
        Self {
            pos_seed_neighbors: constants::DEFAULT_POS_SEED_NEIGHBORS,
            ranker: RankerConfig::default(),
            session_max_idle_secs: constants::DEFAULT_SESSION_MAX_IDLE_SECS,
        }
    }
}

impl IqrConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> IqrResult<Self> {
        toml::from_str(text).map_err(|e| IqrError::Initialization {
            reason: format!("invalid config: {e}"),
        })
    }
}
