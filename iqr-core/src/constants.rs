//! Workspace-wide default values.

/// Neighbors pulled from the NN index per positive exemplar when seeding
/// a working index. Bounds the working index between this value (total
/// neighbor overlap) and this value times the positive count (no overlap).
pub const DEFAULT_POS_SEED_NEIGHBORS: usize = 500;

/// Smoothing term added to distances in the reference relevancy ranker to
/// keep probabilities finite for zero-distance pool members.
pub const DEFAULT_RANKER_SMOOTHING: f64 = 1e-6;

/// Idle seconds after which a session becomes eligible for controller
/// eviction.
pub const DEFAULT_SESSION_MAX_IDLE_SECS: u64 = 3600;
