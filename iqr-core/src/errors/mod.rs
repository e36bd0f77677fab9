//! Error taxonomy for IQR session operations.
//!
//! The first four variants are user-triggerable and are recovered at the
//! engine boundary into a structured success/failure outcome. `Concurrency`
//! marks a broken internal locking contract and is never produced when the
//! session controller is used correctly.

/// Result alias used throughout the workspace.
pub type IqrResult<T> = Result<T, IqrError>;

/// IQR subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum IqrError {
    /// An identifier could not be resolved to a descriptor through the
    /// descriptor store, session example data, or working index.
    #[error("no descriptor found for id '{id}'")]
    NotFound { id: String },

    /// Refinement attempted without adequate adjudications.
    #[error("insufficient labels for refinement: {positives} positive(s), working index size {working_index_size}")]
    InsufficientLabels {
        positives: usize,
        working_index_size: usize,
    },

    /// Working-index seeding cannot proceed.
    #[error("working index initialization failed: {reason}")]
    Initialization { reason: String },

    /// The external relevancy ranker raised during training or scoring.
    #[error("relevancy ranking failed: {reason}")]
    Ranking { reason: String },

    /// Session state could not be packaged for export.
    #[error("state export failed: {reason}")]
    StateExport { reason: String },

    /// A session lock was acquired after a panic in a prior holder, or an
    /// operation ran without the session lock. Fatal programming error.
    #[error("session concurrency contract violated: {reason}")]
    Concurrency { reason: String },
}

impl IqrError {
    /// Short taxonomy name, used when reporting a recovered failure.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::InsufficientLabels { .. } => "InsufficientLabels",
            Self::Initialization { .. } => "Initialization",
            Self::Ranking { .. } => "Ranking",
            Self::StateExport { .. } => "StateExport",
            Self::Concurrency { .. } => "Concurrency",
        }
    }

    pub fn initialization(reason: impl Into<String>) -> Self {
        Self::Initialization {
            reason: reason.into(),
        }
    }

    pub fn ranking(reason: impl Into<String>) -> Self {
        Self::Ranking {
            reason: reason.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}
