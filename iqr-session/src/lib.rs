//! # iqr-session
//!
//! The IQR core: per-session adjudication state, seed-and-expand working
//! index construction, relevancy refinement, and the session controller
//! that serializes concurrent access. `IqrEngine` is the surface the
//! transport layer consumes.

pub mod controller;
pub mod engine;
pub mod session;
pub mod state_export;
pub mod working_index;

pub use controller::SessionController;
pub use engine::{IqrEngine, OperationOutcome, SessionInfo};
pub use session::{AdjudicationUpdate, IqrSession};
pub use state_export::IqrStateBundle;
pub use working_index::WorkingIndex;
