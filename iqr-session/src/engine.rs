//! IqrEngine: the transport-facing surface over the session core.
//!
//! Owns the shared capabilities (descriptor store, NN index, ranker
//! factory), the session controller, and the configuration. User-facing
//! operations recover the user-triggerable error kinds into structured
//! [`OperationOutcome`]s; session state is all-or-nothing per operation.

use std::sync::Arc;

use iqr_core::config::IqrConfig;
use iqr_core::descriptor::DescriptorElement;
use iqr_core::errors::{IqrError, IqrResult};
use iqr_core::traits::{IDescriptorStore, INearestNeighborIndex, IRelevancyRankerFactory};
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{debug, info};

use crate::controller::SessionController;
use crate::session::AdjudicationUpdate;
use crate::state_export::{self, IqrStateBundle};

/// Structured success/failure report for a session operation. Failures
/// never propagate a panic or leave the session half-mutated.
#[derive(Debug, Clone, Serialize)]
pub struct OperationOutcome {
    pub success: bool,
    pub message: String,
}

impl OperationOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    fn fail(err: &IqrError) -> Self {
        Self {
            success: false,
            message: format!("ERROR: ({}) {err}", err.kind()),
        }
    }

    fn from_result(result: IqrResult<()>, ok_message: &str) -> Self {
        match result {
            Ok(()) => Self::ok(ok_message),
            Err(err) => Self::fail(&err),
        }
    }
}

/// Snapshot of a session's adjudication and index state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub uuid: String,
    pub positive_ids: Vec<String>,
    pub negative_ids: Vec<String>,
    pub external_positive_ids: Vec<String>,
    pub initialized: bool,
    pub index_size: usize,
}

/// The IQR engine: capability wiring plus per-key session access.
pub struct IqrEngine {
    store: Arc<dyn IDescriptorStore>,
    nn_index: Arc<dyn INearestNeighborIndex>,
    ranker_factory: Arc<dyn IRelevancyRankerFactory>,
    controller: SessionController,
    config: IqrConfig,
}

impl IqrEngine {
    pub fn new(
        store: Arc<dyn IDescriptorStore>,
        nn_index: Arc<dyn INearestNeighborIndex>,
        ranker_factory: Arc<dyn IRelevancyRankerFactory>,
        config: IqrConfig,
    ) -> Self {
        info!(
            corpus = store.len(),
            indexed = nn_index.count(),
            seed_neighbors = config.pos_seed_neighbors,
            "IQR engine ready"
        );
        Self {
            store,
            nn_index,
            ranker_factory,
            controller: SessionController::new(),
            config,
        }
    }

    pub fn config(&self) -> &IqrConfig {
        &self.config
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// Information about the session bound to `key`, creating the session
    /// on first access.
    pub fn session_info(&self, key: &str) -> IqrResult<SessionInfo> {
        self.controller.with_session(key, |s| {
            Ok(SessionInfo {
                uuid: s.uuid().to_string(),
                positive_ids: s.positive_ids(),
                negative_ids: s.negative_ids(),
                external_positive_ids: s.external_example_ids(),
                initialized: !s.working_index().is_empty(),
                index_size: s.working_index().len(),
            })
        })
    }

    /// Apply one adjudication batch against `key`'s session.
    pub fn adjudicate(&self, key: &str, update: &AdjudicationUpdate) -> OperationOutcome {
        let result = self.controller.with_session(key, |s| s.adjudicate(update));
        OperationOutcome::from_result(
            result,
            &format!(
                "Adjudicated positive{{+{:?}, -{:?}}}, negative{{+{:?}, -{:?}}}",
                update.add_positive,
                update.remove_positive,
                update.add_negative,
                update.remove_negative
            ),
        )
    }

    /// Register an uploaded example descriptor as a session positive.
    pub fn add_example(&self, key: &str, descriptor: DescriptorElement) -> OperationOutcome {
        let id = descriptor.id.clone();
        let result = self.controller.with_session(key, |s| {
            s.add_external_positive(descriptor);
            Ok(())
        });
        OperationOutcome::from_result(result, &format!("Added example positive '{id}'"))
    }

    /// Seed (or re-seed) the session's working index from its positives.
    pub fn initialize(&self, key: &str) -> OperationOutcome {
        let result = self.controller.with_session(key, |s| {
            s.initialize(
                self.nn_index.as_ref(),
                self.store.as_ref(),
                self.config.pos_seed_neighbors,
            )
        });
        OperationOutcome::from_result(result, "Completed initialization")
    }

    /// Train a fresh ranker on the session's labels and re-rank its
    /// working index.
    pub fn refine(&self, key: &str) -> OperationOutcome {
        let result = self.controller.with_session(key, |s| {
            let ranker = self.ranker_factory.build();
            s.refine(ranker.as_ref())
        });
        OperationOutcome::from_result(result, "Completed refinement")
    }

    /// Return the session to its pre-seed state.
    pub fn reset(&self, key: &str) -> OperationOutcome {
        let result = self.controller.with_session(key, |s| {
            s.reset();
            Ok(())
        });
        OperationOutcome::from_result(result, "Reset session")
    }

    /// The `[i, j)` slice of the session's ordered ranking, clipped to the
    /// available length; empty before the first refine.
    pub fn ordered_slice(&self, key: &str, i: usize, j: usize) -> IqrResult<Vec<(String, f64)>> {
        self.controller.with_session(key, |s| Ok(s.ordered_slice(i, j)))
    }

    /// Working-index member ids in random order, for unbiased review.
    pub fn random_working_ids(&self, key: &str) -> IqrResult<Vec<String>> {
        let mut ids = self
            .controller
            .with_session(key, |s| Ok(s.working_index().ids()))?;
        ids.shuffle(&mut rand::thread_rng());
        Ok(ids)
    }

    /// Export the session's labeled vectors as a zip archive holding one
    /// JSON entry (`pos`/`neg` arrays) named by the session uuid.
    pub fn export_state(&self, key: &str) -> IqrResult<Vec<u8>> {
        let (uuid, bundle) = self.controller.with_session(key, |s| {
            Ok((
                s.uuid().to_string(),
                IqrStateBundle {
                    pos: s.positive_vectors(),
                    neg: s.negative_vectors(),
                },
            ))
        })?;
        debug!(session = %uuid, pos = bundle.pos.len(), neg = bundle.neg.len(), "exporting state");
        state_export::write_state_archive(&uuid, &bundle)
    }

    /// Drop the session bound to `key`, if any.
    pub fn remove_session(&self, key: &str) -> bool {
        self.controller.remove(key)
    }

    pub fn session_count(&self) -> usize {
        self.controller.session_count()
    }
}
