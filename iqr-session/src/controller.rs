//! SessionController: two-level locking over many concurrent sessions.
//!
//! Level one is the registry (a `DashMap` keyed by external session key,
//! sharded internally); level two is one mutex per session. The registry
//! lock is held only for lookup-or-create and is always released before
//! the session mutex is taken, so a long refine on one session never
//! blocks operations on unrelated sessions.

use std::sync::{Arc, Mutex, TryLockError};

use chrono::{Duration, Utc};
use dashmap::DashMap;
use iqr_core::errors::{IqrError, IqrResult};
use tracing::{debug, info};

use crate::session::IqrSession;

/// Process-wide registry mapping external session keys to sessions.
#[derive(Default)]
pub struct SessionController {
    sessions: DashMap<String, Arc<Mutex<IqrSession>>>,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the session for `key`, creating it if absent. Atomic per
    /// key: concurrent callers with the same unregistered key observe
    /// exactly one created session.
    pub fn get_or_create(&self, key: &str) -> Arc<Mutex<IqrSession>> {
        self.sessions
            .entry(key.to_string())
            .or_insert_with(|| {
                let session = IqrSession::new();
                debug!(key, uuid = %session.uuid(), "created session");
                Arc::new(Mutex::new(session))
            })
            .clone()
    }

    /// Look up an existing session without creating one.
    pub fn get(&self, key: &str) -> Option<Arc<Mutex<IqrSession>>> {
        self.sessions.get(key).map(|r| r.clone())
    }

    /// Remove one session's state. Other sessions are unaffected.
    pub fn remove(&self, key: &str) -> bool {
        self.sessions.remove(key).is_some()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn session_keys(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }

    /// Run `f` against the session for `key` (created if absent) while
    /// holding that session's lock. The registry shard lock is released
    /// before the session mutex is acquired; the two are never nested.
    ///
    /// A poisoned session mutex means a prior holder panicked mid-operation
    /// and maps to the fatal `Concurrency` error.
    pub fn with_session<R>(
        &self,
        key: &str,
        f: impl FnOnce(&mut IqrSession) -> IqrResult<R>,
    ) -> IqrResult<R> {
        let slot = self.get_or_create(key);
        let mut session = slot.lock().map_err(|_| IqrError::Concurrency {
            reason: format!("session lock poisoned for key '{key}'"),
        })?;
        session.touch();
        f(&mut session)
    }

    /// Evict sessions idle longer than `max_idle`. Sessions whose lock is
    /// currently held are in use and are skipped; poisoned sessions are
    /// evicted. Returns the number removed.
    pub fn cleanup_expired(&self, max_idle: Duration) -> usize {
        let now = Utc::now();
        let snapshot: Vec<(String, Arc<Mutex<IqrSession>>)> = self
            .sessions
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();

        let mut removed = 0;
        for (key, slot) in snapshot {
            let stale = match slot.try_lock() {
                Ok(session) => now - session.last_active() > max_idle,
                Err(TryLockError::WouldBlock) => false,
                Err(TryLockError::Poisoned(_)) => true,
            };
            if stale && self.sessions.remove(&key).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            info!(removed, "evicted expired sessions");
        }
        removed
    }
}
