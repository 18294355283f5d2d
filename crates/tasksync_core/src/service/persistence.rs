//! Snapshot persistence observer.
//!
//! # Responsibility
//! - Write every published snapshot to durable storage under one key.
//! - Restore the last stored snapshot at startup.
//!
//! # Invariants
//! - Each write replaces the whole stored document.
//! - Absent or undecodable stored data is reported as "no data", never raised.

use crate::broadcast::{Observer, ObserverError};
use crate::model::snapshot::Snapshot;
use crate::repo::kv_repo::KeyValueRepository;
use crate::store::task_store::{StoreResult, TaskStore};
use log::{debug, info, warn};

/// Storage key holding the snapshot document.
pub const STORAGE_KEY: &str = "data";

/// Observer persisting snapshots through a key-value repository.
pub struct PersistenceObserver<R: KeyValueRepository> {
    repo: R,
    key: String,
}

impl<R: KeyValueRepository> PersistenceObserver<R> {
    /// Persists under `STORAGE_KEY`.
    pub fn new(repo: R) -> Self {
        Self::with_key(repo, STORAGE_KEY)
    }

    pub fn with_key(repo: R, key: impl Into<String>) -> Self {
        Self {
            repo,
            key: key.into(),
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Reads and decodes the stored snapshot.
    ///
    /// Returns `None` when nothing is stored, when the document cannot be
    /// decoded, or when storage cannot be read. Failures are logged.
    pub fn load(&self) -> Option<Snapshot> {
        let raw = match self.repo.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=snapshot_load module=persistence status=empty");
                return None;
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=persistence status=error error_code=storage_read_failed error={}",
                    err
                );
                return None;
            }
        };

        match Snapshot::from_json(&raw) {
            Ok(snapshot) => {
                info!(
                    "event=snapshot_load module=persistence status=ok pending={} completed={}",
                    snapshot.pending_count(),
                    snapshot.completed_count()
                );
                Some(snapshot)
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=persistence status=error error_code=decode_failed error={}",
                    err
                );
                None
            }
        }
    }

    /// Restores `store` from storage, publishing the restored state.
    ///
    /// Returns `Ok(false)` when there was nothing usable to restore; the
    /// caller is then expected to publish a default snapshot.
    ///
    /// # Errors
    /// Only observer failures during the restore publish are returned.
    pub fn load_and_publish(&self, store: &mut TaskStore) -> StoreResult<bool> {
        let Some(snapshot) = self.load() else {
            return Ok(false);
        };
        store.restore(snapshot)?;
        Ok(true)
    }
}

impl<R: KeyValueRepository> Observer for PersistenceObserver<R> {
    fn name(&self) -> &str {
        "storage"
    }

    fn update(&self, snapshot: &Snapshot) -> Result<(), ObserverError> {
        let document = snapshot.to_json()?;
        self.repo.put(&self.key, &document)?;
        debug!(
            "event=snapshot_save module=persistence status=ok bytes={}",
            document.len()
        );
        Ok(())
    }
}
