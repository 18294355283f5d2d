//! Synchronous snapshot broadcast.
//!
//! # Responsibility
//! - Keep an ordered registry of observers.
//! - Deliver each published snapshot to every observer, in registration order,
//!   before `publish` returns.
//!
//! # Invariants
//! - Delivery is unconditional: no filtering, no prioritization, no queueing.
//! - Registering the same observer twice yields two deliveries per publish.
//! - The first failing observer stops the fan-out; later observers are skipped.

pub mod controller;
pub mod hub;

use crate::model::snapshot::{Snapshot, SnapshotCodecError};
use crate::repo::kv_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Receiver of published snapshots.
///
/// Implementations receive a read-only projection and must route any
/// feedback through store mutations, never by patching state directly.
pub trait Observer {
    /// Diagnostic name used in logs and publish errors.
    fn name(&self) -> &str;

    /// Reacts to one published snapshot.
    fn update(&self, snapshot: &Snapshot) -> Result<(), ObserverError>;
}

/// Failure raised by one observer while handling a snapshot.
#[derive(Debug)]
pub enum ObserverError {
    Storage(RepoError),
    Codec(SnapshotCodecError),
    Rejected(String),
}

impl Display for ObserverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "storage failure: {err}"),
            Self::Codec(err) => write!(f, "{err}"),
            Self::Rejected(message) => write!(f, "snapshot rejected: {message}"),
        }
    }
}

impl Error for ObserverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::Rejected(_) => None,
        }
    }
}

impl From<RepoError> for ObserverError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

impl From<SnapshotCodecError> for ObserverError {
    fn from(value: SnapshotCodecError) -> Self {
        Self::Codec(value)
    }
}

/// Fan-out aborted by a failing observer.
#[derive(Debug)]
pub struct PublishError {
    /// Name of the observer that failed.
    pub observer: String,
    /// Zero-based registry position of the failing observer.
    pub position: usize,
    pub source: ObserverError,
}

impl Display for PublishError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "observer `{}` at position {} failed: {}",
            self.observer, self.position, self.source
        )
    }
}

impl Error for PublishError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}
