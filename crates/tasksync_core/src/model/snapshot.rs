//! Snapshot projection of the task list aggregate.
//!
//! # Responsibility
//! - Define the authoritative `TaskListState` aggregate.
//! - Define the serializable `Snapshot` broadcast to observers and storage.
//! - Decode stored documents defensively.
//!
//! # Invariants
//! - A snapshot contains exactly `pending`, `completed`, `lastCompletedAt`.
//! - Decoding an empty object yields an empty, valid state.
//! - Snapshots are replaced wholesale, never patched.

use crate::model::task::{deserialize_optional_instant, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Authoritative list aggregate owned by the task store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListState {
    /// Insertion order; rendered newest-first.
    pub pending: Vec<Task>,
    /// Completion order; rendered newest-first.
    pub completed: Vec<Task>,
    /// Time of the most recent completion.
    pub last_completed_at: Option<DateTime<Utc>>,
}

impl TaskListState {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty()
    }

    /// Projects this state into a broadcastable snapshot.
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }

    /// Rebuilds state from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::from(snapshot)
    }
}

/// Immutable, serializable projection of `TaskListState`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pending: Vec<Task>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub completed: Vec<Task>,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub last_completed_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn total_count(&self) -> usize {
        self.pending.len() + self.completed.len()
    }

    /// Encodes this snapshot as the stored JSON document.
    pub fn to_json(&self) -> Result<String, SnapshotCodecError> {
        serde_json::to_string(self).map_err(SnapshotCodecError::Json)
    }

    /// Decodes a stored JSON document.
    ///
    /// # Errors
    /// - `Null` when the document is literally `null`.
    /// - `Json` when the document is not a valid snapshot object.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotCodecError> {
        let value: Option<Snapshot> =
            serde_json::from_str(raw).map_err(SnapshotCodecError::Json)?;
        value.ok_or(SnapshotCodecError::Null)
    }
}

impl From<&TaskListState> for Snapshot {
    fn from(state: &TaskListState) -> Self {
        Self {
            pending: state.pending.clone(),
            completed: state.completed.clone(),
            last_completed_at: state.last_completed_at,
        }
    }
}

impl From<Snapshot> for TaskListState {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            pending: snapshot.pending,
            completed: snapshot.completed,
            last_completed_at: snapshot.last_completed_at,
        }
    }
}

/// Snapshot encode/decode failures.
#[derive(Debug)]
pub enum SnapshotCodecError {
    Json(serde_json::Error),
    Null,
}

impl Display for SnapshotCodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "snapshot json error: {err}"),
            Self::Null => write!(f, "snapshot document is null"),
        }
    }
}

impl Error for SnapshotCodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Null => None,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Task>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Task>>::deserialize(deserializer)?.unwrap_or_default())
}
