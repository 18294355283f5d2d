//! Task store: the only mutator of the shared list state.
//!
//! # Responsibility
//! - Own the authoritative `TaskListState` and per-list selections.
//! - Apply add/select/complete/undo/remove use-cases.
//! - Publish a fresh snapshot through the controller after every mutation.
//!
//! # Invariants
//! - No state change happens without an accompanying publish.
//! - Rejected input (empty content) changes nothing and publishes nothing.
//! - Selection is ephemeral UI state and never part of a snapshot.

pub mod selection;
pub mod task_store;
