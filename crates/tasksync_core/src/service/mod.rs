//! Use-case services around the task store.
//!
//! # Responsibility
//! - Persist and restore snapshots.
//! - Wire the controller, store and observers for one process.

pub mod persistence;
pub mod session;
