//! Repository layer for durable key-value storage.
//!
//! # Responsibility
//! - Define the storage contract used by the persistence observer.
//! - Keep SQLite query details behind that contract.
//!
//! # Invariants
//! - Writes replace the whole value stored under a key.

pub mod kv_repo;
