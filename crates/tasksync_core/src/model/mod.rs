//! Task-list domain model and snapshot projection.
//!
//! # Responsibility
//! - Define the canonical task record and the authoritative list aggregate.
//! - Project the aggregate to/from the serializable `Snapshot` shape.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - A task appears in exactly one of `pending` / `completed`.

pub mod snapshot;
pub mod task;
