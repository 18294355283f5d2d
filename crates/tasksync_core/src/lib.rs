//! Core of the task-list sync engine.
//!
//! A single `TaskStore` owns the list state; every mutation publishes a
//! fresh `Snapshot` through one shared `Controller`, which fans it out
//! synchronously to the registered views and the persistence observer.

pub mod broadcast;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use broadcast::controller::Controller;
pub use broadcast::hub::BroadcastHub;
pub use broadcast::{Observer, ObserverError, PublishError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::snapshot::{Snapshot, SnapshotCodecError, TaskListState};
pub use model::task::{format_gmt, parse_instant, Clock, SystemClock, Task, TaskId};
pub use repo::kv_repo::{KeyValueRepository, RepoError, RepoResult, SqliteKeyValueRepository};
pub use service::persistence::{PersistenceObserver, STORAGE_KEY};
pub use service::session::{start, Session, StartupOutcome};
pub use store::selection::{ListKind, SelectModifiers, SelectionSet};
pub use store::task_store::{StoreError, StoreResult, TaskStore};
pub use view::list_view::{ListItem, ListView, ListViewModel};
pub use view::share_view::{progress_message, ShareView, ShareViewModel, DEFAULT_SHARE_BASE_URL};
pub use view::summary_view::{SummaryView, SummaryViewModel, EMPTY_PROGRESS_PERCENT};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
