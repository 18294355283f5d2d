//! Process wiring and startup sequence.
//!
//! # Responsibility
//! - Build the single controller and register the fixed observer set.
//! - Restore persisted state, or publish the empty state, at startup.
//!
//! # Invariants
//! - Observers are registered once, in order: list, summary, share, storage.
//! - After `start` every observer has seen exactly one initial snapshot.

use crate::broadcast::controller::Controller;
use crate::broadcast::Observer;
use crate::repo::kv_repo::KeyValueRepository;
use crate::service::persistence::PersistenceObserver;
use crate::store::task_store::{StoreResult, TaskStore};
use crate::view::list_view::ListView;
use crate::view::share_view::ShareView;
use crate::view::summary_view::SummaryView;
use log::info;
use std::rc::Rc;

/// Where the initial snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupOutcome {
    Restored,
    Fresh,
}

/// Runs the startup sequence against already-registered observers.
///
/// Restores from `persistence` when possible; otherwise publishes the
/// store's current (empty) state so every observer initialises.
pub fn start<R: KeyValueRepository>(
    store: &mut TaskStore,
    persistence: &PersistenceObserver<R>,
) -> StoreResult<StartupOutcome> {
    let outcome = if persistence.load_and_publish(store)? {
        StartupOutcome::Restored
    } else {
        store.publish_current()?;
        StartupOutcome::Fresh
    };
    info!(
        "event=session_start module=session status=ok outcome={:?} observers={}",
        outcome,
        store.controller().observer_count()
    );
    Ok(outcome)
}

/// Fully wired task list: controller, store, views and persistence.
pub struct Session<R: KeyValueRepository + 'static> {
    pub store: TaskStore,
    pub list: Rc<ListView>,
    pub summary: Rc<SummaryView>,
    pub share: Rc<ShareView>,
    pub persistence: Rc<PersistenceObserver<R>>,
    outcome: StartupOutcome,
}

impl<R: KeyValueRepository + 'static> Session<R> {
    /// Wires the default observer set and runs the startup sequence.
    pub fn open(repo: R) -> StoreResult<Self> {
        Self::open_with(repo, ShareView::new(), TaskStore::new)
    }

    /// Same as `open`, with a custom share view and store factory.
    pub fn open_with(
        repo: R,
        share: ShareView,
        make_store: impl FnOnce(Rc<Controller>) -> TaskStore,
    ) -> StoreResult<Self> {
        let controller = Controller::shared();
        let list = Rc::new(ListView::new());
        let summary = Rc::new(SummaryView::new());
        let share = Rc::new(share);
        let persistence = Rc::new(PersistenceObserver::new(repo));

        controller.attach(list.clone());
        controller.attach(summary.clone());
        controller.attach(share.clone());
        controller.attach(persistence.clone() as Rc<dyn Observer>);

        let mut store = make_store(controller);
        let outcome = start(&mut store, persistence.as_ref())?;

        Ok(Self {
            store,
            list,
            summary,
            share,
            persistence,
            outcome,
        })
    }

    pub fn outcome(&self) -> StartupOutcome {
        self.outcome
    }
}
