use std::rc::Rc;
use tasksync_core::db::{open_db, open_db_in_memory};
use tasksync_core::{
    Controller, KeyValueRepository, ListKind, PersistenceObserver, SelectModifiers, Session,
    Snapshot, SqliteKeyValueRepository, StartupOutcome, TaskStore, EMPTY_PROGRESS_PERCENT,
    STORAGE_KEY,
};

fn memory_repo() -> SqliteKeyValueRepository {
    SqliteKeyValueRepository::new(open_db_in_memory().unwrap())
}

#[test]
fn every_publish_overwrites_stored_document() {
    let controller = Controller::shared();
    let persistence = Rc::new(PersistenceObserver::new(memory_repo()));
    controller.attach(persistence.clone());
    let mut store = TaskStore::new(Rc::clone(&controller));

    store.add("first").unwrap();
    store.add("second").unwrap();

    let raw = persistence.repo().get(STORAGE_KEY).unwrap().unwrap();
    let stored = Snapshot::from_json(&raw).unwrap();
    assert_eq!(stored, store.snapshot());
    assert_eq!(stored.pending_count(), 2);
}

#[test]
fn stored_document_uses_expected_layout() {
    let mut session = Session::open(memory_repo()).unwrap();
    session.store.add("write report").unwrap();

    let raw = session.persistence.repo().get(STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["pending"][0]["content"], "write report");
    assert!(json["pending"][0]["timeCreated"].is_string());
    assert!(json["pending"][0]["id"].is_string());
    assert_eq!(json["completed"], serde_json::json!([]));
    assert!(json["lastCompletedAt"].is_null());
}

#[test]
fn load_on_empty_storage_reports_no_data() {
    let persistence = PersistenceObserver::new(memory_repo());
    let mut store = TaskStore::new(Controller::shared());

    assert_eq!(persistence.load(), None);
    assert!(!persistence.load_and_publish(&mut store).unwrap());
}

#[test]
fn fresh_start_initialises_every_view_with_defaults() {
    let session = Session::open(memory_repo()).unwrap();

    assert_eq!(session.outcome(), StartupOutcome::Fresh);
    assert!(session.list.current().pending.is_empty());
    assert!(session.list.current().completed.is_empty());
    assert_eq!(session.summary.current().progress_percent, EMPTY_PROGRESS_PERCENT);
    let share = session.share.current().expect("share view initialised");
    assert_eq!(share.message, "I have completed 0 tasks out of 0!!");

    let raw = session.persistence.repo().get(STORAGE_KEY).unwrap().unwrap();
    assert_eq!(Snapshot::from_json(&raw).unwrap(), Snapshot::default());
}

#[test]
fn corrupt_document_falls_back_to_fresh_start() {
    let repo = memory_repo();
    repo.put(STORAGE_KEY, "{not json").unwrap();

    let session = Session::open(repo).unwrap();

    assert_eq!(session.outcome(), StartupOutcome::Fresh);
    assert!(session.store.state().is_empty());
}

#[test]
fn null_document_falls_back_to_fresh_start() {
    let repo = memory_repo();
    repo.put(STORAGE_KEY, "null").unwrap();

    let session = Session::open(repo).unwrap();
    assert_eq!(session.outcome(), StartupOutcome::Fresh);
}

#[test]
fn legacy_document_without_ids_is_restored() {
    let repo = memory_repo();
    repo.put(
        STORAGE_KEY,
        r#"{"pending":[{"content":"old task","timeCreated":"2026-10-01T08:00:00Z"}]}"#,
    )
    .unwrap();

    let session = Session::open(repo).unwrap();

    assert_eq!(session.outcome(), StartupOutcome::Restored);
    assert_eq!(session.store.state().pending[0].content, "old task");
    assert!(session.store.state().completed.is_empty());
    assert_eq!(session.store.state().last_completed_at, None);
}

#[test]
fn document_with_gmt_timestamps_is_restored_not_overwritten() {
    let repo = memory_repo();
    repo.put(
        STORAGE_KEY,
        r#"{"pending":[{"content":"ship it","timeCreated":"Sun, 18 Oct 2026 10:00:00 GMT"}],"completed":[],"lastCompletedAt":null}"#,
    )
    .unwrap();

    let session = Session::open(repo).unwrap();

    assert_eq!(session.outcome(), StartupOutcome::Restored);
    assert_eq!(session.store.state().pending[0].content, "ship it");
    let stored = session
        .persistence
        .repo()
        .get(STORAGE_KEY)
        .unwrap()
        .unwrap();
    assert!(stored.contains("ship it"));
    assert!(stored.contains("2026-10-18T10:00:00Z"));
}

#[test]
fn state_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    let (done_id, pending_id) = {
        let mut session =
            Session::open(SqliteKeyValueRepository::new(open_db(&path).unwrap())).unwrap();
        let done = session.store.add("ship it").unwrap();
        let pending = session.store.add("review").unwrap();
        session.store.select_item(ListKind::Pending, done, SelectModifiers::none());
        session.store.complete_selected().unwrap();
        (done, pending)
    };

    let session = Session::open(SqliteKeyValueRepository::new(open_db(&path).unwrap())).unwrap();

    assert_eq!(session.outcome(), StartupOutcome::Restored);
    let state = session.store.state();
    assert_eq!(state.pending[0].id, pending_id);
    assert_eq!(state.completed[0].id, done_id);
    assert!(state.last_completed_at.is_some());
    assert_eq!(session.summary.current().completed, 1);
    assert_eq!(session.summary.current().progress_percent, 50.0);
    let share = session.share.current().unwrap();
    assert!(share.message.starts_with("I have completed 1 tasks out of 2!!"));
    assert!(share.message.contains("My last task completed was at"));
}
