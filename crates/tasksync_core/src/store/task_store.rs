//! Task store use-cases.
//!
//! # Responsibility
//! - Apply add/complete/undo/remove to the authoritative list state.
//! - Track pending and completed selections independently.
//! - Publish exactly one snapshot per accepted operation.
//!
//! # Invariants
//! - A task id lives in at most one of `pending` / `completed`.
//! - Moves preserve the relative list order of the moved tasks.
//! - Selected ids that no longer resolve are skipped without error.

use crate::broadcast::controller::Controller;
use crate::broadcast::PublishError;
use crate::model::snapshot::{Snapshot, TaskListState};
use crate::model::task::{Clock, SystemClock, Task, TaskId};
use crate::store::selection::{ListKind, SelectModifiers, SelectionSet};
use log::{debug, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Task store operation errors.
#[derive(Debug)]
pub enum StoreError {
    /// Content was empty or whitespace-only; nothing changed or published.
    EmptyContent,
    /// State changed but the snapshot fan-out was aborted by an observer.
    Publish(PublishError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "task content cannot be empty"),
            Self::Publish(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyContent => None,
            Self::Publish(err) => Some(err),
        }
    }
}

impl From<PublishError> for StoreError {
    fn from(value: PublishError) -> Self {
        Self::Publish(value)
    }
}

/// Owner of the shared task list.
pub struct TaskStore {
    state: TaskListState,
    pending_selection: SelectionSet,
    completed_selection: SelectionSet,
    controller: Rc<Controller>,
    clock: Box<dyn Clock>,
}

impl TaskStore {
    /// Creates an empty store publishing through `controller`.
    pub fn new(controller: Rc<Controller>) -> Self {
        Self::with_clock(controller, SystemClock)
    }

    /// Creates an empty store with a caller-provided time source.
    pub fn with_clock(controller: Rc<Controller>, clock: impl Clock + 'static) -> Self {
        Self {
            state: TaskListState::default(),
            pending_selection: SelectionSet::new(),
            completed_selection: SelectionSet::new(),
            controller,
            clock: Box::new(clock),
        }
    }

    pub fn state(&self) -> &TaskListState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.to_snapshot()
    }

    pub fn controller(&self) -> &Rc<Controller> {
        &self.controller
    }

    /// Returns the selected ids of `list` in selection order.
    pub fn selection(&self, list: ListKind) -> &[TaskId] {
        self.selection_set(list).ids()
    }

    pub fn anchor(&self, list: ListKind) -> Option<TaskId> {
        self.selection_set(list).anchor()
    }

    pub fn clear_selection(&mut self, list: ListKind) {
        self.selection_set_mut(list).clear();
    }

    /// Returns the ids of `list` as rendered: newest first.
    pub fn display_order(&self, list: ListKind) -> Vec<TaskId> {
        self.tasks(list).iter().rev().map(|task| task.id).collect()
    }

    /// Looks up a task by id in either list.
    pub fn find(&self, id: TaskId) -> Option<(ListKind, &Task)> {
        [ListKind::Pending, ListKind::Completed]
            .into_iter()
            .find_map(|list| {
                self.tasks(list)
                    .iter()
                    .find(|task| task.id == id)
                    .map(|task| (list, task))
            })
    }

    /// Adds a pending task stamped with the current time.
    ///
    /// # Errors
    /// - `EmptyContent` for empty or whitespace-only input; no publish.
    /// - `Publish` when an observer aborts the fan-out; the task stays added.
    pub fn add(&mut self, content: impl Into<String>) -> StoreResult<TaskId> {
        let content = content.into();
        if content.trim().is_empty() {
            debug!("event=task_add module=store status=rejected reason=empty_content");
            return Err(StoreError::EmptyContent);
        }

        let task = Task::new(content, self.clock.now());
        let id = task.id;
        self.state.pending.push(task);
        info!(
            "event=task_add module=store status=ok task_id={} pending={}",
            id,
            self.state.pending.len()
        );

        self.publish()?;
        Ok(id)
    }

    /// Applies one click on `id` in `list`.
    ///
    /// Selection is not part of the snapshot, so nothing is published.
    pub fn select_item(&mut self, list: ListKind, id: TaskId, modifiers: SelectModifiers) {
        let display_order = self.display_order(list);
        self.selection_set_mut(list).click(id, modifiers, &display_order);
        debug!(
            "event=task_select module=store list={} selected={}",
            list.as_str(),
            self.selection_set(list).len()
        );
    }

    /// Moves selected pending tasks to `completed`.
    ///
    /// Sets `last_completed_at` when at least one task moved. Always publishes
    /// one combined snapshot. Returns the number of moved tasks.
    pub fn complete_selected(&mut self) -> StoreResult<usize> {
        let selected: HashSet<TaskId> = self.pending_selection.ids().iter().copied().collect();
        let moved = take_selected(&mut self.state.pending, &selected);
        let count = moved.len();
        if count > 0 {
            self.state.last_completed_at = Some(self.clock.now());
        }
        self.state.completed.extend(moved);
        self.pending_selection.clear();

        info!(
            "event=task_complete module=store status=ok moved={} skipped={}",
            count,
            selected.len().saturating_sub(count)
        );
        self.publish()?;
        Ok(count)
    }

    /// Moves selected completed tasks back to `pending`.
    ///
    /// Leaves `last_completed_at` untouched. Returns the number of moved tasks.
    pub fn undo_selected(&mut self) -> StoreResult<usize> {
        let selected: HashSet<TaskId> = self.completed_selection.ids().iter().copied().collect();
        let moved = take_selected(&mut self.state.completed, &selected);
        let count = moved.len();
        self.state.pending.extend(moved);
        self.completed_selection.clear();

        info!(
            "event=task_undo module=store status=ok moved={} skipped={}",
            count,
            selected.len().saturating_sub(count)
        );
        self.publish()?;
        Ok(count)
    }

    /// Permanently deletes selected tasks from both lists.
    ///
    /// Returns the number of removed tasks.
    pub fn remove_selected(&mut self) -> StoreResult<usize> {
        let pending: HashSet<TaskId> = self.pending_selection.ids().iter().copied().collect();
        let completed: HashSet<TaskId> = self.completed_selection.ids().iter().copied().collect();
        let removed = take_selected(&mut self.state.pending, &pending).len()
            + take_selected(&mut self.state.completed, &completed).len();
        self.pending_selection.clear();
        self.completed_selection.clear();

        info!("event=task_remove module=store status=ok removed={removed}");
        self.publish()?;
        Ok(removed)
    }

    /// Replaces the whole state from a snapshot and publishes it.
    ///
    /// Duplicate ids in the incoming snapshot are reassigned so that every
    /// task stays individually addressable.
    pub fn restore(&mut self, snapshot: Snapshot) -> StoreResult<()> {
        let mut state = TaskListState::from_snapshot(snapshot);
        let reassigned = reassign_duplicate_ids(&mut state);
        self.state = state;
        self.pending_selection.clear();
        self.completed_selection.clear();

        info!(
            "event=state_restore module=store status=ok pending={} completed={} reassigned_ids={}",
            self.state.pending.len(),
            self.state.completed.len(),
            reassigned
        );
        self.publish()
    }

    /// Publishes the current state without changing it.
    pub fn publish_current(&self) -> StoreResult<()> {
        self.publish()
    }

    fn publish(&self) -> StoreResult<()> {
        self.controller.publish(&self.state.to_snapshot())?;
        Ok(())
    }

    fn tasks(&self, list: ListKind) -> &[Task] {
        match list {
            ListKind::Pending => &self.state.pending,
            ListKind::Completed => &self.state.completed,
        }
    }

    fn selection_set(&self, list: ListKind) -> &SelectionSet {
        match list {
            ListKind::Pending => &self.pending_selection,
            ListKind::Completed => &self.completed_selection,
        }
    }

    fn selection_set_mut(&mut self, list: ListKind) -> &mut SelectionSet {
        match list {
            ListKind::Pending => &mut self.pending_selection,
            ListKind::Completed => &mut self.completed_selection,
        }
    }
}

/// Removes tasks whose id is in `selected`, returning them in list order.
fn take_selected(tasks: &mut Vec<Task>, selected: &HashSet<TaskId>) -> Vec<Task> {
    if selected.is_empty() {
        return Vec::new();
    }
    let (taken, kept): (Vec<Task>, Vec<Task>) = std::mem::take(tasks)
        .into_iter()
        .partition(|task| selected.contains(&task.id));
    *tasks = kept;
    taken
}

fn reassign_duplicate_ids(state: &mut TaskListState) -> usize {
    let mut seen = HashSet::new();
    let mut reassigned = 0;
    for task in state.pending.iter_mut().chain(state.completed.iter_mut()) {
        while !seen.insert(task.id) {
            task.id = TaskId::new();
            reassigned += 1;
        }
    }
    reassigned
}
