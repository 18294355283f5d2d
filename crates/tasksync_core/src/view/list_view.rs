//! Pending/completed list rendering.

use crate::broadcast::{Observer, ObserverError};
use crate::model::snapshot::Snapshot;
use crate::model::task::{Task, TaskId};
use crate::store::selection::ListKind;
use log::debug;
use std::cell::RefCell;
use std::fmt::Write;

/// One rendered row, addressable by id for selection clicks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub id: TaskId,
    pub content: String,
}

/// Both lists in display order (newest first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListViewModel {
    pub pending: Vec<ListItem>,
    pub completed: Vec<ListItem>,
}

impl ListViewModel {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            pending: display_rows(&snapshot.pending),
            completed: display_rows(&snapshot.completed),
        }
    }

    pub fn items(&self, list: ListKind) -> &[ListItem] {
        match list {
            ListKind::Pending => &self.pending,
            ListKind::Completed => &self.completed,
        }
    }

    /// Resolves a 1-based display position to its task id.
    pub fn id_at(&self, list: ListKind, position: usize) -> Option<TaskId> {
        position
            .checked_sub(1)
            .and_then(|index| self.items(list).get(index))
            .map(|item| item.id)
    }

    /// Plain-text rendering with 1-based positions, marking `selected` rows.
    pub fn render_text(&self, selected: &[TaskId]) -> String {
        let mut out = String::new();
        for (title, list) in [("To do", ListKind::Pending), ("Done", ListKind::Completed)] {
            let _ = writeln!(out, "{title}:");
            let items = self.items(list);
            if items.is_empty() {
                let _ = writeln!(out, "  (empty)");
            }
            for (index, item) in items.iter().enumerate() {
                let marker = if selected.contains(&item.id) { '*' } else { ' ' };
                let _ = writeln!(out, "{marker} {:>2}. {}", index + 1, item.content);
            }
        }
        out
    }
}

fn display_rows(tasks: &[Task]) -> Vec<ListItem> {
    tasks
        .iter()
        .rev()
        .map(|task| ListItem {
            id: task.id,
            content: task.content.clone(),
        })
        .collect()
}

/// Observer keeping the latest `ListViewModel`.
#[derive(Debug, Default)]
pub struct ListView {
    current: RefCell<ListViewModel>,
}

impl ListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ListViewModel {
        self.current.borrow().clone()
    }
}

impl Observer for ListView {
    fn name(&self) -> &str {
        "list_view"
    }

    fn update(&self, snapshot: &Snapshot) -> Result<(), ObserverError> {
        let model = ListViewModel::from_snapshot(snapshot);
        debug!(
            "event=view_render module=view name=list pending={} completed={}",
            model.pending.len(),
            model.completed.len()
        );
        *self.current.borrow_mut() = model;
        Ok(())
    }
}
