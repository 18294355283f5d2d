//! Per-list selection with range/toggle/exclusive click policies.

use crate::model::task::TaskId;

/// Which rendered list a selection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Pending,
    Completed,
}

impl ListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

/// Modifier keys held while an item is clicked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectModifiers {
    /// Extend a contiguous range from the anchor.
    pub shift: bool,
    /// Toggle one item in or out of the selection.
    pub ctrl: bool,
}

impl SelectModifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ctrl: false,
        }
    }

    pub fn ctrl() -> Self {
        Self {
            shift: false,
            ctrl: true,
        }
    }
}

/// Selected task ids of one list plus the range anchor.
///
/// Ids are kept in selection order; a selected id may be stale (no longer
/// present in the list), in which case list operations skip it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: Vec<TaskId>,
    anchor: Option<TaskId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[TaskId] {
        &self.selected
    }

    pub fn anchor(&self) -> Option<TaskId> {
        self.anchor
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drops every selected id and the anchor.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.anchor = None;
    }

    /// Applies one click on `id`.
    ///
    /// `display_order` is the list as rendered (newest first) and is only
    /// consulted by range selection.
    ///
    /// Policy precedence: range (shift with an anchor), then toggle (ctrl),
    /// then exclusive.
    pub fn click(&mut self, id: TaskId, modifiers: SelectModifiers, display_order: &[TaskId]) {
        let anchor = self.anchor;
        match anchor {
            Some(anchor) if modifiers.shift => self.select_range(anchor, id, display_order),
            _ if modifiers.ctrl => self.toggle(id),
            _ => self.select_exclusive(id),
        }
    }

    fn select_range(&mut self, anchor: TaskId, id: TaskId, display_order: &[TaskId]) {
        let anchor_at = display_order.iter().position(|item| *item == anchor);
        let clicked_at = display_order.iter().position(|item| *item == id);

        self.selected.clear();
        match (anchor_at, clicked_at) {
            (Some(start), Some(end)) => {
                let (low, high) = if start <= end { (start, end) } else { (end, start) };
                self.selected.extend_from_slice(&display_order[low..=high]);
            }
            (Some(_), None) => self.selected.push(anchor),
            (None, Some(_)) => {
                // Stale anchor: restart the range at the clicked item.
                self.selected.push(id);
                self.anchor = Some(id);
            }
            (None, None) => {}
        }
    }

    fn toggle(&mut self, id: TaskId) {
        if let Some(position) = self.selected.iter().position(|item| *item == id) {
            self.selected.remove(position);
            self.anchor = None;
        } else {
            self.selected.push(id);
            self.anchor = Some(id);
        }
    }

    fn select_exclusive(&mut self, id: TaskId) {
        let was_sole_selection = self.selected.len() == 1 && self.selected[0] == id;
        self.selected.clear();
        if was_sole_selection {
            self.anchor = None;
        } else {
            self.selected.push(id);
            self.anchor = Some(id);
        }
    }
}
