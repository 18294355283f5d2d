//! Completion counts and progress bar.

use crate::broadcast::{Observer, ObserverError};
use crate::model::snapshot::Snapshot;
use log::debug;
use std::cell::RefCell;

/// Progress shown when there are no tasks at all.
pub const EMPTY_PROGRESS_PERCENT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryViewModel {
    pub completed: usize,
    pub pending: usize,
    /// Share of completed tasks in `0.0..=100.0`.
    pub progress_percent: f64,
}

impl Default for SummaryViewModel {
    fn default() -> Self {
        Self {
            completed: 0,
            pending: 0,
            progress_percent: EMPTY_PROGRESS_PERCENT,
        }
    }
}

impl SummaryViewModel {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let completed = snapshot.completed_count();
        let pending = snapshot.pending_count();
        let total = completed + pending;
        let progress_percent = if total == 0 {
            EMPTY_PROGRESS_PERCENT
        } else {
            completed as f64 / total as f64 * 100.0
        };

        Self {
            completed,
            pending,
            progress_percent,
        }
    }

    /// Text progress bar `width` cells wide, e.g. `[#####-----] 50%`.
    pub fn bar(&self, width: usize) -> String {
        let filled = ((self.progress_percent / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!(
            "[{}{}] {:.0}%",
            "#".repeat(filled),
            "-".repeat(width - filled),
            self.progress_percent
        )
    }
}

/// Observer keeping the latest `SummaryViewModel`.
#[derive(Debug, Default)]
pub struct SummaryView {
    current: RefCell<SummaryViewModel>,
}

impl SummaryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> SummaryViewModel {
        *self.current.borrow()
    }
}

impl Observer for SummaryView {
    fn name(&self) -> &str {
        "summary_view"
    }

    fn update(&self, snapshot: &Snapshot) -> Result<(), ObserverError> {
        let model = SummaryViewModel::from_snapshot(snapshot);
        debug!(
            "event=view_render module=view name=summary completed={} pending={}",
            model.completed, model.pending
        );
        *self.current.borrow_mut() = model;
        Ok(())
    }
}
