//! Shareable progress message and link.

use crate::broadcast::{Observer, ObserverError};
use crate::model::snapshot::Snapshot;
use crate::model::task::format_gmt;
use log::debug;
use std::cell::RefCell;
use url::Url;

/// Share endpoint used when none is configured.
pub const DEFAULT_SHARE_BASE_URL: &str = "http://twitter.com/home";
/// Query parameter carrying the message.
pub const SHARE_QUERY_PARAM: &str = "status";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareViewModel {
    pub message: String,
    pub link: Url,
}

/// Builds the progress sentence for a snapshot.
pub fn progress_message(snapshot: &Snapshot) -> String {
    let mut message = format!(
        "I have completed {} tasks out of {}!!",
        snapshot.completed_count(),
        snapshot.total_count()
    );
    if let Some(at) = snapshot.last_completed_at {
        message.push_str(" My last task completed was at ");
        message.push_str(&format_gmt(at));
    }
    message
}

/// Observer keeping the latest `ShareViewModel`.
#[derive(Debug)]
pub struct ShareView {
    base_url: Url,
    current: RefCell<Option<ShareViewModel>>,
}

impl ShareView {
    /// Creates a share view targeting `DEFAULT_SHARE_BASE_URL`.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_SHARE_BASE_URL).expect("default share url is valid")
    }

    /// Creates a share view targeting a custom endpoint.
    pub fn with_base_url(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            current: RefCell::new(None),
        })
    }

    /// Returns the latest model, or `None` before the first publish.
    pub fn current(&self) -> Option<ShareViewModel> {
        self.current.borrow().clone()
    }

    pub fn build(&self, snapshot: &Snapshot) -> ShareViewModel {
        let message = progress_message(snapshot);
        let mut link = self.base_url.clone();
        link.query_pairs_mut().append_pair(SHARE_QUERY_PARAM, &message);
        ShareViewModel { message, link }
    }
}

impl Default for ShareView {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ShareView {
    fn name(&self) -> &str {
        "share_view"
    }

    fn update(&self, snapshot: &Snapshot) -> Result<(), ObserverError> {
        let model = self.build(snapshot);
        debug!(
            "event=view_render module=view name=share message_chars={}",
            model.message.chars().count()
        );
        *self.current.borrow_mut() = Some(model);
        Ok(())
    }
}
