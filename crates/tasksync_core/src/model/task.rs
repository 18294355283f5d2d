//! Task domain model.
//!
//! # Responsibility
//! - Define the record shared by list, summary, share and storage consumers.
//! - Provide the clock seam used to stamp creation/completion times.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `content` and `created_at` never change after creation.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned to a task at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Generates a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry on the to-do list.
///
/// Serialized as `{id, content, timeCreated}` to match the stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id; backfilled for documents written before ids existed.
    #[serde(default)]
    pub id: TaskId,
    pub content: String,
    #[serde(rename = "timeCreated", deserialize_with = "deserialize_instant")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a task with a generated id.
    pub fn new(content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::with_id(TaskId::new(), content, created_at)
    }

    /// Creates a task with a caller-provided id.
    pub fn with_id(id: TaskId, content: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content: content.into(),
            created_at,
        }
    }

    /// Returns the legacy `(content, created_at)` identity key.
    pub fn identity_key(&self) -> (&str, DateTime<Utc>) {
        (self.content.as_str(), self.created_at)
    }
}

/// Time source for store mutations.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Formats an instant the way share text presents it,
/// e.g. `Sun, 18 Oct 2026 10:00:00 GMT`.
pub fn format_gmt(instant: DateTime<Utc>) -> String {
    instant.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parses a stored instant: RFC 3339 first, then the RFC 2822 / GMT long form
/// older documents carry.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

pub(crate) fn deserialize_instant<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_instant(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
}

pub(crate) fn deserialize_optional_instant<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_instant(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`"))),
    }
}

#[cfg(test)]
mod tests {
    use super::{format_gmt, parse_instant, Task, TaskId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn new_task_gets_distinct_ids() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let first = Task::new("milk", at);
        let second = Task::new("milk", at);

        assert_ne!(first.id, second.id);
        assert_eq!(first.identity_key(), second.identity_key());
    }

    #[test]
    fn task_serializes_with_stored_field_names() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let task = Task::with_id(TaskId::new(), "write report", at);

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["content"], "write report");
        assert_eq!(json["timeCreated"], "2026-10-18T09:30:00Z");
        assert_eq!(json["id"], task.id.to_string());
    }

    #[test]
    fn task_without_id_is_backfilled() {
        let value = serde_json::json!({
            "content": "legacy",
            "timeCreated": "2026-10-18T09:30:00Z"
        });

        let task: Task = serde_json::from_value(value).unwrap();
        assert_eq!(task.content, "legacy");
        assert!(!task.id.as_uuid().is_nil());
    }

    #[test]
    fn gmt_format_matches_long_form() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
        assert_eq!(format_gmt(at), "Sun, 18 Oct 2026 10:00:00 GMT");
    }

    #[test]
    fn gmt_long_form_creation_time_is_accepted() {
        let value = serde_json::json!({
            "content": "older build",
            "timeCreated": "Sun, 18 Oct 2026 10:00:00 GMT"
        });

        let task: Task = serde_json::from_value(value).unwrap();
        let expected = Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
        assert_eq!(task.created_at, expected);
        assert_eq!(
            serde_json::to_value(&task).unwrap()["timeCreated"],
            "2026-10-18T10:00:00Z"
        );
    }

    #[test]
    fn instants_parse_in_both_stored_forms() {
        let expected = Utc.with_ymd_and_hms(2026, 10, 18, 10, 0, 0).unwrap();
        assert_eq!(parse_instant("2026-10-18T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_instant("Sun, 18 Oct 2026 10:00:00 GMT"), Some(expected));
        assert_eq!(parse_instant("yesterday"), None);
    }

    #[test]
    fn unparseable_creation_time_is_rejected() {
        let value = serde_json::json!({ "content": "x", "timeCreated": "soon" });
        assert!(serde_json::from_value::<Task>(value).is_err());
    }
}
