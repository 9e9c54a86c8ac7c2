use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::labels::normalize_labels;

/// Lifecycle stage of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "Inbox")]
    Inbox,
    #[serde(rename = "To-do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Overdue")]
    Overdue,
    #[serde(rename = "Needs Review")]
    NeedsReview,
    #[serde(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// The stored raw value (display form, with spaces retained)
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Inbox => "Inbox",
            TaskStatus::Todo => "To-do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Overdue => "Overdue",
            TaskStatus::NeedsReview => "Needs Review",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Parse a stored raw value. Unknown strings map to `None`, never an error;
    /// the status engine treats an unrecognized status as a reset to inbox.
    pub fn parse(raw: &str) -> Option<TaskStatus> {
        match raw {
            "Inbox" => Some(TaskStatus::Inbox),
            "To-do" => Some(TaskStatus::Todo),
            "In Progress" => Some(TaskStatus::InProgress),
            "Overdue" => Some(TaskStatus::Overdue),
            "Needs Review" => Some(TaskStatus::NeedsReview),
            "Completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

/// Action priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "High")]
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Unknown stored strings decode to `None`
    pub fn parse(raw: &str) -> Option<Priority> {
        match raw {
            "Low" => Some(Priority::Low),
            "Medium" => Some(Priority::Medium),
            "High" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Top-level life-area classification used to partition actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Domain {
    Work,
    Personal,
    Learning,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Work => "Work",
            Domain::Personal => "Personal",
            Domain::Learning => "Learning",
        }
    }

    pub fn parse(raw: &str) -> Option<Domain> {
        match raw {
            "Work" => Some(Domain::Work),
            "Personal" => Some(Domain::Personal),
            "Learning" => Some(Domain::Learning),
            _ => None,
        }
    }
}

/// A single tracked action with all its fields.
///
/// `labels` is kept private so the normalization invariant holds: entries are
/// trimmed, case-insensitively unique, CI-sorted, and an empty set is stored
/// as absent rather than an empty vec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Assigned once at creation, immutable thereafter
    pub id: Uuid,
    pub title: String,
    pub due_date: Option<DateTime<Utc>>,
    pub project: Option<String>,
    labels: Option<Vec<String>>,
    pub priority: Option<Priority>,
    pub domain: Option<Domain>,
    pub is_completed: bool,
    /// `None` covers both "never set" and an unrecognized stored value
    pub status: Option<TaskStatus>,
    /// Set once at first persistence, never overwritten
    pub created_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl TaskRecord {
    /// Create a new record with a fresh id and the given title
    pub fn new(title: impl Into<String>) -> Self {
        TaskRecord {
            id: Uuid::new_v4(),
            title: title.into(),
            due_date: None,
            project: None,
            labels: None,
            priority: None,
            domain: None,
            is_completed: false,
            status: None,
            created_at: None,
            notes: None,
        }
    }

    /// Current labels, empty slice when absent
    pub fn labels(&self) -> &[String] {
        self.labels.as_deref().unwrap_or_default()
    }

    /// Replace the label set, normalizing on the way in
    pub fn set_labels<I, S>(&mut self, raw: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.labels = normalize_labels(raw);
    }

    /// Stamp `created_at` if it has never been set
    pub fn ensure_created_at(&mut self) {
        if self.created_at.is_none() {
            self.created_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_raw_values_round_trip() {
        for status in [
            TaskStatus::Inbox,
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Overdue,
            TaskStatus::NeedsReview,
            TaskStatus::Completed,
        ] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_unknown_status_parses_to_none() {
        assert_eq!(TaskStatus::parse("Snoozed"), None);
        assert_eq!(TaskStatus::parse(""), None);
        assert_eq!(TaskStatus::parse("inbox"), None); // raw values are exact
    }

    #[test]
    fn test_unknown_priority_parses_to_none() {
        assert_eq!(Priority::parse("Urgent"), None);
        assert_eq!(Priority::parse("High"), Some(Priority::High));
    }

    #[test]
    fn test_new_record_defaults() {
        let record = TaskRecord::new("Email Sarah");
        assert_eq!(record.title, "Email Sarah");
        assert!(!record.is_completed);
        assert!(record.status.is_none());
        assert!(record.created_at.is_none());
        assert!(record.labels().is_empty());
    }

    #[test]
    fn test_set_labels_normalizes() {
        let mut record = TaskRecord::new("t");
        record.set_labels(["Home", " home ", "WORK", "Work"]);
        assert_eq!(record.labels(), ["Home", "WORK"]);
    }

    #[test]
    fn test_ensure_created_at_is_sticky() {
        let mut record = TaskRecord::new("t");
        record.ensure_created_at();
        let first = record.created_at;
        assert!(first.is_some());
        record.ensure_created_at();
        assert_eq!(record.created_at, first);
    }
}
