//! Board data model.
//!
//! The persisted side of the board is normalized: a flat task list where each
//! task carries its own [`Status`], plus the fixed column definitions. The
//! per-column orderings live in [`crate::board::Board`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Column ids of the three standard lanes.
pub const TODO_COLUMN: &str = "todo";
pub const IN_PROGRESS_COLUMN: &str = "inProgress";
pub const COMPLETED_COLUMN: &str = "completed";

/// Strip case and separators so "In Progress", "in_progress" and
/// "IN-PROGRESS" compare equal.
fn fold(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    Todo,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Completed];

    pub fn label(self) -> &'static str {
        match self {
            Status::Todo => "Todo",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Status::Todo => "#ffad0d",
            Status::InProgress => "#0c6fbf",
            Status::Completed => "#2a7e2e",
        }
    }

    /// Case-insensitive comparison against a raw status label.
    pub fn matches(self, raw: &str) -> bool {
        fold(raw) == fold(self.label())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        Status::ALL
            .into_iter()
            .find(|status| status.matches(raw))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "invalid status '{}' (expected Todo|In Progress|Completed)",
                    raw.trim()
                ))
            })
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Priority::Low => "gray",
            Priority::Medium => "amber",
            Priority::High => "red",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let folded = fold(raw);
        Priority::ALL
            .into_iter()
            .find(|priority| fold(priority.label()) == folded)
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "invalid priority '{}' (expected Low|Medium|High)",
                    raw.trim()
                ))
            })
    }
}

impl Serialize for Priority {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A person from the static directory, embedded by value in each task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: Status,
    pub priority: Priority,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    pub assignee: Assignee,
}

/// Partial update merged into an existing task. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub assignee: Option<Assignee>,
}

impl TaskPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.description.is_none()
            && self.assignee.is_none()
    }

    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(assignee) = &self.assignee {
            task.assignee = assignee.clone();
        }
    }
}

/// A fixed board lane. `task_ids` is the last committed drag order for the
/// lane; the projection treats it as a hint only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub id: String,
    pub title: String,
    pub color: String,
    #[serde(default)]
    pub task_ids: Vec<String>,
    pub status: Status,
}

impl ColumnDef {
    pub fn new(id: &str, title: &str, color: &str, status: Status) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            color: color.to_string(),
            task_ids: Vec::new(),
            status,
        }
    }
}

/// The three standard columns, in display order.
pub fn default_columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new(TODO_COLUMN, "Todo", "border-yellow-500", Status::Todo),
        ColumnDef::new(
            IN_PROGRESS_COLUMN,
            "In Progress",
            "border-blue-500",
            Status::InProgress,
        ),
        ColumnDef::new(
            COMPLETED_COLUMN,
            "Completed",
            "border-green-500",
            Status::Completed,
        ),
    ]
}

/// The durable unit: everything the store owns, written as one blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default = "default_columns")]
    pub columns: Vec<ColumnDef>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            columns: default_columns(),
        }
    }
}

impl Snapshot {
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn column(&self, id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.id == id)
    }

    pub fn column_for_status(&self, status: Status) -> Option<&ColumnDef> {
        self.columns.iter().find(|column| column.status == status)
    }
}
