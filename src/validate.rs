//! Form boundary: raw create/edit input in, well-formed tasks out.
//!
//! Nothing here touches the store. Every rejected field is collected so the
//! caller can report them all at once.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::model::{Assignee, Priority, Status, Task, TaskPatch};
use crate::people;

pub const MIN_TITLE_LEN: usize = 2;

/// Raw input of the create form.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
}

/// Raw input of the edit form; absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub description: Option<String>,
    pub assignee: Option<String>,
}

impl TaskEdit {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.description.is_none()
            && self.assignee.is_none()
    }
}

/// Build a new task with a fresh id in the given status.
pub fn validate_draft(draft: &TaskDraft, status: Status) -> Result<Task, ValidationError> {
    let mut errors = ValidationError::default();

    let title = check_title(&draft.title, &mut errors);
    let priority = match draft.priority.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => check_priority(raw, &mut errors),
        _ => {
            errors.push("priority", "Priority must be selected");
            None
        }
    };
    let due_date = match draft.due_date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => check_due_date(raw, &mut errors),
        _ => {
            errors.push("dueDate", "A due date is required.");
            None
        }
    };
    let assignee = match draft.assignee.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => check_assignee(raw, &mut errors),
        _ => {
            errors.push("assignee", "Please select an assignee.");
            None
        }
    };

    match (title, priority, due_date, assignee) {
        (Some(title), Some(priority), Some(due_date), Some(assignee)) if errors.is_empty() => {
            Ok(Task {
                id: Uuid::new_v4().to_string(),
                title,
                status,
                priority,
                due_date,
                description: draft.description.clone().unwrap_or_default(),
                assignee,
            })
        }
        _ => Err(errors),
    }
}

/// Turn an edit into a patch, rejecting any present-but-invalid field.
pub fn validate_edit(edit: &TaskEdit) -> Result<TaskPatch, ValidationError> {
    let mut errors = ValidationError::default();

    let patch = TaskPatch {
        title: edit
            .title
            .as_deref()
            .and_then(|raw| check_title(raw, &mut errors)),
        status: edit.status.as_deref().and_then(|raw| match raw.parse::<Status>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push("status", format!("Unknown status '{}'", raw.trim()));
                None
            }
        }),
        priority: edit
            .priority
            .as_deref()
            .and_then(|raw| check_priority(raw, &mut errors)),
        due_date: edit
            .due_date
            .as_deref()
            .and_then(|raw| check_due_date(raw, &mut errors)),
        description: edit.description.clone(),
        assignee: edit
            .assignee
            .as_deref()
            .and_then(|raw| check_assignee(raw, &mut errors)),
    };

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn check_title(raw: &str, errors: &mut ValidationError) -> Option<String> {
    let title = raw.trim();
    if title.chars().count() < MIN_TITLE_LEN {
        errors.push("title", "Title must be at least 2 characters.");
        return None;
    }
    Some(title.to_string())
}

fn check_priority(raw: &str, errors: &mut ValidationError) -> Option<Priority> {
    match raw.parse::<Priority>() {
        Ok(priority) => Some(priority),
        Err(_) => {
            errors.push("priority", format!("Unknown priority '{}'", raw.trim()));
            None
        }
    }
}

fn check_due_date(raw: &str, errors: &mut ValidationError) -> Option<DateTime<Utc>> {
    let parsed = parse_due_date(raw);
    if parsed.is_none() {
        errors.push(
            "dueDate",
            format!("Invalid date '{}' (expected YYYY-MM-DD or RFC 3339)", raw.trim()),
        );
    }
    parsed
}

fn check_assignee(raw: &str, errors: &mut ValidationError) -> Option<Assignee> {
    let assignee = people::resolve(raw);
    if assignee.is_none() {
        errors.push("assignee", format!("Unknown assignee '{}'", raw.trim()));
    }
    assignee
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TaskDraft {
        TaskDraft {
            title: "Write spec".to_string(),
            priority: Some("Low".to_string()),
            due_date: Some("2024-12-01".to_string()),
            description: None,
            assignee: Some("1".to_string()),
        }
    }

    #[test]
    fn valid_draft_builds_task() {
        let task = validate_draft(&draft(), Status::Todo).unwrap();
        assert_eq!(task.title, "Write spec");
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.assignee.name, "John Doe");
        assert_eq!(task.description, "");
        assert_eq!(task.due_date.to_rfc3339(), "2024-12-01T00:00:00+00:00");
        assert!(Uuid::parse_str(&task.id).is_ok());
    }

    #[test]
    fn fresh_ids_per_draft() {
        let first = validate_draft(&draft(), Status::Todo).unwrap();
        let second = validate_draft(&draft(), Status::Todo).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn every_missing_field_is_reported() {
        let err = validate_draft(&TaskDraft::default(), Status::Todo).unwrap_err();
        assert_eq!(err.fields.len(), 4);
        assert_eq!(
            err.message_for("title"),
            Some("Title must be at least 2 characters.")
        );
        assert_eq!(err.message_for("priority"), Some("Priority must be selected"));
        assert_eq!(err.message_for("dueDate"), Some("A due date is required."));
        assert_eq!(err.message_for("assignee"), Some("Please select an assignee."));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad = TaskDraft {
            title: " x ".to_string(),
            priority: Some("Urgent".to_string()),
            due_date: Some("next tuesday".to_string()),
            description: Some("still fine".to_string()),
            assignee: Some("42".to_string()),
        };
        let err = validate_draft(&bad, Status::Todo).unwrap_err();
        assert!(err.message_for("title").is_some());
        assert!(err.message_for("priority").unwrap().contains("Urgent"));
        assert!(err.message_for("dueDate").unwrap().contains("next tuesday"));
        assert!(err.message_for("assignee").unwrap().contains("42"));
    }

    #[test]
    fn edit_builds_partial_patch() {
        let edit = TaskEdit {
            status: Some("completed".to_string()),
            assignee: Some("Bob Johnson".to_string()),
            ..TaskEdit::default()
        };
        let patch = validate_edit(&edit).unwrap();
        assert_eq!(patch.status, Some(Status::Completed));
        assert_eq!(patch.assignee.unwrap().id, "3");
        assert!(patch.title.is_none());
        assert!(patch.priority.is_none());
    }

    #[test]
    fn edit_rejects_bad_fields() {
        let edit = TaskEdit {
            title: Some("".to_string()),
            status: Some("archived".to_string()),
            ..TaskEdit::default()
        };
        let err = validate_edit(&edit).unwrap_err();
        assert!(err.message_for("title").is_some());
        assert!(err.message_for("status").unwrap().contains("archived"));
    }

    #[test]
    fn due_date_accepts_rfc3339() {
        let parsed = parse_due_date("2024-11-25T18:30:00.000Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2024-11-25T18:30:00+00:00");
        assert!(parse_due_date("2024-13-40").is_none());
    }
}
