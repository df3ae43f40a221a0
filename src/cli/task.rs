//! Mutating commands: add, edit, delete, move.

use std::path::PathBuf;

use serde::Serialize;

use crate::cli::{note_commit, open_session};
use crate::dashboard::DragOutcome;
use crate::error::{Error, Result};
use crate::model::Task;
use crate::output::{Output, Report};
use crate::store::Commit;
use crate::validate::{TaskDraft, TaskEdit};

pub struct AddOptions {
    pub column: String,
    pub title: String,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub assignee: Option<String>,
    pub description: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub assignee: Option<String>,
    pub description: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct DeleteOptions {
    pub id: String,
    pub yes: bool,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct MoveOptions {
    pub id: String,
    pub to: String,
    pub index: Option<usize>,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct AddReport<'a> {
    column: &'a str,
    task: &'a Task,
    persisted: bool,
}

#[derive(Serialize)]
struct ChangeReport<'a> {
    id: &'a str,
    applied: bool,
    persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    task: Option<&'a Task>,
}

#[derive(Serialize)]
struct MoveReport<'a> {
    id: &'a str,
    moved: bool,
    persisted: bool,
    column: &'a str,
    index: usize,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut session = open_session(options.data_dir)?;
    let draft = TaskDraft {
        title: options.title,
        priority: options.priority,
        due_date: options.due,
        description: options.description,
        assignee: options.assignee,
    };

    let (task, commit) = session.dashboard.add_task(&options.column, &draft)?;

    let mut report = Report::new(format!("taskboard add: {}", task.title));
    report.field("id", task.id.clone());
    report.field("column", options.column.clone());
    report.field("status", task.status.label());
    note_commit(&mut report, &commit);

    let data = AddReport {
        column: &options.column,
        task: &task,
        persisted: commit.persisted(),
    };
    Output::new(options.json, options.quiet).success("add", &data, &report)
}

pub fn run_edit(options: EditOptions) -> Result<()> {
    let edit = TaskEdit {
        title: options.title,
        status: options.status,
        priority: options.priority,
        due_date: options.due,
        description: options.description,
        assignee: options.assignee,
    };
    if edit.is_empty() {
        return Err(Error::InvalidArgument(
            "nothing to edit; pass at least one field".to_string(),
        ));
    }

    let mut session = open_session(options.data_dir)?;
    let commit = session.dashboard.edit_task(&options.id, &edit)?;
    let task = session.dashboard.board().task(&options.id);

    let mut report = change_output("edit", &options.id, &commit);
    if let Some(task) = task {
        report.field("status", task.status.label());
    }

    let data = ChangeReport {
        id: &options.id,
        applied: commit.applied,
        persisted: commit.persisted(),
        task,
    };
    Output::new(options.json, options.quiet).success("edit", &data, &report)
}

pub fn run_delete(options: DeleteOptions) -> Result<()> {
    if !options.yes {
        return Err(Error::InvalidArgument(format!(
            "refusing to delete {} without --yes",
            options.id
        )));
    }

    let mut session = open_session(options.data_dir)?;
    let commit = session.dashboard.delete_task(&options.id);

    let report = change_output("delete", &options.id, &commit);
    let data = ChangeReport {
        id: &options.id,
        applied: commit.applied,
        persisted: commit.persisted(),
        task: None,
    };
    Output::new(options.json, options.quiet).success("delete", &data, &report)
}

pub fn run_move(options: MoveOptions) -> Result<()> {
    let mut session = open_session(options.data_dir)?;
    let outcome = session
        .dashboard
        .move_to(&options.id, &options.to, options.index)?;
    let (column, index) = session
        .dashboard
        .locate(&options.id)
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    let (moved, persisted, mut report) = match &outcome {
        DragOutcome::NoOp => (
            false,
            true,
            Report::new(format!("taskboard move: no change for {}", options.id)),
        ),
        DragOutcome::Moved(commit) => {
            let mut report = Report::new(format!("taskboard move: {}", options.id));
            note_commit(&mut report, commit);
            (true, commit.persisted(), report)
        }
    };
    report.field("position", format!("{column}[{index}]"));

    let data = MoveReport {
        id: &options.id,
        moved,
        persisted,
        column,
        index,
    };
    Output::new(options.json, options.quiet).success("move", &data, &report)
}

fn change_output(command: &str, id: &str, commit: &Commit) -> Report {
    if !commit.applied {
        let mut report = Report::new(format!("taskboard {command}: no change"));
        report.line(format!("no task with id {id}"));
        report.hint("taskboard board");
        return report;
    }

    let mut report = Report::new(format!("taskboard {command}: {id}"));
    note_commit(&mut report, commit);
    report
}
