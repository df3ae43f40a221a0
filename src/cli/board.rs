//! Read-only commands: board, show, people.

use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

use crate::cli::open_session;
use crate::display;
use crate::error::{Error, Result};
use crate::model::{Assignee, Status, Task};
use crate::output::{Output, Report};
use crate::people;

pub struct BoardOptions {
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub id: String,
    pub data_dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct PeopleOptions {
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct BoardReport<'a> {
    columns: Vec<ColumnReport<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnReport<'a> {
    id: &'a str,
    title: &'a str,
    color: &'a str,
    status: Status,
    task_ids: &'a [String],
    tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
struct ShowReport<'a> {
    column: &'a str,
    index: usize,
    task: &'a Task,
}

#[derive(Serialize)]
struct PeopleReport {
    people: Vec<Assignee>,
}

pub fn run_board(options: BoardOptions) -> Result<()> {
    let session = open_session(options.data_dir)?;
    let board = session.dashboard.board();

    let data = BoardReport {
        columns: board
            .columns()
            .iter()
            .map(|column| ColumnReport {
                id: &column.id,
                title: &column.title,
                color: &column.color,
                status: column.status,
                task_ids: &column.task_ids,
                tasks: board.column_tasks(&column.id),
            })
            .collect(),
    };

    let total: usize = data.columns.iter().map(|column| column.tasks.len()).sum();
    let mut report = Report::new(format!("taskboard board: {total} task(s)"));
    for line in display::render_board(board, &session.config.display.date_format, &Utc::now()) {
        report.line(line);
    }

    Output::new(options.json, options.quiet).success("board", &data, &report)
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let session = open_session(options.data_dir)?;
    let dashboard = &session.dashboard;
    let task = dashboard
        .board()
        .task(&options.id)
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;
    let (column, index) = dashboard
        .locate(&task.id)
        .ok_or_else(|| Error::TaskNotFound(options.id.clone()))?;

    let date_format = &session.config.display.date_format;
    let mut report = Report::new(format!("taskboard show: {}", task.title));
    report.field("id", task.id.clone());
    report.field("status", task.status.label());
    report.field("priority", task.priority.label());
    report.field("assignee", task.assignee.name.clone());
    let mut due = display::format_due(&task.due_date, date_format);
    if display::shows_time_remaining(task) {
        due = format!("{due} ({})", display::time_remaining(&task.due_date, &Utc::now()));
    }
    report.field("due", due);
    report.field("position", format!("{column}[{index}]"));
    if !task.description.is_empty() {
        report.line(task.description.clone());
    }

    let data = ShowReport {
        column,
        index,
        task,
    };
    Output::new(options.json, options.quiet).success("show", &data, &report)
}

pub fn run_people(options: PeopleOptions) -> Result<()> {
    let data = PeopleReport {
        people: people::all(),
    };

    let mut report = Report::new(format!("taskboard people: {}", data.people.len()));
    for person in &data.people {
        report.field(person.id.clone(), person.name.clone());
    }

    Output::new(options.json, options.quiet).success("people", &data, &report)
}
