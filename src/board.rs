//! Board projection.
//!
//! The store keeps tasks as a flat list; the board view needs them grouped
//! by column in a stable order. [`project`] derives that view without
//! touching its inputs, and [`Board::apply_layout`] restores the in-column
//! order recorded by the last committed drag.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::{ColumnDef, Status, Task};

/// One lane of the projected board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    pub id: String,
    pub title: String,
    pub color: String,
    pub status: Status,
    pub task_ids: Vec<String>,
}

/// Denormalized view: ordered task ids per column plus an id lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    columns: Vec<BoardColumn>,
    tasks: HashMap<String, Task>,
}

/// Derive the board from the task list and column definitions.
///
/// Tasks land in the column whose status matches theirs, keeping their
/// relative order from `tasks`. A task whose status matches no column is
/// left out of every column but stays in the lookup.
pub fn project(tasks: &[Task], columns: &[ColumnDef]) -> Board {
    let columns = columns
        .iter()
        .map(|def| BoardColumn {
            id: def.id.clone(),
            title: def.title.clone(),
            color: def.color.clone(),
            status: def.status,
            task_ids: tasks
                .iter()
                .filter(|task| def.status.matches(task.status.label()))
                .map(|task| task.id.clone())
                .collect(),
        })
        .collect();

    let tasks = tasks
        .iter()
        .map(|task| (task.id.clone(), task.clone()))
        .collect();

    Board { columns, tasks }
}

impl Board {
    pub(crate) fn from_parts(columns: Vec<BoardColumn>, tasks: HashMap<String, Task>) -> Self {
        Self { columns, tasks }
    }

    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    pub fn column(&self, id: &str) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn tasks(&self) -> &HashMap<String, Task> {
        &self.tasks
    }

    /// Tasks of a column in board order.
    pub fn column_tasks(&self, column_id: &str) -> Vec<&Task> {
        self.column(column_id)
            .map(|column| {
                column
                    .task_ids
                    .iter()
                    .filter_map(|id| self.tasks.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Column id and index of a task on the board.
    pub fn locate(&self, task_id: &str) -> Option<(&str, usize)> {
        self.columns.iter().find_map(|column| {
            column
                .task_ids
                .iter()
                .position(|id| id == task_id)
                .map(|index| (column.id.as_str(), index))
        })
    }

    /// Reorder each column by the persisted `task_ids` of its definition.
    ///
    /// Ids named in the hint come first, in hint order; the rest keep their
    /// projected order. Hint entries for tasks that are gone or no longer
    /// in this column are skipped, so a stale hint never moves a task
    /// between columns.
    pub fn apply_layout(&mut self, defs: &[ColumnDef]) {
        for column in &mut self.columns {
            let Some(def) = defs.iter().find(|def| def.id == column.id) else {
                continue;
            };
            if def.task_ids.is_empty() {
                continue;
            }

            let present: HashSet<&String> = column.task_ids.iter().collect();
            let mut seen = HashSet::new();
            let mut ordered: Vec<String> = def
                .task_ids
                .iter()
                .filter(|id| present.contains(id) && seen.insert((*id).clone()))
                .cloned()
                .collect();
            ordered.extend(
                column
                    .task_ids
                    .iter()
                    .filter(|id| !seen.contains(*id))
                    .cloned(),
            );
            column.task_ids = ordered;
        }
    }

    /// The current orderings, keyed by column id, for persisting as a hint.
    pub fn layout(&self) -> Vec<(String, Vec<String>)> {
        self.columns
            .iter()
            .map(|column| (column.id.clone(), column.task_ids.clone()))
            .collect()
    }

    pub(crate) fn into_parts(self) -> (Vec<BoardColumn>, HashMap<String, Task>) {
        (self.columns, self.tasks)
    }
}
