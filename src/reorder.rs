//! Drag-and-drop reordering.
//!
//! A completed drag names the task, where it was picked up and where it was
//! dropped. [`reorder`] computes the resulting board in one step: column
//! membership, in-column order and the moved task's status change together,
//! so no caller can observe a task whose status disagrees with its column.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{Error, Result};
use crate::model::Status;

/// A position on the board: a column and an index within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropLocation {
    pub column_id: String,
    pub index: usize,
}

impl DropLocation {
    pub fn new(column_id: impl Into<String>, index: usize) -> Self {
        Self {
            column_id: column_id.into(),
            index,
        }
    }
}

/// A drag completion event. `destination` is `None` when the drag was
/// abandoned outside any column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragResult {
    pub task_id: String,
    pub source: DropLocation,
    pub destination: Option<DropLocation>,
}

/// A drag that changed the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub board: Board,
    pub task_id: String,
    /// Status of the destination column, now carried by the task.
    pub status: Status,
    pub status_changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reorder {
    NoOp,
    Moved(Move),
}

/// Apply a drag to `board`, returning the new board rather than mutating.
///
/// Same-column moves interpret the destination index against the list with
/// the task already removed, so moving index 2 to 0 in `[a,b,c,d]` gives
/// `[c,a,b,d]`; an index equal to the column length still means the tail.
/// Cross-column moves insert into the untouched destination list. Indices
/// past the column length, or a task id that is not at the source index,
/// are rejected with [`Error::InvalidMove`].
pub fn reorder(board: &Board, drag: &DragResult) -> Result<Reorder> {
    let Some(destination) = drag.destination.as_ref() else {
        return Ok(Reorder::NoOp);
    };
    if drag.source == *destination {
        return Ok(Reorder::NoOp);
    }

    let source_pos = column_position(board, &drag.source.column_id)?;
    let dest_pos = column_position(board, &destination.column_id)?;

    let source_ids = &board.columns()[source_pos].task_ids;
    match source_ids.get(drag.source.index) {
        Some(id) if *id == drag.task_id => {}
        Some(id) => {
            return Err(Error::InvalidMove(format!(
                "task {} is not at {}[{}] (found {})",
                drag.task_id, drag.source.column_id, drag.source.index, id
            )))
        }
        None => {
            return Err(Error::InvalidMove(format!(
                "source index {} out of range for column {} (len {})",
                drag.source.index,
                drag.source.column_id,
                source_ids.len()
            )))
        }
    }

    let previous_status = board
        .task(&drag.task_id)
        .map(|task| task.status)
        .ok_or_else(|| Error::TaskNotFound(drag.task_id.clone()))?;

    let (mut columns, mut tasks) = board.clone().into_parts();
    let status = columns[dest_pos].status;

    // Bounds are checked against the column as the user saw it.
    let visible_len = columns[dest_pos].task_ids.len();
    if destination.index > visible_len {
        return Err(Error::InvalidMove(format!(
            "destination index {} out of range for column {} (len {})",
            destination.index, destination.column_id, visible_len
        )));
    }

    let moved = columns[source_pos].task_ids.remove(drag.source.index);
    let dest_ids = &mut columns[dest_pos].task_ids;
    // Within one column, the old length is the tail once the task is out.
    let index = destination.index.min(dest_ids.len());
    dest_ids.insert(index, moved);

    if let Some(task) = tasks.get_mut(&drag.task_id) {
        task.status = status;
    }

    Ok(Reorder::Moved(Move {
        board: Board::from_parts(columns, tasks),
        task_id: drag.task_id.clone(),
        status,
        status_changed: previous_status != status,
    }))
}

fn column_position(board: &Board, column_id: &str) -> Result<usize> {
    board
        .columns()
        .iter()
        .position(|column| column.id == column_id)
        .ok_or_else(|| Error::ColumnNotFound(column_id.to_string()))
}
