//! The board session: a store plus its projected board.
//!
//! The dashboard is the only writer of both. Store mutations re-project the
//! board; drags compute the new board first and then push the status change
//! and the resulting layout through the store as a single commit.

use tracing::debug;

use crate::board::{project, Board};
use crate::error::{Error, Result};
use crate::model::{Snapshot, Task};
use crate::reorder::{reorder, DragResult, DropLocation, Reorder};
use crate::storage::Persistence;
use crate::store::{Commit, TaskStore};
use crate::validate::{validate_draft, validate_edit, TaskDraft, TaskEdit};

/// What a drag did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    NoOp,
    Moved(Commit),
}

#[derive(Debug)]
pub struct Dashboard<P: Persistence> {
    store: TaskStore<P>,
    board: Board,
}

impl<P: Persistence> Dashboard<P> {
    /// Hydrate from `persistence`, falling back to `fallback`.
    pub fn open(persistence: P, fallback: Snapshot) -> Self {
        Self::from_store(TaskStore::open(persistence, fallback))
    }

    pub fn from_store(store: TaskStore<P>) -> Self {
        let mut dashboard = Self {
            store,
            board: Board::default(),
        };
        dashboard.reproject();
        dashboard
    }

    pub fn store(&self) -> &TaskStore<P> {
        &self.store
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current column and index of a task on the board.
    pub fn locate(&self, id: &str) -> Option<(&str, usize)> {
        self.board.locate(id)
    }

    /// Validate a create form and append the task to `column_id`.
    pub fn add_task(&mut self, column_id: &str, draft: &TaskDraft) -> Result<(Task, Commit)> {
        let status = self
            .store
            .snapshot()
            .column(column_id)
            .map(|column| column.status)
            .ok_or_else(|| Error::ColumnNotFound(column_id.to_string()))?;

        let task = validate_draft(draft, status)?;
        let commit = self.store.add(task.clone())?;
        self.reproject();
        debug!(task = %task.id, column = column_id, "task added");
        Ok((task, commit))
    }

    /// Validate an edit and merge it. Unknown ids are a silent no-op.
    pub fn edit_task(&mut self, id: &str, edit: &TaskEdit) -> Result<Commit> {
        let patch = validate_edit(edit)?;
        let commit = self.store.update(id, &patch);
        if commit.applied {
            self.reproject();
        }
        Ok(commit)
    }

    /// Delete a task. Unknown ids are a silent no-op.
    pub fn delete_task(&mut self, id: &str) -> Commit {
        let commit = self.store.delete(id);
        if commit.applied {
            self.reproject();
        }
        commit
    }

    /// Apply a completed drag. Abandoned or in-place drops write nothing.
    pub fn drag_end(&mut self, drag: &DragResult) -> Result<DragOutcome> {
        let mv = match reorder(&self.board, drag)? {
            Reorder::NoOp => return Ok(DragOutcome::NoOp),
            Reorder::Moved(mv) => mv,
        };

        let commit = self
            .store
            .move_task(&mv.task_id, mv.status, &mv.board.layout());
        if commit.applied {
            self.board = mv.board;
        }
        debug!(task = %mv.task_id, status = %mv.status, "drag committed");
        Ok(DragOutcome::Moved(commit))
    }

    /// Drag a task from wherever it is now to `column_id[index]`.
    /// `index` defaults to the end of the destination column.
    pub fn move_to(&mut self, id: &str, column_id: &str, index: Option<usize>) -> Result<DragOutcome> {
        let drag = self.drag_for(id, column_id, index)?;
        self.drag_end(&drag)
    }

    /// Build the drag event that moves `id` to `column_id[index]`.
    pub fn drag_for(&self, id: &str, column_id: &str, index: Option<usize>) -> Result<DragResult> {
        let (source_column, source_index) = self
            .locate(id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        let dest_len = self
            .board
            .column(column_id)
            .map(|column| column.task_ids.len())
            .ok_or_else(|| Error::ColumnNotFound(column_id.to_string()))?;

        // Within one column the task's own slot disappears on pickup.
        let last_slot = if source_column == column_id {
            dest_len - 1
        } else {
            dest_len
        };

        Ok(DragResult {
            task_id: id.to_string(),
            source: DropLocation::new(source_column, source_index),
            destination: Some(DropLocation::new(
                column_id,
                index.unwrap_or(last_slot),
            )),
        })
    }

    /// Replace the whole state, e.g. to reset to the seed board, and write it.
    pub fn reset(&mut self, snapshot: Snapshot) -> Result<()> {
        // A hydrate, not a mutation: no task lookup, and a failed write is fatal.
        self.store.hydrate(snapshot);
        self.store.persistence().save(self.store.snapshot())?;
        self.reproject();
        Ok(())
    }

    fn reproject(&mut self) {
        let snapshot = self.store.snapshot();
        let mut board = project(&snapshot.tasks, &snapshot.columns);
        board.apply_layout(&snapshot.columns);
        self.board = board;
    }
}
