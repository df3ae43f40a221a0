//! Persisted task store.
//!
//! Every mutation goes through [`TaskStore::commit`]: the change is applied
//! in memory first, then the whole snapshot is handed to the
//! [`Persistence`] hook. A failed write is logged and reported on the
//! returned [`Commit`], but the in-memory state stays authoritative.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::model::{ColumnDef, Snapshot, Status, Task, TaskPatch};
use crate::storage::Persistence;

/// Outcome of one mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Commit {
    /// False when the mutation named a task that does not exist.
    pub applied: bool,
    /// Set when the state changed but could not be written.
    pub persist_error: Option<String>,
}

impl Commit {
    fn skipped() -> Self {
        Self {
            applied: false,
            persist_error: None,
        }
    }

    pub fn persisted(&self) -> bool {
        self.applied && self.persist_error.is_none()
    }
}

#[derive(Debug)]
pub struct TaskStore<P: Persistence> {
    state: Snapshot,
    persistence: P,
}

impl<P: Persistence> TaskStore<P> {
    /// Wrap an in-memory snapshot without touching storage.
    pub fn new(persistence: P, state: Snapshot) -> Self {
        Self { state, persistence }
    }

    /// Hydrate from storage, using `fallback` when nothing usable is stored.
    pub fn open(persistence: P, fallback: Snapshot) -> Self {
        let state = match persistence.load() {
            Ok(Some(snapshot)) => {
                debug!(tasks = snapshot.tasks.len(), "hydrated store");
                snapshot
            }
            Ok(None) => {
                debug!("no stored snapshot; using fallback");
                fallback
            }
            Err(err) => {
                warn!(error = %err, "could not read stored snapshot; using fallback");
                fallback
            }
        };
        Self { state, persistence }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.state.columns
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.state.task(id)
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// The blob that `save` writes.
    pub fn serialize(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.state)?)
    }

    /// Replace the whole state. Does not write.
    pub fn hydrate(&mut self, snapshot: Snapshot) {
        debug!(tasks = snapshot.tasks.len(), "hydrate");
        self.state = snapshot;
    }

    /// Append a fully formed task.
    pub fn add(&mut self, task: Task) -> Result<Commit> {
        if self.state.task(&task.id).is_some() {
            return Err(Error::InvalidArgument(format!(
                "task id {} already exists",
                task.id
            )));
        }
        Ok(self.commit("add", move |state| {
            state.tasks.push(task);
            true
        }))
    }

    /// Merge `patch` into the task with `id`. Unknown ids are ignored.
    ///
    /// A status change drops the task from every saved column order, so it
    /// lands in task-list order wherever it ends up.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> Commit {
        self.commit("update", |state| {
            let Some(task) = state.tasks.iter_mut().find(|task| task.id == id) else {
                return false;
            };
            let previous = task.status;
            patch.apply_to(task);
            if task.status != previous {
                for column in &mut state.columns {
                    column.task_ids.retain(|task_id| task_id != id);
                }
            }
            true
        })
    }

    /// Remove the task with `id`. Unknown ids are ignored.
    pub fn delete(&mut self, id: &str) -> Commit {
        self.commit("delete", |state| {
            let before = state.tasks.len();
            state.tasks.retain(|task| task.id != id);
            if state.tasks.len() == before {
                return false;
            }
            for column in &mut state.columns {
                column.task_ids.retain(|task_id| task_id != id);
            }
            true
        })
    }

    /// Record a committed drag: the moved task's status and the column
    /// orderings, in a single write.
    pub fn move_task(&mut self, id: &str, status: Status, layout: &[(String, Vec<String>)]) -> Commit {
        self.commit("move", |state| {
            let Some(task) = state.tasks.iter_mut().find(|task| task.id == id) else {
                return false;
            };
            task.status = status;
            for column in &mut state.columns {
                if let Some((_, ids)) = layout.iter().find(|(column_id, _)| *column_id == column.id) {
                    column.task_ids = ids.clone();
                }
            }
            true
        })
    }

    fn commit<F>(&mut self, op: &str, apply: F) -> Commit
    where
        F: FnOnce(&mut Snapshot) -> bool,
    {
        if !apply(&mut self.state) {
            debug!(op, "no matching task; nothing to commit");
            return Commit::skipped();
        }

        let persist_error = match self.persistence.save(&self.state) {
            Ok(()) => {
                debug!(op, tasks = self.state.tasks.len(), "committed");
                None
            }
            Err(err) => {
                warn!(op, error = %err, "could not persist snapshot; keeping in-memory state");
                Some(err.to_string())
            }
        };

        Commit {
            applied: true,
            persist_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;
    use crate::people;
    use crate::seed::default_snapshot;
    use crate::storage::MemoryStorage;

    fn seeded() -> (TaskStore<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = TaskStore::new(storage.clone(), default_snapshot());
        (store, storage)
    }

    fn sample_task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            title: "Write spec".to_string(),
            status: Status::Todo,
            priority: Priority::Low,
            due_date: "2024-12-01T00:00:00Z".parse().unwrap(),
            description: String::new(),
            assignee: people::resolve("1").unwrap(),
        }
    }

    #[test]
    fn add_appends_and_persists() {
        let (mut store, storage) = seeded();
        let commit = store.add(sample_task("new-1")).unwrap();

        assert!(commit.persisted());
        assert_eq!(store.tasks().last().unwrap().id, "new-1");
        assert_eq!(storage.writes(), 1);
    }

    #[test]
    fn add_rejects_duplicate_ids() {
        let (mut store, storage) = seeded();
        let err = store.add(sample_task("a1b2c3d4")).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(store.tasks().len(), 6);
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn update_merges_fields() {
        let (mut store, _) = seeded();
        let patch = TaskPatch {
            title: Some("Landing v2".to_string()),
            priority: Some(Priority::Low),
            ..TaskPatch::default()
        };
        assert!(store.update("a1b2c3d4", &patch).applied);

        let task = store.get("a1b2c3d4").unwrap();
        assert_eq!(task.title, "Landing v2");
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.status, Status::InProgress);
    }

    #[test]
    fn lookup_misses_are_silent_and_do_not_write() {
        let (mut store, storage) = seeded();
        let before = store.snapshot().clone();

        assert!(!store.update("nope", &TaskPatch::status(Status::Completed)).applied);
        assert!(!store.delete("nope").applied);
        assert!(!store.move_task("nope", Status::Todo, &[]).applied);

        assert_eq!(store.snapshot(), &before);
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn delete_strips_layout_hint() {
        let (mut store, _) = seeded();
        let layout = vec![(
            "todo".to_string(),
            vec!["q7r8s9t0".to_string(), "e5f6g7h8".to_string()],
        )];
        let _ = store.move_task("q7r8s9t0", Status::Todo, &layout);

        assert!(store.delete("q7r8s9t0").applied);
        assert!(store.get("q7r8s9t0").is_none());
        assert_eq!(store.snapshot().column("todo").unwrap().task_ids, vec!["e5f6g7h8"]);
    }

    #[test]
    fn status_change_strips_layout_hint() {
        let (mut store, _) = seeded();
        let layout = vec![(
            "todo".to_string(),
            vec![
                "u1v2w3x4".to_string(),
                "e5f6g7h8".to_string(),
                "q7r8s9t0".to_string(),
            ],
        )];
        let _ = store.move_task("u1v2w3x4", Status::Todo, &layout);

        let _ = store.update("u1v2w3x4", &TaskPatch::status(Status::Completed));
        assert_eq!(
            store.snapshot().column("todo").unwrap().task_ids,
            vec!["e5f6g7h8", "q7r8s9t0"]
        );

        // Same status keeps the hint.
        let _ = store.update("e5f6g7h8", &TaskPatch::status(Status::Todo));
        assert_eq!(
            store.snapshot().column("todo").unwrap().task_ids,
            vec!["e5f6g7h8", "q7r8s9t0"]
        );
    }

    #[test]
    fn failed_write_keeps_memory_state() {
        let (mut store, storage) = seeded();
        storage.set_fail_writes(true);

        let commit = store.delete("a1b2c3d4");
        assert!(commit.applied);
        assert!(commit.persist_error.is_some());
        assert!(!commit.persisted());
        assert!(store.get("a1b2c3d4").is_none());
        assert!(storage.blob().is_none());
    }

    #[test]
    fn open_falls_back_on_missing_or_corrupt_blob() {
        let store = TaskStore::open(MemoryStorage::new(), default_snapshot());
        assert_eq!(store.tasks().len(), 6);

        let store = TaskStore::open(MemoryStorage::with_blob("{oops"), Snapshot::default());
        assert!(store.tasks().is_empty());
        assert_eq!(store.columns().len(), 3);
    }

    #[test]
    fn hydrate_of_serialized_state_round_trips() {
        let (mut store, _) = seeded();
        let _ = store.add(sample_task("new-1")).unwrap();
        let _ = store.update("e5f6g7h8", &TaskPatch::status(Status::Completed));
        let _ = store.delete("i9j0k1l2");

        let blob = store.serialize().unwrap();
        let mut restored = TaskStore::new(MemoryStorage::new(), Snapshot::default());
        restored.hydrate(serde_json::from_str(&blob).unwrap());

        assert_eq!(restored.snapshot(), store.snapshot());
    }
}
