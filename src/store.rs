//! Storage engine semantics and the volatile (in-memory) variant.
//!
//! All collection invariants live in [`TaskMap`]; both store variants wrap
//! it, so they cannot drift apart.

use crate::types::{Filter, Status, Task, TaskPatch, now_second};
use eyre::Result;
use std::collections::HashMap;

/// Errors that can occur during store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Referenced task id does not exist.
    NotFound(String),
    /// `add` called with an id already present. Not reachable through normal
    /// flows (ids are generated) but enforced for reconstructed records.
    DuplicateId(String),
    /// Validation error.
    Validation(crate::types::ValidationError),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "task not found: {}", id),
            StoreError::DuplicateId(id) => write!(f, "task already exists: {}", id),
            StoreError::Validation(e) => write!(f, "validation error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

/// The operation contract shared by both store variants.
///
/// The persisted variant serializes the whole collection after every
/// mutation; the volatile variant loses state on drop. Semantics are
/// otherwise identical.
pub trait TaskStore {
    /// Register a task. Fails on empty title or duplicate id.
    fn add(&mut self, task: Task) -> Result<()>;

    /// Get a task by id.
    fn get(&self, id: &str) -> Result<&Task>;

    /// Apply a partial update. Only supplied fields change; `modified_at`
    /// is stamped iff at least one field was applied.
    fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task>;

    /// Remove a task. Removal is immediate and permanent.
    fn delete(&mut self, id: &str) -> Result<()>;

    /// All tasks: pending before completed, then ascending creation time.
    fn list(&self) -> Vec<Task>;

    /// Tasks matching the filter, ordered as [`TaskStore::list`].
    fn search(&self, filter: &Filter) -> Vec<Task>;
}

/// The authoritative task collection, keyed by id.
#[derive(Debug, Default)]
pub(crate) struct TaskMap {
    tasks: HashMap<String, Task>,
}

impl TaskMap {
    pub(crate) fn add(&mut self, task: Task) -> Result<()> {
        task.validate()
            .map_err(|e| eyre::eyre!(StoreError::Validation(e)))?;
        if self.tasks.contains_key(&task.id) {
            return Err(eyre::eyre!(StoreError::DuplicateId(task.id)));
        }
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    pub(crate) fn get(&self, id: &str) -> Result<&Task> {
        self.tasks
            .get(id)
            .ok_or_else(|| eyre::eyre!(StoreError::NotFound(id.to_string())))
    }

    pub(crate) fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| eyre::eyre!(StoreError::NotFound(id.to_string())))?;

        let applied = !patch.is_empty();
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(priority) = patch.priority {
            task.priority = Some(priority);
        }
        if let Some(tags) = patch.tags {
            task.tags = tags;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        if applied {
            task.modified_at = Some(now_second());
        }

        Ok(task.clone())
    }

    pub(crate) fn remove(&mut self, id: &str) -> Result<()> {
        self.tasks
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| eyre::eyre!(StoreError::NotFound(id.to_string())))
    }

    pub(crate) fn list(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.tasks.values().cloned().collect();
        sort_tasks(&mut tasks);
        tasks
    }

    pub(crate) fn search(&self, filter: &Filter) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|t| filter.matches(t))
            .cloned()
            .collect();
        sort_tasks(&mut tasks);
        tasks
    }

    /// Insert a record reconstructed from persisted storage, keyed by its
    /// own stored id. Bypasses validation; `add` is the caller-facing path.
    pub(crate) fn insert_loaded(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }
}

/// The only ordering guarantee the store makes: incomplete tasks first,
/// then ascending creation time. Id breaks same-second ties so iteration
/// order of the backing map never shows through.
fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        (a.status == Status::Completed, a.created_at, &a.id).cmp(&(
            b.status == Status::Completed,
            b.created_at,
            &b.id,
        ))
    });
}

/// The volatile store variant. State lives only in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: TaskMap,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for MemoryStore {
    fn add(&mut self, task: Task) -> Result<()> {
        self.tasks.add(task)
    }

    fn get(&self, id: &str) -> Result<&Task> {
        self.tasks.get(id)
    }

    fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        self.tasks.update(id, patch)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.tasks.remove(id)
    }

    fn list(&self) -> Vec<Task> {
        self.tasks.list()
    }

    fn search(&self, filter: &Filter) -> Vec<Task> {
        self.tasks.search(filter)
    }
}
