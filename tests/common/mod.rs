//! Shared test infrastructure for integration tests.
//!
//! Provides TestEnv helper for consistent test setup/teardown.

#![allow(dead_code)]

use chrono::Duration;
use tempfile::TempDir;
use todo_cli::{FileStore, Status, Task, TaskPatch, TaskStore};

/// Test environment with a file-backed store in a temp directory.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub store: FileStore,
}

impl TestEnv {
    /// Create a new test environment with an empty persisted store.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store =
            FileStore::open(temp_dir.path().join("tasks.json")).expect("Failed to open store");
        Self { temp_dir, store }
    }

    /// Open a second store instance over the same backing file, simulating
    /// a process restart.
    pub fn reopen(&self) -> FileStore {
        FileStore::open(self.store.path()).expect("Failed to reopen store")
    }

    /// Add a task with defaults and return a copy of what was stored.
    pub fn add_task(&mut self, title: &str) -> Task {
        let task = Task::new(title);
        let copy = task.clone();
        self.store.add(task).expect("Failed to add task");
        copy
    }

    /// Add a task after letting the caller adjust its fields.
    pub fn add_task_with(&mut self, title: &str, adjust: impl FnOnce(&mut Task)) -> Task {
        let mut task = Task::new(title);
        adjust(&mut task);
        let copy = task.clone();
        self.store.add(task).expect("Failed to add task");
        copy
    }

    /// Add `count` tasks with strictly increasing creation times and the
    /// given statuses, titled "Task 0".."Task n".
    pub fn add_sequence(&mut self, statuses: &[Status]) -> Vec<Task> {
        let base = Task::new("probe").created_at;
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                self.add_task_with(&format!("Task {}", i), |t| {
                    t.status = *status;
                    t.created_at = base + Duration::seconds(i as i64);
                })
            })
            .collect()
    }

    /// Mark a task as completed.
    pub fn complete(&mut self, id: &str) -> Task {
        self.store
            .update(id, TaskPatch::new().status(Status::Completed))
            .expect("Failed to complete task")
    }

    /// Total task count.
    pub fn total_count(&self) -> usize {
        self.store.list().len()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
