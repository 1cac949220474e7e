//! The persisted store variant: a JSON file mapping task id to record.
//!
//! Every mutation re-serializes the whole collection and overwrites the
//! backing file in place. The write is not atomic-rename based and there is
//! no file locking; concurrent external writers are out of scope for this
//! single-user tool (last writer wins).

use crate::store::{TaskMap, TaskStore};
use crate::types::{Filter, Task, TaskPatch};
use eyre::{Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage directory name under the user's home.
const STORE_DIR: &str = ".todo_cli";

/// JSON file holding the task collection.
const TASKS_FILE: &str = "tasks.json";

/// The persisted store variant. Same semantics as
/// [`MemoryStore`](crate::MemoryStore), plus a synchronous save after every
/// mutation and one load at open.
pub struct FileStore {
    path: PathBuf,
    tasks: TaskMap,
}

impl FileStore {
    /// Open the store at the default location, `~/.todo_cli/tasks.json`,
    /// creating the directory if needed.
    pub fn open_default() -> Result<Self> {
        let dir = dirs::home_dir()
            .ok_or_else(|| eyre::eyre!("could not determine home directory"))?
            .join(STORE_DIR);
        fs::create_dir_all(&dir).context("Failed to create storage directory")?;
        Self::open(dir.join(TASKS_FILE))
    }

    /// Open a store backed by the given file.
    ///
    /// A missing file starts an empty collection. An unreadable or
    /// unparseable file also starts empty, with a warning: a half-written
    /// file should not brick the tool, but the discard is made visible.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut tasks = TaskMap::default();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(raw) if raw.trim().is_empty() => {}
                Ok(raw) => match serde_json::from_str::<HashMap<String, Task>>(&raw) {
                    Ok(records) => {
                        // The record's own id field is the key; it is
                        // trusted as stored, never regenerated.
                        for task in records.into_values() {
                            tasks.insert_loaded(task);
                        }
                    }
                    Err(e) => {
                        log::warn!(
                            "discarding unparseable task file {}: {}",
                            path.display(),
                            e
                        );
                    }
                },
                Err(e) => {
                    log::warn!("failed to read task file {}: {}", path.display(), e);
                }
            }
        }

        Ok(Self { path, tasks })
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the whole collection and overwrite the backing file.
    fn save(&self) -> Result<()> {
        // BTreeMap view keeps the file ordering stable across saves
        let records: BTreeMap<&str, &Task> =
            self.tasks.iter().map(|t| (t.id.as_str(), t)).collect();
        let json = serde_json::to_string_pretty(&records).context("Failed to serialize tasks")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write task file {}", self.path.display()))?;
        Ok(())
    }
}

impl TaskStore for FileStore {
    fn add(&mut self, task: Task) -> Result<()> {
        self.tasks.add(task)?;
        // A failed save leaves the in-memory insert in place; the two views
        // re-converge on the next successful save.
        self.save()
    }

    fn get(&self, id: &str) -> Result<&Task> {
        self.tasks.get(id)
    }

    fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        let task = self.tasks.update(id, patch)?;
        self.save()?;
        Ok(task)
    }

    fn delete(&mut self, id: &str) -> Result<()> {
        self.tasks.remove(id)?;
        self.save()
    }

    fn list(&self) -> Vec<Task> {
        self.tasks.list()
    }

    fn search(&self, filter: &Filter) -> Vec<Task> {
        self.tasks.search(filter)
    }
}
