//! todo-cli: a small task storage and query engine.
//!
//! Tasks live in a store that enforces the collection invariants (unique
//! ids, non-empty titles, ordering and filter semantics). The store comes in
//! two interchangeable variants: [`MemoryStore`] (volatile) and
//! [`FileStore`] (persisted to a JSON file, saved on every mutation).
//!
//! # Example
//!
//! ```
//! use todo_cli::{MemoryStore, TaskStore, Task, TaskPatch, Filter, Status};
//!
//! let mut store = MemoryStore::new();
//!
//! let task = Task::new("Buy milk");
//! let id = task.id.clone();
//! store.add(task).unwrap();
//!
//! store.update(&id, TaskPatch::new().status(Status::Completed)).unwrap();
//! assert_eq!(store.get(&id).unwrap().status, Status::Completed);
//!
//! let done = store.search(&Filter::new().status(Status::Completed));
//! assert_eq!(done.len(), 1);
//! ```

mod id;
mod storage;
mod store;
mod types;

pub mod skills;

// Re-export public API
pub use storage::FileStore;
pub use store::{MemoryStore, StoreError, TaskStore};
pub use types::{Filter, Priority, Status, Task, TaskPatch, ValidationError};
