//! Agent-facing skill wrappers.
//!
//! Each skill takes a store handle plus primitive arguments and returns a
//! human-readable string, translating errors into messages instead of
//! propagating them. The store is injected by the caller; there is no shared
//! process-global instance.

use crate::store::TaskStore;
use crate::types::{Filter, Priority, Status, Task, TaskPatch};

/// Parse a comma-separated tag string into trimmed, non-empty tags.
pub fn parse_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Add a new task. Returns a confirmation message with the task id.
pub fn add_task(
    store: &mut dyn TaskStore,
    title: &str,
    description: Option<&str>,
    priority: &str,
    tags: &str,
) -> String {
    let priority = match priority.parse::<Priority>() {
        Ok(p) => p,
        Err(e) => return format!("Error adding task: {}", e),
    };

    let mut task = Task::new(title);
    task.description = description.map(String::from);
    task.priority = Some(priority);
    task.tags = parse_tags(tags);
    let id = task.id.clone();

    match store.add(task) {
        Ok(()) => format!("Task '{}' added successfully. ID: {}", title, id),
        Err(e) => format!("Error adding task: {}", e),
    }
}

/// List tasks, optionally filtered by status, priority, and a single tag.
pub fn list_tasks(
    store: &dyn TaskStore,
    status: Option<&str>,
    priority: Option<&str>,
    tag: Option<&str>,
) -> String {
    let mut filter = Filter::new();
    if let Some(s) = status {
        match s.parse::<Status>() {
            Ok(s) => filter = filter.status(s),
            Err(e) => return format!("Error listing tasks: {}", e),
        }
    }
    if let Some(p) = priority {
        match p.parse::<Priority>() {
            Ok(p) => filter = filter.priority(p),
            Err(e) => return format!("Error listing tasks: {}", e),
        }
    }
    if let Some(t) = tag {
        filter = filter.tag(t);
    }

    let tasks = store.search(&filter);
    if tasks.is_empty() {
        return "No tasks found matching criteria.".to_string();
    }
    render_task_lines(&tasks)
}

/// Search tasks by free text against title and description.
pub fn search_tasks(store: &dyn TaskStore, query: &str) -> String {
    let tasks = store.search(&Filter::new().query(query));
    if tasks.is_empty() {
        return format!("No tasks found matching '{}'.", query);
    }
    render_task_lines(&tasks)
}

/// Update a task's fields. Arguments left as `None` (or empty, for title,
/// priority, and status) are not touched.
pub fn update_task(
    store: &mut dyn TaskStore,
    task_id: &str,
    title: Option<&str>,
    description: Option<&str>,
    priority: Option<&str>,
    status: Option<&str>,
) -> String {
    let mut patch = TaskPatch::new();
    if let Some(title) = title
        && !title.is_empty()
    {
        patch = patch.title(title);
    }
    if let Some(description) = description {
        patch = patch.description(description);
    }
    if let Some(priority) = priority
        && !priority.is_empty()
    {
        match priority.parse::<Priority>() {
            Ok(p) => patch = patch.priority(p),
            Err(e) => return format!("Error updating task: {}", e),
        }
    }
    if let Some(status) = status
        && !status.is_empty()
    {
        match status.parse::<Status>() {
            Ok(s) => patch = patch.status(s),
            Err(e) => return format!("Error updating task: {}", e),
        }
    }

    if patch.is_empty() {
        return "No fields specified for update.".to_string();
    }

    match store.update(task_id, patch) {
        Ok(task) => format!("Task {} updated successfully.", task.id),
        Err(e) => format!("Error updating task: {}", e),
    }
}

/// Get detailed information about a specific task.
pub fn get_task_details(store: &dyn TaskStore, task_id: &str) -> String {
    let task = match store.get(task_id) {
        Ok(task) => task,
        Err(e) => return format!("Error getting task: {}", e),
    };

    let priority = task
        .priority
        .map(|p| p.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let tags = if task.tags.is_empty() {
        "N/A".to_string()
    } else {
        task.tags.join(", ")
    };
    [
        "Task Details:".to_string(),
        format!("  ID: {}", task.id),
        format!("  Title: {}", task.title),
        format!("  Description: {}", task.description.as_deref().unwrap_or("N/A")),
        format!("  Status: {}", task.status),
        format!("  Priority: {}", priority),
        format!("  Tags: {}", tags),
        format!("  Created: {}", task.created_at.format("%Y-%m-%dT%H:%M:%SZ")),
        format!(
            "  Modified: {}",
            task.modified_at
                .map(|t| t.format("%Y-%m-%dT%H:%M:%SZ").to_string())
                .unwrap_or_else(|| "Never".to_string())
        ),
        format!("  Due Date: {}", task.due_date.as_deref().unwrap_or("No due date")),
    ]
    .join("\n")
}

/// Summarize the collection: totals plus pending high-priority count.
pub fn get_statistics(store: &dyn TaskStore) -> String {
    let tasks = store.list();
    let total = tasks.len();
    let completed = tasks
        .iter()
        .filter(|t| t.status == Status::Completed)
        .count();
    let pending = total - completed;
    let high_priority = tasks
        .iter()
        .filter(|t| t.priority == Some(Priority::High) && t.status == Status::Pending)
        .count();

    [
        "Task Statistics:".to_string(),
        format!("  Total tasks: {}", total),
        format!("  Completed: {}", completed),
        format!("  Pending: {}", pending),
        format!("  High priority (pending): {}", high_priority),
    ]
    .join("\n")
}

/// Mark a task as completed.
pub fn complete_task(store: &mut dyn TaskStore, task_id: &str) -> String {
    match store.update(task_id, TaskPatch::new().status(Status::Completed)) {
        Ok(task) => format!("Task '{}' marked as completed.", task.id),
        Err(e) => format!("Error completing task: {}", e),
    }
}

/// Delete a task permanently.
pub fn delete_task(store: &mut dyn TaskStore, task_id: &str) -> String {
    match store.delete(task_id) {
        Ok(()) => format!("Task '{}' deleted.", task_id),
        Err(e) => format!("Error deleting task: {}", e),
    }
}

fn render_task_lines(tasks: &[Task]) -> String {
    tasks
        .iter()
        .map(|t| {
            let check = if t.status == Status::Completed {
                "[x]"
            } else {
                "[ ]"
            };
            let priority = t
                .priority
                .map(|p| format!(" ({})", p))
                .unwrap_or_default();
            let tags = if t.tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", t.tags.join(", "))
            };
            format!("{} {}{}{} - ID: {}", check, t.title, priority, tags, t.id)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
