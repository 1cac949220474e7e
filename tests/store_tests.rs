//! Integration tests for store semantics.
//!
//! The same contract holds for both variants; these tests exercise the
//! persisted store through TestEnv and spot-check the volatile store.

mod common;

use common::TestEnv;
use todo_cli::{Filter, MemoryStore, Priority, Status, Task, TaskPatch, TaskStore};

// =============================================================================
// Add / Get
// =============================================================================

#[test]
fn test_added_task_is_returned_unchanged() {
    let mut env = TestEnv::new();

    let added = env.add_task_with("Full task", |t| {
        t.description = Some("details".to_string());
        t.priority = Some(Priority::High);
        t.tags = vec!["work".to_string(), "urgent".to_string()];
        t.due_date = Some("2025-12-08T12:00:00Z".to_string());
    });

    let stored = env.store.get(&added.id).unwrap();
    assert_eq!(stored, &added);
}

#[test]
fn test_get_returns_stored_entity_fields() {
    let mut env = TestEnv::new();
    let added = env.add_task("Plain");

    let stored = env.store.get(&added.id).unwrap();
    assert_eq!(stored.title, "Plain");
    assert_eq!(stored.status, Status::Pending);
    assert_eq!(stored.priority, Some(Priority::Medium));
    assert!(stored.modified_at.is_none());
}

// =============================================================================
// Update
// =============================================================================

#[test]
fn test_update_stamps_modified_at_not_before_created_at() {
    let mut env = TestEnv::new();
    let added = env.add_task("Stamped");

    let updated = env
        .store
        .update(&added.id, TaskPatch::new().title("Stamped again"))
        .unwrap();

    let modified = updated.modified_at.expect("modified_at should be set");
    assert!(modified >= updated.created_at);
    assert_eq!(updated.created_at, added.created_at);
}

#[test]
fn test_update_is_idempotent_on_field_values() {
    let mut env = TestEnv::new();
    let added = env.add_task("Repeat");

    let patch = TaskPatch::new()
        .description("same")
        .priority(Priority::Low)
        .tags(["a", "b"]);
    let first = env.store.update(&added.id, patch.clone()).unwrap();
    let second = env.store.update(&added.id, patch).unwrap();

    assert_eq!(first.title, second.title);
    assert_eq!(first.description, second.description);
    assert_eq!(first.priority, second.priority);
    assert_eq!(first.tags, second.tags);
    // modified_at may advance but is always set
    assert!(second.modified_at.unwrap() >= first.modified_at.unwrap());
}

#[test]
fn test_update_replaces_tag_list() {
    let mut env = TestEnv::new();
    let added = env.add_task_with("Tagged", |t| {
        t.tags = vec!["old".to_string()];
    });

    let updated = env
        .store
        .update(&added.id, TaskPatch::new().tags(["new", "new"]))
        .unwrap();
    // Duplicates are permitted, no dedup
    assert_eq!(updated.tags, vec!["new", "new"]);
}

#[test]
fn test_reopen_a_completed_task() {
    let mut env = TestEnv::new();
    let added = env.add_task("Reopenable");
    env.complete(&added.id);

    let reopened = env
        .store
        .update(&added.id, TaskPatch::new().status(Status::Pending))
        .unwrap();
    assert_eq!(reopened.status, Status::Pending);
}

// =============================================================================
// List ordering
// =============================================================================

#[test]
fn test_list_orders_pending_first_then_creation_time() {
    let mut env = TestEnv::new();
    env.add_sequence(&[
        Status::Completed,
        Status::Pending,
        Status::Completed,
        Status::Pending,
    ]);

    let titles: Vec<String> = env.store.list().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["Task 1", "Task 3", "Task 0", "Task 2"]);
}

#[test]
fn test_search_ordering_matches_list() {
    let mut env = TestEnv::new();
    env.add_sequence(&[Status::Completed, Status::Pending, Status::Pending]);

    let listed = env.store.list();
    let searched = env.store.search(&Filter::new());
    assert_eq!(listed, searched);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_by_tag_exact_membership() {
    let mut env = TestEnv::new();
    env.add_task_with("On the list", |t| {
        t.tags = vec!["work".to_string(), "other".to_string()];
    });
    env.add_task_with("Off the list", |t| {
        t.tags = vec!["home".to_string()];
    });
    env.add_task("Untagged");

    let results = env.store.search(&Filter::new().tag("work"));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "On the list");
}

#[test]
fn test_search_query_title_or_description() {
    let mut env = TestEnv::new();
    env.add_task("Buy milk");
    env.add_task_with("Shopping", |t| {
        t.description = Some("need milk".to_string());
    });
    env.add_task("Bread");

    let results = env.store.search(&Filter::new().query("milk"));
    let mut titles: Vec<String> = results.into_iter().map(|t| t.title).collect();
    titles.sort();
    assert_eq!(titles, vec!["Buy milk", "Shopping"]);
}

#[test]
fn test_priority_filter_excludes_unset_priority() {
    let mut env = TestEnv::new();
    env.add_task_with("No priority", |t| {
        t.priority = None;
    });
    env.add_task_with("Medium priority", |t| {
        t.priority = Some(Priority::Medium);
    });

    let results = env.store.search(&Filter::new().priority(Priority::Medium));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Medium priority");

    // Unset priority matches no priority criterion at all
    for p in [Priority::High, Priority::Medium, Priority::Low] {
        let titles: Vec<String> = env
            .store
            .search(&Filter::new().priority(p))
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert!(!titles.contains(&"No priority".to_string()));
    }
}

#[test]
fn test_search_combines_criteria_with_and() {
    let mut env = TestEnv::new();
    env.add_task_with("High work", |t| {
        t.priority = Some(Priority::High);
        t.tags = vec!["work".to_string()];
    });
    env.add_task_with("Low work", |t| {
        t.priority = Some(Priority::Low);
        t.tags = vec!["work".to_string()];
    });

    let results = env
        .store
        .search(&Filter::new().priority(Priority::High).tag("work"));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "High work");
}

// =============================================================================
// Full scenario (both variants)
// =============================================================================

fn grocery_scenario(store: &mut dyn TaskStore) {
    let mut task = Task::new("Buy Groceries");
    task.priority = Some(Priority::High);
    task.tags = vec!["shopping".to_string()];
    let id = task.id.clone();
    store.add(task).unwrap();

    let listed = store.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, Status::Pending);
    assert_eq!(listed[0].priority, Some(Priority::High));
    assert_eq!(listed[0].tags, vec!["shopping"]);

    store
        .update(&id, TaskPatch::new().status(Status::Completed))
        .unwrap();
    let stored = store.get(&id).unwrap();
    assert_eq!(stored.status, Status::Completed);
    assert!(stored.modified_at.is_some());

    store.delete(&id).unwrap();
    assert!(store.list().is_empty());
}

#[test]
fn test_grocery_scenario_memory_store() {
    let mut store = MemoryStore::new();
    grocery_scenario(&mut store);
}

#[test]
fn test_grocery_scenario_file_store() {
    let mut env = TestEnv::new();
    grocery_scenario(&mut env.store);
}
