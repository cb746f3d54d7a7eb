//! In-memory todo store backing the stand-in API.
//!
//! # Design
//! Rows keep full-precision `DateTime<Utc>` timestamps internally and render
//! them as `YYYY-MM-DD HH:MM:SS` strings at the edge, so newest-first ordering
//! stays exact even when several rows share one rendered second. `reset`
//! replaces the whole collection with the fixed sample rows and rewinds id
//! assignment, making runs deterministic end to end.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

/// The `user_id` assigned when a create request omits one.
pub const DEFAULT_USER_ID: i64 = 1;

/// Workflow state of a todo, in wire spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
        }
    }
}

/// Priority of a todo, in wire spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// One stored todo row.
#[derive(Clone, Debug)]
pub struct TodoRecord {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub due_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoRecord {
    /// Render the row exactly as the API serializes it.
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "user_id": self.user_id,
            "title": self.title,
            "description": self.description,
            "status": self.status.as_str(),
            "priority": self.priority.as_str(),
            "due_date": self.due_date,
            "created_at": format_timestamp(self.created_at),
            "updated_at": format_timestamp(self.updated_at),
        })
    }
}

/// Datetime rendering used for every timestamp the API emits.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Fields of a create request after validation, defaults not yet applied.
pub struct NewTodo {
    pub user_id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub due_date: Option<String>,
}

/// Sample rows recreated by every reset, oldest first.
const SEED: [(&str, Option<&str>, Status, Priority, Option<i64>); 5] = [
    (
        "Set up project repository",
        Some("Initialize version control and the build pipeline"),
        Status::Completed,
        Priority::High,
        None,
    ),
    (
        "Write API documentation",
        Some("Document every endpoint with request and response examples"),
        Status::InProgress,
        Priority::Medium,
        Some(7),
    ),
    ("Review open pull requests", None, Status::Pending, Priority::High, Some(2)),
    (
        "Update dependency versions",
        Some("Bring third-party packages up to their latest releases"),
        Status::Pending,
        Priority::Low,
        Some(14),
    ),
    ("Plan next sprint", None, Status::Pending, Priority::Medium, Some(5)),
];

/// In-memory collection with server-assigned monotonically increasing ids.
pub struct Store {
    todos: HashMap<i64, TodoRecord>,
    next_id: i64,
}

impl Store {
    /// A store holding the fixed sample rows, staggered one hour apart so
    /// ordering assertions have distinct creation times to work with.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let todos = SEED
            .iter()
            .enumerate()
            .map(|(i, (title, description, status, priority, due_in_days))| {
                let created = now - Duration::hours(SEED.len() as i64 - i as i64);
                let record = TodoRecord {
                    id: i as i64 + 1,
                    user_id: DEFAULT_USER_ID,
                    title: (*title).to_string(),
                    description: description.map(str::to_string),
                    status: *status,
                    priority: *priority,
                    due_date: due_in_days.map(|days| format_timestamp(now + Duration::days(days))),
                    created_at: created,
                    updated_at: created,
                };
                (record.id, record)
            })
            .collect();
        Store {
            todos,
            next_id: SEED.len() as i64 + 1,
        }
    }

    /// Insert a new row, assigning its id and timestamps and filling in the
    /// documented creation defaults for omitted fields.
    pub fn insert(&mut self, input: NewTodo) -> TodoRecord {
        let now = Utc::now();
        let record = TodoRecord {
            id: self.next_id,
            user_id: input.user_id.unwrap_or(DEFAULT_USER_ID),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or(Status::Pending),
            priority: input.priority.unwrap_or(Priority::Medium),
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.todos.insert(record.id, record.clone());
        record
    }

    pub fn get(&self, id: i64) -> Option<&TodoRecord> {
        self.todos.get(&id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut TodoRecord> {
        self.todos.get_mut(&id)
    }

    pub fn remove(&mut self, id: i64) -> Option<TodoRecord> {
        self.todos.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Rows ordered newest-created-first; id breaks ties within one instant.
    pub fn newest_first(&self) -> Vec<&TodoRecord> {
        let mut rows: Vec<&TodoRecord> = self.todos.values().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rows
    }

    /// Drop everything and restore the sample rows. Returns the seed count.
    pub fn reset(&mut self) -> usize {
        *self = Store::seeded();
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_has_five_rows_with_sequential_ids() {
        let store = Store::seeded();
        assert_eq!(store.len(), 5);
        for id in 1..=5 {
            assert!(store.get(id).is_some(), "missing seed row {id}");
        }
    }

    #[test]
    fn seeded_rows_are_ordered_newest_first() {
        let store = Store::seeded();
        let ids: Vec<i64> = store.newest_first().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn insert_assigns_ids_after_the_seed_range() {
        let mut store = Store::seeded();
        let first = store.insert(new_todo("First"));
        let second = store.insert(new_todo("Second"));
        assert_eq!(first.id, 6);
        assert_eq!(second.id, 7);
    }

    #[test]
    fn insert_applies_creation_defaults() {
        let mut store = Store::seeded();
        let record = store.insert(new_todo("Defaults"));
        assert_eq!(record.user_id, DEFAULT_USER_ID);
        assert_eq!(record.status, Status::Pending);
        assert_eq!(record.priority, Priority::Medium);
        assert!(record.description.is_none());
        assert!(record.due_date.is_none());
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn inserted_row_sorts_before_the_seed() {
        let mut store = Store::seeded();
        let record = store.insert(new_todo("Newest"));
        assert_eq!(store.newest_first()[0].id, record.id);
    }

    #[test]
    fn reset_restores_the_seed_and_rewinds_ids() {
        let mut store = Store::seeded();
        store.insert(new_todo("Extra"));
        store.remove(1);
        let count = store.reset();
        assert_eq!(count, 5);
        assert!(store.get(1).is_some());
        assert!(store.get(6).is_none());
        let reassigned = store.insert(new_todo("After reset"));
        assert_eq!(reassigned.id, 6);
    }

    #[test]
    fn remove_is_final() {
        let mut store = Store::seeded();
        assert!(store.remove(3).is_some());
        assert!(store.remove(3).is_none());
        assert!(store.get(3).is_none());
    }

    #[test]
    fn timestamps_render_without_timezone_suffix() {
        let store = Store::seeded();
        let json = store.get(1).unwrap().to_json();
        let rendered = json["created_at"].as_str().unwrap();
        assert_eq!(rendered.len(), 19, "unexpected format: {rendered}");
        assert!(!rendered.contains('T'));
        assert!(!rendered.ends_with('Z'));
    }

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            user_id: None,
            title: title.to_string(),
            description: None,
            status: None,
            priority: None,
            due_date: None,
        }
    }
}
