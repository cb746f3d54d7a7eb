//! Wire types for the todo service.
//!
//! # Design
//! DTOs are defined independently from the mock-server crate; the
//! conformance tests catch schema drift between the two. Request payloads
//! omit unset optional fields from their JSON entirely, so the suite
//! controls exactly which keys each request carries and the server's
//! documented defaults are observable.

use serde::{Deserialize, Serialize};

/// The `user_id` the service assigns when a create request omits one.
pub const DEFAULT_USER_ID: i64 = 1;
/// The status the service assigns when a create request omits one.
pub const DEFAULT_STATUS: Status = Status::Pending;
/// The priority the service assigns when a create request omits one.
pub const DEFAULT_PRIORITY: Priority = Priority::Medium;

/// Workflow state of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
        }
    }
}

/// Priority of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A todo as the service returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub due_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating a todo. Only `title` is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl CreateTodoRequest {
    /// Minimal payload: a title and nothing else.
    pub fn titled(title: &str) -> Self {
        CreateTodoRequest {
            title: title.to_string(),
            description: None,
            status: None,
            priority: None,
            due_date: None,
            user_id: None,
        }
    }
}

/// Payload for a full update. The service treats PUT as replacement, so
/// `title` is mandatory again and omitted optional fields reset to their
/// creation defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl UpdateTodoRequest {
    /// Replacement payload carrying only the mandatory fields.
    pub fn titled(id: i64, title: &str) -> Self {
        UpdateTodoRequest {
            id,
            title: title.to_string(),
            description: None,
            status: None,
            priority: None,
            due_date: None,
            user_id: None,
        }
    }
}

/// Payload for a partial update. Only the supplied fields change; the
/// service rejects a payload that names no field beyond `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchTodoRequest {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl PatchTodoRequest {
    /// A patch naming no mutable field yet; callers fill in what changes.
    pub fn for_id(id: i64) -> Self {
        PatchTodoRequest {
            id,
            title: None,
            description: None,
            status: None,
            priority: None,
            due_date: None,
            user_id: None,
        }
    }
}

/// The `{success, todos}` list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GetAllTodosResponse {
    pub success: bool,
    pub todos: Vec<Todo>,
}

/// The `{success, todo}` envelope returned by single reads and by every write.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoEnvelope {
    pub success: bool,
    pub todo: Todo,
}

/// `{success, reset: {message, sample_data: {todos}}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetDatabaseResponse {
    pub success: bool,
    pub reset: ResetOutcome,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetOutcome {
    pub message: String,
    pub sample_data: SampleData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SampleData {
    pub todos: i64,
}

/// Failure envelope. The service writes its text under `message`; some
/// deployments use `error` instead, and both are accepted wherever the
/// suite reads error text.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// The error text, whichever key carries it.
    pub fn text(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}
