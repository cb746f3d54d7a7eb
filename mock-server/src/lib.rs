//! Stand-in for the remote Todo service.
//!
//! Serves the same three PHP-style endpoints with the same envelope JSON,
//! status codes, and quirks the live deployment exhibits, so the suite can
//! run hermetically against a faithful copy of the contract.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub mod store;

pub use store::Store;
use store::{NewTodo, Priority, Status, DEFAULT_USER_ID};

/// Create request body. Every field optional at the transport level; the
/// handler enforces which ones the contract actually requires.
#[derive(Deserialize)]
pub struct CreatePayload {
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub due_date: Option<String>,
}

/// Body shared by PUT (replace) and PATCH (merge); the two handlers apply
/// different semantics to the same shape.
#[derive(Deserialize)]
pub struct UpdatePayload {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub due_date: Option<String>,
}

impl UpdatePayload {
    fn names_any_field(&self) -> bool {
        self.user_id.is_some()
            || self.title.is_some()
            || self.description.is_some()
            || self.status.is_some()
            || self.priority.is_some()
            || self.due_date.is_some()
    }
}

#[derive(Deserialize)]
pub struct DeletePayload {
    pub id: Option<i64>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/todos.php", get(list_todos))
        .route(
            "/todo.php",
            get(get_todo)
                .post(create_todo)
                .put(replace_todo)
                .patch(patch_todo)
                .delete(delete_todo),
        )
        .route("/reset.php", post(reset_database))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "message": message })))
}

fn todo_envelope(status: StatusCode, todo: Value) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": true, "todo": todo })))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

async fn list_todos(State(db): State<Db>) -> Json<Value> {
    let store = db.read().await;
    let todos: Vec<Value> = store.newest_first().into_iter().map(|r| r.to_json()).collect();
    Json(json!({ "success": true, "todos": todos }))
}

async fn get_todo(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    // Missing and non-numeric ids both land on the not-found envelope,
    // matching the live service.
    let Some(id) = params.get("id").and_then(|raw| raw.parse::<i64>().ok()) else {
        return failure(StatusCode::NOT_FOUND, "Todo not found");
    };
    let store = db.read().await;
    match store.get(id) {
        Some(record) => todo_envelope(StatusCode::OK, record.to_json()),
        None => failure(StatusCode::NOT_FOUND, "Todo not found"),
    }
}

async fn create_todo(
    State(db): State<Db>,
    Json(payload): Json<CreatePayload>,
) -> (StatusCode, Json<Value>) {
    let Some(title) = non_empty(payload.title) else {
        return failure(StatusCode::BAD_REQUEST, "Title is required");
    };
    let mut store = db.write().await;
    let record = store.insert(NewTodo {
        user_id: payload.user_id,
        title,
        description: payload.description,
        status: payload.status,
        priority: payload.priority,
        due_date: payload.due_date,
    });
    tracing::debug!(id = record.id, "created todo");
    todo_envelope(StatusCode::CREATED, record.to_json())
}

/// PUT replaces the row: supplied fields are stored, omitted optional fields
/// fall back to their creation defaults. `created_at` is preserved.
async fn replace_todo(
    State(db): State<Db>,
    Json(payload): Json<UpdatePayload>,
) -> (StatusCode, Json<Value>) {
    let Some(id) = payload.id else {
        return failure(StatusCode::BAD_REQUEST, "ID is required");
    };
    let Some(title) = non_empty(payload.title) else {
        return failure(StatusCode::BAD_REQUEST, "Title is required");
    };
    let mut store = db.write().await;
    let Some(record) = store.get_mut(id) else {
        return failure(StatusCode::NOT_FOUND, "Todo not found");
    };
    record.title = title;
    record.user_id = payload.user_id.unwrap_or(DEFAULT_USER_ID);
    record.description = payload.description;
    record.status = payload.status.unwrap_or(Status::Pending);
    record.priority = payload.priority.unwrap_or(Priority::Medium);
    record.due_date = payload.due_date;
    record.updated_at = Utc::now();
    todo_envelope(StatusCode::OK, record.to_json())
}

/// PATCH merges: only supplied fields change, everything else is untouched.
async fn patch_todo(
    State(db): State<Db>,
    Json(payload): Json<UpdatePayload>,
) -> (StatusCode, Json<Value>) {
    let Some(id) = payload.id else {
        return failure(StatusCode::BAD_REQUEST, "ID is required");
    };
    if !payload.names_any_field() {
        return failure(StatusCode::BAD_REQUEST, "No fields to update");
    }
    if matches!(&payload.title, Some(t) if t.trim().is_empty()) {
        return failure(StatusCode::BAD_REQUEST, "Title cannot be empty");
    }
    let mut store = db.write().await;
    let Some(record) = store.get_mut(id) else {
        return failure(StatusCode::NOT_FOUND, "Todo not found");
    };
    if let Some(title) = payload.title {
        record.title = title;
    }
    if let Some(user_id) = payload.user_id {
        record.user_id = user_id;
    }
    if let Some(description) = payload.description {
        record.description = Some(description);
    }
    if let Some(status) = payload.status {
        record.status = status;
    }
    if let Some(priority) = payload.priority {
        record.priority = priority;
    }
    if let Some(due_date) = payload.due_date {
        record.due_date = Some(due_date);
    }
    record.updated_at = Utc::now();
    todo_envelope(StatusCode::OK, record.to_json())
}

async fn delete_todo(
    State(db): State<Db>,
    Json(payload): Json<DeletePayload>,
) -> (StatusCode, Json<Value>) {
    let Some(id) = payload.id else {
        return failure(StatusCode::BAD_REQUEST, "ID is required");
    };
    let mut store = db.write().await;
    match store.remove(id) {
        Some(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                // The live service echoes the id as a string here.
                "deleted": { "id": id.to_string(), "message": "Todo deleted successfully" }
            })),
        ),
        None => failure(StatusCode::NOT_FOUND, "Todo not found"),
    }
}

async fn reset_database(State(db): State<Db>) -> Json<Value> {
    let mut store = db.write().await;
    let count = store.reset();
    tracing::debug!(todos = count, "reset to sample data");
    Json(json!({
        "success": true,
        "reset": {
            "message": "Database reset successfully",
            "sample_data": { "todos": count }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_tolerates_missing_fields() {
        let payload: CreatePayload = serde_json::from_str(r#"{"title":"Only a title"}"#).unwrap();
        assert_eq!(payload.title.as_deref(), Some("Only a title"));
        assert!(payload.user_id.is_none());
        assert!(payload.status.is_none());
        assert!(payload.priority.is_none());
    }

    #[test]
    fn create_payload_parses_wire_enum_spellings() {
        let payload: CreatePayload =
            serde_json::from_str(r#"{"title":"T","status":"in_progress","priority":"high"}"#)
                .unwrap();
        assert_eq!(payload.status, Some(Status::InProgress));
        assert_eq!(payload.priority, Some(Priority::High));
    }

    #[test]
    fn create_payload_rejects_unknown_status() {
        let result: Result<CreatePayload, _> =
            serde_json::from_str(r#"{"title":"T","status":"done"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_payload_with_only_an_id_names_no_field() {
        let payload: UpdatePayload = serde_json::from_str(r#"{"id":3}"#).unwrap();
        assert_eq!(payload.id, Some(3));
        assert!(!payload.names_any_field());
    }

    #[test]
    fn update_payload_with_a_title_names_a_field() {
        let payload: UpdatePayload = serde_json::from_str(r#"{"id":3,"title":"New"}"#).unwrap();
        assert!(payload.names_any_field());
    }

    #[test]
    fn delete_payload_tolerates_an_empty_object() {
        let payload: DeletePayload = serde_json::from_str("{}").unwrap();
        assert!(payload.id.is_none());
    }
}
