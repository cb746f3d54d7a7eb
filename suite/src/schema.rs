//! Structural validation of API response bodies.
//!
//! # Design
//! Every documented response kind is a `ResponseShape` variant, and one
//! generic walker checks a parsed body against the chosen variant. The
//! walker performs no I/O and never mutates its input. A violation does
//! not stop the walk: the verdict carries every one found, each prefixed
//! with the path of the offending field (`todos[3].priority: ...`).
//! Malformed input of any kind, including a body that is not an object
//! at all, produces an invalid verdict rather than a panic or an error.

use std::fmt;

use serde_json::{Map, Value};

use crate::types::{Priority, Status};

/// The response shapes the service can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    GetAllTodos,
    GetTodo,
    CreateOrUpdateTodo,
    DeleteTodo,
    ResetDatabase,
    Error,
}

impl ResponseShape {
    /// Canonical name used in violation reports.
    pub fn name(self) -> &'static str {
        match self {
            ResponseShape::GetAllTodos => "GetAllTodosResponse",
            ResponseShape::GetTodo => "GetTodoResponse",
            ResponseShape::CreateOrUpdateTodo => "CreateOrUpdateTodoResponse",
            ResponseShape::DeleteTodo => "DeleteTodoResponse",
            ResponseShape::ResetDatabase => "ResetDatabaseResponse",
            ResponseShape::Error => "ErrorResponse",
        }
    }
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of checking one body against one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl Verdict {
    fn from_errors(errors: Vec<String>) -> Self {
        Verdict {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Check `body` against `shape`, collecting every violation.
pub fn validate(shape: ResponseShape, body: &Value) -> Verdict {
    let mut errors = Vec::new();
    let Some(object) = body.as_object() else {
        errors.push("response body: expected a JSON object".to_string());
        return Verdict::from_errors(errors);
    };
    match shape {
        ResponseShape::GetAllTodos => {
            check_success_flag(object, &mut errors);
            match require(object, "todos", &mut errors) {
                Some(Value::Array(items)) => {
                    for (index, item) in items.iter().enumerate() {
                        check_todo(item, &format!("todos[{index}]"), &mut errors);
                    }
                }
                Some(_) => errors.push("todos: expected an array".to_string()),
                None => {}
            }
        }
        ResponseShape::GetTodo | ResponseShape::CreateOrUpdateTodo => {
            check_success_flag(object, &mut errors);
            if let Some(todo) = require(object, "todo", &mut errors) {
                check_todo(todo, "todo", &mut errors);
            }
        }
        ResponseShape::DeleteTodo => {
            check_success_flag(object, &mut errors);
            if let Some(deleted) = require(object, "deleted", &mut errors) {
                check_deleted(deleted, &mut errors);
            }
        }
        ResponseShape::ResetDatabase => {
            check_success_flag(object, &mut errors);
            if let Some(reset) = require(object, "reset", &mut errors) {
                check_reset(reset, &mut errors);
            }
        }
        ResponseShape::Error => check_error_body(object, &mut errors),
    }
    Verdict::from_errors(errors)
}

fn require<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
    errors: &mut Vec<String>,
) -> Option<&'a Value> {
    let value = object.get(key);
    if value.is_none() {
        errors.push(format!("{key}: missing required field"));
    }
    value
}

fn check_success_flag(object: &Map<String, Value>, errors: &mut Vec<String>) {
    match object.get("success") {
        None => errors.push("success: missing required field".to_string()),
        Some(Value::Bool(_)) => {}
        Some(_) => errors.push("success: expected a boolean".to_string()),
    }
}

fn check_todo(value: &Value, path: &str, errors: &mut Vec<String>) {
    let Some(todo) = value.as_object() else {
        errors.push(format!("{path}: expected an object"));
        return;
    };
    check_number(todo, path, "id", errors);
    check_number(todo, path, "user_id", errors);
    check_string(todo, path, "title", errors);
    check_nullable_string(todo, path, "description", errors);
    check_enum(todo, path, "status", &Status::ALL.map(Status::as_str), errors);
    check_enum(todo, path, "priority", &Priority::ALL.map(Priority::as_str), errors);
    check_nullable_string(todo, path, "due_date", errors);
    check_string(todo, path, "created_at", errors);
    check_string(todo, path, "updated_at", errors);
}

/// The live service returns `deleted.id` as a string even though the
/// contract declares it numeric. The id is normalized before the type
/// check; this is a required pre-step of delete validation, not a
/// loosening of the declared shape.
fn check_deleted(value: &Value, errors: &mut Vec<String>) {
    let Some(deleted) = value.as_object() else {
        errors.push("deleted: expected an object".to_string());
        return;
    };
    let deleted = normalize_deleted_id(deleted);
    check_number(&deleted, "deleted", "id", errors);
    check_string(&deleted, "deleted", "message", errors);
}

/// Copy of the object with a parseable string `id` coerced to a number.
/// Non-numeric strings are left alone and fail the type check.
fn normalize_deleted_id(deleted: &Map<String, Value>) -> Map<String, Value> {
    let mut normalized = deleted.clone();
    let coerced = deleted
        .get("id")
        .and_then(Value::as_str)
        .and_then(|raw| raw.parse::<i64>().ok());
    if let Some(id) = coerced {
        normalized.insert("id".to_string(), Value::from(id));
    }
    normalized
}

fn check_reset(value: &Value, errors: &mut Vec<String>) {
    let Some(reset) = value.as_object() else {
        errors.push("reset: expected an object".to_string());
        return;
    };
    check_string(reset, "reset", "message", errors);
    match reset.get("sample_data") {
        None => errors.push("reset.sample_data: missing required field".to_string()),
        Some(Value::Object(sample)) => check_number(sample, "reset.sample_data", "todos", errors),
        Some(_) => errors.push("reset.sample_data: expected an object".to_string()),
    }
}

fn check_error_body(object: &Map<String, Value>, errors: &mut Vec<String>) {
    match object.get("success") {
        None => errors.push("success: missing required field".to_string()),
        Some(Value::Bool(false)) => {}
        Some(Value::Bool(true)) => {
            errors.push("success: must be false in an error response".to_string())
        }
        Some(_) => errors.push("success: expected a boolean".to_string()),
    }
    // Either key satisfies the error-text requirement; whichever is present
    // must be a string.
    let message = object.get("message");
    let error = object.get("error");
    if message.is_none() && error.is_none() {
        errors.push("message: missing required field (no text under message or error)".to_string());
    }
    for (key, value) in [("message", message), ("error", error)] {
        if let Some(value) = value {
            if !value.is_string() {
                errors.push(format!("{key}: expected a string"));
            }
        }
    }
}

fn check_number(object: &Map<String, Value>, path: &str, key: &str, errors: &mut Vec<String>) {
    match object.get(key) {
        None => errors.push(format!("{path}.{key}: missing required field")),
        Some(Value::Number(_)) => {}
        Some(_) => errors.push(format!("{path}.{key}: expected a number")),
    }
}

fn check_string(object: &Map<String, Value>, path: &str, key: &str, errors: &mut Vec<String>) {
    match object.get(key) {
        None => errors.push(format!("{path}.{key}: missing required field")),
        Some(Value::String(_)) => {}
        Some(_) => errors.push(format!("{path}.{key}: expected a string")),
    }
}

fn check_nullable_string(
    object: &Map<String, Value>,
    path: &str,
    key: &str,
    errors: &mut Vec<String>,
) {
    match object.get(key) {
        None => errors.push(format!("{path}.{key}: missing required field")),
        Some(Value::String(_)) | Some(Value::Null) => {}
        Some(_) => errors.push(format!("{path}.{key}: expected a string or null")),
    }
}

fn check_enum(
    object: &Map<String, Value>,
    path: &str,
    key: &str,
    allowed: &[&str],
    errors: &mut Vec<String>,
) {
    match object.get(key) {
        None => errors.push(format!("{path}.{key}: missing required field")),
        Some(Value::String(s)) if allowed.contains(&s.as_str()) => {}
        Some(_) => errors.push(format!("{path}.{key}: must be one of {}", allowed.join(", "))),
    }
}
