//! HTTP client for the todo service, one method per documented operation.
//!
//! # Design
//! Each operation performs exactly one HTTP round-trip and returns the
//! response as data, whatever the status code. With auto-validation on
//! (the default) the operation checks the body against the shape the
//! contract promises for that outcome before handing it back: the success
//! shape on 2xx, the failure shape otherwise. List and reset check their
//! success shapes only; their failure bodies are asserted by the tests
//! that provoke them. A shape violation surfaces as
//! `ClientError::Contract` carrying every violated field.
//!
//! Every operation is a tracing span, so a conformance run logs the same
//! step narrative the assertions follow.

use std::fmt;

use serde::Serialize;
use tracing::instrument;

use crate::error::ClientError;
use crate::response::ApiResponse;
use crate::schema::{self, ResponseShape};

/// Collection endpoint: list.
const TODOS_ENDPOINT: &str = "todos.php";
/// Item endpoint: read, create, replace, merge, delete.
const TODO_ENDPOINT: &str = "todo.php";
/// Maintenance endpoint: restore the sample data.
const RESET_ENDPOINT: &str = "reset.php";

enum WriteVerb {
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Serialize)]
struct DeleteBody {
    id: i64,
}

/// Synchronous client for the todo service.
#[derive(Clone)]
pub struct TodoApiClient {
    agent: ureq::Agent,
    base_url: String,
    auto_validate: bool,
}

impl fmt::Debug for TodoApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoApiClient")
            .field("base_url", &self.base_url)
            .field("auto_validate", &self.auto_validate)
            .finish_non_exhaustive()
    }
}

impl TodoApiClient {
    /// A client for the service at `base_url`, with auto-validation on.
    ///
    /// The agent is configured so that non-2xx statuses come back as
    /// responses rather than transport errors; the failure envelopes are
    /// part of the contract under test.
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        TodoApiClient {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            auto_validate: true,
        }
    }

    /// Toggle the post-response shape check.
    pub fn with_auto_validation(mut self, enabled: bool) -> Self {
        self.auto_validate = enabled;
        self
    }

    #[instrument(name = "get all todos", skip(self))]
    pub fn list_todos(&self) -> Result<ApiResponse, ClientError> {
        let response = self.get(TODOS_ENDPOINT, None)?;
        self.check_success_shape_only(ResponseShape::GetAllTodos, &response)?;
        Ok(response)
    }

    #[instrument(name = "get todo by id", skip(self))]
    pub fn todo_by_id(&self, id: i64) -> Result<ApiResponse, ClientError> {
        let response = self.get(TODO_ENDPOINT, Some(id))?;
        self.check_shape(ResponseShape::GetTodo, &response)?;
        Ok(response)
    }

    /// Create a todo. The payload is any serializable value so tests can
    /// send deliberately incomplete bodies.
    #[instrument(name = "create todo", skip(self, payload))]
    pub fn create_todo<P: Serialize>(&self, payload: &P) -> Result<ApiResponse, ClientError> {
        let response = self.send_json(WriteVerb::Post, TODO_ENDPOINT, payload)?;
        self.check_shape(ResponseShape::CreateOrUpdateTodo, &response)?;
        Ok(response)
    }

    /// Full update: the service replaces every mutable field.
    #[instrument(name = "update todo", skip(self, payload))]
    pub fn update_todo<P: Serialize>(&self, payload: &P) -> Result<ApiResponse, ClientError> {
        let response = self.send_json(WriteVerb::Put, TODO_ENDPOINT, payload)?;
        self.check_shape(ResponseShape::CreateOrUpdateTodo, &response)?;
        Ok(response)
    }

    /// Partial update: only the supplied fields change.
    #[instrument(name = "patch todo", skip(self, payload))]
    pub fn patch_todo<P: Serialize>(&self, payload: &P) -> Result<ApiResponse, ClientError> {
        let response = self.send_json(WriteVerb::Patch, TODO_ENDPOINT, payload)?;
        self.check_shape(ResponseShape::CreateOrUpdateTodo, &response)?;
        Ok(response)
    }

    #[instrument(name = "delete todo", skip(self))]
    pub fn delete_todo(&self, id: i64) -> Result<ApiResponse, ClientError> {
        let response = self.send_json(WriteVerb::Delete, TODO_ENDPOINT, &DeleteBody { id })?;
        self.check_shape(ResponseShape::DeleteTodo, &response)?;
        Ok(response)
    }

    /// Restore the service's sample data set.
    #[instrument(name = "reset database", skip(self))]
    pub fn reset_database(&self) -> Result<ApiResponse, ClientError> {
        let url = self.url(RESET_ENDPOINT);
        let response = self
            .agent
            .post(&url)
            .header("accept", "application/json")
            .send_empty()?;
        let response = read_response(response)?;
        self.check_success_shape_only(ResponseShape::ResetDatabase, &response)?;
        Ok(response)
    }

    fn get(&self, endpoint: &str, id: Option<i64>) -> Result<ApiResponse, ClientError> {
        let url = self.url(endpoint);
        let mut request = self.agent.get(&url).header("accept", "application/json");
        if let Some(id) = id {
            request = request.query("id", &id.to_string());
        }
        read_response(request.call()?)
    }

    fn send_json<P: Serialize>(
        &self,
        verb: WriteVerb,
        endpoint: &str,
        payload: &P,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.url(endpoint);
        let body = serde_json::to_string(payload).map_err(ClientError::Encode)?;
        let request = match verb {
            WriteVerb::Post => self.agent.post(&url),
            WriteVerb::Put => self.agent.put(&url),
            WriteVerb::Patch => self.agent.patch(&url),
            // DELETE carries its id in a JSON body on this API.
            WriteVerb::Delete => self.agent.delete(&url).force_send_body(),
        };
        let response = request
            .header("accept", "application/json")
            .content_type("application/json")
            .send(body.as_bytes())?;
        read_response(response)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    /// Success shape on 2xx, failure shape otherwise.
    fn check_shape(
        &self,
        shape: ResponseShape,
        response: &ApiResponse,
    ) -> Result<(), ClientError> {
        if !self.auto_validate {
            return Ok(());
        }
        let shape = if response.ok() { shape } else { ResponseShape::Error };
        enforce(shape, response)
    }

    fn check_success_shape_only(
        &self,
        shape: ResponseShape,
        response: &ApiResponse,
    ) -> Result<(), ClientError> {
        if !self.auto_validate || !response.ok() {
            return Ok(());
        }
        enforce(shape, response)
    }
}

fn enforce(shape: ResponseShape, response: &ApiResponse) -> Result<(), ClientError> {
    let verdict = schema::validate(shape, response.json()?);
    if verdict.valid {
        Ok(())
    } else {
        Err(ClientError::Contract {
            shape,
            errors: verdict.errors,
        })
    }
}

fn read_response(
    mut response: ureq::http::Response<ureq::Body>,
) -> Result<ApiResponse, ClientError> {
    let status = response.status().as_u16();
    let text = response.body_mut().read_to_string()?;
    Ok(ApiResponse::new(status, text))
}
