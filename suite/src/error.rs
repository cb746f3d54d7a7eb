//! Error types for the conformance client.
//!
//! # Design
//! A non-2xx response is deliberately not an error. The service's failure
//! envelopes are part of the contract under test, so they come back as
//! ordinary `ApiResponse` values for the caller to assert on. Only transport
//! failures, JSON handling, and contract violations found by the
//! auto-validation hook land here.

use thiserror::Error;

use crate::schema::ResponseShape;

/// Errors returned by `TodoApiClient` operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed: connection, DNS, or I/O failure.
    #[error("transport failure: {0}")]
    Transport(#[from] ureq::Error),

    /// The request payload could not be serialized to JSON.
    #[error("request body could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body is not valid JSON.
    #[error("response body could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    /// Auto-validation found shape violations in the response body. Every
    /// violated field is listed, not just the first.
    #[error("{shape} violated: {}", .errors.join("; "))]
    Contract {
        shape: ResponseShape,
        errors: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_error_lists_every_violation() {
        let err = ClientError::Contract {
            shape: ResponseShape::GetTodo,
            errors: vec![
                "todo.id: missing required field".to_string(),
                "todo.title: expected a string".to_string(),
            ],
        };
        let rendered = err.to_string();
        assert!(rendered.contains("GetTodoResponse"), "{rendered}");
        assert!(rendered.contains("todo.id"), "{rendered}");
        assert!(rendered.contains("todo.title"), "{rendered}");
    }
}
