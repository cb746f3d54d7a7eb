//! API responses as plain data with an at-most-once body parse.
//!
//! # Design
//! The transport yields the body text exactly once. `json()` parses it on
//! first use and caches the tree for the life of the response, so repeated
//! reads inside one test never re-parse and no state is shared between
//! responses.

use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

/// Status and body of one exchange with the service.
///
/// Non-2xx responses are represented exactly like successes; the status
/// code is data for the caller to assert on.
#[derive(Debug)]
pub struct ApiResponse {
    status: u16,
    text: String,
    parsed: OnceCell<Value>,
}

impl ApiResponse {
    pub fn new(status: u16, text: String) -> Self {
        ApiResponse {
            status,
            text,
            parsed: OnceCell::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// True for any 2xx status.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The raw body text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The body parsed as JSON, parsed at most once per response.
    pub fn json(&self) -> Result<&Value, ClientError> {
        self.parsed
            .get_or_try_init(|| serde_json::from_str(&self.text).map_err(ClientError::Decode))
    }

    /// Deserialize the cached body into a typed envelope.
    pub fn typed<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_value(self.json()?.clone()).map_err(ClientError::Decode)
    }
}
