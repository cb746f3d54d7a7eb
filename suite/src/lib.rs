//! Conformance suite for a remote todo service.
//!
//! # Overview
//! The system under test is a third-party HTTP/JSON API: three PHP-style
//! endpoints serving enveloped responses. This crate holds the pieces the
//! conformance tests under `tests/` are built from: a client with one
//! method per documented operation and a structural validator for every
//! response shape the contract names. An embedded catalog under `data/`
//! supplies the request payloads the tests send.
//!
//! # Design
//! - `TodoApiClient` executes real HTTP through `ureq` and returns non-2xx
//!   responses as data; the service's failure envelopes are contract too.
//! - With auto-validation on (the default), every operation checks its
//!   response body against the promised shape before returning it.
//! - `schema::validate` is pure and total: any input yields a verdict
//!   listing every violation, never a panic.
//! - DTOs are defined independently from the mock-server crate; the
//!   conformance tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod response;
pub mod schema;
pub mod types;

pub use client::TodoApiClient;
pub use config::Config;
pub use error::ClientError;
pub use fixtures::{TestData, NON_EXISTENT_ID};
pub use response::ApiResponse;
pub use schema::{validate, ResponseShape, Verdict};
pub use types::{
    CreateTodoRequest, ErrorResponse, GetAllTodosResponse, PatchTodoRequest, Priority,
    ResetDatabaseResponse, Status, Todo, TodoEnvelope, UpdateTodoRequest,
};
