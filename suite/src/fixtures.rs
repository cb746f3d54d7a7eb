//! Embedded test-data catalog.
//!
//! # Design
//! The payloads live in `data/todo-test-data.json`, embedded at compile
//! time, so there is one place to adjust when the sample inputs change.
//! Valid payloads deserialize into the typed request structs; invalid
//! payloads stay untyped, since their whole point is to lack fields the
//! typed requests require.

use serde::Deserialize;
use serde_json::Value;

use crate::types::{CreateTodoRequest, Priority, Status};

/// An id no deployment of the service is expected to reach.
pub const NON_EXISTENT_ID: i64 = 999_999;

const DATA: &str = include_str!("../data/todo-test-data.json");

#[derive(Debug, Clone, Deserialize)]
pub struct TestData {
    pub valid: ValidPayloads,
    pub invalid: InvalidPayloads,
    pub expected: Expectations,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidPayloads {
    pub minimal: CreateTodoRequest,
    pub title_only: CreateTodoRequest,
    pub complete: CreateTodoRequest,
    pub with_due_date: CreateTodoRequest,
    pub with_description: CreateTodoRequest,
    /// One payload per status value.
    pub status_probes: Vec<CreateTodoRequest>,
    /// One payload per priority value.
    pub priority_probes: Vec<CreateTodoRequest>,
    /// Two distinguishable payloads for multi-row scenarios.
    pub pair: Vec<CreateTodoRequest>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvalidPayloads {
    pub missing_title: Value,
    pub empty_title: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Expectations {
    pub defaults: ExpectedDefaults,
    /// Reset must seed at least this many rows.
    pub reset_min_todos: usize,
}

/// The creation defaults an omitted field must come back with.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedDefaults {
    pub status: Status,
    pub priority: Priority,
    pub user_id: i64,
}

impl TestData {
    /// Parse the embedded catalog.
    pub fn load() -> Result<Self, serde_json::Error> {
        serde_json::from_str(DATA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DEFAULT_PRIORITY, DEFAULT_STATUS, DEFAULT_USER_ID};
    use std::collections::HashSet;

    #[test]
    fn catalog_parses() {
        let data = TestData::load().unwrap();
        assert!(!data.valid.minimal.title.is_empty());
        assert_eq!(data.expected.defaults.user_id, 1);
    }

    #[test]
    fn catalog_defaults_match_the_documented_constants() {
        let defaults = TestData::load().unwrap().expected.defaults;
        assert_eq!(defaults.status, DEFAULT_STATUS);
        assert_eq!(defaults.priority, DEFAULT_PRIORITY);
        assert_eq!(defaults.user_id, DEFAULT_USER_ID);
    }

    #[test]
    fn status_probes_cover_every_status() {
        let data = TestData::load().unwrap();
        let covered: HashSet<Status> =
            data.valid.status_probes.iter().filter_map(|p| p.status).collect();
        assert_eq!(covered, HashSet::from(Status::ALL));
    }

    #[test]
    fn priority_probes_cover_every_priority() {
        let data = TestData::load().unwrap();
        let covered: HashSet<Priority> =
            data.valid.priority_probes.iter().filter_map(|p| p.priority).collect();
        assert_eq!(covered, HashSet::from(Priority::ALL));
    }

    #[test]
    fn invalid_payloads_are_actually_invalid() {
        let data = TestData::load().unwrap();
        assert!(data.invalid.missing_title.get("title").is_none());
        assert_eq!(data.invalid.empty_title["title"], "");
    }

    #[test]
    fn the_pair_is_distinguishable() {
        let data = TestData::load().unwrap();
        assert_eq!(data.valid.pair.len(), 2);
        assert_ne!(data.valid.pair[0].title, data.valid.pair[1].title);
    }
}
