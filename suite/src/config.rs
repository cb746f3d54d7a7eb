//! Environment-driven configuration for a conformance run.

use std::env;

/// Variable that points the suite at a live deployment.
pub const BASE_URL_ENV: &str = "TODO_API_URL";

/// Where the suite sends its requests.
///
/// With no `TODO_API_URL` in the environment, each test spawns its own
/// in-process stand-in server and gets an isolated collection. Pointing
/// the suite at a deployment means every test shares one collection; run
/// single-threaded in that mode.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(env::var(BASE_URL_ENV).ok())
    }

    fn from_lookup(raw: Option<String>) -> Self {
        Config {
            base_url: raw.filter(|url| !url.is_empty()),
        }
    }
}
