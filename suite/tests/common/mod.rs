//! Shared harness for the conformance tests.
//!
//! Every test calls `fresh_client()` and gets a client pointed at a freshly
//! reset collection: either an in-process stand-in spawned for that test
//! alone, or the deployment named by `TODO_API_URL` (shared state; run with
//! `--test-threads=1` in that mode).

#![allow(dead_code)]

use std::sync::Once;

use serde::Serialize;
use todo_suite::{
    ApiResponse, Config, GetAllTodosResponse, ResponseShape, TestData, Todo, TodoApiClient,
};

static INIT_LOGGING: Once = Once::new();

fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Start the stand-in server on a random port and return its base URL.
/// The server thread lives for the rest of the process.
fn spawn_stand_in() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind test listener");
    let addr = std_listener.local_addr().expect("listener address");
    std_listener.set_nonblocking(true).expect("nonblocking listener");

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("tokio runtime");
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).expect("tokio listener");
            mock_server::run(listener).await
        })
        .expect("stand-in server exited");
    });

    format!("http://{addr}")
}

/// A client pointed at a freshly reset collection.
pub fn fresh_client() -> TodoApiClient {
    init_logging();
    let base_url = match Config::from_env().base_url {
        Some(url) => url,
        None => spawn_stand_in(),
    };
    let client = TodoApiClient::new(&base_url);
    let reset = client.reset_database().expect("reset before test");
    assert_eq!(reset.status(), 200, "reset failed: {}", reset.text());
    client
}

/// The embedded test-data catalog.
pub fn test_data() -> TestData {
    TestData::load().expect("fixture catalog")
}

/// Create a todo and return its assigned id.
pub fn create_todo(client: &TodoApiClient, payload: &impl Serialize) -> i64 {
    let response = client.create_todo(payload).expect("create todo");
    assert_eq!(response.status(), 201, "create failed: {}", response.text());
    todo_in(&response).id
}

/// The typed `todo` object from a single-item envelope.
pub fn todo_in(response: &ApiResponse) -> Todo {
    response
        .typed::<todo_suite::TodoEnvelope>()
        .expect("todo envelope")
        .todo
}

/// The typed todo list from a list envelope.
pub fn todos_in(response: &ApiResponse) -> Vec<Todo> {
    response.typed::<GetAllTodosResponse>().expect("list envelope").todos
}

pub fn assert_success(response: &ApiResponse, expected: bool) {
    let body = response.json().expect("response body should be JSON");
    assert_eq!(
        body["success"].as_bool(),
        Some(expected),
        "unexpected success flag in {body}"
    );
}

pub fn assert_conforms(shape: ResponseShape, response: &ApiResponse) {
    let body = response.json().expect("response body should be JSON");
    let verdict = todo_suite::validate(shape, body);
    assert!(verdict.valid, "{shape} violations: {}", verdict.errors.join("; "));
}

/// Every adjacent pair must be ordered newest-created-first. Equal creation
/// times are allowed; the server breaks those ties by id.
pub fn assert_newest_first(todos: &[Todo]) {
    for pair in todos.windows(2) {
        let newer = parse_timestamp(&pair[0].created_at);
        let older = parse_timestamp(&pair[1].created_at);
        assert!(
            newer >= older,
            "list out of order: {:?} listed before {:?}",
            pair[0].created_at,
            pair[1].created_at
        );
    }
}

pub fn parse_timestamp(raw: &str) -> chrono::NaiveDateTime {
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|e| panic!("unparseable timestamp {raw:?}: {e}"))
}

/// The id echoed by a delete response, tolerating the live service's
/// stringified spelling.
pub fn deleted_id(response: &ApiResponse) -> Option<i64> {
    let id = &response.json().expect("delete envelope")["deleted"]["id"];
    id.as_i64().or_else(|| id.as_str().and_then(|raw| raw.parse().ok()))
}

/// The error text of a failure envelope, under whichever key it appears.
pub fn error_text(response: &ApiResponse) -> String {
    let body: todo_suite::ErrorResponse = response.typed().expect("error envelope");
    body.text().expect("error text").to_string()
}

/// Read a todo back by id, asserting the read succeeds.
pub fn fetch_todo(client: &TodoApiClient, id: i64) -> Todo {
    let response = client.todo_by_id(id).expect("read todo");
    assert_eq!(response.status(), 200, "read of {id} failed: {}", response.text());
    todo_in(&response)
}
