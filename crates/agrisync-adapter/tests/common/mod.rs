/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for agrisync-adapter tests

use agrisync_adapter::AgrisyncClient;
use serde_json::{Value, json};
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server under an `/api/` prefix
pub fn client_for(server: &MockServer) -> AgrisyncClient {
    AgrisyncClient::new(&format!("{}/api/", server.uri())).expect("client init")
}

/// Task record as the backend serializes it
pub fn task_json(id: u64, title: &str, status: &str, assignee: Option<(u64, &str)>) -> Value {
    let assigned_to = match assignee {
        Some((user_id, username)) => json!({
            "id": user_id,
            "username": username,
            "email": format!("{username}@farm.test"),
            "role": "worker",
        }),
        None => Value::Null,
    };
    json!({
        "id": id,
        "title": title,
        "description": "",
        "assigned_to": assigned_to,
        "due_date": "2026-07-15",
        "status": status,
        "created_at": "2026-07-01T06:00:00Z",
    })
}

/// Mock bearer token for testing
pub fn mock_token() -> String {
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test.signature".to_string()
}
