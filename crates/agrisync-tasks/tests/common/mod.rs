/*
[INPUT]:  Mock server handle and user fixtures
[OUTPUT]: Controllers wired to a real HTTP client against wiremock
[POS]:    Test infrastructure - shared across agrisync-tasks integration tests
[UPDATE]: When adding new fixtures
*/

#![allow(dead_code)]

use std::sync::Arc;

use agrisync_adapter::{AgrisyncClient, Credentials, Role, User};
use agrisync_tasks::{Session, TaskListController};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TOKEN: &str = "farm-token";

pub fn user(id: u64, role: Role) -> User {
    User {
        id,
        username: format!("user{id}"),
        email: None,
        role,
    }
}

pub fn client_for(server: &MockServer) -> AgrisyncClient {
    let mut client = AgrisyncClient::new(&format!("{}/api/", server.uri())).expect("client init");
    client.set_credentials(Credentials::bearer(TOKEN));
    client
}

pub fn controller_for(server: &MockServer, user: User) -> TaskListController {
    TaskListController::new(Arc::new(client_for(server)), Session::new(user))
}

pub fn task_json(id: u64, title: &str, status: &str, assignee: Option<(u64, &str)>) -> Value {
    let assigned_to = match assignee {
        Some((user_id, username)) => json!({
            "id": user_id,
            "username": username,
            "role": "worker",
        }),
        None => Value::Null,
    };
    json!({
        "id": id,
        "title": title,
        "description": null,
        "assigned_to": assigned_to,
        "due_date": "2026-07-15",
        "status": status,
    })
}
