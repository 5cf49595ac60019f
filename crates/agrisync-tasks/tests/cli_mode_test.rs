use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(name: &str, base_url: &str, role: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("agrisync-cli-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join("config.yaml");
    let yaml = format!(
        "api:\n  base_url: {base_url}\n  token: cli-token\nsession:\n  user_id: 7\n  username: ana\n  role: {role}\nlogging:\n  level: error\n"
    );
    std::fs::write(&path, yaml).expect("write config");
    path
}

async fn run_list(config: PathBuf) -> Output {
    tokio::task::spawn_blocking(move || {
        Command::new(env!("CARGO_BIN_EXE_agrisync-tasks"))
            .arg("--config")
            .arg(config)
            .arg("list")
            .output()
            .expect("Failed to start agrisync-tasks binary")
    })
    .await
    .expect("join blocking task")
}

#[tokio::test]
async fn list_prints_worker_tasks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/tasks/"))
        .and(query_param("assigned_to", "7"))
        .and(header("authorization", "Bearer cli-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 12,
            "title": "Water the tomatoes",
            "description": "Greenhouse 2",
            "assigned_to": null,
            "due_date": "2026-07-15",
            "status": "in_progress",
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let config = write_config("worker", &format!("{}/api/", server.uri()), "worker");
    let output = run_list(config).await;

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Water the tomatoes"));
    assert!(stdout.contains("Unassigned"));
    assert!(stdout.contains("In Progress"));
    assert!(stdout.contains("2026-07-15"));
}

#[tokio::test]
async fn list_reports_empty_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = write_config("empty", &format!("{}/api/", server.uri()), "admin");
    let output = run_list(config).await;

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No tasks found."));
}

#[tokio::test]
async fn list_fails_when_backend_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/tasks/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = write_config("failing", &format!("{}/api/", server.uri()), "admin");
    let output = run_list(config).await;

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to fetch tasks."));
}
