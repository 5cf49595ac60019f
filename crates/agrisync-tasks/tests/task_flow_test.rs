/*
[INPUT]:  Mock AgriSync backend (wiremock)
[OUTPUT]: End-to-end checks of controller flows over real HTTP
[POS]:    Integration tests - list scoping, admin writes, worker status updates
[UPDATE]: When controller flows or endpoints change
*/

mod common;

use agrisync_adapter::{Role, TaskStatus};
use agrisync_tasks::task_list::{DELETE_ERROR, FETCH_ERROR};
use agrisync_tasks::{ActiveModal, FormSubmitOutcome, SubmitOutcome, TaskListView};
use common::{TOKEN, controller_for, task_json, user};
use serde_json::json;
use wiremock::matchers::{
    body_json, body_partial_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_list(server: &MockServer, body: serde_json::Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/api/tasks/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_users(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/auth/users/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "username": "root", "role": "admin"},
            {"id": 4, "username": "ana", "role": "worker"},
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn worker_list_is_scoped_to_own_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/tasks/"))
        .and(query_param("assigned_to", "7"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            task_json(1, "Water tomatoes", "todo", Some((7, "user7"))),
            task_json(2, "Check fences", "done", None),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, user(7, Role::Worker));
    controller.fetch_tasks().await;

    // Rows are shown as returned, including the unassigned one
    match controller.view() {
        TaskListView::Table(tasks) => {
            assert_eq!(tasks.len(), 2);
            assert_eq!(tasks[1].assignee_name(), None);
            assert_eq!(tasks[0].description, "");
        }
        other => panic!("expected table, got {other:?}"),
    }
}

#[tokio::test]
async fn admin_list_has_no_assignment_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/tasks/"))
        .and(query_param_is_missing("assigned_to"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0,
            "results": [],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, user(1, Role::Admin));
    controller.fetch_tasks().await;

    assert_eq!(controller.view(), TaskListView::Empty);
}

#[tokio::test]
async fn list_failure_shows_page_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/tasks/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, user(1, Role::Admin));
    controller.fetch_tasks().await;

    assert_eq!(controller.view(), TaskListView::Error(FETCH_ERROR));
}

#[tokio::test]
async fn admin_create_posts_to_collection() {
    let server = MockServer::start().await;
    mount_users(&server).await;
    mount_list(&server, json!([]), 2).await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/tasks/"))
        .and(body_json(json!({
            "title": "Feed hens",
            "description": "",
            "due_date": "2026-06-01",
            "status": "todo",
            "assigned_to_id": 4,
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(task_json(5, "Feed hens", "todo", Some((4, "ana")))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, user(1, Role::Admin));
    controller.fetch_tasks().await;
    assert!(controller.open_create().await);

    let form = controller.form_mut().expect("form open");
    assert_eq!(form.title(), "Create New Task");
    assert_eq!(form.value("status"), "todo");
    form.set_value("title", "Feed hens");
    form.set_value("due_date", "2026-06-01");
    form.set_value("assigned_to_id", "4");

    assert_eq!(controller.submit_form().await, FormSubmitOutcome::Saved);
    assert!(matches!(controller.modal(), ActiveModal::None));
}

#[tokio::test]
async fn admin_edit_puts_to_item_path() {
    let server = MockServer::start().await;
    mount_users(&server).await;
    mount_list(&server, json!([task_json(3, "Prune vines", "todo", None)]), 2).await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/tasks/3/"))
        .and(body_partial_json(json!({"title": "Prune vines", "status": "done"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(task_json(3, "Prune vines", "done", None)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/tasks/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, user(1, Role::Admin));
    controller.fetch_tasks().await;
    assert!(controller.edit_task(3).await);

    let form = controller.form_mut().expect("form open");
    assert_eq!(form.title(), "Edit Task");
    form.set_value("status", "done");

    assert_eq!(controller.submit_form().await, FormSubmitOutcome::Saved);
}

#[tokio::test]
async fn rejected_create_maps_field_errors() {
    let server = MockServer::start().await;
    mount_users(&server).await;
    mount_list(&server, json!([]), 1).await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/tasks/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "due_date": ["Date cannot be in the past."],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, user(1, Role::Admin));
    controller.fetch_tasks().await;
    controller.open_create().await;
    let form = controller.form_mut().expect("form open");
    form.set_value("title", "Harvest");
    form.set_value("due_date", "2020-01-01");

    assert_eq!(controller.submit_form().await, FormSubmitOutcome::Failed);
    let form = controller.form_mut().expect("form stays open");
    assert_eq!(
        form.errors().field("due_date"),
        Some(&["Date cannot be in the past.".to_string()][..])
    );
    assert_eq!(form.errors().general, None);
}

#[tokio::test]
async fn worker_status_update_patches_only_status() {
    let server = MockServer::start().await;
    mount_list(&server, json!([task_json(2, "Weed rows", "todo", Some((7, "user7")))]), 2).await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasks/update-status/2/"))
        .and(body_json(json!({"status": "in_progress"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "in_progress"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, user(7, Role::Worker));
    controller.fetch_tasks().await;
    assert!(controller.edit_task(2).await);
    assert!(matches!(controller.modal(), ActiveModal::StatusUpdate));

    controller.status_modal_mut().select(TaskStatus::InProgress);
    assert_eq!(controller.submit_status().await, SubmitOutcome::Saved);
    assert!(matches!(controller.modal(), ActiveModal::None));
}

#[tokio::test]
async fn worker_status_failure_shows_detail() {
    let server = MockServer::start().await;
    mount_list(&server, json!([task_json(2, "Weed rows", "todo", None)]), 1).await;
    Mock::given(method("PATCH"))
        .and(path("/api/tasks/update-status/2/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "You can only update tasks assigned to you.",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, user(7, Role::Worker));
    controller.fetch_tasks().await;
    controller.edit_task(2).await;
    controller.status_modal_mut().select(TaskStatus::Done);

    assert_eq!(controller.submit_status().await, SubmitOutcome::Failed);

    let modal = controller.status_modal();
    assert!(modal.is_open());
    assert_eq!(modal.selected(), TaskStatus::Done);
    assert_eq!(modal.error(), Some("You can only update tasks assigned to you."));
}

#[tokio::test]
async fn declined_delete_sends_no_request() {
    let server = MockServer::start().await;
    mount_list(&server, json!([task_json(1, "Water", "todo", None)]), 1).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, user(1, Role::Admin));
    controller.fetch_tasks().await;
    assert!(controller.request_delete(1));
    controller.confirm_delete(false).await;

    assert_eq!(controller.tasks().len(), 1);
}

#[tokio::test]
async fn failed_delete_keeps_list_and_sets_error() {
    let server = MockServer::start().await;
    mount_list(&server, json!([task_json(1, "Water", "todo", None)]), 1).await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/tasks/1/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, user(1, Role::Admin));
    controller.fetch_tasks().await;
    controller.request_delete(1);
    controller.confirm_delete(true).await;

    assert_eq!(controller.error(), Some(DELETE_ERROR));
    assert_eq!(controller.tasks().len(), 1);
}

#[tokio::test]
async fn confirmed_delete_refetches() {
    let server = MockServer::start().await;
    mount_list(&server, json!([task_json(1, "Water", "todo", None)]), 2).await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/tasks/1/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = controller_for(&server, user(1, Role::Admin));
    controller.fetch_tasks().await;
    controller.request_delete(1);
    controller.confirm_delete(true).await;

    assert_eq!(controller.error(), None);
}
