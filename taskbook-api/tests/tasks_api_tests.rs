/// HTTP tests for the task endpoints
///
/// Run with: cargo test -p taskbook-api --test tasks_api_tests

mod common;

use axum::http::{Method, StatusCode};
use common::TestContext;
use serde_json::json;

#[tokio::test]
async fn test_task_lifecycle() {
    let ctx = TestContext::new();
    let user_id = ctx.create_user("owner@example.com").await;

    let (status, created) = ctx
        .post("/tasks", json!({ "task": "buy milk", "user_id": user_id }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["task"], "buy milk");
    assert_eq!(created["is_done"], false);
    assert_eq!(created["user_id"], user_id);

    let (status, updated) = ctx.patch("/tasks/1", json!({ "is_done": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["task"], "buy milk");
    assert_eq!(updated["is_done"], true);

    let (status, body) = ctx.delete("/tasks/1").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, body) = ctx.delete("/tasks/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_list_tasks() {
    let ctx = TestContext::new();
    let alice = ctx.create_user("alice@example.com").await;
    let bob = ctx.create_user("bob@example.com").await;

    ctx.create_task("alice 1", alice).await;
    ctx.create_task("bob 1", bob).await;
    ctx.create_task("alice 2", alice).await;

    let (status, all) = ctx.get("/tasks").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (status, mine) = ctx.get(&format!("/tasks?user_id={}", alice)).await;
    assert_eq!(status, StatusCode::OK);
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|t| t["user_id"] == alice));

    let (status, none) = ctx.get("/tasks?user_id=999").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn test_get_task() {
    let ctx = TestContext::new();
    let user_id = ctx.create_user("owner@example.com").await;
    let task_id = ctx.create_task("read book", user_id).await;

    let (status, task) = ctx.get(&format!("/tasks/{}", task_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["task"], "read book");

    let (status, _) = ctx.get("/tasks/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_merge_rules() {
    let ctx = TestContext::new();
    let user_id = ctx.create_user("owner@example.com").await;
    let task_id = ctx.create_task("buy milk", user_id).await;
    let uri = format!("/tasks/{}", task_id);

    let (status, task) = ctx.patch(&uri, json!({ "task": "" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["task"], "buy milk");

    let (_, task) = ctx
        .patch(&uri, json!({ "task": "buy bread", "is_done": true }))
        .await;
    assert_eq!(task["task"], "buy bread");
    assert_eq!(task["is_done"], true);

    let (_, task) = ctx.patch(&uri, json!({ "is_done": false })).await;
    assert_eq!(task["task"], "buy bread");
    assert_eq!(task["is_done"], false);

    let (_, task) = ctx.patch(&uri, json!({})).await;
    assert_eq!(task["task"], "buy bread");
    assert_eq!(task["is_done"], false);
}

#[tokio::test]
async fn test_patch_missing_task_is_not_found() {
    let ctx = TestContext::new();

    let (status, body) = ctx.patch("/tasks/7", json!({ "is_done": true })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "task 7 not found");
}

#[tokio::test]
async fn test_create_task_validation() {
    let ctx = TestContext::new();
    let user_id = ctx.create_user("owner@example.com").await;

    let (status, body) = ctx
        .post("/tasks", json!({ "task": "", "user_id": user_id }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["details"][0]["field"], "task");

    let (status, body) = ctx
        .post("/tasks", json!({ "task": "orphan", "user_id": 999 }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_non_positive_id_is_bad_request() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get("/tasks/0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_malformed_input_gets_json_error_body() {
    let ctx = TestContext::new();
    let user_id = ctx.create_user("owner@example.com").await;
    let task_id = ctx.create_task("buy milk", user_id).await;

    let (status, body) = ctx.get("/tasks/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].is_string());

    let (status, body) = ctx
        .send_raw(Method::PATCH, &format!("/tasks/{}", task_id), Some("{not json"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = ctx.get("/tasks?user_id=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_blank_description_patch_is_ignored() {
    let ctx = TestContext::new();
    let user_id = ctx.create_user("owner@example.com").await;
    let task_id = ctx.create_task("buy milk", user_id).await;

    let (status, _) = ctx
        .post("/tasks", json!({ "task": "   ", "user_id": user_id }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, task) = ctx
        .patch(&format!("/tasks/{}", task_id), json!({ "task": "   " }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["task"], "buy milk");
}
