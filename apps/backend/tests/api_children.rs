//! Child profile and settings API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use common::TestContext;

/// Test creating a child returns defaults.
#[tokio::test]
async fn test_create_child() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/children")
        .json(&json!({ "name": "  Anna " }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Anna");
    assert_eq!(body["streak"], 0);
    assert_eq!(body["total_stickers"], 0);
    assert_eq!(body["settings"]["letters_per_session"], 9);
    assert_eq!(body["settings"]["letter_case"], "mixed");
    assert_eq!(body["settings"]["difficulty"], "Medium");
    assert_eq!(body["settings"]["streak_thresholds"], json!([3, 5, 10]));
}

/// Test that invalid names are rejected.
#[tokio::test]
async fn test_create_child_invalid_name() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.post("/api/children").json(&json!({ "name": "" })).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "invalid_name");

    let response = server
        .post("/api/children")
        .json(&json!({ "name": "x".repeat(51) }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

/// Test listing children.
#[tokio::test]
async fn test_list_children() {
    let ctx = TestContext::new();
    let server = ctx.server();
    ctx.create_test_child("Bence").await;
    ctx.create_test_child("Csenge").await;

    let response = server.get("/api/children").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

/// Test fetching an unknown child.
#[tokio::test]
async fn test_get_unknown_child() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get(&format!("/api/children/{}", Uuid::new_v4())).await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "not_found");
}

/// Test renaming a child.
#[tokio::test]
async fn test_rename_child() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let child = ctx.create_test_child("Dani").await;

    let response = server
        .put(&format!("/api/children/{}", child.id))
        .json(&json!({ "name": "Dániel" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Dániel");

    let response = server.get(&format!("/api/children/{}", child.id)).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Dániel");
}

/// Test deleting a child removes its stickers.
#[tokio::test]
async fn test_delete_child() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let child = ctx.create_test_child("Eszter").await;

    let response = server.delete(&format!("/api/children/{}", child.id)).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);

    let response = server.get(&format!("/api/children/{}", child.id)).await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server.delete(&format!("/api/children/{}", child.id)).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

/// Test a partial settings update keeps other fields.
#[tokio::test]
async fn test_update_settings() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let child = ctx.create_test_child("Flóra").await;

    let response = server
        .put(&format!("/api/children/{}/settings", child.id))
        .json(&json!({
            "difficulty": "Hard",
            "letter_case": "uppercase",
            "streak_thresholds": [10, 4, 4],
        }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["difficulty"], "Hard");
    assert_eq!(body["letter_case"], "uppercase");
    assert_eq!(body["streak_thresholds"], json!([4, 10]));
    assert_eq!(body["letters_per_session"], 9);

    let response = server
        .get(&format!("/api/children/{}/settings", child.id))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["difficulty"], "Hard");
}

/// Test out-of-range settings are rejected without changing anything.
#[tokio::test]
async fn test_update_settings_validation() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let child = ctx.create_test_child("Gábor").await;

    for body in [
        json!({ "letters_per_session": 2 }),
        json!({ "letters_per_session": 16 }),
        json!({ "additional_sticker_interval": 51 }),
        json!({ "streak_thresholds": [0] }),
    ] {
        let response = server
            .put(&format!("/api/children/{}/settings", child.id))
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    let response = server
        .get(&format!("/api/children/{}/settings", child.id))
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["letters_per_session"], 9);
    assert_eq!(body["additional_sticker_interval"], 5);
}

/// Test generating rounds for each mode from the child's settings.
#[tokio::test]
async fn test_new_rounds() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let child = ctx.create_test_child("Hanna").await;

    server
        .put(&format!("/api/children/{}/settings", child.id))
        .json(&json!({ "difficulty": "Easy", "letters_per_session": 4, "letter_case": "lowercase" }))
        .await
        .assert_status_ok();

    let response = server
        .post(&format!("/api/children/{}/rounds", child.id))
        .json(&json!({ "mode": "find-letter" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["mode"], "find-letter");
    assert_eq!(body["cells"].as_array().unwrap().len(), 6);
    let index = body["target_index"].as_u64().unwrap() as usize;
    assert_eq!(body["cells"][index], body["target"]);

    let response = server
        .post(&format!("/api/children/{}/rounds", child.id))
        .json(&json!({ "mode": "match-case" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["mode"], "match-case");
    assert_eq!(body["upper"].as_array().unwrap().len(), 4);
    assert_eq!(body["lower"].as_array().unwrap().len(), 4);

    let response = server
        .post(&format!("/api/children/{}/rounds", child.id))
        .json(&json!({ "mode": "show-mark" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["target"]["style"], "lower");
}
