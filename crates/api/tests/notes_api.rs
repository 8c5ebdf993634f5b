//! HTTP-level integration tests for the notes API.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

const OWNER: &str = "6f1c2a4e-0b1d-4c55-9f0e-1a2b3c4d5e6f";

/// Create a note through the API and return its code.
async fn create(pool: &PgPool, owner: &str) -> String {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/notes", json!({ "user_id": owner })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["code"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_note_assigns_four_digit_code(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/notes", json!({ "user_id": OWNER })).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let code = json["data"]["code"].as_str().unwrap();
    let n: u16 = code.parse().unwrap();
    assert!((1000..=9999).contains(&n));
    assert_eq!(json["data"]["title"], "");
    assert_eq!(json["data"]["content"], "");
    assert_eq!(json["data"]["user_id"], OWNER);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn created_codes_are_unique(pool: PgPool) {
    let mut codes = Vec::new();
    for _ in 0..25 {
        codes.push(create(&pool, OWNER).await);
    }
    let mut deduped = codes.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), codes.len());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_invalid_owner(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/notes", json!({ "user_id": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Load / exists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_note_by_code(pool: PgPool) {
    let code = create(&pool, OWNER).await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/notes/{code}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["code"], code.as_str());
    assert!(json["data"]["updated_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_missing_note_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/notes/0001").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_code_is_rejected_before_lookup(pool: PgPool) {
    for uri in ["/api/v1/notes/12", "/api/v1/notes/abcd", "/api/v1/notes/12345/exists"] {
        let app = common::build_test_app(pool.clone());
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn exists_reflects_presence(pool: PgPool) {
    let code = create(&pool, OWNER).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/notes/{code}/exists")).await).await;
    assert_eq!(json["data"]["exists"], true);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/notes/0000/exists").await).await;
    assert_eq!(json["data"]["exists"], false);
}

// ---------------------------------------------------------------------------
// Save
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_then_reload_returns_new_title(pool: PgPool) {
    let code = create(&pool, OWNER).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/notes/{code}"),
        json!({ "title": "Groceries", "content": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/notes/{code}")).await).await;
    assert_eq!(json["data"]["title"], "Groceries");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_inserts_missing_note(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/api/v1/notes/2468",
        json!({ "title": "t", "content": "c", "user_id": OWNER }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/notes?user_id={OWNER}")).await).await;
    assert_eq!(json["data"][0]["code"], "2468");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn save_accepts_long_title(pool: PgPool) {
    let code = create(&pool, OWNER).await;
    let uri = format!("/api/v1/notes/{code}");
    let title = "x".repeat(2_000);

    let app = common::build_test_app(pool.clone());
    let response = put_json(app, &uri, json!({ "title": title, "content": "" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &uri).await).await;
    assert_eq!(json["data"]["title"], title.as_str());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stale_compare_and_swap_save_returns_409(pool: PgPool) {
    let code = create(&pool, OWNER).await;
    let uri = format!("/api/v1/notes/{code}");

    let app = common::build_test_app(pool.clone());
    let loaded = body_json(get(app, &uri).await).await;
    let seen = loaded["data"]["updated_at"].clone();

    // Writer A saves with the timestamp it loaded.
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &uri,
        json!({ "title": "", "content": "X", "expected_updated_at": seen }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Writer B loaded before A saved; its save is rejected.
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &uri,
        json!({ "title": "", "content": "Y", "expected_updated_at": seen }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &uri).await).await;
    assert_eq!(json["data"]["content"], "X");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn compare_and_swap_on_missing_note_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/api/v1/notes/1357",
        json!({ "title": "", "content": "", "expected_updated_at": "2026-01-01T00:00:00Z" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// List / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_only_returns_owned_notes(pool: PgPool) {
    let mine = create(&pool, OWNER).await;
    create(&pool, "someone-else").await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/notes?user_id={OWNER}")).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["code"], mine.as_str());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_then_lookup_reports_not_found(pool: PgPool) {
    let code = create(&pool, OWNER).await;
    let uri = format!("/api/v1/notes/{code}");

    let app = common::build_test_app(pool.clone());
    assert_eq!(delete(app, &uri).await.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("{uri}/exists")).await).await;
    assert_eq!(json["data"]["exists"], false);

    // Deleting again is still a success.
    let app = common::build_test_app(pool);
    assert_eq!(delete(app, &uri).await.status(), StatusCode::NO_CONTENT);
}
