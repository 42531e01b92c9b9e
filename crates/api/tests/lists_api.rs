//! HTTP-level integration tests for the `/api/v1/lists` endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete, get, get_auth, insert_user, post_json, post_raw_json, token_for,
};
use rankly_api::auth::session::SessionUser;
use serde_json::json;
use sqlx::PgPool;

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn create_list(pool: &PgPool, token: &str, body: serde_json::Value) -> String {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/lists", Some(token), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// Publish
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_201_and_ranks_in_submitted_order(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let token = token_for(&alice);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/lists",
        Some(&token),
        json!({
            "title": "Top 3 Films",
            "isPublic": true,
            "items": [{"name": "A"}, {"name": "B"}, {"name": "C"}]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["data"]["title"], "Top 3 Films");
    assert_eq!(created["data"]["ownerId"], "alice");
    assert_eq!(created["data"]["isPublic"], true);
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/lists/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let detail = body_json(response).await;
    let items = detail["data"]["items"].as_array().unwrap();
    let ranked: Vec<(i64, &str)> = items
        .iter()
        .map(|i| (i["rank"].as_i64().unwrap(), i["name"].as_str().unwrap()))
        .collect();
    assert_eq!(ranked, vec![(1, "A"), (2, "B"), (3, "C")]);
    assert_eq!(detail["data"]["owner"]["name"], "Alice");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_without_session_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/lists", None, json!({"title": "T"})).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
    assert_eq!(count(&pool, "lists").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_forged_token_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/lists",
        Some("not.a.token"),
        json!({"title": "T"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_blank_title_returns_400_and_persists_nothing(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let token = token_for(&alice);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/lists",
        Some(&token),
        json!({"title": "   ", "items": [{"name": "A"}]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Title is required");
    assert_eq!(count(&pool, "lists").await, 0);
    assert_eq!(count(&pool, "list_items").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_nameless_item_returns_400(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let token = token_for(&alice);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/lists",
        Some(&token),
        json!({"title": "T", "items": [{"name": "A"}, {"name": ""}]}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Item 2 is missing a name");
    assert_eq!(count(&pool, "lists").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_defaults_to_private(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let token = token_for(&alice);

    let id = create_list(&pool, &token, json!({"title": "Secret"})).await;

    let app = common::build_test_app(pool);
    let detail = body_json(get(app, &format!("/api/v1/lists/{id}")).await).await;
    assert_eq!(detail["data"]["isPublic"], false);
    assert_eq!(detail["data"]["items"].as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Browse and lookup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_all_returns_only_public_lists(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let token = token_for(&alice);

    create_list(&pool, &token, json!({"title": "Shown", "isPublic": true})).await;
    create_list(&pool, &token, json!({"title": "Hidden", "isPublic": false})).await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/lists").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Shown"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_all_honours_limit(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let token = token_for(&alice);
    for n in 0..3 {
        create_list(&pool, &token, json!({"title": format!("L{n}"), "isPublic": true})).await;
    }

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/lists?limit=2").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn get_unknown_list_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/lists/{}", uuid::Uuid::new_v4())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_owner_delete_returns_403_and_keeps_list(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let bob = insert_user(&pool, "bob", "Bob").await;

    let id = create_list(
        &pool,
        &token_for(&alice),
        json!({"title": "Mine", "items": [{"name": "A"}, {"name": "B"}]}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/lists/{id}"), Some(&token_for(&bob))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");

    assert_eq!(count(&pool, "lists").await, 1);
    assert_eq!(count(&pool, "list_items").await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_delete_removes_list_and_items(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let token = token_for(&alice);
    let id = create_list(
        &pool,
        &token,
        json!({"title": "Gone", "items": [{"name": "A"}]}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/lists/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["success"], true);

    assert_eq!(count(&pool, "list_items").await, 0);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/lists/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_unknown_list_returns_404(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let app = common::build_test_app(pool);
    let response = delete(
        app,
        &format!("/api/v1/lists/{}", uuid::Uuid::new_v4()),
        Some(&token_for(&alice)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Own lists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn mine_filters_by_visibility(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let bob = insert_user(&pool, "bob", "Bob").await;
    let token = token_for(&alice);

    create_list(&pool, &token, json!({"title": "Pub", "isPublic": true})).await;
    create_list(&pool, &token, json!({"title": "Priv"})).await;
    create_list(&pool, &token_for(&bob), json!({"title": "Bob's", "isPublic": true})).await;

    let app = common::build_test_app(pool.clone());
    let all = body_json(get_auth(app, "/api/v1/me/lists", &token).await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool.clone());
    let private = body_json(get_auth(app, "/api/v1/me/lists?visibility=private", &token).await).await;
    let titles: Vec<&str> = private["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Priv"]);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/me/lists?visibility=secret", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Item payloads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn item_description_is_stored_as_note(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let id = create_list(
        &pool,
        &token_for(&alice),
        json!({
            "title": "Reasons",
            "items": [{"name": "A", "rank": 1, "description": "why", "imageUrl": ""}]
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/lists/{id}/items")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"][0]["note"], "why");
    assert!(json["data"][0]["imageUrl"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn items_endpoint_ranks_and_rejects_unknown_list(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let id = create_list(
        &pool,
        &token_for(&alice),
        json!({"title": "T", "items": [{"name": "A"}, {"name": "B"}]}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, &format!("/api/v1/lists/{id}/items")).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "B"]);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/lists/{}/items", uuid::Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mistyped_body_returns_validation_envelope(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;
    let token = token_for(&alice);

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/lists",
        Some(&token),
        json!({"title": "T", "items": [{"name": 7}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let app = common::build_test_app(pool.clone());
    let response = post_raw_json(app, "/api/v1/lists", Some(&token), "{\"title\": ").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    assert_eq!(count(&pool, "lists").await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_without_user_record_cannot_publish(pool: PgPool) {
    let ghost = SessionUser {
        id: "ghost".to_string(),
        name: "Ghost".to_string(),
        email: "ghost@example.com".to_string(),
        image: None,
    };

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/lists",
        Some(&token_for(&ghost)),
        json!({"title": "T"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(count(&pool, "lists").await, 0);
}

// ---------------------------------------------------------------------------
// Malformed ids
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_id_is_not_found_in_json(pool: PgPool) {
    let alice = insert_user(&pool, "alice", "Alice").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/lists/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "List not found");

    let app = common::build_test_app(pool);
    let response = delete(app, "/api/v1/lists/not-a-uuid", Some(&token_for(&alice))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}
