//! HTTP-level integration tests for the `/configurations` resource.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

async fn create(pool: &PgPool, body: serde_json::Value) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/configurations", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

fn labels(json: &serde_json::Value) -> Vec<String> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|c| c["label"].as_str().unwrap().to_string())
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let json = create(&pool, json!({ "category": "contact_labels" })).await;

    assert_eq!(json["category"], "contact_labels");
    assert_eq!(json["label"], "New Configuration Entry");
    assert_eq!(json["description"], "New Description");
    assert_eq!(json["is_hidden"], false);
    assert_eq!(json["is_disabled"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_requires_category(pool: PgPool) {
    for body in [json!({ "label": "Work" }), json!({ "category": "  " })] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(app, "/api/v1/configurations", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_label_is_a_server_error(pool: PgPool) {
    create(&pool, json!({ "category": "contact_labels", "label": "Work" })).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/configurations",
        json!({ "category": "primary_industry", "label": "Work" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("duplicate key"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_hides_hidden_and_disabled_by_default(pool: PgPool) {
    create(&pool, json!({ "category": "contact_labels", "label": "Personal" })).await;
    create(
        &pool,
        json!({ "category": "contact_labels", "label": "Secret", "is_hidden": true }),
    )
    .await;
    create(
        &pool,
        json!({ "category": "primary_industry", "label": "Retired", "is_disabled": true }),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/configurations").await).await;
    assert_eq!(labels(&json), vec!["Personal"]);

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get_auth(
            app,
            "/api/v1/configurations?include_hidden=true&include_disabled=true",
        )
        .await,
    )
    .await;
    assert_eq!(labels(&json), vec!["Personal", "Secret", "Retired"]);

    let app = common::build_test_app(pool);
    let json = body_json(
        get_auth(
            app,
            "/api/v1/configurations?include_hidden=true&category=contact_labels",
        )
        .await,
    )
    .await;
    assert_eq!(labels(&json), vec!["Personal", "Secret"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_label_and_description(pool: PgPool) {
    create(
        &pool,
        json!({ "category": "primary_industry", "label": "Biotech", "description": "Life sciences" }),
    )
    .await;
    create(
        &pool,
        json!({ "category": "primary_industry", "label": "Software", "description": "SaaS and tech tools" }),
    )
    .await;
    create(&pool, json!({ "category": "primary_industry", "label": "Energy" })).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/configurations/search?query=TECH").await).await;
    assert_eq!(labels(&json), vec!["Biotech", "Software"]);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/configurations/search?query=%20").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_put_updates_only_given_fields(pool: PgPool) {
    let created = create(
        &pool,
        json!({ "category": "contact_labels", "label": "Work", "description": "Office" }),
    )
    .await;
    let uri = format!("/api/v1/configurations/{}", created["id"]);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(app, &uri, json!({ "is_hidden": true })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["is_hidden"], true);
    assert_eq!(json["label"], "Work");
    assert_eq!(json["description"], "Office");
    assert_eq!(json["category"], "contact_labels");

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, &uri).await).await;
    assert_eq!(json["is_hidden"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_configuration(pool: PgPool) {
    let created = create(&pool, json!({ "category": "contact_labels", "label": "Work" })).await;
    let uri = format!("/api/v1/configurations/{}", created["id"]);

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "success": true }));

    let app = common::build_test_app(pool.clone());
    assert_eq!(get_auth(app, &uri).await.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool.clone());
    assert_eq!(delete_auth(app, &uri).await.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = put_json_auth(app, &uri, json!({ "label": "X" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
