mod common;

use axum::http::StatusCode;

use briefdesk_core::link::TOKEN_LENGTH;

/// Creating a link requires an access token.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_requires_auth(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        "/api/v1/links",
        serde_json::json!({ "client_email": "client@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A created link carries a server-generated token, the shareable URL, and
/// schema defaults.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_returns_token_and_url(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let token = common::access_token_for(1, "dana@example.com", Some("Dana"));

    let response = common::post_json_bearer(
        app,
        "/api/v1/links",
        &token,
        serde_json::json!({
            "client_email": "client@example.com",
            "client_name": "Client Co",
            "language": "en"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::body_json(response).await;
    let data = &body["data"];
    let link_token = data["token"].as_str().unwrap();
    assert_eq!(link_token.len(), TOKEN_LENGTH);
    assert_eq!(data["status"], "pending");
    assert_eq!(data["language"], "en");
    assert_eq!(data["creator_email"], "dana@example.com");
    assert_eq!(data["creator_name"], "Dana");
    assert!(data["reminder_sent_at"].is_null());
    assert_eq!(
        data["url"].as_str().unwrap(),
        format!("http://localhost:5173/brief/{link_token}")
    );
}

/// An unknown locale tag falls back to Hebrew.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_defaults_to_hebrew(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let token = common::access_token_for(1, "dana@example.com", None);

    let response =
        common::post_json_bearer(app, "/api/v1/links", &token, serde_json::json!({})).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = common::body_json(response).await;
    assert_eq!(body["data"]["language"], "he");
    assert!(body["data"]["client_email"].is_null());
}

/// Malformed client emails are rejected before touching the database.
#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_malformed_client_email(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let token = common::access_token_for(1, "dana@example.com", None);

    let response = common::post_json_bearer(
        app,
        "/api/v1/links",
        &token,
        serde_json::json!({ "client_email": "not-an-email" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Listing is scoped to the authenticated creator.
#[sqlx::test(migrations = "../db/migrations")]
async fn list_returns_only_own_links(pool: sqlx::PgPool) {
    let dana = common::access_token_for(1, "dana@example.com", Some("Dana"));
    let noam = common::access_token_for(2, "noam@example.com", Some("Noam"));

    let app = common::build_test_app(pool.clone());
    common::post_json_bearer(app, "/api/v1/links", &dana, serde_json::json!({})).await;
    let app = common::build_test_app(pool.clone());
    common::post_json_bearer(app, "/api/v1/links", &noam, serde_json::json!({})).await;

    let app = common::build_test_app(pool);
    let response = common::get_bearer(app, "/api/v1/links", &dana).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let links = body["data"].as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["creator_email"], "dana@example.com");
}

/// The public fetch exposes only the trimmed projection.
#[sqlx::test(migrations = "../db/migrations")]
async fn get_by_token_is_public_and_trimmed(pool: sqlx::PgPool) {
    let auth = common::access_token_for(1, "dana@example.com", Some("Dana"));
    let app = common::build_test_app(pool.clone());
    let created = common::body_json(
        common::post_json_bearer(app, "/api/v1/links", &auth, serde_json::json!({})).await,
    )
    .await;
    let link_token = created["data"]["token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool);
    let response = common::get(app, &format!("/api/v1/links/{link_token}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    let data = &body["data"];
    assert_eq!(data["creator_name"], "Dana");
    assert_eq!(data["status"], "pending");
    // Internal fields never leave the server on the public route.
    assert!(data.get("creator_email").is_none());
    assert!(data.get("id").is_none());
    assert!(data.get("reminder_sent_at").is_none());
}

/// Unknown tokens are a 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn get_unknown_token_is_404(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/api/v1/links/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Completion succeeds once, conflicts afterwards, and 404s for unknown
/// tokens.
#[sqlx::test(migrations = "../db/migrations")]
async fn complete_transitions_exactly_once(pool: sqlx::PgPool) {
    let auth = common::access_token_for(1, "dana@example.com", None);
    let app = common::build_test_app(pool.clone());
    let created = common::body_json(
        common::post_json_bearer(app, "/api/v1/links", &auth, serde_json::json!({})).await,
    )
    .await;
    let link_token = created["data"]["token"].as_str().unwrap().to_string();
    let path = format!("/api/v1/links/{link_token}/complete");

    let submission = serde_json::json!({ "submission": { "company": "Acme" } });

    let app = common::build_test_app(pool.clone());
    let response = common::post_json(app, &path, submission.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["status"], "completed");

    let app = common::build_test_app(pool.clone());
    let response = common::post_json(app, &path, submission).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let app = common::build_test_app(pool);
    let response = common::post_json(
        app,
        "/api/v1/links/missing/complete",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
