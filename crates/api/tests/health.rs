mod common;

use axum::http::StatusCode;

/// Health endpoint reports service and database status.
#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_ok(pool: sqlx::PgPool) {
    let app = common::build_test_app(pool);
    let response = common::get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
}
