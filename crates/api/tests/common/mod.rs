use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use briefdesk_api::auth::jwt::{generate_access_token, JwtConfig};
use briefdesk_api::config::ServerConfig;
use briefdesk_api::routes;
use briefdesk_api::state::AppState;
use briefdesk_api::webhook::IntakeForwarder;
use briefdesk_core::types::DbId;
use briefdesk_mail::{MailError, Mailer, OutgoingEmail, SentMessage};

/// The pre-shared scheduler secret used across tests.
pub const TEST_CRON_SECRET: &str = "test-cron-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        app_base_url: "http://localhost:5173".to_string(),
        cron_secret: TEST_CRON_SECRET.to_string(),
        reminder_threshold_days: 7,
        intake_webhook_url: None,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Issue an access token the way the identity provider would.
pub fn access_token_for(user_id: DbId, email: &str, name: Option<&str>) -> String {
    generate_access_token(user_id, email, name, &test_config().jwt)
        .expect("token generation should not fail")
}

// ---------------------------------------------------------------------------
// Recording mailer
// ---------------------------------------------------------------------------

/// In-memory [`Mailer`] that records outgoing emails instead of talking to
/// Gmail. Recipients listed in `fail_for` get a simulated provider
/// rejection.
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    fail_for: HashSet<String>,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_for: HashSet::new(),
        })
    }

    /// A mailer that rejects sends addressed to any of `addresses`.
    pub fn failing_for(addresses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_for: addresses.iter().map(|a| a.to_string()).collect(),
        })
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<SentMessage, MailError> {
        if self.fail_for.contains(&email.to) {
            return Err(MailError::Send("simulated provider rejection".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(SentMessage {
            message_id: format!("test-msg-{}", sent.len()),
            access_token: "test-access-token".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build the full application router with all middleware layers, using the
/// given database pool and a default recording mailer.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_mailer(pool, RecordingMailer::new())
}

/// Build the app around a specific mailer so tests can inspect or fail
/// sends.
pub fn build_test_app_with_mailer(pool: PgPool, mailer: Arc<RecordingMailer>) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config),
        mailer,
        intake: Arc::new(IntakeForwarder::new()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// GET without credentials.
pub async fn get(app: Router, path: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// GET with an arbitrary bearer value (JWT or cron secret).
pub async fn get_bearer(app: Router, path: &str, bearer: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(path)
            .header(AUTHORIZATION, format!("Bearer {bearer}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST a JSON body without credentials.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST a JSON body with a bearer token.
pub async fn post_json_bearer(
    app: Router,
    path: &str,
    bearer: &str,
    body: serde_json::Value,
) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(AUTHORIZATION, format!("Bearer {bearer}"))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
