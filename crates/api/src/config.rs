use crate::auth::jwt::JwtConfig;

/// Default reminder eligibility threshold in business days.
const DEFAULT_REMINDER_THRESHOLD_DAYS: u32 = 7;

/// Server configuration loaded from environment variables.
///
/// All fields except the secrets have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public base URL of the brief form app; deep links are
    /// `<app_base_url>/brief/<token>`.
    pub app_base_url: String,
    /// Pre-shared secret the external scheduler presents as a bearer token.
    pub cron_secret: String,
    /// Business-day age at which a pending brief becomes overdue.
    pub reminder_threshold_days: u32,
    /// Automation webhook receiving completed submissions, if configured.
    pub intake_webhook_url: Option<String>,
    /// JWT validation configuration (shared secret with the identity
    /// provider).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `APP_BASE_URL`            | `http://localhost:5173`    |
    /// | `CRON_SECRET`             | **required**               |
    /// | `REMINDER_THRESHOLD_DAYS` | `7`                        |
    /// | `INTAKE_WEBHOOK_URL`      | unset (forwarding off)     |
    ///
    /// # Panics
    ///
    /// Panics if `CRON_SECRET` (or `JWT_SECRET`, via [`JwtConfig`]) is
    /// missing or empty.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let app_base_url = std::env::var("APP_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .trim_end_matches('/')
            .to_string();

        let cron_secret =
            std::env::var("CRON_SECRET").expect("CRON_SECRET must be set in the environment");
        assert!(!cron_secret.is_empty(), "CRON_SECRET must not be empty");

        let reminder_threshold_days: u32 = std::env::var("REMINDER_THRESHOLD_DAYS")
            .unwrap_or_else(|_| DEFAULT_REMINDER_THRESHOLD_DAYS.to_string())
            .parse()
            .expect("REMINDER_THRESHOLD_DAYS must be a valid u32");

        let intake_webhook_url = std::env::var("INTAKE_WEBHOOK_URL")
            .ok()
            .filter(|s| !s.is_empty());

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_base_url,
            cron_secret,
            reminder_threshold_days,
            intake_webhook_url,
            jwt,
        }
    }
}
