/// Domain-level error type shared across crates.
///
/// HTTP mapping happens in the API layer; this enum stays transport-agnostic.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A lookup by an external handle (link token, user id) found nothing.
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
