use thiserror::Error;

/// Top-level error type for the `masthead-api` crate.
///
/// Covers every failure mode of a client call: missing credentials,
/// transport faults, non-200 statuses, body decoding, application-level
/// envelope errors, and local pre-flight validation.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// No usable API token at construction time (or one that cannot be
    /// carried in a header).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, TLS).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── API responses ───────────────────────────────────────────────
    /// Non-200 response. Carries the raw body verbatim for diagnostics.
    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The response envelope carried a non-null `error` field. The service
    /// rejected the operation (validation, conflict, not-found) even though
    /// the HTTP layer may have reported 200.
    #[error("Masthead API error: {message}")]
    Api {
        message: String,
        code: Option<String>,
    },

    // ── Local validation ────────────────────────────────────────────
    /// Request rejected before any network call was made.
    #[error("Invalid request: {message}")]
    Validation { message: String },
}

impl Error {
    /// Returns `true` if the server reported 404 for this call.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// Returns `true` if this is a transient transport failure. The client
    /// never retries on its own; callers can use this to decide.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Extract the application error code, if the service supplied one.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
