// ── Core error types ──
//
// User-facing errors from edgeswitch-core. Consumers never see reqwest
// errors or raw classifier output; the `From<edgeswitch_api::Error>` impl
// folds transport-layer errors into these variants while keeping the
// four-way category.

use edgeswitch_api::{ErrorCategory, FailureKind};
use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid switch URL: {message}")]
    InvalidUrl { message: String },

    // ── Authentication errors ────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── Connection errors ────────────────────────────────────────────
    #[error("{message}")]
    ConnectionFailed { message: String },

    #[error("Switch request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// Application status code from the response body, if any.
        code: Option<i64>,
    },

    /// A response document could not be mapped onto the typed model.
    #[error("Failed to decode {document}: {message}")]
    Decode {
        document: &'static str,
        message: String,
    },

    // ── Lifecycle errors ─────────────────────────────────────────────
    /// Initial setup failed; the host should retry later.
    #[error("Switch not ready: {source}")]
    NotReady {
        #[source]
        source: Box<CoreError>,
    },

    /// One refresh cycle failed; previously fetched data is kept as stale.
    #[error("Update failed: {source}")]
    UpdateFailed {
        #[source]
        source: Box<CoreError>,
    },
}

impl CoreError {
    /// Coarse category, looking through lifecycle wrappers.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Config { .. } | Self::InvalidUrl { .. } => ErrorCategory::Config,
            Self::AuthenticationFailed { .. } => ErrorCategory::Auth,
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => ErrorCategory::Connection,
            Self::Api { .. } | Self::Decode { .. } => ErrorCategory::Api,
            Self::NotReady { source } | Self::UpdateFailed { source } => source.category(),
        }
    }

    /// Self-test error kind for this error.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::InvalidUrl { .. } => FailureKind::InvalidUrl,
            Self::AuthenticationFailed { .. } => FailureKind::InvalidAuth,
            Self::ConnectionFailed { .. } => FailureKind::CannotConnect,
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::Config { .. } | Self::Api { .. } | Self::Decode { .. } => FailureKind::Unknown,
            Self::NotReady { source } | Self::UpdateFailed { source } => source.failure_kind(),
        }
    }

    /// The innermost error, with lifecycle wrappers removed.
    pub fn root(&self) -> &CoreError {
        match self {
            Self::NotReady { source } | Self::UpdateFailed { source } => source.root(),
            other => other,
        }
    }

    pub(crate) fn not_ready(self) -> Self {
        Self::NotReady {
            source: Box::new(self),
        }
    }

    pub(crate) fn update_failed(self) -> Self {
        Self::UpdateFailed {
            source: Box::new(self),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<edgeswitch_api::Error> for CoreError {
    fn from(err: edgeswitch_api::Error) -> Self {
        use edgeswitch_api::Error as ApiError;

        match err {
            ApiError::InvalidUrl { message } => CoreError::InvalidUrl { message },
            ApiError::Authentication { message } => CoreError::AuthenticationFailed { message },
            ApiError::NotLoggedIn { operation } => CoreError::AuthenticationFailed {
                message: format!("not logged in (during {operation})"),
            },
            ApiError::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            ref e @ (ApiError::Connection { .. } | ApiError::Tls { .. } | ApiError::Http { .. }) => {
                CoreError::ConnectionFailed {
                    message: e.to_string(),
                }
            }
            ApiError::Api { code, message } => CoreError::Api {
                message,
                code: Some(code),
            },
            ApiError::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Deserialization error: {message}"),
                code: None,
            },
            ref e @ ApiError::Unexpected { .. } => CoreError::Api {
                message: e.to_string(),
                code: None,
            },
        }
    }
}
