use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for the `edgeswitch-api` crate.
///
/// Every variant belongs to exactly one [`ErrorCategory`]; callers that only
/// care about the coarse outcome should match on [`Error::category`].
/// `edgeswitch-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// The switch address could not be turned into a usable base URL.
    /// Raised before any I/O happens.
    #[error("Invalid switch URL: {message}")]
    InvalidUrl { message: String },

    // ── Authentication ──────────────────────────────────────────────
    /// Bad credentials, missing token, or an HTTP/application 401/403.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A data call was issued before a successful login.
    #[error("Not logged in -- call login() before {operation}")]
    NotLoggedIn { operation: &'static str },

    // ── Transport ───────────────────────────────────────────────────
    /// Connection refused, DNS failure, reset, or a body read failure.
    #[error("Cannot connect to switch: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS handshake or certificate error.
    #[error(
        "SSL connection failed: {message}. Check the URL, or disable SSL verification \
         for switches with self-signed certificates"
    )]
    Tls { message: String },

    /// Non-auth HTTP status >= 400 without an application status code.
    #[error("Request failed (HTTP {status}): {message}")]
    Http { status: u16, message: String },

    // ── Application ─────────────────────────────────────────────────
    /// Error embedded in the response body (`statusCode` != 200).
    #[error("EdgeSwitch API error {code}: {message}")]
    Api { code: i64, message: String },

    /// JSON decoding failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Anything else, chained to its cause.
    #[error("Unexpected error: {message}")]
    Unexpected {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// The four error categories callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ErrorCategory {
    #[strum(serialize = "ConfigError")]
    Config,
    #[strum(serialize = "AuthError")]
    Auth,
    #[strum(serialize = "ConnectionError")]
    Connection,
    #[strum(serialize = "APIError")]
    Api,
}

/// Error kinds reported by the connectivity self-test.
///
/// String forms (`cannot_connect`, `invalid_auth`, ...) are stable and meant
/// to be shown to users or used as form error keys.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    CannotConnect,
    InvalidAuth,
    InvalidUrl,
    Timeout,
    Unknown,
}

impl Error {
    /// Coarse category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidUrl { .. } => ErrorCategory::Config,
            Self::Authentication { .. } | Self::NotLoggedIn { .. } => ErrorCategory::Auth,
            Self::Connection { .. } | Self::Timeout { .. } | Self::Tls { .. } | Self::Http { .. } => {
                ErrorCategory::Connection
            }
            Self::Api { .. } | Self::Deserialization { .. } | Self::Unexpected { .. } => {
                ErrorCategory::Api
            }
        }
    }

    /// Map onto the self-test error kinds.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::InvalidUrl { .. } => FailureKind::InvalidUrl,
            Self::Authentication { .. } | Self::NotLoggedIn { .. } => FailureKind::InvalidAuth,
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::Connection { .. } | Self::Tls { .. } | Self::Http { .. } => {
                FailureKind::CannotConnect
            }
            Self::Api { .. } | Self::Deserialization { .. } | Self::Unexpected { .. } => {
                FailureKind::Unknown
            }
        }
    }

    /// Returns `true` if logging in again might resolve this error.
    pub fn is_auth(&self) -> bool {
        self.category() == ErrorCategory::Auth
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection { .. } | Self::Timeout { .. })
            || matches!(self, Self::Http { status, .. } if *status >= 500)
    }
}
