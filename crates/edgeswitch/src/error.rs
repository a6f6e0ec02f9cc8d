//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and per-category exit codes.

use miette::Diagnostic;
use thiserror::Error;

use edgeswitch_config::ConfigError;
use edgeswitch_core::{CoreError, FailureKind};

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the switch: {reason}")]
    #[diagnostic(
        code(edgeswitch::connection_failed),
        help(
            "Check that the switch is powered and reachable.\n\
             Self-signed certificate? Try: edgeswitch check --insecure"
        )
    )]
    ConnectionFailed { reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(edgeswitch::timeout),
        help("Increase timeout with --timeout or check switch responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {reason}")]
    #[diagnostic(
        code(edgeswitch::auth_failed),
        help(
            "Verify the username and password.\n\
             Run: edgeswitch config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, reason: String },

    #[error("No password configured for profile '{profile}'")]
    #[diagnostic(
        code(edgeswitch::no_credentials),
        help(
            "Store one with: edgeswitch config set-password --profile {profile}\n\
             Or set the EDGESWITCH_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Self-test ────────────────────────────────────────────────────
    #[error("Connection test failed ({kind})")]
    #[diagnostic(code(edgeswitch::check_failed))]
    CheckFailed { kind: FailureKind },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(edgeswitch::api_error))]
    ApiError { message: String },

    #[error("Unexpected {document} document: {message}")]
    #[diagnostic(
        code(edgeswitch::decode),
        help("The firmware may use a newer schema. Re-run with -vv for request details.")
    )]
    Decode {
        document: &'static str,
        message: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(edgeswitch::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(edgeswitch::profile_not_found),
        help("Available profiles: {available}")
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No switch configured")]
    #[diagnostic(
        code(edgeswitch::no_config),
        help(
            "Pass --url and --username, or add a profile to the config file.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(edgeswitch::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::Validation { .. } | Self::ProfileNotFound { .. } => exit_code::USAGE,
            Self::CheckFailed { kind } => match kind {
                FailureKind::InvalidAuth => exit_code::AUTH,
                FailureKind::CannotConnect => exit_code::CONNECTION,
                FailureKind::Timeout => exit_code::TIMEOUT,
                FailureKind::InvalidUrl => exit_code::USAGE,
                FailureKind::Unknown => exit_code::GENERAL,
            },
            _ => exit_code::GENERAL,
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            other => CliError::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidUrl { message } => CliError::Validation {
                field: "url".into(),
                reason: message,
            },
            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
            CoreError::AuthenticationFailed { message } => CliError::AuthFailed {
                profile: "default".into(),
                reason: message,
            },
            CoreError::ConnectionFailed { message } => CliError::ConnectionFailed { reason: message },
            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },
            CoreError::Api { message, code } => CliError::ApiError {
                message: match code {
                    Some(code) => format!("{message} (code {code})"),
                    None => message,
                },
            },
            CoreError::Decode { document, message } => CliError::Decode { document, message },
            CoreError::NotReady { source } | CoreError::UpdateFailed { source } => {
                CliError::from(*source)
            }
        }
    }
}

impl CliError {
    /// Attach the active profile name to authentication errors.
    pub fn for_profile(self, name: &str) -> Self {
        match self {
            Self::AuthFailed { reason, .. } => Self::AuthFailed {
                profile: name.into(),
                reason,
            },
            other => other,
        }
    }
}
