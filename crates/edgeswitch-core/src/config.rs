// ── Runtime connection configuration ──
//
// Describes *how* to reach one switch. Carries credentials and tuning but
// never touches disk; the CLI (or any other host) builds a
// `ControllerConfig` and hands it to the `Coordinator`.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::CoreError;

/// Per-request timeout used when nothing else is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// How often the host is expected to call `Coordinator::refresh`.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(30);
pub const MIN_UPDATE_INTERVAL: Duration = Duration::from_secs(5);
pub const MAX_UPDATE_INTERVAL: Duration = Duration::from_secs(3600);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification. Default, since switches ship self-signed certs.
    #[default]
    DangerAcceptInvalid,
}

impl TlsVerification {
    /// Map the plain `verify_ssl` toggle.
    pub fn from_verify_ssl(verify_ssl: bool) -> Self {
        if verify_ssl {
            Self::SystemDefaults
        } else {
            Self::DangerAcceptInvalid
        }
    }

    pub fn verifies(&self) -> bool {
        !matches!(self, Self::DangerAcceptInvalid)
    }
}

/// Configuration for one switch.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Switch address as typed by the user; normalized by the client.
    pub url: String,
    pub username: String,
    pub password: SecretString,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Polling cadence hint for the host.
    pub update_interval: Duration,
}

impl ControllerConfig {
    pub fn new(url: impl Into<String>, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password,
            tls: TlsVerification::default(),
            timeout: DEFAULT_TIMEOUT,
            update_interval: DEFAULT_UPDATE_INTERVAL,
        }
    }

    /// Reject an update interval outside 5..=3600 seconds.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(MIN_UPDATE_INTERVAL..=MAX_UPDATE_INTERVAL).contains(&self.update_interval) {
            return Err(CoreError::Config {
                message: format!(
                    "update interval must be between {}s and {}s, got {}s",
                    MIN_UPDATE_INTERVAL.as_secs(),
                    MAX_UPDATE_INTERVAL.as_secs(),
                    self.update_interval.as_secs()
                ),
            });
        }
        Ok(())
    }
}
