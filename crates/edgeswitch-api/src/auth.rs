// Session authentication
//
// Token-based login/logout against `/api/v1.0/user/*`. A successful login
// returns the session token in the `x-auth-token` response header; the
// client stores it and attaches it to every later request.

use reqwest::Method;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::{AUTH_TOKEN_HEADER, EdgeSwitchClient, LOGIN_PATH, LOGOUT_PATH};
use crate::error::{Error, FailureKind};
use crate::response::is_success_envelope;
use crate::transport::{TransportConfig, encode_json};

/// Session state of an [`EdgeSwitchClient`].
#[derive(Debug, Clone, Default)]
pub enum AuthState {
    #[default]
    LoggedOut,
    LoggedIn { token: SecretString },
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Outcome of the connectivity self-test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    /// Human-readable failure message.
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<FailureKind>,
}

impl ConnectionTestResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            error_message: None,
            error_kind: None,
        }
    }

    pub fn failed(err: &Error) -> Self {
        Self {
            success: false,
            error_message: Some(err.to_string()),
            error_kind: Some(err.failure_kind()),
        }
    }
}

impl EdgeSwitchClient {
    /// Whether a session token is held.
    pub fn is_logged_in(&self) -> bool {
        self.auth.is_logged_in()
    }

    /// Authenticate with username/password.
    ///
    /// No-op when already logged in. Succeeds only when the switch answers
    /// HTTP 200 with the `{statusCode: 200, error: 0}` envelope and a
    /// non-empty `x-auth-token` header. Any other answer is an
    /// [`Error::Authentication`] carrying the switch's `detail` when present.
    ///
    /// `POST /api/v1.0/user/login`
    pub async fn login(&mut self) -> Result<(), Error> {
        if self.is_logged_in() {
            debug!("already logged in");
            return Ok(());
        }

        let http = self.connection()?;
        debug!(base_url = %self.base_url(), username = self.username(), "logging in");

        let body = encode_json(&LoginRequest {
            username: self.username(),
            password: self.password().expose_secret(),
        })?;
        let raw = self.send(&http, Method::POST, LOGIN_PATH, Some(body)).await?;

        if raw.status != StatusCode::OK || !is_success_envelope(&raw.body) {
            let reason = raw
                .body
                .get("detail")
                .and_then(Value::as_str)
                .map_or_else(|| format!("HTTP {}", raw.status.as_u16()), str::to_owned);
            return Err(Error::Authentication {
                message: format!("login failed: {reason}"),
            });
        }

        let token = raw
            .headers
            .get(AUTH_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Authentication {
                message: "login succeeded but no auth token was issued".into(),
            })?;

        self.auth = AuthState::LoggedIn {
            token: SecretString::from(token.to_owned()),
        };
        info!(base_url = %self.base_url(), "logged in to EdgeSwitch");
        Ok(())
    }

    /// End the session.
    ///
    /// Best effort: failures are logged and swallowed. The token and the
    /// connection pool are always released afterwards.
    ///
    /// `POST /api/v1.0/user/logout`
    pub async fn logout(&mut self) {
        let session = self.existing_connection().filter(|_| self.is_logged_in());
        if let Some(http) = session {
            match self.request(&http, Method::POST, LOGOUT_PATH, None).await {
                Ok(_) => info!("logged out of EdgeSwitch"),
                Err(e) => warn!(error = %e, "logout failed (non-fatal)"),
            }
        }
        self.auth = AuthState::LoggedOut;
        self.drop_connection();
    }

    /// Log out if needed and release the connection pool. Idempotent.
    pub async fn close(&mut self) {
        self.logout().await;
        debug!("client closed");
    }

    /// Verify that the switch is reachable and the credentials work.
    ///
    /// Performs a login followed by a logout. Never fails: errors are folded
    /// into the returned [`ConnectionTestResult`]. No session survives.
    pub async fn test_connection(&mut self) -> ConnectionTestResult {
        match self.login().await {
            Ok(()) => {
                self.logout().await;
                ConnectionTestResult::ok()
            }
            Err(e) => {
                debug!(error = %e, "connection test failed");
                self.auth = AuthState::LoggedOut;
                self.drop_connection();
                ConnectionTestResult::failed(&e)
            }
        }
    }

    /// Build a throwaway client and run [`test_connection`](Self::test_connection).
    ///
    /// Unlike constructing the client yourself, a malformed URL is reported
    /// as `invalid_url` instead of an `Err`.
    pub async fn check_connection(
        url: &str,
        username: &str,
        password: SecretString,
        transport: TransportConfig,
    ) -> ConnectionTestResult {
        match Self::new(url, username, password, transport) {
            Ok(mut client) => client.test_connection().await,
            Err(e) => ConnectionTestResult::failed(&e),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_state_is_logged_out() {
        assert!(!AuthState::default().is_logged_in());
        let state = AuthState::LoggedIn {
            token: SecretString::from("abc".to_string()),
        };
        assert!(state.is_logged_in());
    }

    #[test]
    fn token_is_redacted_in_debug_output() {
        let state = AuthState::LoggedIn {
            token: SecretString::from("super-secret-token".to_string()),
        };
        assert!(!format!("{state:?}").contains("super-secret-token"));
    }

    #[test]
    fn failed_result_carries_kind_and_message() {
        let result = ConnectionTestResult::failed(&Error::Timeout { timeout_secs: 30 });
        assert!(!result.success);
        assert_eq!(result.error_kind, Some(FailureKind::Timeout));
        assert!(result.error_message.unwrap().contains("30s"));
    }

    #[test]
    fn result_serializes_kind_in_snake_case() {
        let result = ConnectionTestResult::failed(&Error::Authentication {
            message: "bad".into(),
        });
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error_kind"], json!("invalid_auth"));

        let ok = serde_json::to_value(ConnectionTestResult::ok()).unwrap();
        assert_eq!(ok, json!({ "success": true }));
    }

    #[tokio::test]
    async fn check_connection_reports_invalid_url() {
        let result = EdgeSwitchClient::check_connection(
            "invalid_url",
            "ubnt",
            SecretString::from("ubnt".to_string()),
            TransportConfig::default(),
        )
        .await;
        assert!(!result.success);
        assert_eq!(result.error_kind, Some(FailureKind::InvalidUrl));
    }

    #[tokio::test]
    async fn logout_when_logged_out_is_a_noop() {
        let mut client = EdgeSwitchClient::new(
            "10.0.0.254",
            "ubnt",
            SecretString::from("ubnt".to_string()),
            TransportConfig::default(),
        )
        .unwrap();
        client.logout().await;
        client.close().await;
        assert!(!client.is_logged_in());
        assert!(!client.has_connection());
    }
}
