// EdgeSwitch HTTP client
//
// Owns the base URL, credentials and the lazily-built reqwest::Client that
// is reused for the whole session. Login/logout live in `auth.rs`; this
// module holds request mechanics and the read-only data endpoints.

use reqwest::Method;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;

use crate::auth::AuthState;
use crate::base_url::BaseUrl;
use crate::error::Error;
use crate::response::classify;
use crate::transport::{
    JSON_CONTENT_TYPE, RawResponse, TransportConfig, encode_json, map_transport_error,
};

// ── Endpoints ────────────────────────────────────────────────────────

pub const LOGIN_PATH: &str = "/api/v1.0/user/login";
pub const LOGOUT_PATH: &str = "/api/v1.0/user/logout";
pub const DEVICE_PATH: &str = "/api/v1.0/device";
pub const STATISTICS_PATH: &str = "/api/v1.0/statistics";
pub const INTERFACES_PATH: &str = "/api/v1.0/interfaces";

/// Response header carrying the session token after login; sent back on
/// every later request.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

// ── Client ───────────────────────────────────────────────────────────

/// Async client for one EdgeSwitch.
///
/// A client instance has a single logical caller: session-changing
/// operations take `&mut self`, and there is no internal locking. Wrap it
/// in a coordinator (see `edgeswitch-core`) when several tasks need it.
pub struct EdgeSwitchClient {
    base_url: BaseUrl,
    username: String,
    password: SecretString,
    transport: TransportConfig,
    /// Created on first use, dropped on logout/close.
    http: Option<reqwest::Client>,
    pub(crate) auth: AuthState,
}

impl EdgeSwitchClient {
    /// Create a client. The URL is normalized here, so a malformed address
    /// fails before any I/O.
    pub fn new(
        url: &str,
        username: impl Into<String>,
        password: SecretString,
        transport: TransportConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            base_url: BaseUrl::parse(url)?,
            username: username.into(),
            password,
            transport,
            http: None,
            auth: AuthState::LoggedOut,
        })
    }

    /// The normalized switch base URL.
    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }

    pub(crate) fn password(&self) -> &SecretString {
        &self.password
    }

    /// Whether a connection pool currently exists.
    pub fn has_connection(&self) -> bool {
        self.http.is_some()
    }

    // ── Connection management ────────────────────────────────────────

    /// Return the session's HTTP client, building it if there is none.
    pub(crate) fn connection(&mut self) -> Result<reqwest::Client, Error> {
        if let Some(http) = &self.http {
            return Ok(http.clone());
        }
        debug!(base_url = %self.base_url, "creating HTTP connection pool");
        let http = self.transport.build_client(&self.base_url)?;
        self.http = Some(http.clone());
        Ok(http)
    }

    pub(crate) fn existing_connection(&self) -> Option<reqwest::Client> {
        self.http.clone()
    }

    pub(crate) fn drop_connection(&mut self) {
        if self.http.take().is_some() {
            debug!("HTTP connection pool closed");
        }
    }

    /// The HTTP client if logged in, otherwise `NotLoggedIn` without
    /// touching the network.
    fn authenticated(&self, operation: &'static str) -> Result<&reqwest::Client, Error> {
        match (&self.auth, &self.http) {
            (AuthState::LoggedIn { .. }, Some(http)) => Ok(http),
            _ => Err(Error::NotLoggedIn { operation }),
        }
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send one request and read the full response.
    ///
    /// Attaches the session token when logged in. A body is sent as JSON
    /// bytes with an explicit `Content-Length`.
    pub(crate) async fn send(
        &self,
        http: &reqwest::Client,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, Error> {
        let url = self.base_url.join(path)?;
        debug!("{method} {url}");

        let mut builder = http.request(method, url);

        if let AuthState::LoggedIn { token } = &self.auth {
            let mut value =
                HeaderValue::from_str(token.expose_secret()).map_err(|e| Error::Authentication {
                    message: format!("session token is not a valid header value: {e}"),
                })?;
            value.set_sensitive(true);
            builder = builder.header(AUTH_TOKEN_HEADER, value);
        }

        if let Some(bytes) = body {
            builder = builder
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .header(CONTENT_LENGTH, bytes.len())
                .body(bytes);
        }

        let timeout_secs = self.transport.timeout_secs();
        let resp = builder
            .send()
            .await
            .map_err(|e| map_transport_error(&e, timeout_secs))?;
        let raw = RawResponse::read(resp, timeout_secs).await?;
        debug!(status = %raw.status, "response received");
        Ok(raw)
    }

    /// Send a request and classify the result.
    pub(crate) async fn request(
        &self,
        http: &reqwest::Client,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        let bytes = body.map(encode_json).transpose()?;
        let raw = self.send(http, method, path, bytes).await?;
        classify(raw.status, raw.body)
    }

    // ── Data endpoints ───────────────────────────────────────────────

    /// Device identity and capabilities.
    ///
    /// `GET /api/v1.0/device`
    pub async fn get_device_info(&self) -> Result<Value, Error> {
        let http = self.authenticated("get_device_info")?;
        let body = self.request(http, Method::GET, DEVICE_PATH, None).await?;
        debug!("device info fetched");
        Ok(body)
    }

    /// Device and per-interface counters. Typically a one-element list.
    ///
    /// `GET /api/v1.0/statistics`
    pub async fn get_statistics(&self) -> Result<Vec<Value>, Error> {
        let http = self.authenticated("get_statistics")?;
        let body = self
            .request(http, Method::GET, STATISTICS_PATH, None)
            .await?;
        debug!("statistics fetched");
        Ok(into_list(body))
    }

    /// Per-interface configuration.
    ///
    /// `GET /api/v1.0/interfaces`
    pub async fn get_interfaces(&self) -> Result<Vec<Value>, Error> {
        let http = self.authenticated("get_interfaces")?;
        let body = self
            .request(http, Method::GET, INTERFACES_PATH, None)
            .await?;
        debug!("interfaces fetched");
        Ok(into_list(body))
    }
}

/// List endpoints sometimes answer with a bare object; callers always get a
/// list.
pub fn into_list(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}
