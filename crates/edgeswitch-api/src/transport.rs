// Shared transport configuration and wire helpers.
//
// Builds the reqwest::Client the switch client reuses for its whole session,
// serializes request bodies with an explicit length, and decodes response
// bodies tolerantly.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, REFERER};
use serde::Serialize;
use serde_json::{Value, json};

use crate::base_url::BaseUrl;
use crate::error::Error;

/// Content type the switch expects on every request.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Fixed identifying user agent.
pub const USER_AGENT: &str = concat!("edgeswitch/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// TLS verification mode (api-level mirror of core's `TlsVerification`).
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (for self-signed switches).
    DangerAcceptInvalid,
}

impl TlsMode {
    /// Map the plain verify-SSL toggle.
    pub fn from_verify(verify_ssl: bool) -> Self {
        if verify_ssl {
            Self::System
        } else {
            Self::DangerAcceptInvalid
        }
    }
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` for talking to the switch at `base`.
    ///
    /// `Content-Type` and `Referer` are installed as default headers so every
    /// request carries them.
    pub fn build_client(&self, base: &BaseUrl) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        let referer = HeaderValue::from_str(&base.referer()).map_err(|e| Error::InvalidUrl {
            message: format!("base URL is not a valid header value: {e}"),
        })?;
        headers.insert(REFERER, referer);

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path).map_err(|e| Error::Tls {
                    message: format!("failed to read CA cert {}: {e}", path.display()),
                })?;
                let cert = reqwest::Certificate::from_pem(&cert_pem).map_err(|e| Error::Tls {
                    message: format!("invalid CA cert: {e}"),
                })?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder.build().map_err(|e| Error::Unexpected {
            message: "failed to build HTTP client".into(),
            source: Box::new(e),
        })
    }

    pub(crate) fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }
}

/// Serialize a request body to JSON bytes.
///
/// The caller sends `bytes.len()` as an explicit `Content-Length`; the
/// switch rejects chunked or mis-framed bodies.
pub fn encode_json<T: Serialize + ?Sized>(body: &T) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(body).map_err(|e| Error::Unexpected {
        message: "failed to serialize request body".into(),
        source: Box::new(e),
    })
}

/// Decode a response body.
///
/// Declared JSON must parse. Anything else is tried as JSON and otherwise
/// wrapped as `{"message": <raw text>}` so callers always get a structured
/// value.
pub fn decode_body(text: &str, declared_json: bool) -> Result<Value, Error> {
    if declared_json {
        return serde_json::from_str(text).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: text.to_owned(),
        });
    }
    Ok(serde_json::from_str(text).unwrap_or_else(|_| json!({ "message": text })))
}

/// Whether the response declares an `application/json` body (parameters
/// such as `charset` are ignored).
pub fn is_json_content(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// A fully-read response: status, headers and decoded body.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl RawResponse {
    pub(crate) async fn read(resp: reqwest::Response, timeout_secs: u64) -> Result<Self, Error> {
        let status = resp.status();
        let headers = resp.headers().clone();
        let text = resp
            .text()
            .await
            .map_err(|e| map_transport_error(&e, timeout_secs))?;
        let body = decode_body(&text, is_json_content(&headers))?;
        Ok(Self {
            status,
            headers,
            body,
        })
    }
}

/// Translate a reqwest failure into the crate taxonomy.
///
/// Timeouts become [`Error::Timeout`]. A source chain mentioning
/// certificates or TLS becomes [`Error::Tls`]; the rest is
/// [`Error::Connection`]. The top-level message carries the request URL and
/// is left out of the TLS match.
pub(crate) fn map_transport_error(err: &reqwest::Error, timeout_secs: u64) -> Error {
    if err.is_timeout() {
        return Error::Timeout { timeout_secs };
    }

    let detail = error_chain(err);
    if std::error::Error::source(err).is_some_and(mentions_tls) {
        return Error::Tls { message: detail };
    }

    let message = if err.is_connect() {
        format!("{detail}. Check the URL and network connection")
    } else {
        detail
    };
    Error::Connection { message }
}

fn mentions_tls(err: &(dyn std::error::Error + 'static)) -> bool {
    let lower = error_chain(err).to_lowercase();
    lower.contains("certificate") || lower.contains("tls") || lower.contains("ssl")
}

/// Flatten an error and its sources into one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
