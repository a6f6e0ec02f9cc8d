// Response classification
//
// The switch often answers HTTP 200 while embedding the real outcome in the
// body: `{"statusCode": 401, "error": 1, "detail": "..."}`. Classification
// checks the application status first and only then the HTTP status.

use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::error::Error;

/// Application status code meaning success.
pub const APP_STATUS_OK: i64 = 200;

/// Application error code meaning success.
pub const APP_ERROR_NONE: i64 = 0;

/// Classify a decoded response.
///
/// 1. `statusCode == 200` and `error == 0`: success, body returned as-is.
/// 2. `statusCode` present and not 200: 401/403 become
///    [`Error::Authentication`], anything else [`Error::Api`]. The message
///    comes from `detail`, then `message`, then `"EdgeSwitch error <code>"`.
/// 3. Otherwise the HTTP status decides: 401 is
///    [`Error::Authentication`], any other status >= 400 is [`Error::Http`],
///    and everything below 400 is success.
pub fn classify(status: StatusCode, body: Value) -> Result<Value, Error> {
    if let Value::Object(map) = &body {
        let app_status = map.get("statusCode").and_then(Value::as_i64);
        let app_error = map.get("error").and_then(Value::as_i64);

        match app_status {
            Some(APP_STATUS_OK) if app_error == Some(APP_ERROR_NONE) => return Ok(body),
            Some(code) if code != APP_STATUS_OK => {
                let message = detail_or_message(map)
                    .unwrap_or_else(|| format!("EdgeSwitch error {code}"));
                return Err(if code == 401 || code == 403 {
                    Error::Authentication { message }
                } else {
                    Error::Api { code, message }
                });
            }
            _ => {}
        }
    }

    if status.is_client_error() || status.is_server_error() {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned);
        return Err(if status == StatusCode::UNAUTHORIZED {
            Error::Authentication { message }
        } else {
            Error::Http {
                status: status.as_u16(),
                message,
            }
        });
    }

    Ok(body)
}

/// `true` when the body is the `{statusCode: 200, error: 0}` success envelope.
pub fn is_success_envelope(body: &Value) -> bool {
    body.get("statusCode").and_then(Value::as_i64) == Some(APP_STATUS_OK)
        && body.get("error").and_then(Value::as_i64) == Some(APP_ERROR_NONE)
}

fn detail_or_message(map: &Map<String, Value>) -> Option<String> {
    map.get("detail")
        .and_then(Value::as_str)
        .or_else(|| map.get("message").and_then(Value::as_str))
        .map(str::to_owned)
}
