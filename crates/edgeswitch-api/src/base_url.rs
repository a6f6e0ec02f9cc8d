// Switch address normalization
//
// Turns whatever the user typed ("10.0.0.254", "https://switch.lan/",
// "http://192.168.1.2:8080") into the base URL every endpoint
// path is appended to.

use std::fmt;

use url::Url;

use crate::error::Error;

const DEFAULT_SCHEME: &str = "https://";

/// Normalized switch base URL: scheme + authority (+ optional path), no
/// trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Validate and normalize a raw switch address.
    ///
    /// - Empty input is rejected.
    /// - `https://` is prepended when neither `http://` nor `https://` is given.
    /// - The result must parse and carry a host.
    /// - Host plausibility is a loose heuristic, not DNS validation: hosts
    ///   with a dot or made only of digits/dots pass; purely alphabetic
    ///   hosts and hosts with underscores are rejected; everything else
    ///   (hyphenated lab names, IPv6 literals) passes.
    /// - Trailing slashes are stripped. Otherwise the address is kept as
    ///   typed; parsing only validates it.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(Error::InvalidUrl {
                message: "URL must not be empty".into(),
            });
        }

        let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_owned()
        } else {
            format!("{DEFAULT_SCHEME}{raw}")
        };

        let url = Url::parse(&with_scheme).map_err(|e| Error::InvalidUrl {
            message: format!("{raw}: {e}"),
        })?;

        let host = url.host_str().filter(|h| !h.is_empty()).ok_or_else(|| {
            Error::InvalidUrl {
                message: format!("{raw}: missing host"),
            }
        })?;

        if !is_plausible_host(host) {
            return Err(Error::InvalidUrl {
                message: format!("{raw}: implausible host name '{host}'"),
            });
        }

        Ok(Self(with_scheme.trim_end_matches('/').to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value sent in the `Referer` header: the base URL with a trailing slash.
    pub fn referer(&self) -> String {
        format!("{}/", self.0)
    }

    /// Append an absolute endpoint path (e.g. `/api/v1.0/device`).
    pub fn join(&self, path: &str) -> Result<Url, Error> {
        let full = format!("{}{path}", self.0);
        Url::parse(&full).map_err(|e| Error::InvalidUrl {
            message: format!("{full}: {e}"),
        })
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_plausible_host(host: &str) -> bool {
    if host.contains('.') || host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return true;
    }
    !(host.chars().all(char::is_alphabetic) || host.contains('_'))
}
