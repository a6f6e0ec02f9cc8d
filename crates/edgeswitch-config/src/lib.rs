//! Shared configuration for EdgeSwitch tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `edgeswitch_core::ControllerConfig`. The CLI adds
//! flag-aware wrappers on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use edgeswitch_core::config::{MAX_UPDATE_INTERVAL, MIN_UPDATE_INTERVAL};
use edgeswitch_core::{ControllerConfig, TlsVerification};

/// Prefix for environment overrides (`EDGESWITCH_DEFAULTS__TIMEOUT=10`).
pub const ENV_PREFIX: &str = "EDGESWITCH_";
/// Password override checked after a profile's `password_env`.
pub const PASSWORD_ENV: &str = "EDGESWITCH_PASSWORD";
/// Username fallback when the profile has none.
pub const USERNAME_ENV: &str = "EDGESWITCH_USERNAME";
/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "edgeswitch";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no password configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named switch profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Profile name from an explicit choice, then `default_profile`, then
    /// `"default"`.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Switches ship self-signed certificates, so verification is off
    /// unless asked for.
    #[serde(default)]
    pub verify_ssl: bool,

    /// Polling interval in seconds.
    #[serde(default = "default_update_interval")]
    pub update_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
            verify_ssl: false,
            update_interval: default_update_interval(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_update_interval() -> u64 {
    30
}

/// A named switch profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Switch address (e.g. "10.0.0.254" or "https://switch.lan").
    pub url: String,

    pub username: Option<String>,

    /// Plaintext password; prefer the keyring or `password_env`.
    pub password: Option<String>,

    /// Name of an environment variable holding the password.
    pub password_env: Option<String>,

    /// Override `defaults.verify_ssl`.
    pub verify_ssl: Option<bool>,

    /// Extra CA certificate (PEM). Implies verification.
    pub ca_cert: Option<PathBuf>,

    /// Override `defaults.timeout`.
    pub timeout: Option<u64>,

    /// Override `defaults.update_interval`.
    pub update_interval: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "edgeswitch", "edgeswitch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("edgeswitch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` (missing file is fine), then apply `EDGESWITCH_*`
/// overrides. Nested keys use a double underscore.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password"))
}

/// Resolve the login username: profile, then `EDGESWITCH_USERNAME`.
pub fn resolve_username(profile: &Profile) -> Result<String, ConfigError> {
    profile
        .username
        .clone()
        .filter(|u| !u.is_empty())
        .or_else(|| std::env::var(USERNAME_ENV).ok())
        .ok_or_else(|| ConfigError::Validation {
            field: "username".into(),
            reason: "no username configured".into(),
        })
}

/// Resolve the password.
///
/// Order: the profile's `password_env` variable, `EDGESWITCH_PASSWORD`,
/// the system keyring, plaintext in the profile.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(pw) = profile
        .password_env
        .as_deref()
        .and_then(|name| std::env::var(name).ok())
    {
        return Ok(SecretString::from(pw));
    }

    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(pw));
    }

    if let Ok(pw) = keyring_entry(profile_name).and_then(|entry| entry.get_password()) {
        debug!(profile = profile_name, "password found in keyring");
        return Ok(SecretString::from(pw));
    }

    if let Some(ref pw) = profile.password {
        return Ok(SecretString::from(pw.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a profile password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}

// ── Translation to runtime config ───────────────────────────────────

/// Check an update interval against the 5..=3600 second window.
pub fn validate_update_interval(secs: u64) -> Result<Duration, ConfigError> {
    let interval = Duration::from_secs(secs);
    if (MIN_UPDATE_INTERVAL..=MAX_UPDATE_INTERVAL).contains(&interval) {
        Ok(interval)
    } else {
        Err(ConfigError::Validation {
            field: "update_interval".into(),
            reason: format!(
                "must be between {} and {} seconds, got {secs}",
                MIN_UPDATE_INTERVAL.as_secs(),
                MAX_UPDATE_INTERVAL.as_secs()
            ),
        })
    }
}

/// TLS strategy: a CA file implies verification, otherwise the toggle decides.
pub fn resolve_tls(profile: &Profile, defaults: &Defaults) -> TlsVerification {
    if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::from_verify_ssl(profile.verify_ssl.unwrap_or(defaults.verify_ssl))
    }
}

/// Build a `ControllerConfig` from a profile, with no flag overrides.
pub fn profile_to_controller_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ControllerConfig, ConfigError> {
    if profile.url.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "url".into(),
            reason: format!("profile '{profile_name}' has no url"),
        });
    }

    let username = resolve_username(profile)?;
    let password = resolve_password(profile, profile_name)?;
    let update_interval =
        validate_update_interval(profile.update_interval.unwrap_or(defaults.update_interval))?;

    Ok(ControllerConfig {
        url: profile.url.clone(),
        username,
        password,
        tls: resolve_tls(profile, defaults),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        update_interval,
    })
}
