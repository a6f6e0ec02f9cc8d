//! CLI-facing config: flag overrides on top of `edgeswitch-config`.

use std::time::Duration;

use secrecy::SecretString;

use edgeswitch_config::{Config, Profile};
use edgeswitch_core::{ControllerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use edgeswitch_config::{config_path, load_config_or_default};

/// `--profile`, then the config's `default_profile`, then `"default"`.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    cfg.active_profile_name(global.profile.as_deref())
}

/// Build a `ControllerConfig` from the config file, profile, and CLI flags.
///
/// Without a matching profile, `--url` alone is enough to target a switch.
pub fn build_controller_config(
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<ControllerConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.url.is_some() => Profile::default(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                available: available_profiles(cfg),
                name: profile_name,
            });
        }
        None => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    resolve_profile(&profile, &profile_name, cfg, global)
}

/// Apply flag overrides to a profile and translate it.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<ControllerConfig, CliError> {
    let profile = apply_overrides(profile, global);

    if profile.url.trim().is_empty() {
        return Err(CliError::NoConfig {
            path: config_path().display().to_string(),
        });
    }

    let username = edgeswitch_config::resolve_username(&profile)?;
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => edgeswitch_config::resolve_password(&profile, profile_name)?,
    };
    let update_interval = edgeswitch_config::validate_update_interval(
        profile
            .update_interval
            .unwrap_or(cfg.defaults.update_interval),
    )?;

    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        edgeswitch_config::resolve_tls(&profile, &cfg.defaults)
    };

    Ok(ControllerConfig {
        url: profile.url,
        username,
        password,
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(cfg.defaults.timeout)),
        update_interval,
    })
}

fn apply_overrides(profile: &Profile, global: &GlobalOpts) -> Profile {
    let mut merged = profile.clone();
    if let Some(ref url) = global.url {
        merged.url.clone_from(url);
    }
    if let Some(ref username) = global.username {
        merged.username = Some(username.clone());
    }
    if let Some(timeout) = global.timeout {
        merged.timeout = Some(timeout);
    }
    merged
}

fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
