//! Profile resolution with `GlobalOpts` overrides.
//!
//! This is the single boundary where CLI config types cross into
//! `woo_core::SessionConfig`.

use std::time::Duration;

use secrecy::SecretString;

use woo_config::{Config, Profile};
use woo_core::SessionConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `SessionConfig` from the config file, profile, and CLI flags.
///
/// Flags win over the profile. Without a matching profile the session is
/// built from flags and `WOO_*` env vars alone.
pub fn build_session_config(global: &GlobalOpts, cfg: &Config) -> Result<SessionConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);
    let empty = Profile::default();
    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile,
        None if global.profile.is_some() => {
            let mut available: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(CliError::NotFound {
                resource_type: "profile".into(),
                identifier: profile_name,
                list_command: format!("config show (available: {})", available.join(", ")),
            });
        }
        None => &empty,
    };

    // 1. API root (flag > profile > default)
    let base_url =
        woo_config::parse_api_base(global.api_base.as_deref().or(profile.api_base.as_deref()))?;

    // 2. Token (flag > credential chain)
    let token = match &global.token {
        Some(token) => SecretString::from(token.clone()),
        None => woo_config::resolve_token(profile, &profile_name)?,
    };

    // 3. Timeout (flag > profile > defaults)
    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(cfg.defaults.timeout);

    // 4. Cache file
    let cache_path = if global.no_cache {
        None
    } else {
        profile
            .cache_path
            .clone()
            .or_else(|| woo_config::default_cache_path(&profile_name))
    };

    Ok(SessionConfig {
        base_url,
        token,
        site_id: global.site.or(profile.site_id),
        timeout: Duration::from_secs(timeout),
        cache_path,
    })
}
