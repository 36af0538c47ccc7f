//! Top-level authorization configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Authorization configuration as read from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthzConfig {
    /// Session lifecycle
    #[serde(default)]
    pub session: SessionConfig,
    /// Guard behaviour
    #[serde(default)]
    pub guard: GuardConfig,
    /// Route table; the built-in back-office table is used when empty
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
    /// Users for the in-memory identity provider
    #[serde(default)]
    pub users: Vec<UserConfig>,
}

impl AuthzConfig {
    /// Build a configuration from `AUTHZ_*` environment variables
    pub fn from_env() -> crate::utils::error::Result<Self> {
        let mut config = Self::default();

        if let Some(secs) = env_var("AUTHZ_INACTIVITY_TIMEOUT_SECS") {
            config.session.inactivity_timeout_secs = secs.parse().map_err(|e| {
                crate::utils::error::AuthzError::config(format!(
                    "AUTHZ_INACTIVITY_TIMEOUT_SECS must be a number: {}",
                    e
                ))
            })?;
        }

        if let Some(path) = env_var("AUTHZ_UNAUTHORIZED_REDIRECT") {
            config.guard.unauthorized_redirect = path;
        }

        if let Some(path) = env_var("AUTHZ_LOGIN_REDIRECT") {
            config.guard.login_redirect = Some(path);
        }

        if let Some(strict) = env_var("AUTHZ_STRICT_REQUIREMENTS") {
            config.guard.strict_requirements = parse_bool(&strict).ok_or_else(|| {
                crate::utils::error::AuthzError::config(format!(
                    "AUTHZ_STRICT_REQUIREMENTS must be true or false, got '{}'",
                    strict
                ))
            })?;
        }

        Ok(config)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
