//! Session, guard and user configuration

use super::*;
use crate::utils::crypto::is_password_hash;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Session lifecycle configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds of inactivity after which an authenticated session expires
    #[serde(default = "default_inactivity_timeout_secs")]
    pub inactivity_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_secs: default_inactivity_timeout_secs(),
        }
    }
}

impl SessionConfig {
    /// Validate session configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.inactivity_timeout_secs < MIN_INACTIVITY_TIMEOUT_SECS {
            return Err(format!(
                "inactivity_timeout_secs must be at least {} seconds",
                MIN_INACTIVITY_TIMEOUT_SECS
            ));
        }

        if self.inactivity_timeout_secs > MAX_INACTIVITY_TIMEOUT_SECS {
            return Err(format!(
                "inactivity_timeout_secs must not exceed {} seconds",
                MAX_INACTIVITY_TIMEOUT_SECS
            ));
        }

        Ok(())
    }
}

/// Guard behaviour configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardConfig {
    /// Where denied requests are sent
    #[serde(default = "default_unauthorized_redirect")]
    pub unauthorized_redirect: String,
    /// Where denied requests from signed-out users are sent, if different
    #[serde(default)]
    pub login_redirect: Option<String>,
    /// Reject route guards that declare more than one requirement
    #[serde(default)]
    pub strict_requirements: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            unauthorized_redirect: default_unauthorized_redirect(),
            login_redirect: None,
            strict_requirements: false,
        }
    }
}

impl GuardConfig {
    /// Validate guard configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.unauthorized_redirect.starts_with('/') {
            return Err(format!(
                "unauthorized_redirect must be an absolute path, got '{}'",
                self.unauthorized_redirect
            ));
        }

        if let Some(login) = &self.login_redirect {
            if !login.starts_with('/') {
                return Err(format!(
                    "login_redirect must be an absolute path, got '{}'",
                    login
                ));
            }
        }

        Ok(())
    }
}

/// A back-office user served by the in-memory identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Stable user ID; generated at startup when omitted
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Login email
    pub email: String,
    /// Name shown in the header bar
    #[serde(default)]
    pub display_name: String,
    /// Argon2 PHC hash of the password
    pub password_hash: String,
    /// Role names; unknown names grant nothing
    #[serde(default)]
    pub roles: Vec<String>,
    /// Disabled users cannot sign in
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Validate the configured user list
pub fn validate_users(users: &[UserConfig]) -> Result<(), String> {
    let mut seen = HashSet::new();

    for user in users {
        if user.email.trim().is_empty() {
            return Err("user email cannot be empty".to_string());
        }

        if !seen.insert(user.email.to_lowercase()) {
            return Err(format!("Duplicate user email: {}", user.email));
        }

        if !is_password_hash(&user.password_hash) {
            return Err(format!(
                "password_hash for {} is not a valid argon2 hash",
                user.email
            ));
        }
    }

    Ok(())
}
