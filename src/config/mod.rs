//! Configuration management for the authorization core
//!
//! This module handles loading and validation of session, guard, route and
//! user configuration.

pub mod models;

pub use models::*;

use crate::auth::guard::GuardSpec;
use crate::utils::error::{AuthzError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Authorization configuration
    pub authz: AuthzConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await?;

        let config = Self::from_yaml_str(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let authz: AuthzConfig = serde_yaml::from_str(content)?;

        let config = Self { authz };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables (and `.env`, if present)
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {:?}", path);
        }

        let authz = AuthzConfig::from_env()?;
        let config = Self { authz };

        config.validate()?;
        Ok(config)
    }

    /// Get session configuration
    pub fn session(&self) -> &SessionConfig {
        &self.authz.session
    }

    /// Get guard configuration
    pub fn guard(&self) -> &GuardConfig {
        &self.authz.guard
    }

    /// Get configured routes
    pub fn routes(&self) -> &[RouteConfig] {
        &self.authz.routes
    }

    /// Get configured users
    pub fn users(&self) -> &[UserConfig] {
        &self.authz.users
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.authz
            .session
            .validate()
            .map_err(|e| AuthzError::Config(format!("Session config error: {}", e)))?;

        self.authz
            .guard
            .validate()
            .map_err(|e| AuthzError::Config(format!("Guard config error: {}", e)))?;

        let ambiguous = validate_routes(&self.authz.routes)
            .map_err(|e| AuthzError::Config(format!("Route config error: {}", e)))?;

        if !ambiguous.is_empty() {
            if self.authz.guard.strict_requirements {
                return Err(AuthzError::Config(format!(
                    "Route config error: guards must declare exactly one requirement: {}",
                    ambiguous.join(", ")
                )));
            }
            // Only the last-evaluated requirement takes effect on these
            warn!(
                "Routes declare more than one access requirement: {}",
                ambiguous.join(", ")
            );
        }

        for route in &self.authz.routes {
            if route.guard == GuardSpec::default() {
                warn!("Route {} has no access requirement and denies everyone", route.path);
            }
        }

        validate_users(&self.authz.users)
            .map_err(|e| AuthzError::Config(format!("User config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.authz)?)
    }
}
