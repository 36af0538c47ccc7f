//! Identity providers
//!
//! Credential verification is the one asynchronous step in the session
//! lifecycle. The store hands credentials to an [`IdentityProvider`] and only
//! consumes the verified identity it returns.

use crate::auth::rbac::RoleSet;
use crate::config::UserConfig;
use crate::utils::crypto::verify_password;
use crate::utils::error::{AuthzError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::types::{Credentials, Identity};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Verified against for unknown emails so both paths pay for one argon2 run
pub(crate) const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0ZHVtbXk$9mJ8w0KoQxZ2pM0bqT8cRkL3yVhN5sUeA1dF7gHiJkE";

/// Verifies credentials and returns the user's identity and roles
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity>;
}

#[derive(Debug, Clone)]
struct UserRecord {
    identity: Identity,
    password_hash: String,
    enabled: bool,
}

/// Identity provider backed by a fixed user list
///
/// Passwords are stored as argon2 hashes. Emails match case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    users: HashMap<String, UserRecord>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configured users
    ///
    /// Role names the matrix does not know are dropped with a warning.
    pub fn from_config(users: &[UserConfig]) -> Self {
        let mut provider = Self::new();
        for user in users {
            let identity = Identity {
                user_id: user.id.unwrap_or_else(Uuid::new_v4),
                email: user.email.clone(),
                display_name: user.display_name.clone(),
                roles: RoleSet::from_names(&user.roles),
            };
            provider.insert(identity, user.password_hash.clone(), user.enabled);
        }
        info!("Loaded {} back-office users", provider.users.len());
        provider
    }

    /// Register a user with an already hashed password
    pub fn insert(&mut self, identity: Identity, password_hash: String, enabled: bool) {
        let key = identity.email.to_lowercase();
        if self.users.contains_key(&key) {
            warn!("Replacing duplicate user entry: {}", identity.email);
        }
        self.users.insert(
            key,
            UserRecord {
                identity,
                password_hash,
                enabled,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity> {
        let record = self.users.get(&credentials.email.to_lowercase());

        // argon2 verification blocks
        let password = credentials.password.clone();
        let hash = record
            .map_or(DUMMY_PASSWORD_HASH, |record| record.password_hash.as_str())
            .to_string();
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AuthzError::crypto(format!("Password check aborted: {}", e)))??;

        let Some(record) = record else {
            debug!("Login attempt for unknown user: {}", credentials.email);
            return Err(AuthzError::auth(INVALID_CREDENTIALS));
        };

        if !verified {
            debug!("Wrong password for user: {}", credentials.email);
            return Err(AuthzError::auth(INVALID_CREDENTIALS));
        }

        if !record.enabled {
            return Err(AuthzError::auth("Account is disabled"));
        }

        Ok(record.identity.clone())
    }
}
