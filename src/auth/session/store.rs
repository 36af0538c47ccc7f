//! Session store
//!
//! Holds the current [`SessionSnapshot`] behind an `ArcSwap`. Each transition
//! swaps in a whole new snapshot, so a reader always sees one consistent role
//! set for the duration of a decision.

use crate::config::SessionConfig;
use crate::utils::error::Result;
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::provider::IdentityProvider;
use super::types::{Credentials, Identity, SessionEnd, SessionSnapshot, SessionStatus};

/// Default inactivity timeout (30 minutes)
pub const DEFAULT_INACTIVITY_TIMEOUT_SECS: u64 = 1800;

/// Source of truth for the signed-in user and their roles
#[derive(Debug)]
pub struct SessionStore {
    current: ArcSwap<SessionSnapshot>,
    inactivity_timeout: chrono::Duration,
}

impl SessionStore {
    /// Create a store in the unauthenticated state
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_timeout_secs(config.inactivity_timeout_secs)
    }

    pub fn with_timeout_secs(secs: u64) -> Self {
        let secs = i64::try_from(secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        Self {
            current: ArcSwap::from_pointee(SessionSnapshot::unauthenticated()),
            inactivity_timeout: chrono::Duration::seconds(secs),
        }
    }

    /// Current snapshot; cheap to clone and safe to hold across a render
    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        self.current.load_full()
    }

    pub fn status(&self) -> SessionStatus {
        self.current.load().status()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.load().is_authenticated()
    }

    pub fn inactivity_timeout(&self) -> chrono::Duration {
        self.inactivity_timeout
    }

    fn replace(&self, next: SessionSnapshot) -> Arc<SessionSnapshot> {
        let next = Arc::new(next);
        self.current.store(Arc::clone(&next));
        next
    }

    /// Credentials submitted; grants nothing until verified
    pub fn begin_authentication(&self) -> Arc<SessionSnapshot> {
        debug!("Session authenticating");
        self.replace(SessionSnapshot::authenticating())
    }

    /// Install a verified identity
    pub fn on_login(&self, identity: Identity) -> Arc<SessionSnapshot> {
        self.on_login_at(identity, Utc::now())
    }

    pub fn on_login_at(&self, identity: Identity, now: DateTime<Utc>) -> Arc<SessionSnapshot> {
        info!(
            "User {} signed in with roles {}",
            identity.email, identity.roles
        );
        self.replace(SessionSnapshot::authenticated(identity, now))
    }

    /// Run the full login flow against an identity provider
    ///
    /// A session that is still signed in is logged out first. On failure the
    /// store returns to the signed-out snapshot it started from, unless
    /// another transition replaced the pending snapshot in the meantime. The
    /// provider's error is passed back to the caller.
    pub async fn login(
        &self,
        provider: &dyn IdentityProvider,
        credentials: &Credentials,
    ) -> Result<Arc<SessionSnapshot>> {
        let current = self.snapshot();
        let signed_out = match current.status() {
            SessionStatus::Authenticated => self.on_logout(),
            SessionStatus::Authenticating => Arc::new(SessionSnapshot::unauthenticated()),
            SessionStatus::Unauthenticated => current,
        };
        let pending = self.begin_authentication();

        match provider.authenticate(credentials).await {
            Ok(identity) => Ok(self.on_login(identity)),
            Err(e) => {
                warn!("Login failed for {}: {}", credentials.email, e);
                let previous = self.current.compare_and_swap(&pending, signed_out);
                if !Arc::ptr_eq(&previous, &pending) {
                    debug!("Session changed while login was pending; keeping it");
                }
                Err(e)
            }
        }
    }

    /// Explicit logout; roles are cleared
    pub fn on_logout(&self) -> Arc<SessionSnapshot> {
        if let Some(identity) = self.current.load().identity() {
            info!("User {} signed out", identity.email);
        }
        self.replace(SessionSnapshot::ended(SessionEnd::LoggedOut))
    }

    /// Record user activity; returns false when nobody is signed in
    pub fn touch(&self) -> bool {
        self.touch_at(Utc::now())
    }

    pub fn touch_at(&self, now: DateTime<Utc>) -> bool {
        let mut touched = false;
        self.current.rcu(|current| {
            touched = current.is_authenticated();
            if touched {
                Arc::new(current.with_activity(now))
            } else {
                Arc::clone(current)
            }
        });
        touched
    }

    /// End the session if it has been idle past the timeout
    pub fn expire_if_idle(&self) -> bool {
        self.expire_if_idle_at(Utc::now())
    }

    pub fn expire_if_idle_at(&self, now: DateTime<Utc>) -> bool {
        let mut expired = false;
        self.current.rcu(|current| {
            expired = current.is_idle_at(now, self.inactivity_timeout);
            if expired {
                Arc::new(SessionSnapshot::ended(SessionEnd::Expired))
            } else {
                Arc::clone(current)
            }
        });

        if expired {
            info!("Session expired after inactivity");
        }
        expired
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_timeout_secs(DEFAULT_INACTIVITY_TIMEOUT_SECS)
    }
}
