//! Session type definitions

use crate::auth::rbac::RoleSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

static NO_ROLES: RoleSet = RoleSet::new();

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// No identity; the initial state and the state after any session ends
    Unauthenticated,
    /// Credentials are being checked by the identity provider
    Authenticating,
    /// Identity verified and roles populated
    Authenticated,
}

/// Why the previous session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    /// Inactivity timeout elapsed
    Expired,
    /// Explicit logout
    LoggedOut,
}

/// Verified identity of a staff user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID
    pub user_id: Uuid,
    /// Login email
    pub email: String,
    /// Name shown in the header bar
    pub display_name: String,
    /// Roles granted to the user
    pub roles: RoleSet,
}

impl Identity {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>, roles: RoleSet) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email: email.into(),
            display_name: display_name.into(),
            roles,
        }
    }
}

/// Login credentials handed to an identity provider
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Immutable view of the session at one point in time
///
/// Snapshots are never mutated; every transition produces a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    session_id: Option<Uuid>,
    status: SessionStatus,
    identity: Option<Identity>,
    last_activity: Option<DateTime<Utc>>,
    ended: Option<SessionEnd>,
}

impl SessionSnapshot {
    /// Initial state: nobody signed in
    pub fn unauthenticated() -> Self {
        Self {
            session_id: None,
            status: SessionStatus::Unauthenticated,
            identity: None,
            last_activity: None,
            ended: None,
        }
    }

    /// Credentials submitted, not yet verified
    pub fn authenticating() -> Self {
        Self {
            status: SessionStatus::Authenticating,
            ..Self::unauthenticated()
        }
    }

    /// Verified session for `identity`, active as of `now`
    pub fn authenticated(identity: Identity, now: DateTime<Utc>) -> Self {
        Self {
            session_id: Some(Uuid::new_v4()),
            status: SessionStatus::Authenticated,
            identity: Some(identity),
            last_activity: Some(now),
            ended: None,
        }
    }

    /// Back to unauthenticated, remembering why the last session ended
    pub fn ended(reason: SessionEnd) -> Self {
        Self {
            ended: Some(reason),
            ..Self::unauthenticated()
        }
    }

    pub(crate) fn with_activity(&self, now: DateTime<Utc>) -> Self {
        Self {
            last_activity: Some(now),
            ..self.clone()
        }
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session_id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        self.last_activity
    }

    pub fn ended_by(&self) -> Option<SessionEnd> {
        self.ended
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// Roles that count for authorization
    ///
    /// Only an authenticated session contributes roles. Unauthenticated and
    /// authenticating sessions evaluate with the empty set.
    pub fn roles(&self) -> &RoleSet {
        match (&self.status, &self.identity) {
            (SessionStatus::Authenticated, Some(identity)) => &identity.roles,
            _ => &NO_ROLES,
        }
    }

    /// Whether the inactivity timeout has elapsed at `now`
    pub fn is_idle_at(&self, now: DateTime<Utc>, timeout: chrono::Duration) -> bool {
        match self.last_activity {
            Some(last) if self.is_authenticated() => now - last >= timeout,
            _ => false,
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::unauthenticated()
    }
}
