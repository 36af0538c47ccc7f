//! Authorization decisions
//!
//! A denied check is an ordinary outcome. Nothing on this path returns an
//! error or panics; callers get a boolean or a [`Guarded`] value and route to
//! the fallback themselves.

use crate::auth::rbac::{Role, RoleSet, granting_roles, resolve_permissions};
use crate::auth::session::SessionSnapshot;
use serde::Serialize;
use tracing::debug;

use super::requirement::{AccessRequirement, GuardSpec};

/// Default redirect target for denied access
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Decide a single requirement against a role set
pub fn authorize(requirement: &AccessRequirement, roles: &RoleSet) -> bool {
    match requirement {
        AccessRequirement::AllowedRoles(allowed) => roles.contains_any(allowed),
        AccessRequirement::Policy(allowed) => *allowed,
        AccessRequirement::Permission { resource, action } => {
            resolve_permissions(roles).allows(*resource, *action)
        }
    }
}

/// Decide a declarative guard against a role set
///
/// Checks run in a fixed order and each present field overwrites the result
/// of the previous one. No fields set means deny.
pub fn authorize_spec(spec: &GuardSpec, roles: &RoleSet) -> bool {
    let mut can_access = false;

    if let Some(allowed) = spec.allowed_roles.as_deref() {
        if !allowed.is_empty() {
            can_access = roles.contains_any(allowed);
        }
    }

    if let Some(allowed) = spec.policy {
        can_access = allowed;
    }

    if let Some(permission) = spec.permissions {
        can_access = resolve_permissions(roles).allows(permission.resource, permission.action);
    }

    can_access
}

/// Outcome of a check with the roles that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthzDecision {
    /// Whether access is granted
    pub granted: bool,
    /// Held roles that granted access
    pub granted_by: Vec<Role>,
    /// Reason for denial (if not granted)
    pub reason: Option<String>,
}

impl AuthzDecision {
    fn grant(granted_by: Vec<Role>) -> Self {
        Self {
            granted: true,
            granted_by,
            reason: None,
        }
    }

    fn deny(reason: impl Into<String>) -> Self {
        Self {
            granted: false,
            granted_by: Vec::new(),
            reason: Some(reason.into()),
        }
    }
}

/// Explain a single requirement against a role set
pub fn explain(requirement: &AccessRequirement, roles: &RoleSet) -> AuthzDecision {
    match requirement {
        AccessRequirement::AllowedRoles(allowed) => {
            let held: Vec<Role> = roles.iter().filter(|role| allowed.contains(role)).collect();
            if held.is_empty() {
                AuthzDecision::deny(format!("Requires {}", requirement))
            } else {
                AuthzDecision::grant(held)
            }
        }
        AccessRequirement::Policy(true) => AuthzDecision::grant(Vec::new()),
        AccessRequirement::Policy(false) => AuthzDecision::deny("Denied by policy"),
        AccessRequirement::Permission { resource, action } => {
            let granted_by = granting_roles(roles, *resource, *action);
            if granted_by.is_empty() {
                AuthzDecision::deny(format!("Missing permission: {}.{}", resource, action))
            } else {
                AuthzDecision::grant(granted_by)
            }
        }
    }
}

/// Explain a declarative guard; agrees with [`authorize_spec`]
pub fn explain_spec(spec: &GuardSpec, roles: &RoleSet) -> AuthzDecision {
    match spec.effective_requirement() {
        Some(requirement) => explain(&requirement, roles),
        None => AuthzDecision::deny("No access requirement supplied"),
    }
}

/// What a denied guard does instead of rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Fallback {
    /// Navigate to another view
    Redirect(String),
    /// Render nothing (buttons, menu entries)
    Hide,
}

impl Default for Fallback {
    fn default() -> Self {
        Fallback::Redirect(DEFAULT_UNAUTHORIZED_PATH.to_string())
    }
}

/// Result of running protected content through a guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<T> {
    /// Access granted; the content was produced
    Render(T),
    /// Access denied; navigate here
    Redirect(String),
    /// Access denied; render nothing
    Hidden,
}

impl<T> Guarded<T> {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Guarded::Render(_))
    }

    pub fn into_content(self) -> Option<T> {
        match self {
            Guarded::Render(content) => Some(content),
            _ => None,
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Guarded::Redirect(target) => Some(target),
            _ => None,
        }
    }
}

/// Access requirement wrapped around a protected region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guard {
    spec: GuardSpec,
    fallback: Fallback,
}

impl Guard {
    pub fn new(requirement: impl Into<GuardSpec>) -> Self {
        Self {
            spec: requirement.into(),
            fallback: Fallback::default(),
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn spec(&self) -> &GuardSpec {
        &self.spec
    }

    pub fn fallback(&self) -> &Fallback {
        &self.fallback
    }

    /// Whether the session may enter
    pub fn check(&self, session: &SessionSnapshot) -> bool {
        let can_access = authorize_spec(&self.spec, session.roles());
        debug!(
            "Guard {:?} for {:?} session: {}",
            self.spec,
            session.status(),
            if can_access { "allow" } else { "deny" }
        );
        can_access
    }

    pub fn explain(&self, session: &SessionSnapshot) -> AuthzDecision {
        explain_spec(&self.spec, session.roles())
    }

    /// Produce the content if allowed, the fallback otherwise
    ///
    /// `content` is only invoked when access is granted.
    pub fn protect<T, F>(&self, session: &SessionSnapshot, content: F) -> Guarded<T>
    where
        F: FnOnce() -> T,
    {
        if self.check(session) {
            return Guarded::Render(content());
        }

        match &self.fallback {
            Fallback::Redirect(target) => Guarded::Redirect(target.clone()),
            Fallback::Hide => Guarded::Hidden,
        }
    }
}
