//! Access requirement definitions

use crate::auth::rbac::{Action, Resource, Role};
use crate::utils::error::{AuthzError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A (resource, action) pair a guard checks against the effective permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionSpec {
    pub resource: Resource,
    pub action: Action,
}

impl fmt::Display for PermissionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource, self.action)
    }
}

/// What a protected region requires of the session
///
/// Exactly one kind of check per requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRequirement {
    /// Granted if the session holds at least one listed role
    AllowedRoles(Vec<Role>),
    /// Precomputed policy result
    Policy(bool),
    /// Granted if the effective permissions allow the pair
    Permission { resource: Resource, action: Action },
}

impl AccessRequirement {
    pub fn roles<I: IntoIterator<Item = Role>>(roles: I) -> Self {
        Self::AllowedRoles(roles.into_iter().collect())
    }

    pub fn policy(allowed: bool) -> Self {
        Self::Policy(allowed)
    }

    pub fn permission(resource: Resource, action: Action) -> Self {
        Self::Permission { resource, action }
    }
}

impl fmt::Display for AccessRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessRequirement::AllowedRoles(roles) => {
                let names: Vec<&str> = roles.iter().map(|role| role.as_str()).collect();
                write!(f, "one of [{}]", names.join(", "))
            }
            AccessRequirement::Policy(allowed) => write!(f, "policy={}", allowed),
            AccessRequirement::Permission { resource, action } => {
                write!(f, "{}.{}", resource, action)
            }
        }
    }
}

/// Declarative guard with optional, nominally exclusive fields
///
/// This is the shape route declarations use. When more than one field is
/// set, the checks run in the order `allowed_roles`, `policy`,
/// `permissions` and each one overwrites the previous result, so the last
/// field present decides. Use [`GuardSpec::to_requirement`] to reject such
/// declarations instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_roles: Option<Vec<Role>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSpec>,
}

impl GuardSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allowed_roles<I: IntoIterator<Item = Role>>(mut self, roles: I) -> Self {
        self.allowed_roles = Some(roles.into_iter().collect());
        self
    }

    pub fn policy(mut self, allowed: bool) -> Self {
        self.policy = Some(allowed);
        self
    }

    pub fn permission(mut self, resource: Resource, action: Action) -> Self {
        self.permissions = Some(PermissionSpec { resource, action });
        self
    }

    /// Number of requirement fields that are set
    pub fn variant_count(&self) -> usize {
        usize::from(self.allowed_roles.is_some())
            + usize::from(self.policy.is_some())
            + usize::from(self.permissions.is_some())
    }

    /// The requirement that decides under last-wins evaluation
    ///
    /// `None` when no field is set or the only field is an empty role list,
    /// both of which deny.
    pub fn effective_requirement(&self) -> Option<AccessRequirement> {
        if let Some(permission) = self.permissions {
            return Some(AccessRequirement::permission(
                permission.resource,
                permission.action,
            ));
        }
        if let Some(allowed) = self.policy {
            return Some(AccessRequirement::Policy(allowed));
        }
        match &self.allowed_roles {
            Some(roles) if !roles.is_empty() => Some(AccessRequirement::AllowedRoles(roles.clone())),
            _ => None,
        }
    }

    /// Strict conversion: exactly one field must be set
    pub fn to_requirement(&self) -> Result<AccessRequirement> {
        let count = self.variant_count();
        if count > 1 {
            return Err(AuthzError::invalid_requirement(format!(
                "{} access requirements supplied, expected exactly one",
                count
            )));
        }

        let requirement = match (&self.allowed_roles, self.policy, self.permissions) {
            (Some(roles), _, _) => AccessRequirement::AllowedRoles(roles.clone()),
            (_, Some(allowed), _) => AccessRequirement::Policy(allowed),
            (_, _, Some(permission)) => {
                AccessRequirement::permission(permission.resource, permission.action)
            }
            (None, None, None) => {
                return Err(AuthzError::invalid_requirement(
                    "no access requirement supplied",
                ));
            }
        };
        Ok(requirement)
    }
}

impl From<AccessRequirement> for GuardSpec {
    fn from(requirement: AccessRequirement) -> Self {
        match requirement {
            AccessRequirement::AllowedRoles(roles) => GuardSpec::new().allowed_roles(roles),
            AccessRequirement::Policy(allowed) => GuardSpec::new().policy(allowed),
            AccessRequirement::Permission { resource, action } => {
                GuardSpec::new().permission(resource, action)
            }
        }
    }
}
