//! Permission resolution
//!
//! Merges the matrix rows of every held role into one effective permission
//! set. Merging is a union: holding any role that grants an action grants it.

use dashmap::DashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use super::matrix::PermissionMatrix;
use super::types::{Action, Resource, Role, RoleSet};

/// Fully populated (resource, action) grant table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EffectivePermissions {
    table: [[bool; Action::COUNT]; Resource::COUNT],
}

impl EffectivePermissions {
    /// Every entry denied
    pub const fn none() -> Self {
        Self {
            table: [[false; Action::COUNT]; Resource::COUNT],
        }
    }

    /// Every entry granted
    pub const fn all() -> Self {
        Self {
            table: [[true; Action::COUNT]; Resource::COUNT],
        }
    }

    pub(crate) const fn from_table(table: [[bool; Action::COUNT]; Resource::COUNT]) -> Self {
        Self { table }
    }

    pub fn allows(&self, resource: Resource, action: Action) -> bool {
        self.table[resource.index()][action.index()]
    }

    /// Entry-wise OR of two sets
    pub fn union(&self, other: &EffectivePermissions) -> EffectivePermissions {
        let mut merged = *self;
        for (row, other_row) in merged.table.iter_mut().zip(other.table.iter()) {
            for (grant, other_grant) in row.iter_mut().zip(other_row.iter()) {
                *grant |= *other_grant;
            }
        }
        merged
    }

    /// Whether every pair granted by `other` is also granted here
    pub fn is_superset_of(&self, other: &EffectivePermissions) -> bool {
        Resource::ALL.iter().all(|&resource| {
            Action::ALL
                .iter()
                .all(|&action| !other.allows(resource, action) || self.allows(resource, action))
        })
    }

    /// Granted pairs in matrix order
    pub fn granted(&self) -> Vec<(Resource, Action)> {
        Resource::ALL
            .iter()
            .flat_map(|&resource| Action::ALL.iter().map(move |&action| (resource, action)))
            .filter(|&(resource, action)| self.allows(resource, action))
            .collect()
    }

    /// Actions granted on a single resource
    pub fn actions_on(&self, resource: Resource) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|&action| self.allows(resource, action))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.table.iter().flatten().all(|grant| !grant)
    }

    /// Pretty-printed JSON map of resource to action grants
    pub fn to_json(&self) -> crate::utils::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for EffectivePermissions {
    fn default() -> Self {
        Self::none()
    }
}

impl Serialize for EffectivePermissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Resource::COUNT))?;
        for resource in Resource::ALL {
            let actions: std::collections::BTreeMap<&str, bool> = Action::ALL
                .iter()
                .map(|&action| (action.as_str(), self.allows(resource, action)))
                .collect();
            map.serialize_entry(resource.as_str(), &actions)?;
        }
        map.end()
    }
}

/// Compute the effective permissions for a role set
///
/// An empty set resolves to all-false. The result does not depend on
/// iteration order and is unchanged by duplicate roles.
pub fn resolve_permissions(roles: &RoleSet) -> EffectivePermissions {
    let effective = roles
        .iter()
        .fold(EffectivePermissions::none(), |acc, role| {
            acc.union(PermissionMatrix::row(role))
        });

    debug!(
        "Resolved {} grants for roles {}",
        effective.granted().len(),
        roles
    );
    effective
}

/// Held roles whose matrix row grants `action` on `resource`
pub fn granting_roles(roles: &RoleSet, resource: Resource, action: Action) -> Vec<Role> {
    roles
        .iter()
        .filter(|&role| PermissionMatrix::grant(role, resource, action))
        .collect()
}

/// Resolver that memoizes results per role set
///
/// Answers are identical to [`resolve_permissions`]; the matrix is immutable,
/// so cached entries never go stale.
#[derive(Debug, Default)]
pub struct MemoizedResolver {
    cache: DashMap<RoleSet, EffectivePermissions>,
}

impl MemoizedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&self, roles: &RoleSet) -> EffectivePermissions {
        if let Some(hit) = self.cache.get(roles) {
            return *hit;
        }

        let effective = resolve_permissions(roles);
        self.cache.insert(roles.clone(), effective);
        effective
    }

    /// Number of distinct role sets resolved so far
    pub fn cached_sets(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}
