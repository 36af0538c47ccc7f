//! RBAC type definitions

use crate::utils::error::{AuthzError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Back-office role held by a staff user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access to every screen
    Admin,
    /// Catalog maintenance: products, categories, brands
    Editor,
    /// Order intake, pricing and shipping rates
    Sales,
    /// Order fulfilment
    Shipper,
}

impl Role {
    /// Every role, in matrix order
    pub const ALL: [Role; 4] = [Role::Admin, Role::Editor, Role::Sales, Role::Shipper];

    /// Number of roles
    pub const COUNT: usize = Self::ALL.len();

    /// Row index in the permission matrix
    pub const fn index(self) -> usize {
        self as usize
    }

    /// External name (`ADMIN`, `EDITOR`, ...)
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Editor => "EDITOR",
            Role::Sales => "SALES",
            Role::Shipper => "SHIPPER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| AuthzError::parse(format!("unknown role: {}", name)))
    }
}

/// Protectable class of back-office records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Users,
    Products,
    Categories,
    Brands,
    Orders,
    Settings,
    Locations,
    Shipping,
}

impl Resource {
    /// Every resource, in matrix order
    pub const ALL: [Resource; 8] = [
        Resource::Users,
        Resource::Products,
        Resource::Categories,
        Resource::Brands,
        Resource::Orders,
        Resource::Settings,
        Resource::Locations,
        Resource::Shipping,
    ];

    /// Number of resources
    pub const COUNT: usize = Self::ALL.len();

    /// Column group index in the permission matrix
    pub const fn index(self) -> usize {
        self as usize
    }

    /// External name (`users`, `products`, ...)
    pub const fn as_str(self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Products => "products",
            Resource::Categories => "categories",
            Resource::Brands => "brands",
            Resource::Orders => "orders",
            Resource::Settings => "settings",
            Resource::Locations => "locations",
            Resource::Shipping => "shipping",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Resource::ALL
            .into_iter()
            .find(|resource| resource.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| AuthzError::parse(format!("unknown resource: {}", name)))
    }
}

/// Operation class on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    /// Every action, in matrix order
    pub const ALL: [Action; 4] = [Action::Read, Action::Create, Action::Update, Action::Delete];

    /// Number of actions
    pub const COUNT: usize = Self::ALL.len();

    /// Column index within a resource group
    pub const fn index(self) -> usize {
        self as usize
    }

    /// External name (`read`, `create`, ...)
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Action::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| AuthzError::parse(format!("unknown action: {}", name)))
    }
}

/// Set of roles held by one user
///
/// Duplicates collapse and insertion order is irrelevant, so two sets built
/// from the same roles in any order compare equal and hash identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Empty role set
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Build a role set from external role names
    ///
    /// Unknown names are dropped: an unregistered role contributes no grants.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| match name.as_ref().parse::<Role>() {
                Ok(role) => Some(role),
                Err(_) => {
                    warn!("Ignoring unknown role: {}", name.as_ref());
                    None
                }
            })
            .collect()
    }

    /// Parse a comma-separated role list such as `ADMIN,SALES`
    pub fn parse_list(list: &str) -> Result<Self> {
        list.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::parse::<Role>)
            .collect()
    }

    /// Add a role; returns false if it was already held
    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Whether at least one of `roles` is held
    pub fn contains_any(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.0.contains(role))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_subset(&self, other: &RoleSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        roles.into_iter().collect()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|role| role.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
