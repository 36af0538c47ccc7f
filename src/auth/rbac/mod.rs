//! Role-Based Access Control (RBAC)
//!
//! The static role-permission matrix and the resolver that merges the grants
//! of every held role into an effective permission set.

mod matrix;
mod resolver;
mod types;

// Re-export public types and functions
pub use matrix::PermissionMatrix;
pub use resolver::{EffectivePermissions, MemoizedResolver, granting_roles, resolve_permissions};
pub use types::{Action, Resource, Role, RoleSet};
