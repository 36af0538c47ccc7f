//! Authorization core
//!
//! - **rbac**: role-permission matrix and permission resolution
//! - **guard**: access requirements and allow/deny decisions
//! - **session**: session lifecycle and identity providers

pub mod guard;
pub mod rbac;
pub mod session;

// Re-export commonly used types
pub use guard::{AccessRequirement, Guard, GuardSpec, authorize};
pub use rbac::{Action, EffectivePermissions, Resource, Role, RoleSet, resolve_permissions};
pub use session::{Identity, SessionSnapshot, SessionStore};
