//! # backoffice-authz
//!
//! Role-based permission resolution and route authorization for the
//! e-commerce back office.
//!
//! ## Features
//!
//! - **Static permission matrix**: one explicit grant per role, resource and action
//! - **Union merge**: a user holding several roles gets every grant any of them has
//! - **Guards**: role allow-lists, policy flags or resource/action checks, with
//!   redirect or hide fallbacks
//! - **Session lifecycle**: login, logout and inactivity expiry with wholesale
//!   snapshot replacement
//! - **Route table**: longest-prefix route matching, menu and button gating
//!
//! ## Quick Start
//!
//! ```rust
//! use backoffice_authz::{AccessRequirement, Action, Resource, Role, RoleSet, authorize};
//!
//! let roles = RoleSet::from([Role::Editor, Role::Sales]);
//! let requirement = AccessRequirement::permission(Resource::Orders, Action::Create);
//!
//! // EDITOR alone may not create orders, but SALES may
//! assert!(authorize(&requirement, &roles));
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod navigation;
pub mod utils;

// Re-export main types
pub use auth::guard::{
    AccessRequirement, AuthzDecision, Fallback, Guard, GuardSpec, Guarded, authorize,
    authorize_spec, explain,
};
pub use auth::rbac::{
    Action, EffectivePermissions, MemoizedResolver, PermissionMatrix, Resource, Role, RoleSet,
    resolve_permissions,
};
pub use auth::session::{
    Credentials, Identity, IdentityProvider, InMemoryIdentityProvider, SessionEnd,
    SessionSnapshot, SessionStatus, SessionStore,
};
pub use config::Config;
pub use navigation::{RouteOutcome, RouteTable};
pub use utils::error::{AuthzError, Result};
