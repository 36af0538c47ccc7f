//! Test fixtures and data factories
//!
//! All factories create real objects, not mocks.

use backoffice_authz::utils::crypto::hash_password;
use backoffice_authz::{Identity, Role, RoleSet, SessionSnapshot};
use chrono::Utc;

/// Password shared by every sample user
pub const SAMPLE_PASSWORD: &str = "correct horse battery staple";

/// Factory for session snapshots
pub struct SessionFactory;

impl SessionFactory {
    /// Signed-in session holding the given roles
    pub fn signed_in<I: IntoIterator<Item = Role>>(roles: I) -> SessionSnapshot {
        let roles: RoleSet = roles.into_iter().collect();
        let identity = Identity::new(
            format!("staff-{}@shop.test", roles.len()),
            "Test Staff",
            roles,
        );
        SessionSnapshot::authenticated(identity, Utc::now())
    }

    pub fn admin() -> SessionSnapshot {
        Self::signed_in([Role::Admin])
    }

    pub fn signed_out() -> SessionSnapshot {
        SessionSnapshot::unauthenticated()
    }
}

/// A complete configuration document with one user per role
pub fn sample_config_yaml() -> String {
    let hash = hash_password(SAMPLE_PASSWORD).expect("hashing sample password");

    format!(
        r#"
session:
  inactivity_timeout_secs: 600

guard:
  unauthorized_redirect: /unauthorized
  login_redirect: /login

routes:
  - path: /login
    policy: true
  - path: /unauthorized
    policy: true
  - path: /settings
    allowed_roles: [ADMIN]
    redirect: /
  - path: /orders
    permissions: {{ resource: orders, action: read }}
  - path: /orders/new
    permissions: {{ resource: orders, action: create }}
  - path: /users
    permissions: {{ resource: users, action: read }}

users:
  - email: admin@shop.test
    display_name: Ada Admin
    password_hash: "{hash}"
    roles: [ADMIN]
  - email: editor@shop.test
    display_name: Eddie Editor
    password_hash: "{hash}"
    roles: [EDITOR, SALES]
  - email: shipper@shop.test
    display_name: Shay Shipper
    password_hash: "{hash}"
    roles: [SHIPPER, JANITOR]
  - email: former@shop.test
    display_name: Former Staff
    password_hash: "{hash}"
    roles: [SALES]
    enabled: false
"#
    )
}
