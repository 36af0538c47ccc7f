//! Common test utilities for backoffice-authz
//!
//! - Session and identity fixtures
//! - Sample configuration with hashed passwords
//! - Custom assertions

pub mod assertions;
pub mod fixtures;

pub use fixtures::{SessionFactory, sample_config_yaml};

use backoffice_authz::RoleSet;

/// Every subset of the four roles, empty set included
pub fn all_role_subsets() -> Vec<RoleSet> {
    use backoffice_authz::Role;

    (0u8..1 << Role::COUNT)
        .map(|mask| {
            Role::ALL
                .iter()
                .filter(|role| mask & (1 << role.index()) != 0)
                .copied()
                .collect()
        })
        .collect()
}
