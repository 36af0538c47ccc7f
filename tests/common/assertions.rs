//! Custom test assertions

use backoffice_authz::{Action, EffectivePermissions, Resource};

/// Assertions for resolved permission sets
pub trait PermissionAssertions {
    /// Assert every listed grant is present
    fn assert_grants(&self, grants: &[(Resource, Action)]);

    /// Assert every listed grant is absent
    fn assert_denies(&self, grants: &[(Resource, Action)]);
}

impl PermissionAssertions for EffectivePermissions {
    fn assert_grants(&self, grants: &[(Resource, Action)]) {
        for (resource, action) in grants {
            assert!(
                self.allows(*resource, *action),
                "Expected {}.{} to be granted",
                resource,
                action
            );
        }
    }

    fn assert_denies(&self, grants: &[(Resource, Action)]) {
        for (resource, action) in grants {
            assert!(
                !self.allows(*resource, *action),
                "Expected {}.{} to be denied",
                resource,
                action
            );
        }
    }
}
