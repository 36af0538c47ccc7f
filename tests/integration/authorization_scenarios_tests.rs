//! Authorization scenario tests
//!
//! Resolver properties checked over every role subset, plus the guard
//! scenarios the back office relies on.

#[cfg(test)]
mod tests {
    use crate::common::assertions::PermissionAssertions;
    use crate::common::{SessionFactory, all_role_subsets};
    use backoffice_authz::{
        AccessRequirement, Action, EffectivePermissions, Fallback, Guard, GuardSpec, Guarded,
        MemoizedResolver, Resource, Role, RoleSet, SessionSnapshot, authorize, authorize_spec,
        resolve_permissions,
    };

    // ==================== Resolver properties ====================

    #[test]
    fn test_resolution_is_monotone() {
        let subsets = all_role_subsets();
        for smaller in &subsets {
            for larger in &subsets {
                if smaller.is_subset(larger) {
                    assert!(
                        resolve_permissions(larger).is_superset_of(&resolve_permissions(smaller)),
                        "{} should grant at least what {} grants",
                        larger,
                        smaller
                    );
                }
            }
        }
    }

    #[test]
    fn test_empty_role_set_denies_everything() {
        let roles = RoleSet::new();
        for resource in Resource::ALL {
            for action in Action::ALL {
                assert!(!authorize(&AccessRequirement::permission(resource, action), &roles));
            }
        }
        assert!(resolve_permissions(&roles).is_empty());
    }

    #[test]
    fn test_role_order_does_not_matter() {
        let forward = RoleSet::parse_list("EDITOR,SALES,SHIPPER").unwrap();
        let backward = RoleSet::parse_list("SHIPPER,SALES,EDITOR").unwrap();
        assert_eq!(resolve_permissions(&forward), resolve_permissions(&backward));
    }

    #[test]
    fn test_duplicate_roles_are_idempotent() {
        let once = RoleSet::parse_list("SALES").unwrap();
        let twice = RoleSet::parse_list("SALES,sales,SALES").unwrap();
        assert_eq!(once, twice);
        assert_eq!(resolve_permissions(&once), resolve_permissions(&twice));
    }

    #[test]
    fn test_memoized_resolver_agrees_with_resolver() {
        let resolver = MemoizedResolver::new();
        for roles in all_role_subsets() {
            assert_eq!(resolver.resolve(&roles), resolve_permissions(&roles));
        }
        assert_eq!(resolver.cached_sets(), 16);
    }

    #[test]
    fn test_union_grants() {
        let permissions = resolve_permissions(&RoleSet::from([Role::Editor, Role::Shipper]));

        permissions.assert_grants(&[
            (Resource::Products, Action::Delete),
            (Resource::Orders, Action::Update),
            (Resource::Shipping, Action::Read),
        ]);
        permissions.assert_denies(&[
            (Resource::Orders, Action::Create),
            (Resource::Settings, Action::Read),
            (Resource::Users, Action::Read),
        ]);
    }

    #[test]
    fn test_admin_holds_every_grant() {
        assert_eq!(
            resolve_permissions(&RoleSet::from([Role::Admin])),
            EffectivePermissions::all()
        );
    }

    // ==================== Guard scenarios ====================

    #[test]
    fn test_admin_may_delete_products() {
        let roles = RoleSet::from([Role::Admin]);
        assert!(authorize(
            &AccessRequirement::permission(Resource::Products, Action::Delete),
            &roles
        ));
    }

    #[test]
    fn test_shipper_may_not_read_categories() {
        let roles = RoleSet::from([Role::Shipper]);
        assert!(!authorize(
            &AccessRequirement::permission(Resource::Categories, Action::Read),
            &roles
        ));
    }

    #[test]
    fn test_editor_and_sales_may_create_orders() {
        let requirement = AccessRequirement::permission(Resource::Orders, Action::Create);

        assert!(!authorize(&requirement, &RoleSet::from([Role::Editor])));
        assert!(authorize(&requirement, &RoleSet::from([Role::Editor, Role::Sales])));
    }

    #[test]
    fn test_no_roles_fails_role_allow_list() {
        let requirement = AccessRequirement::roles([Role::Admin]);
        assert!(!authorize(&requirement, &RoleSet::new()));
    }

    #[test]
    fn test_false_policy_denies_everyone() {
        let requirement = AccessRequirement::policy(false);
        for roles in all_role_subsets() {
            assert!(!authorize(&requirement, &roles));
        }
    }

    #[test]
    fn test_permissions_override_allowed_roles() {
        let spec = GuardSpec::new()
            .allowed_roles([Role::Sales])
            .permission(Resource::Users, Action::Read);

        assert!(!authorize_spec(&spec, &RoleSet::from([Role::Sales])));
        assert!(authorize_spec(&spec, &RoleSet::from([Role::Admin])));
    }

    #[test]
    fn test_spec_without_requirement_denies() {
        let spec = GuardSpec::new();
        for roles in all_role_subsets() {
            assert!(!authorize_spec(&spec, &roles));
        }
    }

    // ==================== Guard components ====================

    #[test]
    fn test_guard_redirects_and_hides() {
        let redirecting = Guard::new(AccessRequirement::roles([Role::Admin]));
        let hiding = Guard::new(AccessRequirement::permission(Resource::Orders, Action::Delete))
            .with_fallback(Fallback::Hide);

        let shipper = SessionFactory::signed_in([Role::Shipper]);
        assert_eq!(
            redirecting.protect(&shipper, || "settings"),
            Guarded::Redirect("/unauthorized".to_string())
        );
        assert_eq!(hiding.protect(&shipper, || "delete button"), Guarded::Hidden);

        let admin = SessionFactory::admin();
        assert_eq!(
            redirecting.protect(&admin, || "settings").into_content(),
            Some("settings")
        );
        assert!(hiding.protect(&admin, || "delete button").is_rendered());
    }

    #[test]
    fn test_signed_out_session_is_denied() {
        let guard = Guard::new(AccessRequirement::permission(Resource::Products, Action::Read));
        let session: SessionSnapshot = SessionFactory::signed_out();
        assert!(!guard.check(&session));
    }
}
