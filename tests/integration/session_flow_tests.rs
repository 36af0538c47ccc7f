//! Session flow integration tests
//!
//! Sign-in through the configured identity provider, guard evaluation
//! against the live snapshot, then logout and inactivity expiry.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::SAMPLE_PASSWORD;
    use crate::common::sample_config_yaml;
    use backoffice_authz::navigation::{allowed_actions, backoffice_menu, visible_menu};
    use backoffice_authz::{
        Action, AuthzError, Config, Credentials, InMemoryIdentityProvider, Resource, Role,
        RouteOutcome, RouteTable, SessionEnd, SessionStatus, SessionStore,
    };
    use chrono::{Duration, Utc};

    fn setup() -> (Config, InMemoryIdentityProvider, SessionStore) {
        let config = Config::from_yaml_str(&sample_config_yaml()).unwrap();
        let provider = InMemoryIdentityProvider::from_config(config.users());
        let store = SessionStore::new(config.session());
        (config, provider, store)
    }

    #[tokio::test]
    async fn test_login_resolves_roles() {
        let (_, provider, store) = setup();

        let snapshot = store
            .login(&provider, &Credentials::new("editor@shop.test", SAMPLE_PASSWORD))
            .await
            .unwrap();

        assert_eq!(snapshot.status(), SessionStatus::Authenticated);
        assert!(snapshot.roles().contains(Role::Editor));
        assert!(snapshot.roles().contains(Role::Sales));
        assert_eq!(snapshot.identity().unwrap().display_name, "Eddie Editor");
    }

    #[tokio::test]
    async fn test_login_email_is_case_insensitive() {
        let (_, provider, store) = setup();

        let result = store
            .login(&provider, &Credentials::new("Admin@Shop.Test", SAMPLE_PASSWORD))
            .await;
        assert!(result.is_ok());
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_unknown_role_names_grant_nothing() {
        let (_, provider, store) = setup();

        let snapshot = store
            .login(&provider, &Credentials::new("shipper@shop.test", SAMPLE_PASSWORD))
            .await
            .unwrap();

        assert_eq!(snapshot.roles().len(), 1);
        assert!(snapshot.roles().contains(Role::Shipper));
    }

    #[tokio::test]
    async fn test_wrong_password_leaves_session_signed_out() {
        let (_, provider, store) = setup();

        let result = store
            .login(&provider, &Credentials::new("admin@shop.test", "hunter2"))
            .await;

        assert!(matches!(result, Err(AuthzError::Auth(_))));
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
        assert!(store.snapshot().roles().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_user_cannot_sign_in() {
        let (_, provider, store) = setup();

        let err = store
            .login(&provider, &Credentials::new("former@shop.test", SAMPLE_PASSWORD))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("disabled"));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_routes_follow_session_lifecycle() {
        let (config, provider, store) = setup();
        let table = RouteTable::from_config(&config);

        assert_eq!(
            table.resolve("/orders", &store.snapshot()),
            RouteOutcome::Redirect("/login".to_string())
        );

        store
            .login(&provider, &Credentials::new("editor@shop.test", SAMPLE_PASSWORD))
            .await
            .unwrap();

        assert_eq!(table.resolve("/orders", &store.snapshot()), RouteOutcome::Allow);
        assert_eq!(table.resolve("/orders/new", &store.snapshot()), RouteOutcome::Allow);
        assert_eq!(
            table.resolve("/settings", &store.snapshot()),
            RouteOutcome::Redirect("/".to_string())
        );
        assert_eq!(
            table.resolve("/users", &store.snapshot()),
            RouteOutcome::Redirect("/unauthorized".to_string())
        );

        let snapshot = store.on_logout();
        assert_eq!(snapshot.ended_by(), Some(SessionEnd::LoggedOut));
        assert_eq!(
            table.resolve("/orders", &store.snapshot()),
            RouteOutcome::Redirect("/login".to_string())
        );
    }

    #[tokio::test]
    async fn test_idle_session_expires() {
        let (_, provider, store) = setup();
        store
            .login(&provider, &Credentials::new("admin@shop.test", SAMPLE_PASSWORD))
            .await
            .unwrap();

        let last_activity = store.snapshot().last_activity().unwrap();
        assert!(!store.expire_if_idle_at(last_activity + Duration::seconds(599)));
        assert!(store.is_authenticated());

        assert!(store.expire_if_idle_at(last_activity + Duration::seconds(601)));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.status(), SessionStatus::Unauthenticated);
        assert_eq!(snapshot.ended_by(), Some(SessionEnd::Expired));
        assert!(snapshot.roles().is_empty());
    }

    #[tokio::test]
    async fn test_activity_postpones_expiry() {
        let (_, provider, store) = setup();
        store
            .login(&provider, &Credentials::new("admin@shop.test", SAMPLE_PASSWORD))
            .await
            .unwrap();

        let later = Utc::now() + Duration::seconds(500);
        assert!(store.touch_at(later));
        assert!(!store.expire_if_idle_at(later + Duration::seconds(500)));
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_menu_and_buttons_for_signed_in_user() {
        let (_, provider, store) = setup();
        let table = RouteTable::backoffice("/unauthorized");
        store
            .login(&provider, &Credentials::new("shipper@shop.test", SAMPLE_PASSWORD))
            .await
            .unwrap();

        let snapshot = store.snapshot();
        let menu = backoffice_menu();
        let labels: Vec<&str> = visible_menu(&menu, &table, &snapshot)
            .into_iter()
            .map(|item| item.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Products", "Shipping Rates", "Orders"]);

        assert_eq!(
            allowed_actions(Resource::Orders, &snapshot),
            vec![Action::Read, Action::Update]
        );
    }
}
