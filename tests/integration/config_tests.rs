//! Configuration integration tests
//!
//! Loading from disk and environment, and the route tables built from it.

#[cfg(test)]
mod tests {
    use crate::common::{SessionFactory, sample_config_yaml};
    use backoffice_authz::config::AuthzConfig;
    use backoffice_authz::{Config, InMemoryIdentityProvider, Role, RouteOutcome, RouteTable};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_load_sample_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(sample_config_yaml().as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.session().inactivity_timeout_secs, 600);
        assert_eq!(config.routes().len(), 6);
        assert_eq!(config.users().len(), 4);
        assert_eq!(InMemoryIdentityProvider::from_config(config.users()).len(), 4);
    }

    #[test]
    fn test_sample_config_round_trips_through_yaml() {
        let config = Config::from_yaml_str(&sample_config_yaml()).unwrap();
        let reparsed = Config::from_yaml_str(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(config, reparsed);
    }

    #[test]
    fn test_configured_routes_replace_backoffice_table() {
        let config = Config::from_yaml_str(&sample_config_yaml()).unwrap();
        let table = RouteTable::from_config(&config);
        let admin = SessionFactory::admin();

        assert_eq!(table.len(), 6);
        assert_eq!(table.resolve("/settings/general", &admin), RouteOutcome::Allow);
        assert_eq!(table.resolve("/products", &admin), RouteOutcome::NotFound);
    }

    #[test]
    fn test_empty_config_uses_backoffice_table() {
        let table = RouteTable::from_config(&Config::default());
        let sales = SessionFactory::signed_in([Role::Sales]);

        assert_eq!(table.resolve("/orders/new", &sales), RouteOutcome::Allow);
        assert_eq!(
            table.resolve("/products/delete", &sales),
            RouteOutcome::Redirect("/unauthorized".to_string())
        );
        assert_eq!(
            table.resolve("/settings", &sales),
            RouteOutcome::Redirect("/unauthorized".to_string())
        );
    }

    #[test]
    fn test_strict_requirements_reject_ambiguous_guards() {
        let yaml = r#"
guard:
  strict_requirements: true
routes:
  - path: /reports
    allowed_roles: [ADMIN]
    policy: true
"#;
        let err = Config::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("/reports"));
    }

    #[test]
    fn test_duplicate_user_emails_rejected() {
        let yaml = sample_config_yaml().replace("editor@shop.test", "ADMIN@shop.test");
        let err = Config::from_yaml_str(&yaml).unwrap_err();
        assert!(err.to_string().contains("Duplicate user email"));
    }

    #[test]
    fn test_authz_config_defaults() {
        let config = AuthzConfig::default();
        assert_eq!(config.session.inactivity_timeout_secs, 1800);
        assert_eq!(config.guard.unauthorized_redirect, "/unauthorized");
        assert!(config.guard.login_redirect.is_none());
        assert!(!config.guard.strict_requirements);
        assert!(config.routes.is_empty());
        assert!(config.users.is_empty());
    }
}
