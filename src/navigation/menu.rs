//! Sidebar menu and action-button gating

use crate::auth::rbac::{Action, Resource, resolve_permissions};
use crate::auth::session::SessionSnapshot;
use serde::{Deserialize, Serialize};

use super::routes::{RouteOutcome, RouteTable};

/// A sidebar entry linking to a guarded route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub path: String,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// The standard back-office sidebar
pub fn backoffice_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new("Users", "/users"),
        MenuItem::new("Categories", "/categories"),
        MenuItem::new("Brands", "/brands"),
        MenuItem::new("Products", "/products"),
        MenuItem::new("Shipping Rates", "/shipping_rates"),
        MenuItem::new("Orders", "/orders"),
        MenuItem::new("Locations", "/locations"),
        MenuItem::new("Settings", "/settings"),
    ]
}

/// Entries whose route the session may open
pub fn visible_menu<'a>(
    items: &'a [MenuItem],
    routes: &RouteTable,
    session: &SessionSnapshot,
) -> Vec<&'a MenuItem> {
    items
        .iter()
        .filter(|item| routes.resolve(&item.path, session) == RouteOutcome::Allow)
        .collect()
}

/// Actions the session may perform on a resource, for enabling buttons
pub fn allowed_actions(resource: Resource, session: &SessionSnapshot) -> Vec<Action> {
    resolve_permissions(session.roles()).actions_on(resource)
}
