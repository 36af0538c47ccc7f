//! Route table
//!
//! Wraps each back-office path in a [`Guard`] and resolves an incoming path
//! to allow, redirect or not-found for the current session.

use crate::auth::guard::{Fallback, Guard, GuardSpec, Guarded};
use crate::auth::rbac::{Action, Resource, Role};
use crate::auth::session::SessionSnapshot;
use crate::config::Config;
use tracing::debug;

/// Screens that follow the list/new/edit/delete layout
const CRUD_SCREENS: [(&str, Resource); 7] = [
    ("/users", Resource::Users),
    ("/categories", Resource::Categories),
    ("/brands", Resource::Brands),
    ("/products", Resource::Products),
    ("/orders", Resource::Orders),
    ("/locations", Resource::Locations),
    ("/shipping_rates", Resource::Shipping),
];

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Render the page
    Allow,
    /// Navigate elsewhere instead
    Redirect(String),
    /// No route matches, or the route hides itself on denial
    NotFound,
}

/// A guarded path prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    path: String,
    guard: Guard,
}

impl Route {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn guard(&self) -> &Guard {
        &self.guard
    }

    fn matches(&self, path: &str) -> bool {
        if self.path == "/" {
            return path == "/";
        }
        path == self.path
            || path
                .strip_prefix(self.path.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Guarded routes, matched by longest path prefix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<Route>,
    login_redirect: Option<String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send signed-out users here instead of the route's own fallback
    pub fn with_login_redirect(mut self, path: impl Into<String>) -> Self {
        self.login_redirect = Some(normalize_path(&path.into()));
        self
    }

    /// Add a route; a later route with the same path replaces the earlier one
    pub fn route(mut self, path: impl Into<String>, guard: Guard) -> Self {
        let path = normalize_path(&path.into());
        self.routes.retain(|route| route.path != path);
        self.routes.push(Route { path, guard });
        self
    }

    /// The built-in back-office route table
    pub fn backoffice(unauthorized_redirect: &str) -> Self {
        let fallback = Fallback::Redirect(unauthorized_redirect.to_string());
        let guarded = |spec: GuardSpec| Guard::new(spec).with_fallback(fallback.clone());
        let public = || Guard::new(GuardSpec::new().policy(true));

        let mut table = Self::new()
            .route("/login", public())
            .route(unauthorized_redirect, public())
            .route("/", guarded(GuardSpec::new().allowed_roles(Role::ALL)))
            .route("/account", guarded(GuardSpec::new().allowed_roles(Role::ALL)))
            .route(
                "/settings",
                guarded(GuardSpec::new().allowed_roles([Role::Admin])),
            );

        for (base, resource) in CRUD_SCREENS {
            table = table
                .route(base, guarded(GuardSpec::new().permission(resource, Action::Read)))
                .route(
                    format!("{}/new", base),
                    guarded(GuardSpec::new().permission(resource, Action::Create)),
                )
                .route(
                    format!("{}/edit", base),
                    guarded(GuardSpec::new().permission(resource, Action::Update)),
                )
                .route(
                    format!("{}/delete", base),
                    guarded(GuardSpec::new().permission(resource, Action::Delete)),
                );
        }

        table
    }

    /// Route table from configuration
    ///
    /// Falls back to [`RouteTable::backoffice`] when no routes are configured.
    pub fn from_config(config: &Config) -> Self {
        let guard_config = config.guard();

        let mut table = if config.routes().is_empty() {
            Self::backoffice(&guard_config.unauthorized_redirect)
        } else {
            config.routes().iter().fold(Self::new(), |table, route| {
                let target = route
                    .redirect
                    .clone()
                    .unwrap_or_else(|| guard_config.unauthorized_redirect.clone());
                table.route(
                    route.path.clone(),
                    Guard::new(route.guard.clone()).with_fallback(Fallback::Redirect(target)),
                )
            })
        };

        if let Some(login) = &guard_config.login_redirect {
            table = table.with_login_redirect(login.clone());
        }

        debug!("Route table built with {} routes", table.routes.len());
        table
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Most specific route covering `path`
    pub fn match_route(&self, path: &str) -> Option<&Route> {
        let path = normalize_path(path);
        self.routes
            .iter()
            .filter(|route| route.matches(&path))
            .max_by_key(|route| route.path.len())
    }

    /// Decide what to do with a navigation to `path`
    pub fn resolve(&self, path: &str, session: &SessionSnapshot) -> RouteOutcome {
        let requested = normalize_path(path);
        let Some(route) = self.match_route(&requested) else {
            debug!("No route for {}", requested);
            return RouteOutcome::NotFound;
        };

        let target = match route.guard.protect(session, || ()) {
            Guarded::Render(()) => return RouteOutcome::Allow,
            Guarded::Hidden => return RouteOutcome::NotFound,
            Guarded::Redirect(target) => match &self.login_redirect {
                Some(login) if !session.is_authenticated() => login.clone(),
                _ => target,
            },
        };

        // A denied redirect target would bounce forever
        if normalize_path(&target) == requested {
            return RouteOutcome::NotFound;
        }

        RouteOutcome::Redirect(target)
    }
}

/// Drop query string, fragment and trailing slashes
pub fn normalize_path(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
