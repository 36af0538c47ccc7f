//! Route configuration

use crate::auth::guard::GuardSpec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A protected path and the guard wrapped around it
///
/// The guard fields sit directly on the route entry:
///
/// ```yaml
/// routes:
///   - path: /orders
///     permissions: { resource: orders, action: read }
///   - path: /settings
///     allowed_roles: [ADMIN]
///     redirect: /dashboard
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Path prefix the guard applies to
    pub path: String,
    /// Access requirement
    #[serde(flatten)]
    pub guard: GuardSpec,
    /// Redirect target on denial, overriding `guard.unauthorized_redirect`
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Validate the configured route list
///
/// Returns the paths whose guards declare more than one requirement so the
/// caller can warn or reject depending on strictness.
pub fn validate_routes(routes: &[RouteConfig]) -> Result<Vec<String>, String> {
    let mut seen = HashSet::new();
    let mut ambiguous = Vec::new();

    for route in routes {
        if !route.path.starts_with('/') {
            return Err(format!("route path must start with '/', got '{}'", route.path));
        }

        if !seen.insert(route.path.trim_end_matches('/').to_string()) {
            return Err(format!("Duplicate route path: {}", route.path));
        }

        if let Some(redirect) = &route.redirect {
            if !redirect.starts_with('/') {
                return Err(format!(
                    "redirect for {} must be an absolute path, got '{}'",
                    route.path, redirect
                ));
            }
        }

        if route.guard.variant_count() > 1 {
            ambiguous.push(route.path.clone());
        }
    }

    Ok(ambiguous)
}
