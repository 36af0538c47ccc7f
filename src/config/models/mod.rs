//! Configuration data models

pub mod auth;
pub mod authz;
pub mod navigation;

// Re-export all configuration types
pub use auth::*;
pub use authz::*;
pub use navigation::*;

use crate::auth::session::DEFAULT_INACTIVITY_TIMEOUT_SECS;

/// Shortest accepted inactivity timeout
pub const MIN_INACTIVITY_TIMEOUT_SECS: u64 = 60;

/// Longest accepted inactivity timeout (one day)
pub const MAX_INACTIVITY_TIMEOUT_SECS: u64 = 86_400;

/// Default inactivity timeout in seconds
pub fn default_inactivity_timeout_secs() -> u64 {
    DEFAULT_INACTIVITY_TIMEOUT_SECS
}

/// Default redirect target for denied access
pub fn default_unauthorized_redirect() -> String {
    crate::auth::guard::DEFAULT_UNAUTHORIZED_PATH.to_string()
}

fn default_true() -> bool {
    true
}
