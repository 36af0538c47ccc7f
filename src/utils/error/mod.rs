//! Error handling for the authorization core
//!
//! Errors only surface from configuration, parsing, credential checks and
//! password hashing. A denied access check is a normal outcome, not an error.

mod helpers;
mod types;

pub use types::{AuthzError, Result};
