//! Utility modules for the authorization core
//!
//! - **crypto**: password hashing for configured users
//! - **error**: error type and result alias
//! - **logging**: `tracing` subscriber setup

pub mod crypto;
pub mod error;
pub mod logging;

pub use error::{AuthzError, Result};
