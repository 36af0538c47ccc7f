//! Authorization guard
//!
//! Decides whether a session may access a protected region given a
//! declarative access requirement, and what to do when it may not.

mod decision;
mod requirement;

pub use decision::{
    AuthzDecision, DEFAULT_UNAUTHORIZED_PATH, Fallback, Guard, Guarded, authorize,
    authorize_spec, explain, explain_spec,
};
pub use requirement::{AccessRequirement, GuardSpec, PermissionSpec};
