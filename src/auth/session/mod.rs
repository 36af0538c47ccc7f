//! Session and identity state
//!
//! `Unauthenticated -> Authenticating -> Authenticated`, and from there back
//! to `Unauthenticated` on logout or inactivity expiry. The session object is
//! passed explicitly to guards; there is no ambient global session.

mod provider;
mod store;
mod types;

pub use provider::{IdentityProvider, InMemoryIdentityProvider};
pub use store::{DEFAULT_INACTIVITY_TIMEOUT_SECS, SessionStore};
pub use types::{Credentials, Identity, SessionEnd, SessionSnapshot, SessionStatus};
