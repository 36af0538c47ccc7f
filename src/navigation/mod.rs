//! Navigation wiring
//!
//! The route table that wraps back-office pages in guards, and the menu and
//! button gating derived from it.

mod menu;
mod routes;

pub use menu::{MenuItem, allowed_actions, backoffice_menu, visible_menu};
pub use routes::{Route, RouteOutcome, RouteTable, normalize_path};
