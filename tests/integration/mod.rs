//! Integration tests for backoffice-authz
//!
//! These tests exercise the public API across modules without mocking.

pub mod authorization_scenarios_tests;
pub mod config_tests;
pub mod session_flow_tests;
