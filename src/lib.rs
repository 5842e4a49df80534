//! Stark Browser: a minimal tabbed web browser with a built-in ad-request blocker.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod chrome;
pub mod ipc;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
