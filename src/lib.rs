//! Keyrelay - keyboard shortcut dispatcher for a host web application
//!
//! This library crate exposes internal modules for integration testing.

pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod followup;
pub mod fragment;
pub mod host;
pub mod keys;
pub mod net;
pub mod overlay;
pub mod platform;
pub mod scenario;
pub mod session;
pub mod shortcuts;
