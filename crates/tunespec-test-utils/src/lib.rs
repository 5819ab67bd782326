#![deny(unsafe_code)]

//! Shared test utilities for the tunespec workspace.
//!
//! Provides spec document builders, temporary resource directories, config
//! builders, and tracing helpers so individual crate tests stay concise.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! tunespec-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod document;
pub mod resources;
pub mod tracing_setup;
