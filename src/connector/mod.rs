//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Storage (pretty-printed JSON file, in-memory)
//! - Completion API (OpenAI chat completions, offline mock)
//! - HTTP API (axum router, controllers, dependency container)

pub mod adapter;
pub mod api;

pub use adapter::*;
