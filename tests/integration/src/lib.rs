//! Integration test utilities for the gallery server
//!
//! Spawns the real Axum application on a local port, backed by in-memory
//! repositories and a filesystem image store in a temporary directory, so
//! the suite runs without PostgreSQL.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
