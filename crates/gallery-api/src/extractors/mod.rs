//! Axum extractors for request handling
//!
//! Custom extractors for validation, path ids, listing queries, client
//! identity and the admin session.

mod admin;
mod client;
mod path;
mod photo_query;
mod validated;

pub use admin::{session_token, AdminSession};
pub use client::ClientIp;
pub use path::IdPath;
pub use photo_query::PhotoListParams;
pub use validated::ValidatedJson;
