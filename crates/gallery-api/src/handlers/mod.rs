//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod admin;
pub mod comments;
pub mod departments;
pub mod health;
pub mod photos;
