//! # gallery-common
//!
//! Shared utilities including configuration, error handling, the admin
//! session token service, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{hash_password, AdminSessionService, SessionClaims, SessionToken, SESSION_COOKIE_NAME};
pub use config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    ServerConfig, SpamConfig, StorageConfig,
};
pub use error::{domain_status, AppError, AppResult};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
