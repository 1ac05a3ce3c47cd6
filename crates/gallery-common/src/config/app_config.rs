//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub spam: SpamConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
    /// Overrides the migrations directory bundled with the source tree
    #[serde(default)]
    pub migrations_dir: Option<String>,
}

/// Shared-password admin configuration
///
/// At least one of `password` and `password_hash` is set; the hash wins.
#[derive(Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub password: Option<String>,
    /// Argon2 PHC string
    #[serde(default)]
    pub password_hash: Option<String>,
    pub session_secret: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: i64,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("password_hash", &self.password_hash.is_some())
            .field("session_secret", &"***")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .finish()
    }
}

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

/// Image storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    #[serde(default = "default_upload_url_prefix")]
    pub url_prefix: String,
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: u64,
    /// Longest edge of the stored original, in pixels
    #[serde(default = "default_max_image_dimension")]
    pub max_image_dimension: u32,
    /// Longest edge of the generated thumbnail, in pixels
    #[serde(default = "default_thumbnail_dimension")]
    pub thumbnail_dimension: u32,
}

impl StorageConfig {
    #[must_use]
    pub fn max_file_size_bytes(&self) -> usize {
        usize::try_from(self.max_file_size_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
    }
}

/// Comment spam guard configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SpamConfig {
    /// Comments allowed per identity inside one window
    #[serde(default = "default_spam_max_comments")]
    pub max_comments: u32,
    #[serde(default = "default_spam_window")]
    pub window_secs: u64,
    /// Trackers whose window started longer ago than this are swept
    #[serde(default = "default_spam_retention")]
    pub retention_secs: u64,
    #[serde(default = "default_spam_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl SpamConfig {
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl Default for SpamConfig {
    fn default() -> Self {
        Self {
            max_comments: default_spam_max_comments(),
            window_secs: default_spam_window(),
            retention_secs: default_spam_retention(),
            sweep_interval_secs: default_spam_sweep_interval(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            url_prefix: default_upload_url_prefix(),
            max_file_size_mb: default_max_file_size(),
            max_image_dimension: default_max_image_dimension(),
            thumbnail_dimension: default_thumbnail_dimension(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "dept-gallery".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_session_ttl() -> i64 {
    86400 // 24 hours
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_upload_url_prefix() -> String {
    "/uploads".to_string()
}

fn default_max_file_size() -> u64 {
    10
}

fn default_max_image_dimension() -> u32 {
    2000
}

fn default_thumbnail_dimension() -> u32 {
    400
}

fn default_spam_max_comments() -> u32 {
    3
}

fn default_spam_window() -> u64 {
    60
}

fn default_spam_retention() -> u64 {
    3600
}

fn default_spam_sweep_interval() -> u64 {
    3600
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required keys are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::MissingVar(key));

        let password = lookup("ADMIN_PASSWORD");
        let password_hash = lookup("ADMIN_PASSWORD_HASH");
        if password.is_none() && password_hash.is_none() {
            return Err(ConfigError::MissingVar("ADMIN_PASSWORD"));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: parse_value("API_PORT", &required("API_PORT")?)?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&lookup, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                run_migrations: parse_or(&lookup, "DATABASE_RUN_MIGRATIONS", default_true)?,
                migrations_dir: lookup("DATABASE_MIGRATIONS_DIR"),
            },
            admin: AdminConfig {
                password,
                password_hash,
                session_secret: required("ADMIN_SESSION_SECRET")?,
                session_ttl_secs: parse_or(&lookup, "ADMIN_SESSION_TTL_SECS", default_session_ttl)?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|origin| !origin.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_else(default_allowed_origins),
            },
            storage: StorageConfig {
                upload_dir: lookup("UPLOAD_DIR").unwrap_or_else(default_upload_dir),
                url_prefix: lookup("UPLOAD_URL_PREFIX").unwrap_or_else(default_upload_url_prefix),
                max_file_size_mb: parse_or(&lookup, "MAX_FILE_SIZE_MB", default_max_file_size)?,
                max_image_dimension: parse_or(&lookup, "MAX_IMAGE_DIMENSION", default_max_image_dimension)?,
                thumbnail_dimension: parse_or(&lookup, "THUMBNAIL_DIMENSION", default_thumbnail_dimension)?,
            },
            spam: SpamConfig {
                max_comments: parse_or(&lookup, "SPAM_MAX_COMMENTS", default_spam_max_comments)?,
                window_secs: parse_or(&lookup, "SPAM_WINDOW_SECS", default_spam_window)?,
                retention_secs: parse_or(&lookup, "SPAM_RETENTION_SECS", default_spam_retention)?,
                sweep_interval_secs: parse_or(&lookup, "SPAM_SWEEP_INTERVAL_SECS", default_spam_sweep_interval)?,
            },
        })
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key, raw.to_string()))
}

fn parse_or<F, T, D>(lookup: &F, key: &'static str, default: D) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    D: FnOnce() -> T,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
