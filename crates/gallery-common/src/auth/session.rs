//! Admin session tokens
//!
//! A single shared password unlocks the admin role. The password is held only
//! as an Argon2id PHC hash. A successful login is represented by a signed,
//! expiring JWT carried in an HttpOnly cookie, so the cookie value alone
//! cannot be forged.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AdminConfig;
use crate::error::AppError;

/// Cookie carrying the admin session token
pub const SESSION_COOKIE_NAME: &str = "admin_session";

const ADMIN_SUBJECT: &str = "admin";

/// JWT claims for an admin session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (always "admin")
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Session ID, unique per login
    pub sid: String,
}

impl SessionClaims {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// A freshly issued session
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub token: String,
    pub expires_in: i64,
}

/// Hash a password into an Argon2id PHC string
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verifies the admin password and issues/validates session tokens
#[derive(Clone)]
pub struct AdminSessionService {
    password_hash: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
    ttl_secs: i64,
}

impl AdminSessionService {
    /// Hash `password` and build the service
    ///
    /// # Errors
    /// `Config` if the TTL is out of range, `Internal` if hashing fails
    pub fn new(password: &str, secret: &str, ttl_secs: i64) -> Result<Self, AppError> {
        Self::with_password_hash(&hash_password(password)?, secret, ttl_secs)
    }

    /// Build the service from an existing PHC hash
    ///
    /// # Errors
    /// `Config` if the hash cannot be parsed or the TTL is out of range
    pub fn with_password_hash(password_hash: &str, secret: &str, ttl_secs: i64) -> Result<Self, AppError> {
        PasswordHash::new(password_hash)
            .map_err(|e| AppError::Config(format!("ADMIN_PASSWORD_HASH is not a PHC string: {e}")))?;

        let ttl = Duration::try_seconds(ttl_secs)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or_else(|| AppError::Config(format!("ADMIN_SESSION_TTL_SECS out of range: {ttl_secs}")))?;

        Ok(Self {
            password_hash: password_hash.to_string(),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            ttl_secs,
        })
    }

    /// Build the service from configuration; a configured hash wins over the plain password
    ///
    /// # Errors
    /// See [`Self::new`] and [`Self::with_password_hash`]
    pub fn from_config(config: &AdminConfig) -> Result<Self, AppError> {
        match (&config.password_hash, &config.password) {
            (Some(hash), _) => Self::with_password_hash(hash, &config.session_secret, config.session_ttl_secs),
            (None, Some(password)) => Self::new(password, &config.session_secret, config.session_ttl_secs),
            (None, None) => Err(AppError::Config("ADMIN_PASSWORD or ADMIN_PASSWORD_HASH is required".to_string())),
        }
    }

    /// Session lifetime in seconds
    #[must_use]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Check a candidate password against the stored hash
    #[must_use]
    pub fn verify_password(&self, candidate: &str) -> bool {
        PasswordHash::new(&self.password_hash).is_ok_and(|hash| {
            Argon2::default()
                .verify_password(candidate.as_bytes(), &hash)
                .is_ok()
        })
    }

    /// Issue a new session token
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self) -> Result<SessionToken, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Session expiry out of range")))?;
        let claims = SessionClaims {
            sub: ADMIN_SUBJECT.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            sid: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode session token")))?;

        Ok(SessionToken {
            token,
            expires_in: self.ttl_secs,
        })
    }

    /// Decode and validate a session token
    ///
    /// # Errors
    /// Returns `SessionExpired` or `InvalidSession`
    pub fn validate(&self, token: &str) -> Result<SessionClaims, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::SessionExpired,
                _ => AppError::InvalidSession,
            }
        })?;

        if data.claims.sub != ADMIN_SUBJECT {
            return Err(AppError::InvalidSession);
        }

        Ok(data.claims)
    }

    /// Convenience check used by the verify endpoint
    #[must_use]
    pub fn is_valid(&self, token: Option<&str>) -> bool {
        token.is_some_and(|t| self.validate(t).is_ok())
    }
}

impl std::fmt::Debug for AdminSessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSessionService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
