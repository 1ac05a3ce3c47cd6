//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use gallery_common::{domain_status, AppError};
use gallery_core::DomainError;
use std::fmt;

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or repository failure
    Domain(DomainError),

    /// Application error (admin session, token encoding)
    App(AppError),

    /// Request failed validation
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::App(e) => write!(f, "{e}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::App(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::App(e) => e.status_code(),
            Self::Validation(_) => 400,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Seconds until a rate-limited request may be retried
    pub fn retry_after_secs(&self) -> Option<i64> {
        match self {
            Self::Domain(DomainError::RateLimited { retry_after_secs }) => Some(*retry_after_secs),
            _ => None,
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("Nothing to update");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.to_string(), "Validation error: Nothing to update");
    }

    #[test]
    fn test_domain_errors_keep_their_codes() {
        let err = ServiceError::from(DomainError::RateLimited { retry_after_secs: 42 });
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "TOO_MANY_COMMENTS");
        assert_eq!(err.retry_after_secs(), Some(42));

        let err = ServiceError::from(DomainError::PhotoNotFound(Uuid::nil()));
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.retry_after_secs(), None);

        let err = ServiceError::from(DomainError::DatabaseError("down".to_string()));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_session_errors_are_unauthorized() {
        let err = ServiceError::from(AppError::MissingSession);
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), "MISSING_SESSION");
    }
}
