//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Photo not found: {0}")]
    PhotoNotFound(Uuid),

    #[error("Comment not found: {0}")]
    CommentNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File too large: max {max_mb} MB")]
    FileTooLarge { max_mb: u64 },

    // =========================================================================
    // Policy Rejections (retryable or idempotency guards)
    // =========================================================================
    #[error("Too many comments. Try again in {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: i64 },

    #[error("Photo already liked")]
    AlreadyLiked,

    #[error("Photo not liked yet")]
    NotLiked,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PhotoNotFound(_) => "PHOTO_NOT_FOUND",
            Self::CommentNotFound(_) => "COMMENT_NOT_FOUND",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",

            // Policy
            Self::RateLimited { .. } => "TOO_MANY_COMMENTS",
            Self::AlreadyLiked => "ALREADY_LIKED",
            Self::NotLiked => "NOT_LIKED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PhotoNotFound(_) | Self::CommentNotFound(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::UnsupportedFileType(_) | Self::FileTooLarge { .. }
        )
    }

    /// Check if this is a write-guard rejection (rate limit or like state)
    pub fn is_policy_rejection(&self) -> bool {
        matches!(self, Self::RateLimited { .. } | Self::AlreadyLiked | Self::NotLiked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::PhotoNotFound(Uuid::nil()).code(), "PHOTO_NOT_FOUND");
        assert_eq!(DomainError::AlreadyLiked.code(), "ALREADY_LIKED");
        assert_eq!(
            DomainError::RateLimited { retry_after_secs: 12 }.code(),
            "TOO_MANY_COMMENTS"
        );
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::PhotoNotFound(Uuid::nil()).is_not_found());
        assert!(DomainError::CommentNotFound(Uuid::nil()).is_not_found());
        assert!(!DomainError::AlreadyLiked.is_not_found());

        assert!(DomainError::NotLiked.is_policy_rejection());
        assert!(DomainError::RateLimited { retry_after_secs: 1 }.is_policy_rejection());
        assert!(!DomainError::FileTooLarge { max_mb: 10 }.is_policy_rejection());

        assert!(DomainError::FileTooLarge { max_mb: 10 }.is_validation());
        assert!(DomainError::UnsupportedFileType("image/bmp".to_string()).is_validation());
        assert!(!DomainError::DatabaseError("down".to_string()).is_validation());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::FileTooLarge { max_mb: 10 };
        assert_eq!(err.to_string(), "File too large: max 10 MB");

        let err = DomainError::RateLimited { retry_after_secs: 42 };
        assert_eq!(err.to_string(), "Too many comments. Try again in 42 seconds");
    }
}
