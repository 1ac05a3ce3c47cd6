//! Upload validation

use gallery_core::error::DomainError;
use gallery_core::traits::ImageUpload;

/// Accepted upload content types
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/heic",
    "image/webp",
];

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Reject empty, oversized or non-image uploads
pub fn validate_upload(upload: &ImageUpload, max_bytes: u64) -> Result<(), DomainError> {
    if upload.bytes.is_empty() {
        return Err(DomainError::ValidationError("File is required".to_string()));
    }

    if upload.size() as u64 > max_bytes {
        return Err(DomainError::FileTooLarge {
            max_mb: max_bytes / BYTES_PER_MB,
        });
    }

    let content_type = upload.content_type.to_ascii_lowercase();
    if !ALLOWED_MIME_TYPES.contains(&content_type.as_str()) {
        return Err(DomainError::UnsupportedFileType(upload.content_type.clone()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(len: usize, content_type: &str) -> ImageUpload {
        ImageUpload {
            bytes: vec![0u8; len],
            content_type: content_type.to_string(),
            file_name: Some("photo.jpg".to_string()),
        }
    }

    #[test]
    fn test_accepts_allowed_types() {
        for mime in ALLOWED_MIME_TYPES {
            assert!(validate_upload(&upload(10, mime), 1024).is_ok());
        }
        assert!(validate_upload(&upload(10, "IMAGE/PNG"), 1024).is_ok());
    }

    #[test]
    fn test_rejects_empty_file() {
        let err = validate_upload(&upload(0, "image/png"), 1024).unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_oversized_file() {
        let max = 10 * BYTES_PER_MB;
        let err = validate_upload(&upload(max as usize + 1, "image/jpeg"), max).unwrap_err();
        assert!(matches!(err, DomainError::FileTooLarge { max_mb: 10 }));
        assert!(validate_upload(&upload(max as usize, "image/jpeg"), max).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        let err = validate_upload(&upload(10, "application/pdf"), 1024).unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedFileType(ref t) if t == "application/pdf"));
        assert!(validate_upload(&upload(10, "image/gif"), 1024).is_err());
    }
}
