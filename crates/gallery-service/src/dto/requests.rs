//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Length limits count characters, not bytes. Free-text fields are trimmed
//! while deserializing so the limits apply to the trimmed value.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use gallery_core::entities::{CommentChanges, PhotoChanges};
use gallery_core::value_objects::{PhotoQuery, PhotoSort};

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(|v| v.trim().to_string()))
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub photo_id: Uuid,

    #[validate(length(min = 1, max = 50, message = "Nickname must be 1-50 characters"))]
    #[serde(deserialize_with = "trimmed")]
    pub nickname: String,

    #[validate(length(min = 1, max = 200, message = "Comment must be 1-200 characters"))]
    #[serde(deserialize_with = "trimmed")]
    pub content: String,
}

/// Update comment request; at least one field must be present
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 50, message = "Nickname must be 1-50 characters"))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub nickname: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Comment must be 1-200 characters"))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub content: Option<String>,
}

impl UpdateCommentRequest {
    pub fn into_changes(self) -> CommentChanges {
        CommentChanges {
            nickname: self.nickname,
            content: self.content,
        }
    }
}

// ============================================================================
// Like Requests
// ============================================================================

/// Like toggle: `true` to like, `false` to take the like back
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub is_liked: bool,
}

// ============================================================================
// Photo Requests
// ============================================================================

/// Text fields of a multipart upload
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadPhotoRequest {
    #[validate(length(min = 1, max = 50, message = "Department name must be 1-50 characters"))]
    #[serde(deserialize_with = "trimmed")]
    pub department_name: String,

    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    #[serde(deserialize_with = "trimmed")]
    pub title: String,

    #[validate(length(min = 1, max = 100, message = "Description must be 1-100 characters"))]
    #[serde(deserialize_with = "trimmed")]
    pub description: String,

    /// ISO 8601, used when the image carries no EXIF date
    pub upload_date: Option<String>,
}

/// Admin edit of a photo
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePhotoRequest {
    #[validate(length(min = 1, max = 50, message = "Department name must be 1-50 characters"))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub department_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Description must be 1-100 characters"))]
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub description: Option<String>,
}

impl UpdatePhotoRequest {
    pub fn into_changes(self) -> PhotoChanges {
        PhotoChanges {
            department_name: self.department_name,
            title: self.title,
            description: self.description,
        }
    }
}

/// Query string of `GET /photos`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub department_name: Option<String>,
    pub sort: Option<PhotoSort>,
    /// Free-text search over title and description
    pub q: Option<String>,
}

impl PhotoListQuery {
    pub fn into_query(self) -> PhotoQuery {
        PhotoQuery::new(
            self.page,
            self.limit,
            self.department_name,
            self.sort.unwrap_or_default(),
            self.q,
        )
    }
}

// ============================================================================
// Admin Requests
// ============================================================================

/// Admin login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}
