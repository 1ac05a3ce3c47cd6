//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use gallery_core::entities::{Comment, Department, LikeOutcome, Photo};

use super::responses::{CommentResponse, DepartmentResponse, LikeResponse, PhotoResponse};

// ============================================================================
// Photo Mappers
// ============================================================================

impl From<&Photo> for PhotoResponse {
    fn from(photo: &Photo) -> Self {
        Self {
            id: photo.id,
            department_name: photo.department_name.clone(),
            title: photo.title.clone(),
            description: photo.description.clone(),
            image_url: photo.image_url.clone(),
            thumbnail_url: photo.thumbnail_url.clone(),
            like_count: photo.like_count,
            view_count: photo.view_count,
            is_top_pick: photo.is_top_pick,
            upload_date: photo.upload_date,
            created_at: photo.created_at,
            updated_at: photo.updated_at,
            comments: None,
        }
    }
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        Self::from(&photo)
    }
}

impl PhotoResponse {
    /// Attach comments, keeping their order
    #[must_use]
    pub fn with_comments(mut self, comments: &[Comment]) -> Self {
        self.comments = Some(comments.iter().map(CommentResponse::from).collect());
        self
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            photo_id: comment.photo_id,
            nickname: comment.nickname.clone(),
            content: comment.content.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}

// ============================================================================
// Misc Mappers
// ============================================================================

impl From<&Department> for DepartmentResponse {
    fn from(department: &Department) -> Self {
        Self {
            id: department.id,
            name: department.name.clone(),
            color: department.color.clone(),
        }
    }
}

impl From<LikeOutcome> for LikeResponse {
    fn from(outcome: LikeOutcome) -> Self {
        Self {
            like_count: outcome.like_count,
            is_liked: outcome.is_liked,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use gallery_core::entities::NewPhoto;

    use super::*;

    #[test]
    fn test_photo_response_serializes_camel_case() {
        let photo = Photo::new(
            Uuid::new_v4(),
            NewPhoto {
                department_name: "디자인팀".to_string(),
                title: "Poster".to_string(),
                description: "Launch poster".to_string(),
                image_url: "/uploads/p.png".to_string(),
                thumbnail_url: Some("/uploads/thumb_p.webp".to_string()),
                upload_date: Utc::now(),
            },
        );
        let comment = Comment::new(Uuid::new_v4(), photo.id, "guest".to_string(), "wow".to_string());

        let response = PhotoResponse::from(&photo).with_comments(&[comment]);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["departmentName"], "디자인팀");
        assert_eq!(value["thumbnailUrl"], "/uploads/thumb_p.webp");
        assert_eq!(value["likeCount"], 0);
        assert_eq!(value["isTopPick"], false);
        assert_eq!(value["comments"][0]["nickname"], "guest");
        assert_eq!(value["comments"][0]["photoId"], photo.id.to_string());
    }

    #[test]
    fn test_comments_omitted_when_not_loaded() {
        let photo = Photo::new(
            Uuid::new_v4(),
            NewPhoto {
                department_name: "인사팀".to_string(),
                title: "t".to_string(),
                description: "d".to_string(),
                image_url: "/uploads/x.jpg".to_string(),
                thumbnail_url: None,
                upload_date: Utc::now(),
            },
        );
        let value = serde_json::to_value(PhotoResponse::from(photo)).unwrap();
        assert!(value.get("comments").is_none());
        assert!(value["thumbnailUrl"].is_null());
    }
}
