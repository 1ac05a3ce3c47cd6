//! Comment entity - a short note left on a photo

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Maximum nickname length in characters
pub const MAX_NICKNAME_LEN: usize = 50;
/// Maximum comment length in characters
pub const MAX_CONTENT_LEN: usize = 200;

/// Comment entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub photo_id: Uuid,
    pub nickname: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new Comment
    pub fn new(id: Uuid, photo_id: Uuid, nickname: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            photo_id,
            nickname,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit
    pub fn apply(&mut self, changes: CommentChanges) {
        if let Some(nickname) = changes.nickname {
            self.nickname = nickname;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        self.updated_at = Utc::now();
    }

    #[inline]
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Partial update of a comment
#[derive(Debug, Clone, Default)]
pub struct CommentChanges {
    pub nickname: Option<String>,
    pub content: Option<String>,
}
