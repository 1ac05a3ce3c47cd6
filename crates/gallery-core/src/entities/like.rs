//! Like entity - at most one per (photo, client identity)

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::ClientIdentity;

/// Like entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: Uuid,
    pub photo_id: Uuid,
    pub client: ClientIdentity,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(id: Uuid, photo_id: Uuid, client: ClientIdentity) -> Self {
        Self {
            id,
            photo_id,
            client,
            created_at: Utc::now(),
        }
    }
}

/// Result of a successful like or unlike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    pub like_count: i32,
    pub is_liked: bool,
}
