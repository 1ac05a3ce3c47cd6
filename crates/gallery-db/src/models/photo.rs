//! Photo database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for photos table
#[derive(Debug, Clone, FromRow)]
pub struct PhotoModel {
    pub id: Uuid,
    pub department_name: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub like_count: i32,
    pub view_count: i32,
    pub is_top_pick: bool,
    pub upload_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
