//! Photo entity - an uploaded image tagged to a department

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Photo entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
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

/// Data required to insert a new photo
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub department_name: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub thumbnail_url: Option<String>,
    pub upload_date: DateTime<Utc>,
}

impl Photo {
    /// Build a fresh photo with zeroed counters
    pub fn new(id: Uuid, new: NewPhoto) -> Self {
        let now = Utc::now();
        Self {
            id,
            department_name: new.department_name,
            title: new.title,
            description: new.description,
            image_url: new.image_url,
            thumbnail_url: new.thumbnail_url,
            like_count: 0,
            view_count: 0,
            is_top_pick: false,
            upload_date: new.upload_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an admin edit
    pub fn apply(&mut self, changes: PhotoChanges) {
        if let Some(department_name) = changes.department_name {
            self.department_name = department_name;
        }
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }

    /// Case-insensitive match against title and description
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

/// Partial update of the editable photo fields
#[derive(Debug, Clone, Default)]
pub struct PhotoChanges {
    pub department_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl PhotoChanges {
    pub fn is_empty(&self) -> bool {
        self.department_name.is_none() && self.title.is_none() && self.description.is_none()
    }
}
