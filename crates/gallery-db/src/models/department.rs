//! Department database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for departments table
#[derive(Debug, Clone, FromRow)]
pub struct DepartmentModel {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}
