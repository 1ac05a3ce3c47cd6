//! Department entity

use chrono::{DateTime, Utc};

/// Department with its display color (hex, e.g. `#1E40AF`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
}
