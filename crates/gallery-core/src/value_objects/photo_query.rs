//! Photo listing query: pagination, filtering, sort order, search

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Default page size
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Maximum page size
pub const MAX_PAGE_SIZE: u32 = 100;

/// Sort order for photo listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSort {
    /// Newest upload date first
    #[default]
    Latest,
    /// Most viewed first
    Views,
    /// Most liked first
    Popular,
}

impl PhotoSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Views => "views",
            Self::Popular => "popular",
        }
    }
}

impl fmt::Display for PhotoSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhotoSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "views" => Ok(Self::Views),
            "popular" => Ok(Self::Popular),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Normalized photo listing query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoQuery {
    /// 1-based page number
    pub page: u32,
    /// Page size, 1..=MAX_PAGE_SIZE
    pub limit: u32,
    pub department_name: Option<String>,
    pub sort: PhotoSort,
    /// Case-insensitive match against title and description
    pub search: Option<String>,
}

impl Default for PhotoQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            department_name: None,
            sort: PhotoSort::Latest,
            search: None,
        }
    }
}

impl PhotoQuery {
    /// Build a query, clamping page and limit into range and dropping blank filters
    pub fn new(
        page: Option<u32>,
        limit: Option<u32>,
        department_name: Option<String>,
        sort: PhotoSort,
        search: Option<String>,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            department_name: non_blank(department_name),
            sort,
            search: non_blank(search),
        }
    }

    /// Rows to skip
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Number of pages for `total` rows
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.limit))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parsing() {
        assert_eq!("latest".parse::<PhotoSort>().unwrap(), PhotoSort::Latest);
        assert_eq!("Views".parse::<PhotoSort>().unwrap(), PhotoSort::Views);
        assert_eq!("popular".parse::<PhotoSort>().unwrap(), PhotoSort::Popular);
        assert!("random".parse::<PhotoSort>().is_err());
    }

    #[test]
    fn test_query_clamps_and_trims() {
        let query = PhotoQuery::new(Some(0), Some(500), Some("  ".to_string()), PhotoSort::Views, Some(" cat ".to_string()));
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, MAX_PAGE_SIZE);
        assert_eq!(query.department_name, None);
        assert_eq!(query.search.as_deref(), Some("cat"));
    }

    #[test]
    fn test_offset_and_total_pages() {
        let query = PhotoQuery::new(Some(3), Some(20), None, PhotoSort::Latest, None);
        assert_eq!(query.offset(), 40);
        assert_eq!(query.total_pages(0), 0);
        assert_eq!(query.total_pages(41), 3);
        assert_eq!(query.total_pages(40), 2);
    }
}
