//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Comment, Department, LikeOutcome, Photo};
use crate::error::DomainError;
use crate::value_objects::{ClientIdentity, PhotoQuery};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// One page of photos plus the unpaged total
#[derive(Debug, Clone, Default)]
pub struct PhotoPage {
    pub photos: Vec<Photo>,
    pub total: u64,
}

// ============================================================================
// Photo Repository
// ============================================================================

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Find photo by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Photo>>;

    /// List photos matching the query
    async fn list(&self, query: &PhotoQuery) -> RepoResult<PhotoPage>;

    /// Photos flagged as top picks, newest upload first
    async fn find_top_picks(&self) -> RepoResult<Vec<Photo>>;

    /// Distinct department names used by photos, ascending
    async fn department_names(&self) -> RepoResult<Vec<String>>;

    /// Insert a new photo
    async fn create(&self, photo: &Photo) -> RepoResult<()>;

    /// Persist the editable fields of an existing photo
    async fn update(&self, photo: &Photo) -> RepoResult<()>;

    /// Delete a photo; its comments and likes go with it
    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    /// Atomically add one view and return the updated photo
    async fn record_view(&self, id: Uuid) -> RepoResult<Option<Photo>>;

    /// Atomically flip the top pick flag and return the new value
    async fn toggle_top_pick(&self, id: Uuid) -> RepoResult<Option<bool>>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Comment>>;

    /// All comments on a photo, newest first
    async fn find_by_photo(&self, photo_id: Uuid) -> RepoResult<Vec<Comment>>;

    /// Up to `per_photo` newest comments for each of the given photos
    async fn find_recent_by_photos(&self, photo_ids: &[Uuid], per_photo: u32) -> RepoResult<Vec<Comment>>;

    /// Number of comments on a photo
    async fn count_by_photo(&self, photo_id: Uuid) -> RepoResult<i64>;

    /// Insert a comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Persist nickname and content of an existing comment
    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment
    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Like Repository
// ============================================================================

/// Like toggling. Implementations change the like row and the photo's
/// `like_count` together or not at all.
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Whether `client` currently likes the photo
    async fn exists(&self, photo_id: Uuid, client: &ClientIdentity) -> RepoResult<bool>;

    /// Record a like and increment the counter.
    ///
    /// Fails with `PhotoNotFound` or `AlreadyLiked` without mutating anything.
    async fn like(&self, photo_id: Uuid, client: &ClientIdentity) -> RepoResult<LikeOutcome>;

    /// Remove a like and decrement the counter.
    ///
    /// Fails with `PhotoNotFound` or `NotLiked` without mutating anything.
    async fn unlike(&self, photo_id: Uuid, client: &ClientIdentity) -> RepoResult<LikeOutcome>;
}

// ============================================================================
// Department Repository
// ============================================================================

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// All departments ordered by name
    async fn find_all(&self) -> RepoResult<Vec<Department>>;
}

// ============================================================================
// Health
// ============================================================================

#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Round-trip to the backing store
    async fn ping(&self) -> RepoResult<()>;
}
