//! Service context - dependency container for services
//!
//! Holds the repositories, the image store, the spam guard and the admin
//! session service. Everything is behind `Arc`, so cloning is cheap.

use std::sync::Arc;

use gallery_common::AdminSessionService;
use gallery_core::traits::{
    CommentRepository, DepartmentRepository, HealthProbe, ImageStore, LikeRepository,
    PhotoRepository,
};

use super::error::{ServiceError, ServiceResult};
use super::spam_guard::SpamGuard;

/// Default upload cap when none is configured (10 MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    photo_repo: Arc<dyn PhotoRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    like_repo: Arc<dyn LikeRepository>,
    department_repo: Arc<dyn DepartmentRepository>,
    health_probe: Arc<dyn HealthProbe>,

    // Media
    image_store: Arc<dyn ImageStore>,
    max_upload_bytes: u64,

    // Guards
    spam_guard: Arc<SpamGuard>,
    admin_session: Arc<AdminSessionService>,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn photo_repo(&self) -> &dyn PhotoRepository {
        self.photo_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    pub fn department_repo(&self) -> &dyn DepartmentRepository {
        self.department_repo.as_ref()
    }

    pub fn health_probe(&self) -> &dyn HealthProbe {
        self.health_probe.as_ref()
    }

    // === Media ===

    pub fn image_store(&self) -> &dyn ImageStore {
        self.image_store.as_ref()
    }

    /// Largest accepted upload in bytes
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    // === Guards ===

    pub fn spam_guard(&self) -> &SpamGuard {
        self.spam_guard.as_ref()
    }

    /// Shared handle, used to spawn the sweeper
    pub fn spam_guard_handle(&self) -> Arc<SpamGuard> {
        Arc::clone(&self.spam_guard)
    }

    pub fn admin_session(&self) -> &AdminSessionService {
        self.admin_session.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("tracked_clients", &self.spam_guard.len())
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    photo_repo: Option<Arc<dyn PhotoRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    like_repo: Option<Arc<dyn LikeRepository>>,
    department_repo: Option<Arc<dyn DepartmentRepository>>,
    health_probe: Option<Arc<dyn HealthProbe>>,
    image_store: Option<Arc<dyn ImageStore>>,
    max_upload_bytes: Option<u64>,
    spam_guard: Option<Arc<SpamGuard>>,
    admin_session: Option<Arc<AdminSessionService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photo_repo(mut self, repo: Arc<dyn PhotoRepository>) -> Self {
        self.photo_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn like_repo(mut self, repo: Arc<dyn LikeRepository>) -> Self {
        self.like_repo = Some(repo);
        self
    }

    pub fn department_repo(mut self, repo: Arc<dyn DepartmentRepository>) -> Self {
        self.department_repo = Some(repo);
        self
    }

    pub fn health_probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.health_probe = Some(probe);
        self
    }

    pub fn image_store(mut self, store: Arc<dyn ImageStore>) -> Self {
        self.image_store = Some(store);
        self
    }

    pub fn max_upload_bytes(mut self, bytes: u64) -> Self {
        self.max_upload_bytes = Some(bytes);
        self
    }

    pub fn spam_guard(mut self, guard: Arc<SpamGuard>) -> Self {
        self.spam_guard = Some(guard);
        self
    }

    pub fn admin_session(mut self, service: Arc<AdminSessionService>) -> Self {
        self.admin_session = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// The upload cap and spam guard fall back to their defaults; everything
    /// else is required.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            photo_repo: self.photo_repo.ok_or_else(|| ServiceError::validation("photo_repo is required"))?,
            comment_repo: self.comment_repo.ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            like_repo: self.like_repo.ok_or_else(|| ServiceError::validation("like_repo is required"))?,
            department_repo: self
                .department_repo
                .ok_or_else(|| ServiceError::validation("department_repo is required"))?,
            health_probe: self.health_probe.ok_or_else(|| ServiceError::validation("health_probe is required"))?,
            image_store: self.image_store.ok_or_else(|| ServiceError::validation("image_store is required"))?,
            max_upload_bytes: self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            spam_guard: self.spam_guard.unwrap_or_default(),
            admin_session: self
                .admin_session
                .ok_or_else(|| ServiceError::validation("admin_session is required"))?,
        })
    }
}
