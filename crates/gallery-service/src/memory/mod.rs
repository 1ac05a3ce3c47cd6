//! In-memory adapters for the repository and image store ports
//!
//! One [`MemoryStore`] implements every repository over a single
//! mutex-guarded state, so like toggles and photo deletes stay atomic and
//! cascade the way the database does. Enabled for tests and with the
//! `memory` feature.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tracing::warn;
use uuid::Uuid;

use gallery_common::AdminSessionService;
use gallery_core::entities::{Comment, Department, LikeOutcome, NewPhoto, Photo};
use gallery_core::error::DomainError;
use gallery_core::traits::{
    CommentRepository, DepartmentRepository, HealthProbe, ImageStore, ImageUpload, LikeRepository,
    PhotoPage, PhotoRepository, RepoResult, StoredImage,
};
use gallery_core::value_objects::{ClientIdentity, PhotoQuery, PhotoSort};

use crate::services::ServiceContextBuilder;

/// Admin password accepted by contexts from [`MemoryStore::context_builder`]
pub const TEST_ADMIN_PASSWORD: &str = "admin-password";

const DEPARTMENTS: [(&str, &str); 6] = [
    ("기획팀", "#1E40AF"),
    ("디자인팀", "#F59E0B"),
    ("개발팀", "#10B981"),
    ("마케팅팀", "#EF4444"),
    ("인사팀", "#8B5CF6"),
    ("영업팀", "#3B82F6"),
];

#[derive(Debug)]
struct State {
    photos: HashMap<Uuid, Photo>,
    comments: HashMap<Uuid, Comment>,
    likes: HashSet<(Uuid, ClientIdentity)>,
    departments: Vec<Department>,
    healthy: bool,
}

impl Default for State {
    fn default() -> Self {
        let now = Utc::now();
        let departments = DEPARTMENTS
            .iter()
            .zip(1..)
            .map(|((name, color), id)| Department {
                id,
                name: (*name).to_string(),
                color: (*color).to_string(),
                created_at: now,
            })
            .collect();

        Self {
            photos: HashMap::new(),
            comments: HashMap::new(),
            likes: HashSet::new(),
            departments,
            healthy: true,
        }
    }
}

/// Shared in-memory backing store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<State>>,
    images: MemoryImageStore,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder with every repository, the image store and an admin session
    /// service filled in
    ///
    /// If the admin password cannot be hashed the session service is left
    /// out and `build()` reports it as missing.
    pub fn context_builder(&self) -> ServiceContextBuilder {
        let builder = ServiceContextBuilder::new()
            .photo_repo(Arc::new(self.clone()))
            .comment_repo(Arc::new(self.clone()))
            .like_repo(Arc::new(self.clone()))
            .department_repo(Arc::new(self.clone()))
            .health_probe(Arc::new(self.clone()))
            .image_store(Arc::new(self.images.clone()));

        match AdminSessionService::new(TEST_ADMIN_PASSWORD, "memory-store-session-secret", 3600) {
            Ok(sessions) => builder.admin_session(Arc::new(sessions)),
            Err(e) => {
                warn!(error = %e, "Admin session service unavailable");
                builder
            }
        }
    }

    pub fn images(&self) -> &MemoryImageStore {
        &self.images
    }

    /// Make the health probe fail
    pub fn set_healthy(&self, healthy: bool) {
        self.inner.lock().healthy = healthy;
    }

    /// Insert a photo directly, bypassing upload
    pub fn seed_photo(&self, department: &str, title: &str) -> Photo {
        let photo = Photo::new(
            Uuid::new_v4(),
            NewPhoto {
                department_name: department.to_string(),
                title: title.to_string(),
                description: format!("{title} description"),
                image_url: format!("/uploads/{}.jpg", Uuid::new_v4()),
                thumbnail_url: None,
                upload_date: Utc::now(),
            },
        );
        self.inner.lock().photos.insert(photo.id, photo.clone());
        photo
    }

    pub fn photo(&self, id: Uuid) -> Option<Photo> {
        self.inner.lock().photos.get(&id).cloned()
    }

    pub fn comment_count(&self) -> usize {
        self.inner.lock().comments.len()
    }

    pub fn like_count(&self) -> usize {
        self.inner.lock().likes.len()
    }
}

fn sort_photos(photos: &mut [Photo], sort: PhotoSort) {
    photos.sort_by(|a, b| {
        let primary = match sort {
            PhotoSort::Latest => std::cmp::Ordering::Equal,
            PhotoSort::Views => b.view_count.cmp(&a.view_count),
            PhotoSort::Popular => b.like_count.cmp(&a.like_count),
        };
        primary
            .then_with(|| b.upload_date.cmp(&a.upload_date))
            .then_with(|| b.id.cmp(&a.id))
    });
}

fn newest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

#[async_trait]
impl PhotoRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Photo>> {
        Ok(self.photo(id))
    }

    async fn list(&self, query: &PhotoQuery) -> RepoResult<PhotoPage> {
        let mut matching: Vec<Photo> = {
            let state = self.inner.lock();
            state
                .photos
                .values()
                .filter(|p| {
                    query
                        .department_name
                        .as_ref()
                        .is_none_or(|d| &p.department_name == d)
                })
                .filter(|p| query.search.as_ref().is_none_or(|term| p.matches_search(term)))
                .cloned()
                .collect()
        };
        sort_photos(&mut matching, query.sort);

        let total = matching.len() as u64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let photos = matching
            .into_iter()
            .skip(offset)
            .take(query.limit as usize)
            .collect();

        Ok(PhotoPage { photos, total })
    }

    async fn find_top_picks(&self) -> RepoResult<Vec<Photo>> {
        let mut picks: Vec<Photo> = self
            .inner
            .lock()
            .photos
            .values()
            .filter(|p| p.is_top_pick)
            .cloned()
            .collect();
        sort_photos(&mut picks, PhotoSort::Latest);
        Ok(picks)
    }

    async fn department_names(&self) -> RepoResult<Vec<String>> {
        let mut names: Vec<String> = self
            .inner
            .lock()
            .photos
            .values()
            .map(|p| p.department_name.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        names.sort();
        Ok(names)
    }

    async fn create(&self, photo: &Photo) -> RepoResult<()> {
        self.inner.lock().photos.insert(photo.id, photo.clone());
        Ok(())
    }

    async fn update(&self, photo: &Photo) -> RepoResult<()> {
        let mut state = self.inner.lock();
        let stored = state
            .photos
            .get_mut(&photo.id)
            .ok_or(DomainError::PhotoNotFound(photo.id))?;
        stored.department_name.clone_from(&photo.department_name);
        stored.title.clone_from(&photo.title);
        stored.description.clone_from(&photo.description);
        stored.updated_at = photo.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let mut state = self.inner.lock();
        state.photos.remove(&id).ok_or(DomainError::PhotoNotFound(id))?;
        state.comments.retain(|_, c| c.photo_id != id);
        state.likes.retain(|(photo_id, _)| *photo_id != id);
        Ok(())
    }

    async fn record_view(&self, id: Uuid) -> RepoResult<Option<Photo>> {
        let mut state = self.inner.lock();
        Ok(state.photos.get_mut(&id).map(|p| {
            p.view_count += 1;
            p.clone()
        }))
    }

    async fn toggle_top_pick(&self, id: Uuid) -> RepoResult<Option<bool>> {
        let mut state = self.inner.lock();
        Ok(state.photos.get_mut(&id).map(|p| {
            p.is_top_pick = !p.is_top_pick;
            p.updated_at = Utc::now();
            p.is_top_pick
        }))
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Comment>> {
        Ok(self.inner.lock().comments.get(&id).cloned())
    }

    async fn find_by_photo(&self, photo_id: Uuid) -> RepoResult<Vec<Comment>> {
        let mut comments: Vec<Comment> = self
            .inner
            .lock()
            .comments
            .values()
            .filter(|c| c.photo_id == photo_id)
            .cloned()
            .collect();
        newest_first(&mut comments);
        Ok(comments)
    }

    async fn find_recent_by_photos(&self, photo_ids: &[Uuid], per_photo: u32) -> RepoResult<Vec<Comment>> {
        let mut recent = Vec::new();
        for photo_id in photo_ids {
            let mut comments = self.find_by_photo(*photo_id).await?;
            comments.truncate(per_photo as usize);
            recent.extend(comments);
        }
        Ok(recent)
    }

    async fn count_by_photo(&self, photo_id: Uuid) -> RepoResult<i64> {
        let count = self
            .inner
            .lock()
            .comments
            .values()
            .filter(|c| c.photo_id == photo_id)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let mut state = self.inner.lock();
        if !state.photos.contains_key(&comment.photo_id) {
            return Err(DomainError::PhotoNotFound(comment.photo_id));
        }
        state.comments.insert(comment.id, comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let mut state = self.inner.lock();
        let stored = state
            .comments
            .get_mut(&comment.id)
            .ok_or(DomainError::CommentNotFound(comment.id))?;
        stored.nickname.clone_from(&comment.nickname);
        stored.content.clone_from(&comment.content);
        stored.updated_at = comment.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        self.inner
            .lock()
            .comments
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::CommentNotFound(id))
    }
}

#[async_trait]
impl LikeRepository for MemoryStore {
    async fn exists(&self, photo_id: Uuid, client: &ClientIdentity) -> RepoResult<bool> {
        Ok(self.inner.lock().likes.contains(&(photo_id, client.clone())))
    }

    async fn like(&self, photo_id: Uuid, client: &ClientIdentity) -> RepoResult<LikeOutcome> {
        let mut state = self.inner.lock();
        if !state.photos.contains_key(&photo_id) {
            return Err(DomainError::PhotoNotFound(photo_id));
        }
        if !state.likes.insert((photo_id, client.clone())) {
            return Err(DomainError::AlreadyLiked);
        }
        let photo = state
            .photos
            .get_mut(&photo_id)
            .ok_or(DomainError::PhotoNotFound(photo_id))?;
        photo.like_count += 1;
        Ok(LikeOutcome {
            like_count: photo.like_count,
            is_liked: true,
        })
    }

    async fn unlike(&self, photo_id: Uuid, client: &ClientIdentity) -> RepoResult<LikeOutcome> {
        let mut state = self.inner.lock();
        if !state.photos.contains_key(&photo_id) {
            return Err(DomainError::PhotoNotFound(photo_id));
        }
        if !state.likes.remove(&(photo_id, client.clone())) {
            return Err(DomainError::NotLiked);
        }
        let photo = state
            .photos
            .get_mut(&photo_id)
            .ok_or(DomainError::PhotoNotFound(photo_id))?;
        photo.like_count = (photo.like_count - 1).max(0);
        Ok(LikeOutcome {
            like_count: photo.like_count,
            is_liked: false,
        })
    }
}

#[async_trait]
impl DepartmentRepository for MemoryStore {
    async fn find_all(&self) -> RepoResult<Vec<Department>> {
        let mut departments = self.inner.lock().departments.clone();
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }
}

#[async_trait]
impl HealthProbe for MemoryStore {
    async fn ping(&self) -> RepoResult<()> {
        if self.inner.lock().healthy {
            Ok(())
        } else {
            Err(DomainError::DatabaseError("memory store marked unhealthy".to_string()))
        }
    }
}

/// Image store that keeps URLs only
#[derive(Debug, Clone, Default)]
pub struct MemoryImageStore {
    stored: Arc<Mutex<Vec<StoredImage>>>,
    removed: Arc<Mutex<Vec<StoredImage>>>,
}

impl MemoryImageStore {
    /// Images stored and not yet removed
    pub fn stored(&self) -> Vec<StoredImage> {
        self.stored.lock().clone()
    }

    pub fn removed(&self) -> Vec<StoredImage> {
        self.removed.lock().clone()
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn store(&self, upload: &ImageUpload) -> RepoResult<StoredImage> {
        let id = Uuid::new_v4();
        let extension = upload
            .content_type
            .rsplit('/')
            .next()
            .unwrap_or("bin")
            .to_ascii_lowercase();
        let image = StoredImage {
            image_url: format!("/uploads/{id}.{extension}"),
            thumbnail_url: Some(format!("/uploads/thumb_{id}.webp")),
        };
        self.stored.lock().push(image.clone());
        Ok(image)
    }

    async fn remove(&self, image: &StoredImage) -> RepoResult<()> {
        self.stored.lock().retain(|s| s != image);
        self.removed.lock().push(image.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_cascades_comments_and_likes() {
        let store = MemoryStore::new();
        let photo = store.seed_photo("개발팀", "Cascade");
        let comment = Comment::new(Uuid::new_v4(), photo.id, "guest".to_string(), "hi".to_string());
        CommentRepository::create(&store, &comment).await.unwrap();
        store.like(photo.id, &ClientIdentity::new("1.2.3.4")).await.unwrap();

        PhotoRepository::delete(&store, photo.id).await.unwrap();

        assert_eq!(store.comment_count(), 0);
        assert_eq!(store.like_count(), 0);
    }

    #[tokio::test]
    async fn test_list_pages_and_sorts() {
        let store = MemoryStore::new();
        let a = store.seed_photo("개발팀", "Alpha");
        let b = store.seed_photo("개발팀", "Beta");
        store.seed_photo("인사팀", "Gamma");
        store.record_view(b.id).await.unwrap();
        store.record_view(b.id).await.unwrap();
        store.record_view(a.id).await.unwrap();

        let query = PhotoQuery::new(Some(1), Some(1), Some("개발팀".to_string()), PhotoSort::Views, None);
        let page = store.list(&query).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.photos.len(), 1);
        assert_eq!(page.photos[0].id, b.id);

        let query = PhotoQuery::new(Some(2), Some(1), Some("개발팀".to_string()), PhotoSort::Views, None);
        assert_eq!(store.list(&query).await.unwrap().photos[0].id, a.id);

        let query = PhotoQuery::new(None, None, None, PhotoSort::Latest, Some("gam".to_string()));
        assert_eq!(store.list(&query).await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn test_departments_seeded_by_name() {
        let store = MemoryStore::new();
        let departments = store.find_all().await.unwrap();
        assert_eq!(departments.len(), 6);
        let dev = departments.iter().find(|d| d.name == "개발팀").unwrap();
        assert_eq!(dev.color, "#10B981");
    }

    #[tokio::test]
    async fn test_health_toggle() {
        let store = MemoryStore::new();
        store.ping().await.unwrap();
        store.set_healthy(false);
        assert!(store.ping().await.is_err());
    }
}
