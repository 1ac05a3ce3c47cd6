//! Photo service
//!
//! Upload, listing, detail view with view counting, admin edits and
//! top pick toggling.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use gallery_core::entities::{Comment, NewPhoto, Photo};
use gallery_core::error::DomainError;
use gallery_core::traits::{ImageUpload, StoredImage};
use gallery_core::value_objects::{ClientIdentity, PhotoQuery};
use gallery_media::{extract_exif, validate_upload};

use crate::dto::{
    PageMeta, PhotoDetailResponse, PhotoResponse, PhotoUploadResponse, TopPickResponse,
    UpdatePhotoRequest, UploadPhotoRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comments embedded per photo in list responses
pub const RECENT_COMMENTS_PER_PHOTO: u32 = 5;

/// One page of the photo listing
#[derive(Debug, Clone)]
pub struct PhotoListing {
    pub photos: Vec<PhotoResponse>,
    pub meta: PageMeta,
}

/// Photo service
pub struct PhotoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PhotoService<'a> {
    /// Create a new PhotoService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store an uploaded image and create its photo record.
    ///
    /// The upload date comes from the EXIF capture date when present, then
    /// the client-supplied date, then the current time.
    #[instrument(skip(self, request, file), fields(size = file.size(), content_type = %file.content_type))]
    pub async fn upload(
        &self,
        request: UploadPhotoRequest,
        file: ImageUpload,
    ) -> ServiceResult<PhotoUploadResponse> {
        let request = UploadPhotoRequest {
            department_name: request.department_name.trim().to_string(),
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            upload_date: request.upload_date,
        };
        request.validate()?;
        validate_upload(&file, self.ctx.max_upload_bytes())?;

        let exif = extract_exif(&file.bytes);
        let upload_date = match exif.as_ref().and_then(|e| e.date_taken) {
            Some(taken) => taken,
            None => match request.upload_date.as_deref() {
                Some(raw) => parse_upload_date(raw)?,
                None => Utc::now(),
            },
        };

        let stored = self.ctx.image_store().store(&file).await?;

        let photo = Photo::new(
            Uuid::new_v4(),
            NewPhoto {
                department_name: request.department_name,
                title: request.title,
                description: request.description,
                image_url: stored.image_url.clone(),
                thumbnail_url: stored.thumbnail_url.clone(),
                upload_date,
            },
        );

        if let Err(e) = self.ctx.photo_repo().create(&photo).await {
            self.discard_images(&stored).await;
            return Err(e.into());
        }

        info!(
            photo_id = %photo.id,
            department = %photo.department_name,
            has_exif = exif.is_some(),
            "Photo uploaded"
        );

        Ok(PhotoUploadResponse {
            photo: PhotoResponse::from(&photo),
            exif_data: exif,
        })
    }

    /// One page of photos, each with its newest comments
    #[instrument(skip(self))]
    pub async fn list(&self, query: PhotoQuery) -> ServiceResult<PhotoListing> {
        let page = self.ctx.photo_repo().list(&query).await?;

        let ids: Vec<Uuid> = page.photos.iter().map(|p| p.id).collect();
        let recent = if ids.is_empty() {
            Vec::new()
        } else {
            self.ctx
                .comment_repo()
                .find_recent_by_photos(&ids, RECENT_COMMENTS_PER_PHOTO)
                .await?
        };

        let mut by_photo: HashMap<Uuid, Vec<Comment>> = HashMap::new();
        for comment in recent {
            by_photo.entry(comment.photo_id).or_default().push(comment);
        }

        let photos = page
            .photos
            .iter()
            .map(|p| {
                let comments = by_photo.get(&p.id).map_or(&[][..], Vec::as_slice);
                PhotoResponse::from(p).with_comments(comments)
            })
            .collect();

        Ok(PhotoListing {
            photos,
            meta: PageMeta {
                total: page.total,
                page: query.page,
                limit: query.limit,
                total_pages: query.total_pages(page.total),
            },
        })
    }

    /// Distinct department names in use, ascending
    #[instrument(skip(self))]
    pub async fn department_names(&self) -> ServiceResult<Vec<String>> {
        Ok(self.ctx.photo_repo().department_names().await?)
    }

    #[instrument(skip(self))]
    pub async fn top_picks(&self) -> ServiceResult<Vec<PhotoResponse>> {
        let photos = self.ctx.photo_repo().find_top_picks().await?;
        Ok(photos.iter().map(PhotoResponse::from).collect())
    }

    /// Photo detail. Counts one view per call.
    #[instrument(skip(self))]
    pub async fn view(&self, id: Uuid, client: &ClientIdentity) -> ServiceResult<PhotoDetailResponse> {
        let photo = self
            .ctx
            .photo_repo()
            .record_view(id)
            .await?
            .ok_or(DomainError::PhotoNotFound(id))?;

        let comments = self.ctx.comment_repo().find_by_photo(id).await?;
        let is_liked = self.ctx.like_repo().exists(id, client).await?;

        Ok(PhotoDetailResponse {
            photo: PhotoResponse::from(&photo).with_comments(&comments),
            is_liked,
        })
    }

    /// Admin edit of department, title and description
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: Uuid, request: UpdatePhotoRequest) -> ServiceResult<PhotoResponse> {
        let request = UpdatePhotoRequest {
            department_name: request.department_name.map(|v| v.trim().to_string()),
            title: request.title.map(|v| v.trim().to_string()),
            description: request.description.map(|v| v.trim().to_string()),
        };
        request.validate()?;

        let changes = request.into_changes();
        if changes.is_empty() {
            return Err(ServiceError::validation("Nothing to update"));
        }

        let mut photo = self.find(id).await?;
        photo.apply(changes);
        self.ctx.photo_repo().update(&photo).await?;

        info!(photo_id = %id, "Photo updated");

        Ok(PhotoResponse::from(&photo))
    }

    /// Delete the record, then its image files. File removal failures are
    /// logged only.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let photo = self.find(id).await?;
        self.ctx.photo_repo().delete(id).await?;

        self.discard_images(&StoredImage {
            image_url: photo.image_url,
            thumbnail_url: photo.thumbnail_url,
        })
        .await;

        info!(photo_id = %id, "Photo deleted");

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn toggle_top_pick(&self, id: Uuid) -> ServiceResult<TopPickResponse> {
        let is_top_pick = self
            .ctx
            .photo_repo()
            .toggle_top_pick(id)
            .await?
            .ok_or(DomainError::PhotoNotFound(id))?;

        info!(photo_id = %id, is_top_pick, "Top pick toggled");

        Ok(TopPickResponse { is_top_pick })
    }

    async fn find(&self, id: Uuid) -> ServiceResult<Photo> {
        self.ctx
            .photo_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::PhotoNotFound(id).into())
    }

    async fn discard_images(&self, image: &StoredImage) {
        if let Err(e) = self.ctx.image_store().remove(image).await {
            warn!(image_url = %image.image_url, error = %e, "Failed to remove image files");
        }
    }
}

/// RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC)
fn parse_upload_date(raw: &str) -> ServiceResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
        .ok_or_else(|| ServiceError::validation("uploadDate must be an ISO 8601 date"))
}
