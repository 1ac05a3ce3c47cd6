//! Like service
//!
//! Explicit like/unlike per client identity. The repository applies the like
//! row and the counter change together.

use tracing::{info, instrument};
use uuid::Uuid;

use gallery_core::value_objects::ClientIdentity;

use crate::dto::LikeResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Like service
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    /// Create a new LikeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// `is_liked = true` likes the photo, `false` removes the like.
    ///
    /// Liking twice fails with "already liked"; unliking without a like
    /// fails with "not liked". Neither failure changes the counter.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        photo_id: Uuid,
        client: &ClientIdentity,
        is_liked: bool,
    ) -> ServiceResult<LikeResponse> {
        let outcome = if is_liked {
            self.ctx.like_repo().like(photo_id, client).await?
        } else {
            self.ctx.like_repo().unlike(photo_id, client).await?
        };

        info!(
            photo_id = %photo_id,
            like_count = outcome.like_count,
            is_liked = outcome.is_liked,
            "Like toggled"
        );

        Ok(LikeResponse::from(outcome))
    }

    /// Whether `client` currently likes the photo
    #[instrument(skip(self))]
    pub async fn is_liked(&self, photo_id: Uuid, client: &ClientIdentity) -> ServiceResult<bool> {
        Ok(self.ctx.like_repo().exists(photo_id, client).await?)
    }
}
