//! Comment service
//!
//! Comment CRUD plus the spam guard. Creation runs its checks in a fixed
//! order: input validation, photo existence, spam window, then the insert.

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use gallery_core::entities::Comment;
use gallery_core::error::DomainError;
use gallery_core::value_objects::ClientIdentity;

use crate::dto::{CommentResponse, CountResponse, CreateCommentRequest, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::spam_guard::SpamDecision;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a comment on a photo
    #[instrument(skip(self, request), fields(photo_id = %request.photo_id))]
    pub async fn create(
        &self,
        client: &ClientIdentity,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let request = CreateCommentRequest {
            nickname: request.nickname.trim().to_string(),
            content: request.content.trim().to_string(),
            ..request
        };
        request.validate()?;

        if self.ctx.photo_repo().find_by_id(request.photo_id).await?.is_none() {
            return Err(DomainError::PhotoNotFound(request.photo_id).into());
        }

        let decision = self.ctx.spam_guard().check_and_record(client, Utc::now());
        if let SpamDecision::Reject { .. } = decision {
            info!(client = %client, "Comment rejected by spam guard");
            return Err(DomainError::RateLimited {
                retry_after_secs: decision.retry_after_secs(),
            }
            .into());
        }

        let comment = Comment::new(Uuid::new_v4(), request.photo_id, request.nickname, request.content);
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, photo_id = %comment.photo_id, "Comment created");

        Ok(CommentResponse::from(comment))
    }

    /// All comments on a photo, newest first
    #[instrument(skip(self))]
    pub async fn list_by_photo(&self, photo_id: Uuid) -> ServiceResult<Vec<CommentResponse>> {
        let comments = self.ctx.comment_repo().find_by_photo(photo_id).await?;
        Ok(comments.iter().map(CommentResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn count_by_photo(&self, photo_id: Uuid) -> ServiceResult<CountResponse> {
        let count = self.ctx.comment_repo().count_by_photo(photo_id).await?;
        Ok(CountResponse { count })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> ServiceResult<CommentResponse> {
        let comment = self.find(id).await?;
        Ok(CommentResponse::from(comment))
    }

    /// Edit nickname and/or content
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: Uuid, request: UpdateCommentRequest) -> ServiceResult<CommentResponse> {
        let request = UpdateCommentRequest {
            nickname: request.nickname.map(|n| n.trim().to_string()),
            content: request.content.map(|c| c.trim().to_string()),
        };
        request.validate()?;

        let changes = request.into_changes();
        if changes.nickname.is_none() && changes.content.is_none() {
            return Err(ServiceError::validation("Nothing to update"));
        }

        let mut comment = self.find(id).await?;
        comment.apply(changes);
        self.ctx.comment_repo().update(&comment).await?;

        info!(comment_id = %id, "Comment updated");

        Ok(CommentResponse::from(comment))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        self.find(id).await?;
        self.ctx.comment_repo().delete(id).await?;

        info!(comment_id = %id, "Comment deleted");

        Ok(())
    }

    async fn find(&self, id: Uuid) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::CommentNotFound(id).into())
    }
}
