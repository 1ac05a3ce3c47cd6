//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use gallery_core::entities::Comment;
use gallery_core::traits::{CommentRepository, RepoResult};

use crate::models::CommentModel;

use super::error::{comment_not_found, map_db_error, map_foreign_key_violation, photo_not_found};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, photo_id, nickname, content, created_at, updated_at
            FROM comments
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_by_photo(&self, photo_id: Uuid) -> RepoResult<Vec<Comment>> {
        let results = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, photo_id, nickname, content, created_at, updated_at
            FROM comments
            WHERE photo_id = $1
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(photo_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, photo_ids), fields(photos = photo_ids.len()))]
    async fn find_recent_by_photos(
        &self,
        photo_ids: &[Uuid],
        per_photo: u32,
    ) -> RepoResult<Vec<Comment>> {
        if photo_ids.is_empty() || per_photo == 0 {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, photo_id, nickname, content, created_at, updated_at
            FROM (
                SELECT id, photo_id, nickname, content, created_at, updated_at,
                       ROW_NUMBER() OVER (PARTITION BY photo_id ORDER BY created_at DESC, id DESC) AS rn
                FROM comments
                WHERE photo_id = ANY($1)
            ) ranked
            WHERE rn <= $2
            ORDER BY photo_id, created_at DESC, id DESC
            ",
        )
        .bind(photo_ids)
        .bind(i64::from(per_photo))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_by_photo(&self, photo_id: Uuid) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE photo_id = $1")
            .bind(photo_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id, photo_id = %comment.photo_id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO comments (id, photo_id, nickname, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(comment.id)
        .bind(comment.photo_id)
        .bind(&comment.nickname)
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || photo_not_found(comment.photo_id)))?;

        Ok(())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE comments
            SET nickname = $2, content = $3, updated_at = $4
            WHERE id = $1
            ",
        )
        .bind(comment.id)
        .bind(&comment.nickname)
        .bind(&comment.content)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(comment.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgCommentRepository>();
    }
}
