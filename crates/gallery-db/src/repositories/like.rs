//! PostgreSQL implementation of LikeRepository
//!
//! Each toggle runs in one transaction: the photo row is locked, the like row
//! is inserted or deleted, and `like_count` moves by one. A failure at any step
//! rolls back the whole change.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};
use uuid::Uuid;

use gallery_core::entities::{Like, LikeOutcome};
use gallery_core::error::DomainError;
use gallery_core::traits::{LikeRepository, RepoResult};
use gallery_core::value_objects::ClientIdentity;

use super::error::{map_db_error, map_unique_violation, photo_not_found};

/// PostgreSQL implementation of LikeRepository
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    /// Create a new PgLikeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Lock the photo row for the rest of the transaction
async fn lock_photo(tx: &mut Transaction<'_, Postgres>, photo_id: Uuid) -> RepoResult<()> {
    let locked = sqlx::query_scalar::<_, Uuid>("SELECT id FROM photos WHERE id = $1 FOR UPDATE")
        .bind(photo_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(map_db_error)?;

    locked.map(|_| ()).ok_or_else(|| photo_not_found(photo_id))
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    #[instrument(skip(self))]
    async fn exists(&self, photo_id: Uuid, client: &ClientIdentity) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE photo_id = $1 AND client_ip = $2)",
        )
        .bind(photo_id)
        .bind(client.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn like(&self, photo_id: Uuid, client: &ClientIdentity) -> RepoResult<LikeOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        lock_photo(&mut tx, photo_id).await?;

        let like = Like::new(Uuid::new_v4(), photo_id, client.clone());
        sqlx::query(
            r"
            INSERT INTO likes (id, photo_id, client_ip, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(like.id)
        .bind(like.photo_id)
        .bind(like.client.as_str())
        .bind(like.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyLiked))?;

        let like_count = sqlx::query_scalar::<_, i32>(
            "UPDATE photos SET like_count = like_count + 1 WHERE id = $1 RETURNING like_count",
        )
        .bind(photo_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        debug!(like_count, "Like recorded");

        Ok(LikeOutcome {
            like_count,
            is_liked: true,
        })
    }

    #[instrument(skip(self))]
    async fn unlike(&self, photo_id: Uuid, client: &ClientIdentity) -> RepoResult<LikeOutcome> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        lock_photo(&mut tx, photo_id).await?;

        let removed = sqlx::query_scalar::<_, Uuid>(
            "DELETE FROM likes WHERE photo_id = $1 AND client_ip = $2 RETURNING id",
        )
        .bind(photo_id)
        .bind(client.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if removed.is_none() {
            return Err(DomainError::NotLiked);
        }

        // Never below zero even if the counter drifted
        let like_count = sqlx::query_scalar::<_, i32>(
            "UPDATE photos SET like_count = GREATEST(like_count - 1, 0) WHERE id = $1 RETURNING like_count",
        )
        .bind(photo_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;
        debug!(like_count, "Like removed");

        Ok(LikeOutcome {
            like_count,
            is_liked: false,
        })
    }
}
