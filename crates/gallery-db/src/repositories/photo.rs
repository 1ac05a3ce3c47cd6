//! PostgreSQL implementation of PhotoRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use gallery_core::entities::Photo;
use gallery_core::traits::{PhotoPage, PhotoRepository, RepoResult};
use gallery_core::value_objects::{PhotoQuery, PhotoSort};

use crate::models::PhotoModel;

use super::error::{escape_like, map_db_error, photo_not_found};

const PHOTO_COLUMNS: &str = "id, department_name, title, description, image_url, thumbnail_url, \
     like_count, view_count, is_top_pick, upload_date, created_at, updated_at";

/// PostgreSQL implementation of PhotoRepository
#[derive(Clone)]
pub struct PgPhotoRepository {
    pool: PgPool,
}

impl PgPhotoRepository {
    /// Create a new PgPhotoRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the WHERE clause shared by the page query and the count query
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &PhotoQuery) {
    builder.push(" WHERE TRUE");

    if let Some(department) = &query.department_name {
        builder.push(" AND department_name = ").push_bind(department.clone());
    }

    if let Some(term) = &query.search {
        let pattern = format!("%{}%", escape_like(term));
        builder
            .push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

fn order_clause(sort: PhotoSort) -> &'static str {
    match sort {
        PhotoSort::Latest => " ORDER BY upload_date DESC, id DESC",
        PhotoSort::Views => " ORDER BY view_count DESC, upload_date DESC, id DESC",
        PhotoSort::Popular => " ORDER BY like_count DESC, upload_date DESC, id DESC",
    }
}

#[async_trait]
impl PhotoRepository for PgPhotoRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Photo>> {
        let result = sqlx::query_as::<_, PhotoModel>(&format!(
            "SELECT {PHOTO_COLUMNS} FROM photos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Photo::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &PhotoQuery) -> RepoResult<PhotoPage> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM photos");
        push_filters(&mut count, query);
        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        let mut page = QueryBuilder::<Postgres>::new(format!("SELECT {PHOTO_COLUMNS} FROM photos"));
        push_filters(&mut page, query);
        page.push(order_clause(query.sort));
        page.push(" LIMIT ").push_bind(i64::from(query.limit));
        page.push(" OFFSET ")
            .push_bind(i64::try_from(query.offset()).unwrap_or(i64::MAX));

        let rows = page
            .build_query_as::<PhotoModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(PhotoPage {
            photos: rows.into_iter().map(Photo::from).collect(),
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    #[instrument(skip(self))]
    async fn find_top_picks(&self) -> RepoResult<Vec<Photo>> {
        let results = sqlx::query_as::<_, PhotoModel>(&format!(
            "SELECT {PHOTO_COLUMNS} FROM photos WHERE is_top_pick ORDER BY upload_date DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Photo::from).collect())
    }

    #[instrument(skip(self))]
    async fn department_names(&self) -> RepoResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT department_name
            FROM photos
            ORDER BY department_name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, photo), fields(photo_id = %photo.id))]
    async fn create(&self, photo: &Photo) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO photos (id, department_name, title, description, image_url, thumbnail_url,
                                like_count, view_count, is_top_pick, upload_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(photo.id)
        .bind(&photo.department_name)
        .bind(&photo.title)
        .bind(&photo.description)
        .bind(&photo.image_url)
        .bind(photo.thumbnail_url.as_deref())
        .bind(photo.like_count)
        .bind(photo.view_count)
        .bind(photo.is_top_pick)
        .bind(photo.upload_date)
        .bind(photo.created_at)
        .bind(photo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, photo), fields(photo_id = %photo.id))]
    async fn update(&self, photo: &Photo) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE photos
            SET department_name = $2, title = $3, description = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(photo.id)
        .bind(&photo.department_name)
        .bind(&photo.title)
        .bind(&photo.description)
        .bind(photo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(photo_not_found(photo.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(photo_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn record_view(&self, id: Uuid) -> RepoResult<Option<Photo>> {
        // Single statement so concurrent readers never lose an increment
        let result = sqlx::query_as::<_, PhotoModel>(&format!(
            "UPDATE photos SET view_count = view_count + 1 WHERE id = $1 RETURNING {PHOTO_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Photo::from))
    }

    #[instrument(skip(self))]
    async fn toggle_top_pick(&self, id: Uuid) -> RepoResult<Option<bool>> {
        sqlx::query_scalar::<_, bool>(
            r"
            UPDATE photos
            SET is_top_pick = NOT is_top_pick, updated_at = NOW()
            WHERE id = $1
            RETURNING is_top_pick
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPhotoRepository>();
    }

    #[test]
    fn test_filters_bind_department_and_search() {
        let query = PhotoQuery::new(
            None,
            None,
            Some("개발팀".to_string()),
            PhotoSort::Latest,
            Some("50%".to_string()),
        );
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM photos");
        push_filters(&mut builder, &query);
        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM photos WHERE TRUE AND department_name = $1 \
             AND (title ILIKE $2 OR description ILIKE $3)"
        );
    }

    #[test]
    fn test_no_filters() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM photos");
        push_filters(&mut builder, &PhotoQuery::default());
        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM photos WHERE TRUE");
    }

    #[test]
    fn test_order_clause_by_sort() {
        assert!(order_clause(PhotoSort::Latest).starts_with(" ORDER BY upload_date DESC"));
        assert!(order_clause(PhotoSort::Views).starts_with(" ORDER BY view_count DESC"));
        assert!(order_clause(PhotoSort::Popular).starts_with(" ORDER BY like_count DESC"));
    }
}
