//! PostgreSQL implementation of DepartmentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use gallery_core::entities::Department;
use gallery_core::traits::{DepartmentRepository, RepoResult};

use crate::models::DepartmentModel;

use super::error::map_db_error;

/// PostgreSQL implementation of DepartmentRepository
#[derive(Clone)]
pub struct PgDepartmentRepository {
    pool: PgPool,
}

impl PgDepartmentRepository {
    /// Create a new PgDepartmentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for PgDepartmentRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepoResult<Vec<Department>> {
        let results = sqlx::query_as::<_, DepartmentModel>(
            r"
            SELECT id, name, color, created_at
            FROM departments
            ORDER BY name ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Department::from).collect())
    }
}
