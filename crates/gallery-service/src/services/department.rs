//! Department service

use tracing::instrument;

use crate::dto::DepartmentResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Department service
pub struct DepartmentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DepartmentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Every department with its display color, by name
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<DepartmentResponse>> {
        let departments = self.ctx.department_repo().find_all().await?;
        Ok(departments.iter().map(DepartmentResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[tokio::test]
    async fn test_list_departments() {
        let store = MemoryStore::new();
        let ctx = store.context_builder().build().unwrap();

        let departments = DepartmentService::new(&ctx).list().await.unwrap();
        assert_eq!(departments.len(), 6);
        assert!(departments.windows(2).all(|w| w[0].name <= w[1].name));
    }
}
