//! Photo listing query extractor
//!
//! Reads `page`, `limit`, `departmentName`, `sort` and `q` and normalizes
//! them into a [`PhotoQuery`].

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use gallery_core::value_objects::PhotoQuery;
use gallery_service::PhotoListQuery;

use crate::response::ApiError;

/// Normalized listing parameters
#[derive(Debug, Clone)]
pub struct PhotoListParams(pub PhotoQuery);

#[async_trait]
impl<S> FromRequestParts<S> for PhotoListParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(raw) = Query::<PhotoListQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(PhotoListParams(raw.into_query()))
    }
}
