//! Department handlers

use axum::{extract::State, Json};
use gallery_service::{ApiResponse, DepartmentResponse, DepartmentService};

use crate::response::ApiResult;
use crate::state::AppState;

/// List all departments with their colors
///
/// GET /departments
pub async fn list_departments(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<DepartmentResponse>>>> {
    let departments = DepartmentService::new(state.service_context()).list().await?;
    Ok(Json(ApiResponse::new(departments)))
}
