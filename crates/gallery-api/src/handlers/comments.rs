//! Comment handlers
//!
//! Endpoints for comment operations. Creation passes through the spam guard.

use axum::{extract::State, Json};
use gallery_service::{
    ApiResponse, CommentResponse, CommentService, CountResponse, CreateCommentRequest,
    UpdateCommentRequest,
};

use crate::extractors::{ClientIp, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create comment
///
/// POST /comments
pub async fn create_comment(
    State(state): State<AppState>,
    ClientIp(client): ClientIp,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<ApiResponse<CommentResponse>>>> {
    let comment = CommentService::new(state.service_context())
        .create(&client, request)
        .await?;
    Ok(Created(Json(ApiResponse::new(comment))))
}

/// Comments on a photo, newest first
///
/// GET /comments/photo/{photo_id}
pub async fn list_photo_comments(
    State(state): State<AppState>,
    IdPath(photo_id): IdPath,
) -> ApiResult<Json<ApiResponse<Vec<CommentResponse>>>> {
    let comments = CommentService::new(state.service_context())
        .list_by_photo(photo_id)
        .await?;
    Ok(Json(ApiResponse::new(comments)))
}

/// GET /comments/photo/{photo_id}/count
pub async fn count_photo_comments(
    State(state): State<AppState>,
    IdPath(photo_id): IdPath,
) -> ApiResult<Json<ApiResponse<CountResponse>>> {
    let count = CommentService::new(state.service_context())
        .count_by_photo(photo_id)
        .await?;
    Ok(Json(ApiResponse::new(count)))
}

/// GET /comments/{id}
pub async fn get_comment(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<CommentResponse>>> {
    let comment = CommentService::new(state.service_context()).get(id).await?;
    Ok(Json(ApiResponse::new(comment)))
}

/// Edit comment
///
/// PATCH /comments/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<ApiResponse<CommentResponse>>> {
    let comment = CommentService::new(state.service_context())
        .update(id, request)
        .await?;
    Ok(Json(ApiResponse::new(comment)))
}

/// DELETE /comments/{id}
pub async fn delete_comment(State(state): State<AppState>, IdPath(id): IdPath) -> ApiResult<NoContent> {
    CommentService::new(state.service_context()).delete(id).await?;
    Ok(NoContent)
}
