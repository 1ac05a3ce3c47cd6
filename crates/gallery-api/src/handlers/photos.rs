//! Photo handlers
//!
//! Upload (multipart), listing, detail with view counting, likes, and the
//! admin-only edit, delete and top pick endpoints.

use axum::{
    extract::{multipart::{Field, MultipartRejection}, Multipart, State},
    Json,
};
use gallery_core::traits::ImageUpload;
use gallery_service::{
    ApiResponse, LikeRequest, LikeResponse, LikeService, PhotoDetailResponse, PhotoResponse,
    PhotoService, PhotoUploadResponse, TopPickResponse, UpdatePhotoRequest, UploadPhotoRequest,
};
use tracing::debug;

use crate::extractors::{AdminSession, ClientIp, IdPath, PhotoListParams, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

const UPLOADED_MESSAGE: &str = "사진이 성공적으로 업로드되었습니다.";
const UPDATED_MESSAGE: &str = "사진 정보가 수정되었습니다.";
const DELETED_MESSAGE: &str = "사진이 삭제되었습니다.";

/// Upload a photo
///
/// POST /photos (multipart: `file`, `departmentName`, `title`,
/// `description`, optional `uploadDate`)
pub async fn upload_photo(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Created<Json<ApiResponse<PhotoUploadResponse>>>> {
    let multipart = multipart.map_err(|e| ApiError::invalid_body(e.body_text()))?;
    let (request, file) = read_upload(multipart).await?;

    let response = PhotoService::new(state.service_context())
        .upload(request, file)
        .await?;

    Ok(Created(Json(ApiResponse::new(response).with_message(UPLOADED_MESSAGE))))
}

async fn read_upload(mut multipart: Multipart) -> ApiResult<(UploadPhotoRequest, ImageUpload)> {
    let mut request = UploadPhotoRequest::default();
    let mut file = ImageUpload {
        bytes: Vec::new(),
        content_type: String::new(),
        file_name: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_body(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                file.content_type = field.content_type().unwrap_or_default().to_string();
                file.file_name = field.file_name().map(str::to_string);
                file.bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::invalid_body(e.body_text()))?
                    .to_vec();
            }
            "departmentName" => request.department_name = text(field).await?,
            "title" => request.title = text(field).await?,
            "description" => request.description = text(field).await?,
            "uploadDate" => {
                let value = text(field).await?;
                request.upload_date = (!value.trim().is_empty()).then_some(value);
            }
            other => debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    Ok((request, file))
}

async fn text(field: Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::invalid_body(e.body_text()))
}

/// List photos
///
/// GET /photos?page&limit&departmentName&sort&q
pub async fn list_photos(
    State(state): State<AppState>,
    PhotoListParams(query): PhotoListParams,
) -> ApiResult<Json<ApiResponse<Vec<PhotoResponse>>>> {
    let listing = PhotoService::new(state.service_context()).list(query).await?;
    Ok(Json(ApiResponse::new(listing.photos).with_meta(listing.meta)))
}

/// Department names used by at least one photo
///
/// GET /photos/departments
pub async fn list_photo_departments(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<String>>>> {
    let names = PhotoService::new(state.service_context()).department_names().await?;
    Ok(Json(ApiResponse::new(names)))
}

/// GET /photos/top-picks
pub async fn list_top_picks(State(state): State<AppState>) -> ApiResult<Json<ApiResponse<Vec<PhotoResponse>>>> {
    let photos = PhotoService::new(state.service_context()).top_picks().await?;
    Ok(Json(ApiResponse::new(photos)))
}

/// Photo detail; every call counts as a view
///
/// GET /photos/{id}
pub async fn get_photo(
    State(state): State<AppState>,
    ClientIp(client): ClientIp,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<PhotoDetailResponse>>> {
    let photo = PhotoService::new(state.service_context()).view(id, &client).await?;
    Ok(Json(ApiResponse::new(photo)))
}

/// Admin edit
///
/// PATCH /photos/{id}
pub async fn update_photo(
    State(state): State<AppState>,
    _admin: AdminSession,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdatePhotoRequest>,
) -> ApiResult<Json<ApiResponse<PhotoResponse>>> {
    let photo = PhotoService::new(state.service_context()).update(id, request).await?;
    Ok(Json(ApiResponse::new(photo).with_message(UPDATED_MESSAGE)))
}

/// DELETE /photos/{id}
pub async fn delete_photo(
    State(state): State<AppState>,
    _admin: AdminSession,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<()>>> {
    PhotoService::new(state.service_context()).delete(id).await?;
    Ok(Json(ApiResponse::message(DELETED_MESSAGE)))
}

/// Like (`isLiked: true`) or unlike (`false`)
///
/// POST /photos/{id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    ClientIp(client): ClientIp,
    IdPath(id): IdPath,
    ValidatedJson(request): ValidatedJson<LikeRequest>,
) -> ApiResult<Json<ApiResponse<LikeResponse>>> {
    let response = LikeService::new(state.service_context())
        .toggle(id, &client, request.is_liked)
        .await?;
    Ok(Json(ApiResponse::new(response)))
}

/// POST /photos/{id}/top-pick
pub async fn toggle_top_pick(
    State(state): State<AppState>,
    _admin: AdminSession,
    IdPath(id): IdPath,
) -> ApiResult<Json<ApiResponse<TopPickResponse>>> {
    let response = PhotoService::new(state.service_context()).toggle_top_pick(id).await?;
    let message = format!(
        "관리자 추천이 {}되었습니다.",
        if response.is_top_pick { "활성화" } else { "비활성화" }
    );
    Ok(Json(ApiResponse::new(response).with_message(message)))
}
