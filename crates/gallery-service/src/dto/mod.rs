//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs (camelCase JSON)
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AdminLoginRequest, CreateCommentRequest, LikeRequest, PhotoListQuery, UpdateCommentRequest,
    UpdatePhotoRequest, UploadPhotoRequest,
};

pub use responses::{
    AdminLoginResponse, AdminVerifyResponse, ApiResponse, CommentResponse, CountResponse,
    DepartmentResponse, HealthChecks, HealthResponse, LikeResponse, PageMeta, PhotoDetailResponse,
    PhotoResponse, PhotoUploadResponse, ReadinessResponse, TopPickResponse,
};
