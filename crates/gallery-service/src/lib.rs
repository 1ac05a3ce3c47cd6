//! # gallery-service
//!
//! Application layer containing business logic, services, DTOs and the
//! comment spam guard.

pub mod dto;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod services;

pub use dto::{
    AdminLoginRequest, AdminLoginResponse, AdminVerifyResponse, ApiResponse, CommentResponse,
    CountResponse, CreateCommentRequest, DepartmentResponse, HealthResponse, LikeRequest,
    LikeResponse, PageMeta, PhotoDetailResponse, PhotoListQuery, PhotoResponse,
    PhotoUploadResponse, ReadinessResponse, TopPickResponse, UpdateCommentRequest,
    UpdatePhotoRequest, UploadPhotoRequest,
};
pub use services::{
    AdminService, CommentService, DepartmentService, HealthService, LikeService, LoginOutcome,
    PhotoListing, PhotoService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, SpamDecision, SpamGuard, SpamPolicy, LOGIN_FAILED_MESSAGE,
    LOGIN_SUCCESS_MESSAGE, LOGOUT_MESSAGE,
};
