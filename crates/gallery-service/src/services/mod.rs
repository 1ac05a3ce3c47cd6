//! Business logic services
//!
//! Services orchestrate repositories, the image store and the spam guard.
//! Each borrows the shared [`ServiceContext`] for the length of one request.

pub mod admin;
pub mod comment;
pub mod context;
pub mod department;
pub mod error;
pub mod health;
pub mod like;
pub mod photo;
pub mod spam_guard;

pub use admin::{
    AdminService, LoginOutcome, LOGIN_FAILED_MESSAGE, LOGIN_SUCCESS_MESSAGE, LOGOUT_MESSAGE,
};
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use department::DepartmentService;
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use like::LikeService;
pub use photo::{PhotoListing, PhotoService, RECENT_COMMENTS_PER_PHOTO};
pub use spam_guard::{SpamDecision, SpamGuard, SpamPolicy};
