//! # gallery-core
//!
//! Domain layer containing entities, value objects, repository traits and the
//! image store port. This crate has zero dependencies on infrastructure
//! (database, web framework, image codecs).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Comment, CommentChanges, Department, Like, LikeOutcome, NewPhoto, Photo, PhotoChanges};
pub use error::DomainError;
pub use traits::{
    CommentRepository, DepartmentRepository, HealthProbe, ImageStore, ImageUpload,
    LikeRepository, PhotoPage, PhotoRepository, RepoResult, StoredImage,
};
pub use value_objects::{ClientIdentity, ExifData, PhotoQuery, PhotoSort};
