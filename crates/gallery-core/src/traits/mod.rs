//! Ports implemented by infrastructure crates

mod image_store;
mod repositories;

pub use image_store::{ImageStore, ImageUpload, StoredImage};
pub use repositories::{
    CommentRepository, DepartmentRepository, HealthProbe, LikeRepository, PhotoPage,
    PhotoRepository, RepoResult,
};
