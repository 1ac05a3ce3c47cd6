//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod department;
mod photo;

pub use comment::CommentModel;
pub use department::DepartmentModel;
pub use photo::PhotoModel;
