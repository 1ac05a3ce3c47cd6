//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in gallery-core.

mod comment;
mod department;
mod error;
mod health;
mod like;
mod photo;

pub use comment::PgCommentRepository;
pub use department::PgDepartmentRepository;
pub use health::PgHealthProbe;
pub use like::PgLikeRepository;
pub use photo::PgPhotoRepository;
