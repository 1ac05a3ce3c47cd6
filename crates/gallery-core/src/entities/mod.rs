//! Domain entities - core business objects

mod comment;
mod department;
mod like;
mod photo;

pub use comment::{Comment, CommentChanges, MAX_CONTENT_LEN, MAX_NICKNAME_LEN};
pub use department::Department;
pub use like::{Like, LikeOutcome};
pub use photo::{NewPhoto, Photo, PhotoChanges, MAX_DESCRIPTION_LEN};
