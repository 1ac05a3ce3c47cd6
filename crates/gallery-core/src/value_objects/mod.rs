//! Value objects - immutable types that represent domain concepts

mod client_identity;
mod exif;
mod photo_query;

pub use client_identity::ClientIdentity;
pub use exif::ExifData;
pub use photo_query::{PhotoQuery, PhotoSort, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
