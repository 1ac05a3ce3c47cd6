//! # gallery-media
//!
//! Image handling for uploads:
//!
//! - [`validate_upload`]: size and MIME checks before anything is written
//! - [`extract_exif`]: camera metadata, best effort
//! - [`LocalImageStore`]: filesystem [`ImageStore`](gallery_core::ImageStore)
//!   that keeps a size-capped original plus a WebP thumbnail

pub mod metadata;
pub mod store;
pub mod validation;

pub use metadata::{extract_exif, parse_exif_date};
pub use store::LocalImageStore;
pub use validation::{validate_upload, ALLOWED_MIME_TYPES};
