//! Local filesystem image store
//!
//! Layout under the root directory:
//!
//! - `{uuid}.{ext}`: the original, downscaled to fit `max_dimension` when decodable
//! - `thumb_{uuid}.webp`: thumbnail bounded by `thumbnail_dimension`
//!
//! Formats the decoder cannot read (HEIC) are stored as uploaded with no thumbnail.

use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use tokio::fs;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use gallery_core::error::DomainError;
use gallery_core::traits::{ImageStore, ImageUpload, RepoResult, StoredImage};

/// Default longest edge for stored originals
pub const DEFAULT_MAX_DIMENSION: u32 = 2000;
/// Default longest edge for thumbnails
pub const DEFAULT_THUMBNAIL_DIMENSION: u32 = 400;

/// Stores uploads on local disk and serves them under a URL prefix
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
    url_prefix: String,
    max_dimension: u32,
    thumbnail_dimension: u32,
}

/// Bytes ready to be written
struct Processed {
    original: Vec<u8>,
    thumbnail: Option<Vec<u8>>,
}

impl LocalImageStore {
    /// Create a store rooted at `root`, serving files under `url_prefix` (e.g. `/uploads`)
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let url_prefix = url_prefix.into();
        Self {
            root: root.into(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            max_dimension: DEFAULT_MAX_DIMENSION,
            thumbnail_dimension: DEFAULT_THUMBNAIL_DIMENSION,
        }
    }

    /// Override the resize bounds
    pub fn with_dimensions(mut self, max_dimension: u32, thumbnail_dimension: u32) -> Self {
        self.max_dimension = max_dimension.max(1);
        self.thumbnail_dimension = thumbnail_dimension.max(1);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.url_prefix, file_name)
    }

    /// Map a URL produced by this store back to its file; foreign URLs map to `None`
    fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let name = url.strip_prefix(&self.url_prefix)?.strip_prefix('/')?;
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return None;
        }
        Some(self.root.join(name))
    }

    async fn write(&self, file_name: &str, bytes: &[u8]) -> RepoResult<()> {
        fs::write(self.root.join(file_name), bytes)
            .await
            .map_err(storage_error)
    }

    /// Write the original then the thumbnail. A failed thumbnail write removes
    /// the original again so no orphan is left behind.
    async fn write_files(
        &self,
        original_name: &str,
        thumbnail_name: &str,
        processed: Processed,
    ) -> RepoResult<StoredImage> {
        self.write(original_name, &processed.original).await?;

        let thumbnail_url = match processed.thumbnail {
            Some(thumb) => {
                if let Err(e) = self.write(thumbnail_name, &thumb).await {
                    if let Err(cleanup) = fs::remove_file(self.root.join(original_name)).await {
                        warn!(error = %cleanup, file = original_name, "Failed to remove original after thumbnail error");
                    }
                    return Err(e);
                }
                Some(self.url_for(thumbnail_name))
            }
            None => None,
        };

        Ok(StoredImage {
            image_url: self.url_for(original_name),
            thumbnail_url,
        })
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    #[instrument(skip(self, upload), fields(size = upload.size(), content_type = %upload.content_type))]
    async fn store(&self, upload: &ImageUpload) -> RepoResult<StoredImage> {
        fs::create_dir_all(&self.root).await.map_err(storage_error)?;

        let id = Uuid::new_v4();
        let original_name = format!("{id}.{}", extension_for(&upload.content_type));
        let thumbnail_name = format!("thumb_{id}.webp");

        let bytes = upload.bytes.clone();
        let (max_dimension, thumbnail_dimension) = (self.max_dimension, self.thumbnail_dimension);
        let processed =
            tokio::task::spawn_blocking(move || process(bytes, max_dimension, thumbnail_dimension))
                .await
                .map_err(|e| DomainError::StorageError(format!("image processing failed: {e}")))?;

        let stored = self.write_files(&original_name, &thumbnail_name, processed).await?;
        info!(image_url = %stored.image_url, thumbnail = stored.thumbnail_url.is_some(), "Image stored");
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn remove(&self, image: &StoredImage) -> RepoResult<()> {
        let urls = std::iter::once(image.image_url.as_str()).chain(image.thumbnail_url.as_deref());

        for url in urls {
            let Some(path) = self.path_for_url(url) else {
                warn!(url, "Not a local upload URL, skipping");
                continue;
            };
            match fs::remove_file(&path).await {
                Ok(()) => debug!(path = %path.display(), "Removed image file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "Image file already gone");
                }
                Err(e) => return Err(storage_error(e)),
            }
        }

        Ok(())
    }
}

fn storage_error(e: io::Error) -> DomainError {
    DomainError::StorageError(e.to_string())
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        "image/heic" => "heic",
        _ => "bin",
    }
}

/// Decode, cap the original size and render the thumbnail. Never fails: when
/// decoding or encoding breaks, the original bytes are kept as uploaded.
fn process(bytes: Vec<u8>, max_dimension: u32, thumbnail_dimension: u32) -> Processed {
    let format = image::guess_format(&bytes).ok();
    let decoded = match image::load_from_memory(&bytes) {
        Ok(img) => img,
        Err(e) => {
            debug!(error = %e, "Image not decodable, storing as uploaded");
            return Processed {
                original: bytes,
                thumbnail: None,
            };
        }
    };

    let original = match format {
        Some(format) if decoded.width() > max_dimension || decoded.height() > max_dimension => {
            let resized = decoded.resize(max_dimension, max_dimension, FilterType::Lanczos3);
            encode(&resized, format).unwrap_or_else(|e| {
                warn!(error = %e, "Re-encoding resized original failed, keeping upload");
                bytes
            })
        }
        _ => bytes,
    };

    let thumbnail = DynamicImage::ImageRgba8(
        decoded
            .thumbnail(thumbnail_dimension, thumbnail_dimension)
            .to_rgba8(),
    );
    let thumbnail = match encode(&thumbnail, ImageFormat::WebP) {
        Ok(thumb) => Some(thumb),
        Err(e) => {
            warn!(error = %e, "Thumbnail encoding failed");
            None
        }
    };

    Processed { original, thumbnail }
}

fn encode(image: &DynamicImage, format: ImageFormat) -> image::ImageResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format)?;
    Ok(buf.into_inner())
}
