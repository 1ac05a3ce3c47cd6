//! Image store port

use async_trait::async_trait;

use super::repositories::RepoResult;

/// Raw uploaded file
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: Option<String>,
}

impl ImageUpload {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Public URLs of a stored image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub image_url: String,
    pub thumbnail_url: Option<String>,
}

/// Persists image bytes and hands back URLs clients can fetch
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the original and, when the format is decodable, a thumbnail
    async fn store(&self, upload: &ImageUpload) -> RepoResult<StoredImage>;

    /// Remove a previously stored image and its thumbnail
    async fn remove(&self, image: &StoredImage) -> RepoResult<()>;
}
