//! Image sources and decoding
//!
//! An [`ImageSource`] yields one decoded image. Decoding is CPU-bound, so it
//! runs on the blocking pool instead of the async executor.

use async_trait::async_trait;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{MediaError, Result};

/// Decode an in-memory image (PNG or JPEG)
pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| MediaError::DecodeError(e.to_string()))
}

async fn decode_blocking(bytes: Arc<[u8]>) -> Result<DynamicImage> {
    tokio::task::spawn_blocking(move || decode_bytes(&bytes))
        .await
        .map_err(|e| MediaError::Task(e.to_string()))?
}

/// Something that can produce a decoded image
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Load and decode the image
    async fn load(&self) -> Result<DynamicImage>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// An image stored on disk
#[derive(Debug, Clone)]
pub struct FileImageSource {
    path: PathBuf,
}

impl FileImageSource {
    /// Create a source for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the image
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn load(&self) -> Result<DynamicImage> {
        let bytes = tokio::fs::read(&self.path).await?;
        tracing::debug!(path = %self.path.display(), size = bytes.len(), "reference image read");
        decode_blocking(bytes.into()).await
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// An image already held in memory (e.g. a bundled asset)
#[derive(Debug, Clone)]
pub struct BytesImageSource {
    bytes: Arc<[u8]>,
}

impl BytesImageSource {
    /// Wrap encoded image bytes
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl ImageSource for BytesImageSource {
    async fn load(&self) -> Result<DynamicImage> {
        decode_blocking(Arc::clone(&self.bytes)).await
    }

    fn describe(&self) -> String {
        format!("<{} bytes in memory>", self.bytes.len())
    }
}
