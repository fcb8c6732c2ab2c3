use image::imageops::FilterType;
use std::fmt;
use std::sync::Arc;

use super::{fetch_remote, SourceError};
use crate::state::ImageSource;

/// Default size of generated thumbnails (square bounding box)
pub const THUMBNAIL_SIZE: u32 = 256;

/// Decoded, downscaled RGBA pixels ready for display
#[derive(Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8 pixels
    pub pixels: Vec<u8>,
}

impl fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Fetch the bytes behind a source and produce a thumbnail
/// fitting in a `size` x `size` box.
///
/// Decoding and resizing are CPU-bound, so they run on the blocking pool.
pub async fn load_thumbnail(source: ImageSource, size: u32) -> Result<Thumbnail, SourceError> {
    let bytes = fetch_bytes(&source).await?;

    let thumbnail = tokio::task::spawn_blocking(move || decode_thumbnail(&bytes, size))
        .await
        .map_err(|e| SourceError::Task(e.to_string()))??;

    tracing::debug!(
        source = %source.describe(),
        width = thumbnail.width,
        height = thumbnail.height,
        "thumbnail generated"
    );
    Ok(thumbnail)
}

/// Decode image bytes and shrink them to fit in `size` x `size`,
/// keeping the aspect ratio. Images already smaller are left as is.
pub fn decode_thumbnail(bytes: &[u8], size: u32) -> Result<Thumbnail, SourceError> {
    let img = image::load_from_memory(bytes).map_err(|e| SourceError::Decode(e.to_string()))?;

    let img = if img.width() > size || img.height() > size {
        img.resize(size, size, FilterType::Lanczos3)
    } else {
        img
    };

    let rgba = img.to_rgba8();
    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Read the raw bytes of a source
async fn fetch_bytes(source: &ImageSource) -> Result<Arc<[u8]>, SourceError> {
    match source {
        ImageSource::Embedded(bytes) => Ok(Arc::clone(bytes)),
        ImageSource::Local(path) => tokio::fs::read(path)
            .await
            .map(Arc::from)
            .map_err(|e| SourceError::read(path, e)),
        ImageSource::Remote(url) => {
            let bytes = fetch_remote(url)
                .await?
                .bytes()
                .await
                .map_err(|e| SourceError::fetch(url, e))?;
            Ok(Arc::from(bytes.as_ref()))
        }
    }
}
