//! Uploading local files into the gallery
//!
//! A chosen file is read fully into memory and becomes an embedded source.
//! The gallery assigns the id when the read completes; this module only
//! produces the bytes and a label.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::SourceError;
use crate::state::{ImageId, ImageRecord, ImageSource};

/// Extensions offered by the file picker
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// A file read from disk, ready to be appended
#[derive(Debug, Clone)]
pub struct Upload {
    pub label: String,
    pub source: ImageSource,
}

impl Upload {
    /// Turn the upload into a fresh, unselected record
    pub fn into_record(self, id: ImageId) -> ImageRecord {
        ImageRecord::new(id, self.source, self.label)
    }
}

/// Read a user-chosen file into memory
pub async fn read_upload(path: PathBuf) -> Result<Upload, SourceError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| SourceError::read(&path, e))?;

    tracing::debug!(path = %path.display(), size = bytes.len(), "upload read");

    Ok(Upload {
        label: file_label(&path),
        source: ImageSource::Embedded(Arc::from(bytes)),
    })
}

/// Filename only (e.g., "DSC_0001.jpg")
fn file_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_upload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("holiday.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let upload = read_upload(path).await.unwrap();
        assert_eq!(upload.label, "holiday.png");
        match &upload.source {
            ImageSource::Embedded(bytes) => assert_eq!(&bytes[..], b"not really a png"),
            other => panic!("unexpected source {other:?}"),
        }

        let record = upload.into_record(ImageId(12));
        assert_eq!(record.id, ImageId(12));
        assert!(!record.is_selected());
    }

    #[tokio::test]
    async fn test_read_missing_upload() {
        let result = read_upload(PathBuf::from("/nonexistent/photo.jpg")).await;
        assert!(matches!(result, Err(SourceError::Read { .. })));
    }
}
