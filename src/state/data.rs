//! Shared data structures for the gallery state
//!
//! These structs represent the data model that flows between
//! the source adapters (manifest loader, uploads) and the UI layer.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Stable identifier of an image in the gallery.
///
/// Ids are assigned once and never reused, even after the image is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(pub u64);

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the bytes of an image live
#[derive(Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Remote image fetched over HTTP(S)
    Remote(String),
    /// Image file on the local disk
    Local(PathBuf),
    /// Bytes read from an uploaded file and kept in memory
    Embedded(Arc<[u8]>),
}

impl ImageSource {
    /// Short human readable description, used in logs
    pub fn describe(&self) -> String {
        match self {
            ImageSource::Remote(url) => url.clone(),
            ImageSource::Local(path) => path.display().to_string(),
            ImageSource::Embedded(bytes) => format!("<{} embedded bytes>", bytes.len()),
        }
    }
}

// Embedded sources can be several megabytes; never dump them into logs
impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Remote(url) => f.debug_tuple("Remote").field(url).finish(),
            ImageSource::Local(path) => f.debug_tuple("Local").field(path).finish(),
            ImageSource::Embedded(bytes) => f
                .debug_struct("Embedded")
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

/// Represents a single image in the gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Unique id, never reused
    pub id: ImageId,
    /// Reference to the image bytes (immutable)
    source: ImageSource,
    /// Display text, usually the original filename (immutable)
    label: String,
    /// Checkbox state
    selected: bool,
}

impl ImageRecord {
    /// Create an unselected record
    pub fn new(id: ImageId, source: ImageSource, label: impl Into<String>) -> Self {
        Self {
            id,
            source,
            label: label.into(),
            selected: false,
        }
    }

    /// Same record with the given selection flag, as supplied by a loader
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Only the collection store may flip selection
    pub(super) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_unselected() {
        let record = ImageRecord::new(ImageId(7), ImageSource::Remote("a.png".into()), "a.png");
        assert!(!record.is_selected());
        assert_eq!(record.label(), "a.png");
        assert!(record.with_selected(true).is_selected());
    }

    #[test]
    fn test_embedded_debug_hides_bytes() {
        let source = ImageSource::Embedded(Arc::from(vec![1u8; 4096]));
        let debug = format!("{:?}", source);
        assert_eq!(debug, "Embedded { len: 4096 }");
        assert_eq!(source.describe(), "<4096 embedded bytes>");
    }
}
