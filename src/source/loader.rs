//! Initial image list loader
//!
//! The gallery starts from a JSON manifest, either a local file or an
//! HTTP(S) URL. The manifest is an array of entries such as
//!
//! ```json
//! [{ "id": 1, "url": "images/image-1.webp", "label": "Sunset" }]
//! ```
//!
//! `src` is accepted for `url`, `alt` for `label` and `checked` for
//! `selected`. Relative image references resolve against the manifest's
//! own location.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{fetch_remote, SourceError};
use crate::state::{ImageId, ImageRecord, ImageSource};

/// Where the manifest lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestLocation {
    File(PathBuf),
    Url(String),
}

impl ManifestLocation {
    /// `http://` and `https://` locations are URLs, anything else is a path
    pub fn parse(location: &str) -> Self {
        if is_remote(location) {
            ManifestLocation::Url(location.to_string())
        } else {
            ManifestLocation::File(PathBuf::from(location))
        }
    }
}

impl std::fmt::Display for ManifestLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestLocation::File(path) => write!(f, "{}", path.display()),
            ManifestLocation::Url(url) => f.write_str(url),
        }
    }
}

/// One manifest entry as found on disk
#[derive(Debug, Deserialize)]
struct ManifestEntry {
    id: u64,
    #[serde(alias = "src")]
    url: String,
    #[serde(default, alias = "alt")]
    label: Option<String>,
    #[serde(default, alias = "checked")]
    selected: bool,
}

/// Load the manifest and turn it into gallery records, in manifest order
pub async fn load_manifest(location: ManifestLocation) -> Result<Vec<ImageRecord>, SourceError> {
    tracing::info!(%location, "loading image manifest");

    let json = match &location {
        ManifestLocation::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SourceError::read(path, e))?,
        ManifestLocation::Url(url) => fetch_remote(url)
            .await?
            .text()
            .await
            .map_err(|e| SourceError::fetch(url, e))?,
    };

    let records = parse_manifest(&json, &location)?;
    tracing::info!(count = records.len(), "image manifest loaded");
    Ok(records)
}

/// Parse manifest JSON; `location` anchors relative image references
pub fn parse_manifest(
    json: &str,
    location: &ManifestLocation,
) -> Result<Vec<ImageRecord>, SourceError> {
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(json).map_err(|e| SourceError::Manifest(e.to_string()))?;

    entries
        .into_iter()
        .map(|entry| {
            let source = resolve(&entry.url, location)?;
            let label = entry
                .label
                .filter(|label| !label.trim().is_empty())
                .unwrap_or_else(|| label_from_reference(&entry.url));
            Ok(ImageRecord::new(ImageId(entry.id), source, label).with_selected(entry.selected))
        })
        .collect()
}

/// Resolve an image reference from the manifest into a source
fn resolve(reference: &str, location: &ManifestLocation) -> Result<ImageSource, SourceError> {
    if is_remote(reference) {
        return Ok(ImageSource::Remote(reference.to_string()));
    }

    match location {
        ManifestLocation::File(manifest) => {
            let path = Path::new(reference);
            if path.is_absolute() {
                return Ok(ImageSource::Local(path.to_path_buf()));
            }
            let base = manifest.parent().unwrap_or_else(|| Path::new(""));
            Ok(ImageSource::Local(base.join(path)))
        }
        ManifestLocation::Url(base) => {
            let base = reqwest::Url::parse(base)
                .map_err(|e| SourceError::Manifest(format!("bad manifest url {base}: {e}")))?;
            let joined = base
                .join(reference)
                .map_err(|e| SourceError::Manifest(format!("bad image url {reference}: {e}")))?;
            Ok(ImageSource::Remote(joined.to_string()))
        }
    }
}

/// Last path segment of a reference, without query or fragment
fn label_from_reference(reference: &str) -> String {
    let trimmed = reference
        .split(['?', '#'])
        .next()
        .unwrap_or(reference)
        .trim_end_matches('/');
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(reference)
        .to_string()
}

fn is_remote(reference: &str) -> bool {
    let lower = reference.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            ManifestLocation::parse("https://example.com/images.json"),
            ManifestLocation::Url("https://example.com/images.json".into())
        );
        assert_eq!(
            ManifestLocation::parse("images.json"),
            ManifestLocation::File(PathBuf::from("images.json"))
        );
    }

    #[test]
    fn test_parse_keeps_order_and_aliases() {
        let json = r#"[
            { "id": 3, "url": "https://cdn.example.com/c.webp" },
            { "id": 1, "src": "https://cdn.example.com/a.webp", "alt": "First", "checked": true }
        ]"#;
        let location = ManifestLocation::File(PathBuf::from("images.json"));

        let records = parse_manifest(json, &location).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, ImageId(3));
        assert_eq!(records[0].label(), "c.webp");
        assert!(!records[0].is_selected());
        assert_eq!(records[1].label(), "First");
        assert!(records[1].is_selected());
        assert_eq!(
            records[1].source(),
            &ImageSource::Remote("https://cdn.example.com/a.webp".into())
        );
    }

    #[test]
    fn test_relative_reference_next_to_manifest_file() {
        let json = r#"[{ "id": 1, "url": "images/one.png" }]"#;
        let location = ManifestLocation::File(PathBuf::from("/srv/gallery/images.json"));

        let records = parse_manifest(json, &location).unwrap();
        assert_eq!(
            records[0].source(),
            &ImageSource::Local(PathBuf::from("/srv/gallery/images/one.png"))
        );
    }

    #[test]
    fn test_relative_reference_against_manifest_url() {
        let json = r#"[{ "id": 1, "url": "images/one.png?v=2" }]"#;
        let location = ManifestLocation::Url("https://example.com/gallery/images.json".into());

        let records = parse_manifest(json, &location).unwrap();
        assert_eq!(
            records[0].source(),
            &ImageSource::Remote("https://example.com/gallery/images/one.png?v=2".into())
        );
        assert_eq!(records[0].label(), "one.png");
    }

    #[test]
    fn test_malformed_manifest() {
        let location = ManifestLocation::File(PathBuf::from("images.json"));
        let err = parse_manifest(r#"{ "id": 1 }"#, &location).unwrap_err();
        assert!(matches!(err, SourceError::Manifest(_)));
    }

    #[tokio::test]
    async fn test_load_manifest_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("images.json");
        std::fs::write(&path, r#"[{ "id": 1, "url": "a.png" }, { "id": 2, "url": "b.png" }]"#)
            .unwrap();

        let records = load_manifest(ManifestLocation::File(path)).await.unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![ImageId(1), ImageId(2)]);
        assert_eq!(records[1].source(), &ImageSource::Local(dir.path().join("b.png")));
    }

    #[tokio::test]
    async fn test_load_missing_manifest() {
        let result = load_manifest(ManifestLocation::File("/nonexistent/images.json".into())).await;
        assert!(matches!(result, Err(SourceError::Read { .. })));
    }
}
