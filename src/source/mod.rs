//! Image source adapters
//!
//! This module handles everything that talks to the outside world:
//! - Loading the initial image manifest (loader.rs)
//! - Reading user-chosen files into memory (ingest.rs)
//! - Fetching and downscaling image bytes for display (thumbnail.rs)

pub mod ingest;
pub mod loader;
pub mod thumbnail;

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the source adapters.
///
/// Carried inside iced messages, so the variants hold rendered messages
/// instead of the underlying (non-`Clone`) error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("malformed image manifest: {0}")]
    Manifest(String),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("background task failed: {0}")]
    Task(String),
}

impl SourceError {
    pub(crate) fn read(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        SourceError::Read {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub(crate) fn fetch(url: &str, err: reqwest::Error) -> Self {
        SourceError::Fetch {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

/// Download a remote resource, treating HTTP error statuses as failures
pub(crate) async fn fetch_remote(url: &str) -> Result<reqwest::Response, SourceError> {
    reqwest::get(url)
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| SourceError::fetch(url, e))
}
