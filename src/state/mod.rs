//! State management module
//!
//! This module handles the in-memory gallery state:
//! - Shared data structures (data.rs)
//! - The ordered image collection and its mutations (collection.rs)
//! - Selection derivations for the header controls (selection.rs)
//! - Drag-and-drop reordering (reorder.rs)

pub mod collection;
pub mod data;
pub mod error;
pub mod reorder;
pub mod selection;

pub use collection::Collection;
pub use data::{ImageId, ImageRecord, ImageSource};
pub use error::CollectionError;
