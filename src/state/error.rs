use thiserror::Error;

use super::data::ImageId;

/// Rejected collection operations.
///
/// A failed operation never mutates the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("index {index} is out of range for {len} images")]
    InvalidIndex { index: usize, len: usize },

    #[error("no image with id {0}")]
    NotFound(ImageId),

    #[error("an image with id {0} already exists")]
    DuplicateId(ImageId),

    #[error("no image ids left to hand out")]
    IdsExhausted,
}
