use std::collections::HashSet;

use super::data::{ImageId, ImageRecord};
use super::error::CollectionError;
use super::reorder;
use super::selection;

/// The Collection owns the ordered list of gallery images.
///
/// Vector order is the display order and the drag order; there is no
/// separate "logical" ordering. All mutations go through the methods below,
/// and a method that returns an error has not touched the list.
#[derive(Debug, Clone)]
pub struct Collection {
    records: Vec<ImageRecord>,
    /// Next id handed out by `allocate_id`. Only ever grows;
    /// `None` once an image holds `u64::MAX`.
    next_id: Option<u64>,
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl Collection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: Some(1),
        }
    }

    /// Replace the whole collection with the loader's result.
    ///
    /// Selection flags are kept exactly as supplied. A list that repeats an
    /// id is rejected and the previous content stays in place.
    pub fn load(&mut self, records: Vec<ImageRecord>) -> Result<(), CollectionError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(CollectionError::DuplicateId(record.id));
            }
        }

        if let Some(max) = records.iter().map(|record| record.id.0).max() {
            self.bump_next_id(max);
        }

        tracing::debug!(count = records.len(), "collection replaced");
        self.records = records;
        Ok(())
    }

    /// Hand out an id that no image in this collection has ever used
    pub fn allocate_id(&mut self) -> Result<ImageId, CollectionError> {
        let id = self.next_id.ok_or(CollectionError::IdsExhausted)?;
        self.next_id = id.checked_add(1);
        Ok(ImageId(id))
    }

    /// Add an image at the end of the gallery, unselected
    pub fn append(&mut self, mut record: ImageRecord) -> Result<(), CollectionError> {
        if self.position(record.id).is_some() {
            return Err(CollectionError::DuplicateId(record.id));
        }

        self.bump_next_id(record.id.0);
        record.set_selected(false);
        tracing::debug!(id = %record.id, label = record.label(), "image appended");
        self.records.push(record);
        Ok(())
    }

    /// Flip the checkbox of one image and return its new state
    pub fn toggle_selected(&mut self, id: ImageId) -> Result<bool, CollectionError> {
        let record = self
            .records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(CollectionError::NotFound(id))?;

        let selected = !record.is_selected();
        record.set_selected(selected);
        Ok(selected)
    }

    /// Check or uncheck every image
    pub fn set_all_selected(&mut self, value: bool) {
        for record in &mut self.records {
            record.set_selected(value);
        }
    }

    /// Remove every selected image, keeping the order of the rest.
    /// Returns the removed images in their former order.
    pub fn delete_selected(&mut self) -> Vec<ImageRecord> {
        if self.selected_count() == 0 {
            return Vec::new();
        }

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(ImageRecord::is_selected);
        self.records = kept;

        tracing::debug!(
            removed = removed.len(),
            remaining = self.records.len(),
            "selected images deleted"
        );
        removed
    }

    /// Apply a completed drag: remove at `from`, reinsert at `to`
    pub fn move_record(&mut self, from: usize, to: usize) -> Result<(), CollectionError> {
        reorder::move_within(&mut self.records, from, to)
    }

    /// True when every image is selected, or the gallery is empty
    pub fn is_all_selected(&self) -> bool {
        selection::is_all_selected(&self.records)
    }

    /// Number of checked images
    pub fn selected_count(&self) -> usize {
        selection::selected_count(&self.records)
    }

    /// Images in display order
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn get(&self, id: ImageId) -> Option<&ImageRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn position(&self, id: ImageId) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn bump_next_id(&mut self, seen: u64) {
        self.next_id = match (self.next_id, seen.checked_add(1)) {
            (Some(next), Some(after_seen)) => Some(next.max(after_seen)),
            _ => None,
        };
    }
}
