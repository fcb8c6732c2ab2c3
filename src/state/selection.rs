//! Selection derivations for the gallery header
//!
//! Plain functions over the current records. They are evaluated on every
//! render so the "select all" checkbox and the counter can never go stale.

use super::data::ImageRecord;

/// State of the header checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    /// Nothing selected (and at least one image present)
    None,
    /// Some, but not all, images selected
    Partial,
    /// Every image selected; also the state of an empty gallery
    All,
}

/// True when every record is selected. An empty slice counts as all selected.
pub fn is_all_selected(records: &[ImageRecord]) -> bool {
    records.iter().all(ImageRecord::is_selected)
}

/// Number of selected records
pub fn selected_count(records: &[ImageRecord]) -> usize {
    records.iter().filter(|record| record.is_selected()).count()
}

/// Tri-state summary of the selection
pub fn select_all_state(records: &[ImageRecord]) -> SelectAllState {
    if is_all_selected(records) {
        SelectAllState::All
    } else if selected_count(records) == 0 {
        SelectAllState::None
    } else {
        SelectAllState::Partial
    }
}
