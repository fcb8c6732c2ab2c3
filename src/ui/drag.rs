/// Pointer state of a drag-and-drop gesture over the tile grid.
///
/// Only the completed gesture reaches the collection: `finish` yields the
/// single `(from, to)` move to apply, or nothing when the tile was dropped
/// back where it started or outside every tile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragState {
    /// Index of the tile being dragged
    origin: Option<usize>,
    /// Index of the tile currently under the cursor
    target: Option<usize>,
}

impl DragState {
    /// Left button pressed on a tile
    pub fn begin(&mut self, index: usize) {
        self.origin = Some(index);
        self.target = Some(index);
    }

    /// Cursor entered a tile; ignored unless a drag is in progress
    pub fn hover(&mut self, index: usize) {
        if self.origin.is_some() {
            self.target = Some(index);
        }
    }

    /// Cursor left a tile
    pub fn leave(&mut self, index: usize) {
        if self.target == Some(index) {
            self.target = None;
        }
    }

    /// Left button released anywhere
    pub fn finish(&mut self) -> Option<(usize, usize)> {
        let gesture = std::mem::take(self);
        match (gesture.origin, gesture.target) {
            (Some(from), Some(to)) if from != to => Some((from, to)),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    /// True when `index` is the tile the dragged one would drop onto
    pub fn is_drop_target(&self, index: usize) -> bool {
        self.is_dragging() && self.target == Some(index) && self.origin != Some(index)
    }
}
