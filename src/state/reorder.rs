//! Drag-and-drop reordering
//!
//! A completed drag is applied as a splice: the element is removed at `from`
//! and reinserted at `to` in the already shortened sequence. Moving index 0
//! to index 2 of `[A, B, C, D]` yields `[B, C, A, D]`, which differs from
//! "insert before the element currently at `to`" whenever `from < to`.

use super::error::CollectionError;

/// Move the element at `from` to `to`.
///
/// Both indices must be in range; otherwise nothing changes and
/// `InvalidIndex` names the first offending index.
pub fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), CollectionError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(CollectionError::InvalidIndex { index, len });
        }
    }

    if from == to {
        return Ok(());
    }

    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}
