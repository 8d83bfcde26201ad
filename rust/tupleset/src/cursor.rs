//! Cursor positions and the arithmetic that keeps them valid across
//! structural changes.
//!
//! A cursor position is a gap between two rows: position `i` sits just
//! before the row at index `i`, so `0` is "before the first row" and `len`
//! is "after the last row". `next_row` returns the row at the position and
//! moves past it; `previous_row` moves back and returns the row it crossed.

/// Cursor position after a row was inserted at index `at`.
///
/// An insertion at or before the cursor pushes the cursor forward, so the row
/// that was next before the insertion is still next afterwards.
#[inline]
pub(crate) fn after_insert(cursor: usize, at: usize) -> usize {
    if cursor >= at { cursor + 1 } else { cursor }
}

/// Cursor position after the row at index `at` was removed.
///
/// Only removals strictly before the cursor move it back; removing the row
/// right after the cursor leaves the position as is.
#[inline]
pub(crate) fn after_remove(cursor: usize, at: usize) -> usize {
    if cursor > at { cursor - 1 } else { cursor }
}

/// Position within a partitioned sequence: a subset (by its position in
/// insertion order) and a gap within that subset's rows.
///
/// When the same absolute position can be expressed in two ways (the end of
/// one subset equals the start of the next non-empty one), both are valid;
/// traversal normalizes as it moves.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SubsetCursor {
    pub subset: usize,
    pub local: usize,
}

impl SubsetCursor {
    pub fn new(subset: usize, local: usize) -> SubsetCursor {
        SubsetCursor { subset, local }
    }
}
