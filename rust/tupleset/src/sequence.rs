//! The cursor contract shared by single-partition and multi-partition
//! result sequences.

use tupleset_common::Result;

use crate::{BindingNames, OrderedRecordSequence, Row};

/// A mutable, ordered sequence of rows with one bidirectional cursor.
///
/// Rows are addressed by absolute index (`0..len`). The cursor sits between
/// rows (positions `0..=len`); [`next_row`](TupleSequence::next_row) and
/// [`previous_row`](TupleSequence::previous_row) move it one row at a time in
/// either direction and can be restarted at any moment with
/// [`before_first`](TupleSequence::before_first) or
/// [`after_last`](TupleSequence::after_last).
///
/// Structural changes made through the sequence's own API keep the cursor
/// consistent: after an insertion or removal, the next call to `next_row`
/// returns the row that was logically next before the change.
///
/// Implementations are not synchronized. A sequence shared between threads
/// must be guarded by an external lock held for the whole multi-step
/// operation, because cursor maintenance spans reads and writes.
pub trait TupleSequence {
    /// Returns the binding names that define the projection of every row.
    fn binding_names(&self) -> &BindingNames;

    /// Returns the number of rows.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence holds no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the row at `index`.
    ///
    /// Fails with `OutOfRange` if `index >= len`.
    fn get(&self, index: usize) -> Result<&Row>;

    /// Replaces the row at `index`, returning the previous one.
    ///
    /// Does not move the cursor.
    fn set(&mut self, index: usize, row: Row) -> Result<Row>;

    /// Removes and returns the row at `index`, adjusting the cursor.
    fn remove(&mut self, index: usize) -> Result<Row>;

    /// Returns the cursor position as an absolute index; `0` when no cursor
    /// is live.
    fn index(&self) -> usize;

    /// Moves the cursor to absolute position `index` (`0..=len`).
    fn set_index(&mut self, index: usize) -> Result<()>;

    /// Moves the cursor just before the first row.
    fn before_first(&mut self);

    /// Moves the cursor just after the last row.
    fn after_last(&mut self);

    /// Returns `true` if [`next_row`](TupleSequence::next_row) would succeed.
    fn has_next(&self) -> bool {
        self.index() < self.len()
    }

    /// Returns `true` if [`previous_row`](TupleSequence::previous_row) would
    /// succeed.
    fn has_previous(&self) -> bool {
        self.index() > 0
    }

    /// Advances the cursor and returns the row it passed over.
    ///
    /// Fails with `NoSuchElement` at the end of the sequence.
    fn next_row(&mut self) -> Result<Row>;

    /// Moves the cursor back and returns the row it passed over.
    ///
    /// Fails with `NoSuchElement` at the start of the sequence.
    fn previous_row(&mut self) -> Result<Row>;

    /// Removes the row returned by the most recent `next_row` or
    /// `previous_row`.
    ///
    /// Fails with `InvalidState` if there was no such call, or if a
    /// structural change or an explicit repositioning happened since.
    fn remove_current(&mut self) -> Result<Row>;

    /// Replaces the row returned by the most recent `next_row` or
    /// `previous_row`, returning the previous value.
    ///
    /// Fails with `InvalidState` under the same conditions as
    /// [`remove_current`](TupleSequence::remove_current).
    fn set_current(&mut self, row: Row) -> Result<Row>;

    /// Removes all rows and binding names and drops the cursor.
    fn clear(&mut self);

    /// Drops the cursor, keeping the rows.
    fn close(&mut self);

    /// Returns an independent, unpartitioned copy holding at most `limit`
    /// rows.
    fn reduced(&self, limit: usize) -> OrderedRecordSequence;

    /// Returns all rows in absolute order.
    fn to_vec(&self) -> Vec<Row>;
}
