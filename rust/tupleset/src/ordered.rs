//! A single-partition mutable result sequence.

use tupleset_common::{
    Result,
    error::{Direction, Error},
    result::{verify_index, verify_position},
};

use crate::{
    BindingNames, Row, TupleSequence, cursor,
    source::{RowSource, drain_into},
};

/// A mutable, ordered collection of rows with one bidirectional cursor.
///
/// The sequence can be traversed any number of times, in either direction,
/// and modified while a traversal is in progress. Insertions and removals
/// re-home the cursor so that traversal continues where it logically left
/// off, the way a fail-safe list iterator would.
///
/// The cursor is tracked by index. Each insertion therefore costs `O(n)`
/// and a long run of [`insert`](OrderedRecordSequence::insert) calls is
/// quadratic; prefer [`append`](OrderedRecordSequence::append) and
/// [`append_all`](OrderedRecordSequence::append_all) for bulk loading.
#[derive(Debug, Clone, Default)]
pub struct OrderedRecordSequence {
    binding_names: BindingNames,
    rows: Vec<Row>,
    /// `None` means no cursor is live and traversal starts at `0`.
    cursor: Option<usize>,
    /// Index of the row returned by the last `next_row`/`previous_row`.
    last_returned: Option<usize>,
}

impl OrderedRecordSequence {
    /// Creates an empty sequence with the given binding names.
    pub fn new(binding_names: BindingNames) -> OrderedRecordSequence {
        OrderedRecordSequence {
            binding_names,
            ..Default::default()
        }
    }

    /// Creates a sequence holding `rows`.
    pub fn from_rows(
        binding_names: BindingNames,
        rows: impl IntoIterator<Item = Row>,
    ) -> OrderedRecordSequence {
        OrderedRecordSequence {
            binding_names,
            rows: rows.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Creates a sequence by draining `source`, which is closed afterwards
    /// whatever the outcome.
    pub fn from_source<S: RowSource>(
        binding_names: BindingNames,
        source: S,
    ) -> std::result::Result<OrderedRecordSequence, S::Error> {
        let mut seq = OrderedRecordSequence::new(binding_names);
        drain_into(source, &mut seq.rows)?;
        Ok(seq)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Inserts `row` before the row at `index` (`index == len` appends).
    ///
    /// If the cursor is at or after `index` it moves forward by one, so the
    /// next call to `next_row` is unaffected. This holds even when no
    /// traversal has started yet: inserting at `0` into a fresh sequence
    /// leaves the new row behind the cursor.
    pub fn insert(&mut self, index: usize, row: Row) -> Result<()> {
        verify_position(index, self.rows.len())?;
        let current = self.index();
        self.rows.insert(index, row);
        self.cursor = Some(cursor::after_insert(current, index));
        self.last_returned = None;
        Ok(())
    }

    /// Inserts `row` at the cursor: a subsequent `next_row` is unaffected and
    /// a subsequent `previous_row` returns the new row.
    pub fn insert_at_cursor(&mut self, row: Row) {
        let current = self.index();
        self.rows.insert(current, row);
        self.cursor = Some(current + 1);
        self.last_returned = None;
    }

    /// Appends `row` at the end. The cursor index is unaffected.
    pub fn append(&mut self, row: Row) {
        self.rows.push(row);
        self.last_returned = None;
    }

    /// Appends all `rows` at the end. The cursor index is unaffected.
    pub fn append_all(&mut self, rows: impl IntoIterator<Item = Row>) {
        self.rows.extend(rows);
        self.last_returned = None;
    }

    /// Drains `source` into the end of the sequence and closes it.
    ///
    /// On error, the rows received before the failure remain appended.
    /// Returns the number of rows appended.
    pub fn append_all_from<S: RowSource>(
        &mut self,
        source: S,
    ) -> std::result::Result<usize, S::Error> {
        self.last_returned = None;
        drain_into(source, &mut self.rows)
    }

    fn last_returned(&self, operation: &str) -> Result<usize> {
        self.last_returned
            .ok_or_else(|| Error::invalid_state(operation))
    }
}

impl TupleSequence for OrderedRecordSequence {
    fn binding_names(&self) -> &BindingNames {
        &self.binding_names
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn get(&self, index: usize) -> Result<&Row> {
        self.rows
            .get(index)
            .ok_or_else(|| Error::out_of_range(index, self.rows.len()))
    }

    fn set(&mut self, index: usize, row: Row) -> Result<Row> {
        verify_index(index, self.rows.len())?;
        Ok(std::mem::replace(&mut self.rows[index], row))
    }

    fn remove(&mut self, index: usize) -> Result<Row> {
        verify_index(index, self.rows.len())?;
        let removed = self.rows.remove(index);
        self.cursor = self.cursor.map(|c| cursor::after_remove(c, index));
        self.last_returned = None;
        Ok(removed)
    }

    fn index(&self) -> usize {
        self.cursor.unwrap_or(0)
    }

    fn set_index(&mut self, index: usize) -> Result<()> {
        verify_position(index, self.rows.len())?;
        self.cursor = Some(index);
        self.last_returned = None;
        Ok(())
    }

    fn before_first(&mut self) {
        self.cursor = Some(0);
        self.last_returned = None;
    }

    fn after_last(&mut self) {
        self.cursor = Some(self.rows.len());
        self.last_returned = None;
    }

    fn next_row(&mut self) -> Result<Row> {
        let index = self.index();
        let row = self
            .rows
            .get(index)
            .cloned()
            .ok_or_else(|| Error::no_such_element(Direction::Next))?;
        self.cursor = Some(index + 1);
        self.last_returned = Some(index);
        Ok(row)
    }

    fn previous_row(&mut self) -> Result<Row> {
        let index = self
            .index()
            .checked_sub(1)
            .ok_or_else(|| Error::no_such_element(Direction::Previous))?;
        let row = self.rows[index].clone();
        self.cursor = Some(index);
        self.last_returned = Some(index);
        Ok(row)
    }

    fn remove_current(&mut self) -> Result<Row> {
        let index = self.last_returned("remove_current")?;
        self.remove(index)
    }

    fn set_current(&mut self, row: Row) -> Result<Row> {
        let index = self.last_returned("set_current")?;
        self.set(index, row)
    }

    fn clear(&mut self) {
        self.binding_names = BindingNames::empty();
        self.rows.clear();
        self.close();
    }

    fn close(&mut self) {
        self.cursor = None;
        self.last_returned = None;
    }

    /// Returns the first `min(len, limit)` rows. A single partition needs no
    /// fair-share allocation.
    fn reduced(&self, limit: usize) -> OrderedRecordSequence {
        let take = self.rows.len().min(limit);
        OrderedRecordSequence::from_rows(
            self.binding_names.clone(),
            self.rows[..take].iter().cloned(),
        )
    }

    fn to_vec(&self) -> Vec<Row> {
        self.rows.clone()
    }
}

impl<'a> IntoIterator for &'a OrderedRecordSequence {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
