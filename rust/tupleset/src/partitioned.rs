//! A result sequence composed of named, independently ordered subsets.

use std::sync::Arc;

use tupleset_common::{
    Result,
    error::{Direction, Error},
    result::{verify_index, verify_position},
};
use tupleset_keyed_vector::{KeyFromValue, KeyedVector};

use crate::{
    BindingNames, OrderedRecordSequence, Row, TupleSequence,
    cursor::{self, SubsetCursor},
    quota::fair_share_quotas,
    reduce::ReducedSequenceBuilder,
    source::{RowSource, drain_into},
};

#[derive(Debug, Clone)]
struct Subset {
    id: Arc<str>,
    rows: Vec<Row>,
}

impl Subset {
    fn new(id: &str) -> Subset {
        Subset {
            id: id.into(),
            rows: Vec::new(),
        }
    }
}

impl KeyFromValue for Subset {
    fn key(&self) -> &Arc<str> {
        &self.id
    }
}

/// An ordered collection of named subsets, presented as one virtual sequence
/// formed by concatenating the subsets in the order they were created.
///
/// Each subset keeps the rows contributed by one source, so provenance is
/// preserved while the whole result can still be paged through a single
/// cursor. A row is addressed either by its absolute index (the sum of the
/// sizes of all preceding subsets plus its local index) or by
/// `(subset_id, local_index)`.
///
/// Absolute positions are resolved by a linear scan over the subsets; the
/// number of subsets is expected to be small.
#[derive(Debug, Clone, Default)]
pub struct PartitionedRecordSequence {
    binding_names: BindingNames,
    subsets: KeyedVector<Subset>,
    /// `None` stands for the start of the first subset.
    cursor: Option<SubsetCursor>,
    last_returned: Option<SubsetCursor>,
}

impl PartitionedRecordSequence {
    /// Creates an empty sequence with no subsets.
    pub fn new(binding_names: BindingNames) -> PartitionedRecordSequence {
        PartitionedRecordSequence {
            binding_names,
            ..Default::default()
        }
    }

    /// Creates a sequence holding a single subset filled from `source`.
    ///
    /// The subset is created even if the source yields no rows. The source is
    /// closed afterwards whatever the outcome.
    pub fn from_source<S: RowSource>(
        binding_names: BindingNames,
        subset_id: &str,
        source: S,
    ) -> std::result::Result<PartitionedRecordSequence, S::Error> {
        let mut seq = PartitionedRecordSequence::new(binding_names);
        seq.append_all_from(subset_id, source)?;
        Ok(seq)
    }

    /// Appends `row` to the end of the subset `subset_id`, creating the subset
    /// if it does not exist yet.
    pub fn append(&mut self, subset_id: &str, row: Row) {
        self.last_returned = None;
        self.subset_entry(subset_id).rows.push(row);
    }

    /// Appends `rows` to the end of the subset `subset_id`, creating the
    /// subset if it does not exist yet.
    pub fn append_all(&mut self, subset_id: &str, rows: impl IntoIterator<Item = Row>) {
        self.last_returned = None;
        self.subset_entry(subset_id).rows.extend(rows);
    }

    /// Drains `source` into the end of the subset `subset_id`, creating the
    /// subset if it does not exist yet, and closes the source.
    ///
    /// On error, the rows received before the failure remain appended.
    /// Returns the number of rows appended.
    pub fn append_all_from<S: RowSource>(
        &mut self,
        subset_id: &str,
        source: S,
    ) -> std::result::Result<usize, S::Error> {
        self.last_returned = None;
        drain_into(source, &mut self.subset_entry(subset_id).rows)
    }

    /// Inserts `row` before local position `index` of the subset `subset_id`
    /// (`index == subset_len` appends to the subset).
    ///
    /// A cursor at or after the absolute insertion point moves forward by one,
    /// so the row that `next_row` would have returned is still next. This
    /// holds when the cursor sits at the end of an earlier subset and only
    /// empty subsets separate it from the start of `subset_id`.
    pub fn insert(&mut self, subset_id: &str, index: usize, row: Row) -> Result<()> {
        let pos = self.subset_position(subset_id)?;
        let rows = &mut self.subsets[pos].rows;
        verify_position(index, rows.len())?;
        rows.insert(index, row);

        if let Some(mut c) = self.current() {
            if index == 0 && c.subset < pos && self.at_gap_before(c, pos) {
                c = SubsetCursor::new(pos, 0);
            }
            if c.subset == pos {
                c.local = cursor::after_insert(c.local, index);
            }
            self.cursor = Some(c);
        }
        self.last_returned = None;
        Ok(())
    }

    /// Replaces the row at local position `index` of the subset `subset_id`.
    pub fn set_in_subset(&mut self, subset_id: &str, index: usize, row: Row) -> Result<Row> {
        let pos = self.subset_position(subset_id)?;
        let rows = &mut self.subsets[pos].rows;
        verify_index(index, rows.len())?;
        Ok(std::mem::replace(&mut rows[index], row))
    }

    /// Removes the row at local position `index` of the subset `subset_id`.
    pub fn remove_from_subset(&mut self, subset_id: &str, index: usize) -> Result<Row> {
        let pos = self.subset_position(subset_id)?;
        verify_index(index, self.subsets[pos].rows.len())?;
        Ok(self.remove_at(SubsetCursor::new(pos, index)))
    }

    /// Removes the whole subset `subset_id` and returns its rows, or `None`
    /// if no such subset exists.
    ///
    /// A cursor pointing into the removed subset is reset to the start of the
    /// sequence.
    pub fn remove_subset(&mut self, subset_id: &str) -> Option<Vec<Row>> {
        let (pos, subset) = self.subsets.remove(subset_id)?;
        self.cursor = match self.cursor {
            Some(c) if c.subset == pos => None,
            Some(c) if c.subset > pos => Some(SubsetCursor::new(c.subset - 1, c.local)),
            other => other,
        };
        if self.subsets.is_empty() {
            self.cursor = None;
        }
        self.last_returned = None;
        log::debug!(
            "removed subset '{}' holding {} rows",
            subset.id,
            subset.rows.len()
        );
        Some(subset.rows)
    }

    /// Moves the cursor to local position `index` (`0..=subset_len`) of the
    /// subset `subset_id`.
    pub fn set_relative_index(&mut self, subset_id: &str, index: usize) -> Result<()> {
        let pos = self.subset_position(subset_id)?;
        verify_position(index, self.subsets[pos].rows.len())?;
        self.cursor = Some(SubsetCursor::new(pos, index));
        self.last_returned = None;
        Ok(())
    }

    /// Returns the id of the subset the cursor is in, or `None` if there are
    /// no subsets.
    pub fn current_subset_id(&self) -> Option<&str> {
        self.current().map(|c| &*self.subsets[c.subset].id)
    }

    /// Returns the cursor position within its current subset.
    pub fn relative_index(&self) -> usize {
        self.current().map_or(0, |c| c.local)
    }

    /// Returns the cursor position as an absolute index. Same as
    /// [`TupleSequence::index`].
    pub fn absolute_index(&self) -> usize {
        self.current().map_or(0, |c| self.absolute_of(c))
    }

    pub fn has_subset(&self, subset_id: &str) -> bool {
        self.subsets.contains_key(subset_id)
    }

    /// Returns the subset ids in insertion order.
    pub fn subset_ids(&self) -> impl Iterator<Item = &str> {
        self.subsets.keys().map(|id| &**id)
    }

    pub fn subset_count(&self) -> usize {
        self.subsets.len()
    }

    pub fn subset_len(&self, subset_id: &str) -> Result<usize> {
        self.subset_rows(subset_id).map(|rows| rows.len())
    }

    /// Returns the rows of the subset `subset_id`.
    pub fn subset_rows(&self, subset_id: &str) -> Result<&[Row]> {
        self.subsets
            .get(subset_id)
            .map(|s| s.rows.as_slice())
            .ok_or_else(|| Error::unknown_subset(subset_id))
    }

    /// Returns a copy of the rows of the subset `subset_id`.
    pub fn subset_to_vec(&self, subset_id: &str) -> Result<Vec<Row>> {
        self.subset_rows(subset_id).map(<[Row]>::to_vec)
    }

    /// Returns the subset `subset_id` as an independent ordered sequence with
    /// the same binding names.
    pub fn subset(&self, subset_id: &str) -> Result<OrderedRecordSequence> {
        let rows = self.subset_rows(subset_id)?;
        Ok(OrderedRecordSequence::from_rows(
            self.binding_names.clone(),
            rows.iter().cloned(),
        ))
    }

    /// Iterates over all rows in absolute order, together with the id of the
    /// subset each one belongs to.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Row)> {
        self.subsets
            .values()
            .iter()
            .flat_map(|s| s.rows.iter().map(move |row| (&*s.id, row)))
    }

    /// Computes the fair-share quota of every subset for a result capped at
    /// `limit` rows, in subset order.
    pub fn quotas(&self, limit: usize) -> Vec<(Arc<str>, usize)> {
        let sizes = self
            .subsets
            .values()
            .iter()
            .map(|s| s.rows.len())
            .collect::<Vec<_>>();
        let quotas = fair_share_quotas(&sizes, limit);
        self.subsets
            .keys()
            .cloned()
            .zip(quotas)
            .collect()
    }

    fn subset_position(&self, subset_id: &str) -> Result<usize> {
        self.subsets
            .position_of(subset_id)
            .ok_or_else(|| Error::unknown_subset(subset_id))
    }

    fn subset_entry(&mut self, subset_id: &str) -> &mut Subset {
        self.subsets
            .get_or_insert_with(subset_id, || Subset::new(subset_id))
    }

    /// The effective cursor: the stored one, or the start of the first subset.
    fn current(&self) -> Option<SubsetCursor> {
        if self.subsets.is_empty() {
            None
        } else {
            Some(self.cursor.unwrap_or_default())
        }
    }

    /// Whether `c` is the same gap as the start of subset `pos`: it sits at
    /// the end of its subset and every subset in between is empty.
    fn at_gap_before(&self, c: SubsetCursor, pos: usize) -> bool {
        let subsets = self.subsets.values();
        c.local == subsets[c.subset].rows.len()
            && subsets[c.subset + 1..pos].iter().all(|s| s.rows.is_empty())
    }

    fn absolute_of(&self, c: SubsetCursor) -> usize {
        self.subsets.values()[..c.subset]
            .iter()
            .map(|s| s.rows.len())
            .sum::<usize>()
            + c.local
    }

    /// Resolves the absolute index of an existing row.
    fn resolve_element(&self, index: usize) -> Result<SubsetCursor> {
        let mut remain = index;
        for (pos, subset) in self.subsets.values().iter().enumerate() {
            if remain < subset.rows.len() {
                return Ok(SubsetCursor::new(pos, remain));
            }
            remain -= subset.rows.len();
        }
        Err(Error::out_of_range(index, self.len()))
    }

    /// Resolves an absolute cursor position (`0..=len`). A position on a
    /// subset boundary resolves to the end of the earlier subset.
    fn resolve_position(&self, index: usize) -> Result<Option<SubsetCursor>> {
        verify_position(index, self.len())?;
        let mut remain = index;
        for (pos, subset) in self.subsets.values().iter().enumerate() {
            if remain <= subset.rows.len() {
                return Ok(Some(SubsetCursor::new(pos, remain)));
            }
            remain -= subset.rows.len();
        }
        Ok(None)
    }

    fn remove_at(&mut self, at: SubsetCursor) -> Row {
        let removed = self.subsets[at.subset].rows.remove(at.local);
        if let Some(mut c) = self.cursor {
            if c.subset == at.subset {
                c.local = cursor::after_remove(c.local, at.local);
            }
            self.cursor = Some(c);
        }
        self.last_returned = None;
        removed
    }

    fn last_returned(&self, operation: &str) -> Result<SubsetCursor> {
        self.last_returned
            .ok_or_else(|| Error::invalid_state(operation))
    }
}

impl TupleSequence for PartitionedRecordSequence {
    fn binding_names(&self) -> &BindingNames {
        &self.binding_names
    }

    fn len(&self) -> usize {
        self.subsets.values().iter().map(|s| s.rows.len()).sum()
    }

    fn get(&self, index: usize) -> Result<&Row> {
        let at = self.resolve_element(index)?;
        Ok(&self.subsets[at.subset].rows[at.local])
    }

    fn set(&mut self, index: usize, row: Row) -> Result<Row> {
        let at = self.resolve_element(index)?;
        Ok(std::mem::replace(
            &mut self.subsets[at.subset].rows[at.local],
            row,
        ))
    }

    fn remove(&mut self, index: usize) -> Result<Row> {
        let at = self.resolve_element(index)?;
        Ok(self.remove_at(at))
    }

    fn index(&self) -> usize {
        self.absolute_index()
    }

    fn set_index(&mut self, index: usize) -> Result<()> {
        self.cursor = self.resolve_position(index)?;
        self.last_returned = None;
        Ok(())
    }

    fn before_first(&mut self) {
        self.cursor = None;
        self.last_returned = None;
    }

    fn after_last(&mut self) {
        self.cursor = self.subsets.len().checked_sub(1).map(|last| {
            SubsetCursor::new(last, self.subsets[last].rows.len())
        });
        self.last_returned = None;
    }

    fn next_row(&mut self) -> Result<Row> {
        let mut c = self
            .current()
            .ok_or_else(|| Error::no_such_element(Direction::Next))?;
        while c.local >= self.subsets[c.subset].rows.len() && c.subset + 1 < self.subsets.len() {
            c = SubsetCursor::new(c.subset + 1, 0);
        }
        let row = self.subsets[c.subset]
            .rows
            .get(c.local)
            .cloned()
            .ok_or_else(|| Error::no_such_element(Direction::Next))?;
        self.last_returned = Some(c);
        self.cursor = Some(SubsetCursor::new(c.subset, c.local + 1));
        Ok(row)
    }

    fn previous_row(&mut self) -> Result<Row> {
        let mut c = self
            .current()
            .ok_or_else(|| Error::no_such_element(Direction::Previous))?;
        while c.local == 0 && c.subset > 0 {
            c.subset -= 1;
            c.local = self.subsets[c.subset].rows.len();
        }
        if c.local == 0 {
            return Err(Error::no_such_element(Direction::Previous));
        }
        c.local -= 1;
        let row = self.subsets[c.subset].rows[c.local].clone();
        self.last_returned = Some(c);
        self.cursor = Some(c);
        Ok(row)
    }

    fn remove_current(&mut self) -> Result<Row> {
        let at = self.last_returned("remove_current")?;
        Ok(self.remove_at(at))
    }

    fn set_current(&mut self, row: Row) -> Result<Row> {
        let at = self.last_returned("set_current")?;
        Ok(std::mem::replace(
            &mut self.subsets[at.subset].rows[at.local],
            row,
        ))
    }

    fn clear(&mut self) {
        self.binding_names = BindingNames::empty();
        self.subsets.clear();
        self.close();
    }

    fn close(&mut self) {
        self.cursor = None;
        self.last_returned = None;
    }

    /// Builds an unpartitioned copy of at most `limit` rows in which every
    /// subset is represented by its fair share, taken from its head.
    fn reduced(&self, limit: usize) -> OrderedRecordSequence {
        let quotas = self.quotas(limit);
        let total = quotas.iter().map(|(_, q)| q).sum::<usize>();
        let mut builder = ReducedSequenceBuilder::with_capacity(self.binding_names.clone(), total);
        for (subset, (_, quota)) in self.subsets.values().iter().zip(quotas) {
            builder.push_subset(&subset.rows, quota);
        }
        log::debug!(
            "reduced {} rows in {} subsets to {} (limit {limit})",
            self.len(),
            self.subsets.len(),
            builder.len()
        );
        builder.build()
    }

    fn to_vec(&self) -> Vec<Row> {
        self.subsets
            .values()
            .iter()
            .flat_map(|s| s.rows.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::tests::{TrackedSource, int_row as row};

    fn seq(subsets: &[(&str, &[i64])]) -> PartitionedRecordSequence {
        let mut s = PartitionedRecordSequence::new(BindingNames::new(["x"]));
        for (id, values) in subsets {
            s.append_all(id, values.iter().map(|&v| row(v)));
        }
        s
    }

    fn drain_forward(s: &mut PartitionedRecordSequence) -> Vec<Row> {
        let mut rows = Vec::new();
        while let Ok(r) = s.next_row() {
            rows.push(r);
        }
        rows
    }

    #[test]
    fn test_absolute_addressing() {
        let s = seq(&[("a", &[1, 2, 3]), ("b", &[10, 20])]);
        assert_eq!(s.len(), 5);
        assert_eq!(s.subset_count(), 2);
        assert_eq!(s.get(0).unwrap(), &row(1));
        assert_eq!(s.get(3).unwrap(), &row(10));
        assert_eq!(s.get(4).unwrap(), &row(20));
        let err = s.get(5).unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(err.to_string(), "index 5 out of range for length 5");
    }

    #[test]
    fn test_traversal_crosses_subsets_and_skips_empty() {
        let mut s = seq(&[("e0", &[]), ("a", &[1]), ("e1", &[]), ("b", &[2, 3]), ("e2", &[])]);
        assert_eq!(drain_forward(&mut s), [row(1), row(2), row(3)]);
        assert!(s.next_row().unwrap_err().is_no_such_element());
        assert_eq!(s.index(), 3);

        assert_eq!(s.previous_row().unwrap(), row(3));
        assert_eq!(s.previous_row().unwrap(), row(2));
        assert_eq!(s.previous_row().unwrap(), row(1));
        assert!(s.previous_row().unwrap_err().is_no_such_element());
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn test_empty_sequence_traversal() {
        let mut s = PartitionedRecordSequence::new(BindingNames::new(["x"]));
        assert!(s.next_row().unwrap_err().is_no_such_element());
        assert!(s.previous_row().unwrap_err().is_no_such_element());
        s.after_last();
        assert_eq!(s.index(), 0);
        assert_eq!(s.current_subset_id(), None);
        s.set_index(0).unwrap();
        assert!(s.set_index(1).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_cursor_provenance() {
        let mut s = seq(&[("a", &[1, 2]), ("b", &[3])]);
        assert_eq!(s.current_subset_id(), Some("a"));
        s.next_row().unwrap();
        s.next_row().unwrap();
        assert_eq!(s.current_subset_id(), Some("a"));
        assert_eq!(s.relative_index(), 2);
        s.next_row().unwrap();
        assert_eq!(s.current_subset_id(), Some("b"));
        assert_eq!(s.relative_index(), 1);
        assert_eq!(s.absolute_index(), 3);
    }

    #[test]
    fn test_set_index_boundary_resolves_to_earlier_subset() {
        let mut s = seq(&[("a", &[1, 2]), ("b", &[3, 4])]);
        s.set_index(2).unwrap();
        assert_eq!(s.current_subset_id(), Some("a"));
        assert_eq!(s.relative_index(), 2);
        assert_eq!(s.next_row().unwrap(), row(3));

        s.set_index(2).unwrap();
        assert_eq!(s.previous_row().unwrap(), row(2));

        s.after_last();
        assert_eq!(s.index(), 4);
        assert_eq!(s.current_subset_id(), Some("b"));
        assert!(s.set_index(5).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_set_relative_index() {
        let mut s = seq(&[("a", &[1, 2]), ("b", &[3, 4])]);
        s.set_relative_index("b", 1).unwrap();
        assert_eq!(s.index(), 3);
        assert_eq!(s.next_row().unwrap(), row(4));
        assert!(s.set_relative_index("b", 3).unwrap_err().is_out_of_range());
        assert!(s.set_relative_index("z", 0).unwrap_err().is_unknown_subset());
    }

    #[test]
    fn test_insert_in_same_subset_shifts_cursor() {
        let mut s = seq(&[("a", &[1, 2]), ("b", &[3])]);
        s.next_row().unwrap();
        s.insert("a", 0, row(0)).unwrap();
        assert_eq!(s.relative_index(), 2);
        assert_eq!(s.next_row().unwrap(), row(2));

        // inside a later subset: the cursor stays put
        s.insert("b", 1, row(4)).unwrap();
        assert_eq!(s.current_subset_id(), Some("a"));
        assert_eq!(s.index(), 3);

        // at the start of the next subset: same gap, so it shifts
        s.insert("b", 0, row(9)).unwrap();
        assert_eq!(s.current_subset_id(), Some("b"));
        assert_eq!(s.index(), 4);
        assert_eq!(s.next_row().unwrap(), row(3));
        assert_eq!(s.to_vec(), [row(0), row(1), row(2), row(9), row(3), row(4)]);
    }

    #[test]
    fn test_insert_at_subset_boundary_keeps_next_row() {
        let mut s = seq(&[("a", &[1, 2]), ("b", &[10, 20])]);
        s.next_row().unwrap();
        s.next_row().unwrap();
        s.insert("b", 0, row(-1)).unwrap();
        assert_eq!(s.index(), 3);
        assert_eq!(s.next_row().unwrap(), row(10));

        let mut s = seq(&[("a", &[1, 2]), ("b", &[10, 20])]);
        s.set_index(2).unwrap();
        s.insert("b", 0, row(-1)).unwrap();
        assert_eq!(s.index(), 3);
        assert_eq!(s.next_row().unwrap(), row(10));
        s.previous_row().unwrap();
        assert_eq!(s.previous_row().unwrap(), row(-1));
    }

    #[test]
    fn test_insert_across_empty_subsets_keeps_next_row() {
        let mut s = seq(&[("a", &[1]), ("b", &[]), ("c", &[5])]);
        s.next_row().unwrap();
        s.insert("c", 0, row(4)).unwrap();
        assert_eq!(s.index(), 2);
        assert_eq!(s.next_row().unwrap(), row(5));

        // a non-empty subset in between is a different gap
        let mut s = seq(&[("a", &[1]), ("b", &[2]), ("c", &[5])]);
        s.next_row().unwrap();
        s.insert("c", 0, row(4)).unwrap();
        assert_eq!(s.index(), 1);
        assert_eq!(s.next_row().unwrap(), row(2));
    }

    #[test]
    fn test_repositioning_clears_memo() {
        let mut s = seq(&[("a", &[1, 2]), ("b", &[3])]);
        s.next_row().unwrap();
        s.before_first();
        assert!(s.remove_current().unwrap_err().is_invalid_state());

        s.next_row().unwrap();
        s.after_last();
        assert!(s.set_current(row(9)).unwrap_err().is_invalid_state());

        s.previous_row().unwrap();
        s.set_index(1).unwrap();
        assert!(s.remove_current().unwrap_err().is_invalid_state());

        s.next_row().unwrap();
        s.set_relative_index("b", 0).unwrap();
        assert!(s.remove_current().unwrap_err().is_invalid_state());
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn test_insert_into_fresh_first_subset_shifts_default_cursor() {
        let mut s = seq(&[("a", &[1])]);
        s.insert("a", 0, row(0)).unwrap();
        assert_eq!(s.index(), 1);
        assert_eq!(s.next_row().unwrap(), row(1));
    }

    #[test]
    fn test_insert_errors() {
        let mut s = seq(&[("a", &[1])]);
        assert!(s.insert("b", 0, row(0)).unwrap_err().is_unknown_subset());
        assert!(s.insert("a", 2, row(0)).unwrap_err().is_out_of_range());
        s.insert("a", 1, row(2)).unwrap();
        assert_eq!(s.subset_to_vec("a").unwrap(), [row(1), row(2)]);
    }

    #[test]
    fn test_remove_rehomes_cursor() {
        let mut s = seq(&[("a", &[1, 2, 3]), ("b", &[4])]);
        s.next_row().unwrap();
        s.next_row().unwrap();
        assert_eq!(s.remove(0).unwrap(), row(1));
        assert_eq!(s.relative_index(), 1);
        assert_eq!(s.next_row().unwrap(), row(3));

        // removal in another subset leaves the local position alone
        assert_eq!(s.remove_from_subset("b", 0).unwrap(), row(4));
        assert_eq!(s.relative_index(), 2);
        assert!(!s.has_next());

        assert!(s.remove_from_subset("b", 0).unwrap_err().is_out_of_range());
        assert!(s.remove_from_subset("z", 0).unwrap_err().is_unknown_subset());
    }

    #[test]
    fn test_set_in_subset() {
        let mut s = seq(&[("a", &[1]), ("b", &[2])]);
        assert_eq!(s.set_in_subset("b", 0, row(20)).unwrap(), row(2));
        assert_eq!(s.set(0, row(10)).unwrap(), row(1));
        assert_eq!(s.to_vec(), [row(10), row(20)]);
        assert!(s.set_in_subset("b", 1, row(0)).unwrap_err().is_out_of_range());
        assert!(s.set(2, row(0)).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_cursor_relative_modification() {
        let mut s = seq(&[("a", &[1]), ("b", &[2, 3])]);
        assert!(s.remove_current().unwrap_err().is_invalid_state());
        s.next_row().unwrap();
        s.next_row().unwrap();
        assert_eq!(s.set_current(row(20)).unwrap(), row(2));
        assert_eq!(s.remove_current().unwrap(), row(20));
        assert!(s.set_current(row(0)).unwrap_err().is_invalid_state());
        assert_eq!(s.next_row().unwrap(), row(3));
        assert_eq!(s.to_vec(), [row(1), row(3)]);

        s.before_first();
        s.next_row().unwrap();
        s.append("a", row(5));
        assert!(s.remove_current().unwrap_err().is_invalid_state());
    }

    #[test]
    fn test_remove_subset() {
        let mut s = seq(&[("a", &[1]), ("b", &[2, 3]), ("c", &[4])]);
        s.set_relative_index("c", 1).unwrap();
        assert_eq!(s.remove_subset("b"), Some(vec![row(2), row(3)]));
        assert_eq!(s.current_subset_id(), Some("c"));
        assert_eq!(s.index(), 2);
        assert_eq!(s.remove_subset("b"), None);

        s.set_relative_index("a", 1).unwrap();
        assert_eq!(s.remove_subset("a"), Some(vec![row(1)]));
        assert_eq!(s.index(), 0);
        assert_eq!(s.current_subset_id(), Some("c"));
        assert_eq!(s.next_row().unwrap(), row(4));

        assert_eq!(s.remove_subset("c"), Some(vec![row(4)]));
        assert_eq!(s.subset_count(), 0);
        assert!(s.next_row().is_err());
    }

    #[test]
    fn test_subset_accessors() {
        let s = seq(&[("a", &[1, 2]), ("b", &[])]);
        assert!(s.has_subset("b"));
        assert!(!s.has_subset("c"));
        assert_eq!(s.subset_ids().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(s.subset_len("a").unwrap(), 2);
        assert_eq!(s.subset_len("b").unwrap(), 0);
        assert!(s.subset_len("c").unwrap_err().is_unknown_subset());
        assert!(s.subset_to_vec("c").is_err());

        let a = s.subset("a").unwrap();
        assert_eq!(a.rows(), [row(1), row(2)]);
        assert_eq!(a.binding_names(), s.binding_names());

        let provenance = s.iter().map(|(id, _)| id).collect::<Vec<_>>();
        assert_eq!(provenance, ["a", "a"]);
    }

    #[test]
    fn test_quotas_and_reduced() {
        let s = seq(&[("a", &[1, 2, 3]), ("b", &[10, 20])]);
        let quotas = s.quotas(3);
        assert_eq!(quotas, vec![(Arc::from("a"), 2), (Arc::from("b"), 1)]);
        assert_eq!(s.reduced(3).to_vec(), [row(1), row(2), row(10)]);
        assert_eq!(s.reduced(100).to_vec(), s.to_vec());
        assert!(s.reduced(0).is_empty());
    }

    #[test]
    fn test_append_all_from_creates_subset_and_closes() {
        let mut s = PartitionedRecordSequence::new(BindingNames::new(["x"]));
        let mut source = TrackedSource::new(vec![]);
        assert_eq!(s.append_all_from("empty", &mut source), Ok(0));
        assert!(s.has_subset("empty"));
        assert_eq!(source.closes, 1);

        let mut source = TrackedSource::new(vec![Ok(row(1)), Err("lost".into())]);
        assert_eq!(
            s.append_all_from("partial", &mut source),
            Err("lost".to_string())
        );
        assert_eq!(s.subset_to_vec("partial").unwrap(), [row(1)]);
        assert_eq!(source.closes, 1);
    }

    #[test]
    fn test_clear_and_close() {
        let mut s = seq(&[("a", &[1, 2])]);
        s.next_row().unwrap();
        s.close();
        s.close();
        assert_eq!(s.index(), 0);
        assert_eq!(s.len(), 2);
        s.clear();
        s.clear();
        assert_eq!(s.len(), 0);
        assert_eq!(s.subset_count(), 0);
        assert!(s.binding_names().is_empty());
    }
}
