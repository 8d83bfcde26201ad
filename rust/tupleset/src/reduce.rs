//! Assembly of size-capped, unpartitioned copies of a result.

use crate::{BindingNames, OrderedRecordSequence, Row};

/// Collects the head of each subset, up to its quota, into a new
/// [`OrderedRecordSequence`].
///
/// Subsets must be pushed in the order they should appear in the output.
/// The built sequence shares no mutable state with its sources.
#[derive(Debug, Clone)]
pub struct ReducedSequenceBuilder {
    binding_names: BindingNames,
    rows: Vec<Row>,
}

impl ReducedSequenceBuilder {
    pub fn new(binding_names: BindingNames) -> ReducedSequenceBuilder {
        ReducedSequenceBuilder::with_capacity(binding_names, 0)
    }

    pub fn with_capacity(binding_names: BindingNames, capacity: usize) -> ReducedSequenceBuilder {
        ReducedSequenceBuilder {
            binding_names,
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Copies the first `min(quota, rows.len())` rows of a subset.
    pub fn push_subset(&mut self, rows: &[Row], quota: usize) -> &mut Self {
        let take = quota.min(rows.len());
        self.rows.extend_from_slice(&rows[..take]);
        self
    }

    /// Returns the number of rows collected so far.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn build(self) -> OrderedRecordSequence {
        OrderedRecordSequence::from_rows(self.binding_names, self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TupleSequence, source::tests::int_row as row};

    #[test]
    fn test_push_subset_takes_head() {
        let names = BindingNames::new(["x"]);
        let a = [row(1), row(2), row(3)];
        let b = [row(10)];
        let mut builder = ReducedSequenceBuilder::new(names.clone());
        builder.push_subset(&a, 2).push_subset(&b, 5).push_subset(&[], 3);
        assert_eq!(builder.len(), 3);

        let reduced = builder.build();
        assert_eq!(reduced.to_vec(), [row(1), row(2), row(10)]);
        assert_eq!(reduced.binding_names(), &names);
        assert_eq!(reduced.index(), 0);
    }

    #[test]
    fn test_zero_quota() {
        let mut builder = ReducedSequenceBuilder::new(BindingNames::new(["x"]));
        builder.push_subset(&[row(1)], 0);
        assert!(builder.is_empty());
        assert!(builder.build().is_empty());
    }
}
