//! Accumulation of results produced by several sources.
//!
//! A caller that queries several sources one after another keeps an
//! accumulator, initially `None`, and feeds each source's rows into it. The
//! first source creates the result; later ones extend it. Every source is
//! closed, whether or not its rows could be read.

use crate::{BindingNames, OrderedRecordSequence, PartitionedRecordSequence, TupleSequence, source::RowSource};

/// Drains `source` into the subset `subset_id` of `accumulator`, creating the
/// partitioned result (with `binding_names`) if it is `None`.
///
/// When the accumulator already exists its binding names are kept. Returns the
/// number of rows appended.
pub fn merge_into_subset<S: RowSource>(
    accumulator: &mut Option<PartitionedRecordSequence>,
    binding_names: &BindingNames,
    subset_id: &str,
    source: S,
) -> Result<usize, S::Error> {
    let target = accumulator.get_or_insert_with(|| PartitionedRecordSequence::new(binding_names.clone()));
    if target.binding_names() != binding_names {
        log::debug!(
            "merging subset '{subset_id}' with binding names {binding_names:?} into a result projected as {:?}",
            target.binding_names()
        );
    }
    target.append_all_from(subset_id, source)
}

/// Drains `source` into the end of `accumulator`, creating the ordered result
/// (with `binding_names`) if it is `None`.
pub fn merge_ordered<S: RowSource>(
    accumulator: &mut Option<OrderedRecordSequence>,
    binding_names: &BindingNames,
    source: S,
) -> Result<usize, S::Error> {
    let target = accumulator.get_or_insert_with(|| OrderedRecordSequence::new(binding_names.clone()));
    if target.binding_names() != binding_names {
        log::debug!(
            "merging rows with binding names {binding_names:?} into a result projected as {:?}",
            target.binding_names()
        );
    }
    target.append_all_from(source)
}
