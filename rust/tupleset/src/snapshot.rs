//! Serializable documents describing the contents of a result sequence.
//!
//! Snapshots carry rows and binding names only; cursor state is not part of
//! the document.

use serde::{Deserialize, Serialize};
use tupleset_common::{Result, error::Error, verify_arg};

use crate::{BindingNames, OrderedRecordSequence, PartitionedRecordSequence, Row, TupleSequence};

/// A partitioned result as a plain document:
///
/// ```json
/// {"binding_names": ["x"], "subsets": [{"id": "a", "rows": [[{"integer": 1}]]}]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionedSnapshot {
    pub binding_names: BindingNames,
    #[serde(default)]
    pub subsets: Vec<SubsetSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsetSnapshot {
    pub id: String,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl PartitionedSnapshot {
    pub fn from_sequence(seq: &PartitionedRecordSequence) -> PartitionedSnapshot {
        let subsets = seq
            .subset_ids()
            .map(|id| SubsetSnapshot {
                id: id.to_string(),
                rows: seq.subset_rows(id).map(<[Row]>::to_vec).unwrap_or_default(),
            })
            .collect();
        PartitionedSnapshot {
            binding_names: seq.binding_names().clone(),
            subsets,
        }
    }

    /// Builds the sequence described by this document.
    ///
    /// Fails with `InvalidArgument` if a subset id appears twice or a row is
    /// wider than the binding names.
    pub fn into_sequence(self) -> Result<PartitionedRecordSequence> {
        let width = self.binding_names.len();
        let mut seq = PartitionedRecordSequence::new(self.binding_names);
        for subset in self.subsets {
            if seq.has_subset(&subset.id) {
                return Err(Error::invalid_arg(
                    "subsets",
                    format!("duplicate subset id '{}'", subset.id),
                ));
            }
            for row in &subset.rows {
                verify_arg!(row, row.len() <= width);
            }
            seq.append_all(&subset.id, subset.rows);
        }
        Ok(seq)
    }
}

/// An unpartitioned result as a plain document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceSnapshot {
    pub binding_names: BindingNames,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl SequenceSnapshot {
    pub fn from_sequence(seq: &OrderedRecordSequence) -> SequenceSnapshot {
        SequenceSnapshot {
            binding_names: seq.binding_names().clone(),
            rows: seq.rows().to_vec(),
        }
    }

    pub fn into_sequence(self) -> OrderedRecordSequence {
        OrderedRecordSequence::from_rows(self.binding_names, self.rows)
    }
}
