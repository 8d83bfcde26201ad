//! Mutable, cursor-navigable sequences of query result rows.
//!
//! A query over a graph store yields a list of solutions: ordered tuples of
//! values projected onto a fixed list of binding names. This crate holds such
//! results in memory and lets a consumer page through them with a single
//! bidirectional cursor while a producer keeps modifying them.
//!
//! - [`OrderedRecordSequence`] is a single mutable list of rows.
//! - [`PartitionedRecordSequence`] is an ordered collection of named subsets
//!   (one per contributing source) presented as one virtual sequence.
//! - [`quota::fair_share_quotas`] and [`reduce::ReducedSequenceBuilder`]
//!   produce a bounded copy of a partitioned result in which every subset is
//!   fairly represented.
//!
//! Both sequence types implement [`TupleSequence`]. Rows can also be streamed
//! in from any [`RowSource`], which is always closed after use.
//!
//! ```
//! use tupleset::{BindingNames, PartitionedRecordSequence, Row, TupleSequence, Value};
//!
//! let row = |v: i64| Row::new(vec![Value::from(v)]);
//! let mut seq = PartitionedRecordSequence::new(BindingNames::new(["x"]));
//! seq.append_all("a", [row(1), row(2), row(3)]);
//! seq.append_all("b", [row(10), row(20)]);
//!
//! assert_eq!(seq.len(), 5);
//! assert_eq!(seq.get(3).unwrap(), &row(10));
//! assert_eq!(seq.reduced(3).to_vec(), [row(1), row(2), row(10)]);
//! ```

mod binding_names;
mod cursor;
pub mod merge;
mod ordered;
mod partitioned;
pub mod quota;
pub mod reduce;
mod row;
mod sequence;
#[cfg(feature = "serde")]
pub mod snapshot;
pub mod source;
mod value;

pub use binding_names::BindingNames;
pub use ordered::OrderedRecordSequence;
pub use partitioned::PartitionedRecordSequence;
pub use row::Row;
pub use sequence::TupleSequence;
pub use source::{IterSource, RowSource, iter_source};
pub use value::{Literal, Value};

pub use tupleset_common::{Result, error::Direction, error::Error, error::ErrorKind};
