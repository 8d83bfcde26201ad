use std::fmt;
use std::sync::Arc;

use crate::{BindingNames, Value};

/// One solution of a tuple query: an immutable ordered tuple of values.
///
/// The width of a row and the name of each position are defined by the
/// [`BindingNames`] of the enclosing sequence, not by the row itself. Rows are
/// value-like and cheap to clone; sequences replace rows rather than mutate
/// them in place.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Row(Arc<[Value]>);

impl Row {
    pub fn new(values: Vec<Value>) -> Row {
        Row(values.into())
    }

    pub fn empty() -> Row {
        Row(Vec::new().into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Value> {
        self.0.get(position)
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    /// Returns the value bound to `name`, using `names` as the projection.
    ///
    /// Returns `None` if the name is unknown or the row is shorter than the
    /// projection.
    pub fn binding(&self, names: &BindingNames, name: &str) -> Option<&Value> {
        names.position(name).and_then(|pos| self.get(pos))
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::new(values)
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Row(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Row").field(&&*self.0).finish()
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}
