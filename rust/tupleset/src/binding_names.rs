use std::fmt;
use std::sync::Arc;

/// The ordered set of binding names that defines the projection order of
/// every [`Row`](crate::Row) in a sequence.
///
/// Names are unique: duplicates supplied at construction collapse onto their
/// first occurrence. The list is immutable and shared, so a sequence can hand
/// out its names (and reduced copies can reuse them) without copying and
/// without the risk of a caller changing them behind the sequence's back.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<String>", into = "Vec<String>")
)]
pub struct BindingNames(Arc<[Arc<str>]>);

impl BindingNames {
    /// Creates the binding names from `names`, in order of projection.
    pub fn new<I, S>(names: I) -> BindingNames
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let mut unique: Vec<Arc<str>> = Vec::new();
        for name in names {
            let name = name.into();
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        BindingNames(unique.into())
    }

    pub fn empty() -> BindingNames {
        BindingNames::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Arc<str>] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|name| &**name)
    }

    /// Returns the projection position of `name`, or `None` if the name is
    /// not part of this list.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| &**n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

impl<S: Into<Arc<str>>> FromIterator<S> for BindingNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        BindingNames::new(iter)
    }
}

impl From<Vec<String>> for BindingNames {
    fn from(names: Vec<String>) -> Self {
        BindingNames::new(names)
    }
}

impl From<BindingNames> for Vec<String> {
    fn from(names: BindingNames) -> Self {
        names.to_vec()
    }
}

impl fmt::Debug for BindingNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
