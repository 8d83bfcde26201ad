use std::sync::Arc;

use ahash::AHashMap;

/// A vector-like data structure that keeps its elements in insertion order and
/// allows accessing them by a string key.
///
/// `KeyedVector` stores values in a `Vec` and maintains an index that maps each
/// key to the position of its value in the `Vec`. Keys are derived from the
/// values themselves (see [`KeyFromValue`]), so the two can never disagree.
///
/// Unlike a general-purpose map, the position of an element is meaningful:
/// elements are appended at the end, and [`KeyedVector::remove`] shifts the
/// following elements down to keep the relative order intact.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use tupleset_keyed_vector::KeyedVector;
/// use tupleset_keyed_vector::KeyFromValue;
///
/// #[derive(Debug)]
/// struct Entry(Arc<str>, u64);
///
/// impl KeyFromValue for Entry {
///     fn key(&self) -> &Arc<str> {
///         &self.0
///     }
/// }
///
/// let mut v = KeyedVector::<Entry>::new();
/// v.push(Entry("a".into(), 100));
/// v.push(Entry("c".into(), 300));
///
/// assert_eq!(v.get("a").unwrap().1, 100);
/// assert_eq!(v.get("c").unwrap().1, 300);
/// assert_eq!(v.position_of("c"), Some(1));
/// assert!(v.get("b").is_none());
/// ```
#[derive(Clone)]
pub struct KeyedVector<V> {
    /// The underlying vector storing the values, in insertion order.
    values: Vec<V>,
    /// An index mapping keys to positions in the `values` vector.
    index: AHashMap<Arc<str>, usize>,
}

impl<V> KeyedVector<V> {
    /// Creates a new empty `KeyedVector`.
    pub fn new() -> KeyedVector<V> {
        KeyedVector {
            values: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// Returns the number of elements in the `KeyedVector`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the `KeyedVector` contains no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a slice of the values in insertion order.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Checks if the `KeyedVector` contains a value associated with the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the position of the value associated with the given key,
    /// or `None` if the key is not present.
    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns a reference to the value associated with the given key,
    /// or `None` if the key is not present.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.position_of(key).map(|i| &self.values[i])
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.values.clear();
        self.index.clear();
    }
}

impl<V: KeyFromValue> KeyedVector<V> {
    /// Appends a new value at the end of the `KeyedVector`, using the value's key.
    ///
    /// # Panics
    ///
    /// Panics if the key already exists in the `KeyedVector`.
    pub fn push(&mut self, value: V) {
        let key = value.key().clone();
        assert!(
            !self.index.contains_key(&key),
            "duplicate key '{key}' in KeyedVector"
        );
        self.index.insert(key, self.values.len());
        self.values.push(value);
    }

    /// Returns a mutable reference to the value associated with `key`, appending
    /// the value produced by `make` first if the key is not present.
    ///
    /// # Panics
    ///
    /// Panics if `make` returns a value whose key differs from `key`.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        let pos = match self.position_of(key) {
            Some(pos) => pos,
            None => {
                let value = make();
                assert_eq!(&**value.key(), key);
                self.push(value);
                self.values.len() - 1
            }
        };
        &mut self.values[pos]
    }

    /// Removes the value associated with the given key and returns it together
    /// with the position it occupied, or `None` if the key is not present.
    ///
    /// The relative order of the remaining elements is preserved: every element
    /// after the removed one moves down by one position.
    pub fn remove(&mut self, key: &str) -> Option<(usize, V)> {
        let pos = self.index.remove(key)?;
        let v = self.values.remove(pos);
        for moved in &self.values[pos..] {
            let moved_key: &str = moved.key();
            if let Some(i) = self.index.get_mut(moved_key) {
                *i -= 1;
            }
        }
        Some((pos, v))
    }

    /// Returns an iterator over the key-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &V)> {
        self.values.iter().map(|v| (v.key(), v))
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Arc<str>> {
        self.values.iter().map(|v| v.key())
    }

    /// Verifies the internal consistency of the `KeyedVector`.
    ///
    /// # Panics
    ///
    /// Panics if the internal state of the `KeyedVector` is inconsistent.
    pub fn verify(&self) {
        assert_eq!(self.index.len(), self.len());
        for (pos, v) in self.values.iter().enumerate() {
            assert_eq!(self.position_of(v.key()), Some(pos));
        }
    }
}

impl<V> Default for KeyedVector<V> {
    fn default() -> Self {
        KeyedVector::new()
    }
}

impl<V> std::ops::Index<usize> for KeyedVector<V> {
    type Output = V;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl<V> std::ops::IndexMut<usize> for KeyedVector<V> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.values[index]
    }
}

impl<V> std::fmt::Debug for KeyedVector<V>
where
    V: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedVector")
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

/// A trait for types that can provide a key.
pub trait KeyFromValue {
    /// Returns the key associated with the value.
    fn key(&self) -> &Arc<str>;
}
