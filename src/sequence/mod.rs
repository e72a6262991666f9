//! Sequence capability
//!
//! Everything the operators consume goes through the [`Enumerable`] trait: a
//! way to get a fresh [`Enumerator`] cursor and a way to see every value as one
//! ordered slice. [`Sequence`] is the owned implementation and the type every
//! operator returns.
//!
//! A `Sequence` keeps its elements in an immutable shared buffer. Cursors
//! handed out by [`Enumerable::enumerator`] share that buffer, so they always
//! see the snapshot taken when the sequence was built, whatever happens to the
//! collection it was built from.
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use enumerable::{Enumerable, Sequence};
//!
//! let prices = BTreeMap::from([("apple", 3), ("pear", 5)]);
//!
//! let names = Sequence::from_keys(&prices);
//! assert_eq!(names.values(), &["apple", "pear"]);
//!
//! let mut cursor = Sequence::from_values(&prices).enumerator();
//! assert!(cursor.advance());
//! assert_eq!(cursor.current(), Some(&3));
//! ```

mod enumerator;

pub use enumerator::Enumerator;

use std::fmt;
use std::sync::Arc;

/// Read-only view producing cursors and a materialized snapshot of elements
pub trait Enumerable<V> {
    /// A fresh cursor positioned before the first element
    fn enumerator(&self) -> Enumerator<V>;

    /// Every element, in order
    fn values(&self) -> &[V];
}

/// Immutable ordered snapshot of values
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Sequence<V> {
    elements: Arc<[V]>,
}

impl<V> Sequence<V> {
    pub fn new(elements: Vec<V>) -> Self {
        Self {
            elements: Arc::from(elements),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.elements.iter()
    }

    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.elements.contains(value)
    }

    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.elements.to_vec()
    }

    /// Consume the sequence into an owned vector.
    ///
    /// The buffer may still be shared with clones and cursors, so elements are
    /// cloned out of it; other handles keep their snapshot.
    pub fn into_vec(self) -> Vec<V>
    where
        V: Clone,
    {
        Vec::from(&*self.elements)
    }

    /// Build a sequence from a mapping's keys, in the mapping's iteration order
    pub fn from_keys<'a, T, M>(mapping: M) -> Self
    where
        V: Clone + 'a,
        T: 'a,
        M: IntoIterator<Item = (&'a V, &'a T)>,
    {
        mapping.into_iter().map(|(key, _)| key.clone()).collect()
    }

    /// Build a sequence from a mapping's values, in the mapping's iteration order
    pub fn from_values<'a, K, M>(mapping: M) -> Self
    where
        V: Clone + 'a,
        K: 'a,
        M: IntoIterator<Item = (&'a K, &'a V)>,
    {
        mapping.into_iter().map(|(_, value)| value.clone()).collect()
    }
}

impl<K: Clone, T: Clone> Sequence<(K, T)> {
    /// Build a sequence of `(key, value)` pairs from a mapping
    pub fn from_pairs<'a, M>(mapping: M) -> Self
    where
        K: 'a,
        T: 'a,
        M: IntoIterator<Item = (&'a K, &'a T)>,
    {
        mapping
            .into_iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<V> Enumerable<V> for Sequence<V> {
    fn enumerator(&self) -> Enumerator<V> {
        Enumerator::new(Arc::clone(&self.elements))
    }

    fn values(&self) -> &[V] {
        &self.elements
    }
}

// Plain collections copy their elements into a fresh snapshot per cursor.
impl<V: Clone> Enumerable<V> for [V] {
    fn enumerator(&self) -> Enumerator<V> {
        Enumerator::new(Arc::from(self))
    }

    fn values(&self) -> &[V] {
        self
    }
}

impl<V: Clone> Enumerable<V> for Vec<V> {
    fn enumerator(&self) -> Enumerator<V> {
        self.as_slice().enumerator()
    }

    fn values(&self) -> &[V] {
        self
    }
}

impl<V> Clone for Sequence<V> {
    fn clone(&self) -> Self {
        Self {
            elements: Arc::clone(&self.elements),
        }
    }
}

impl<V> Default for Sequence<V> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<V> From<Vec<V>> for Sequence<V> {
    fn from(elements: Vec<V>) -> Self {
        Self::new(elements)
    }
}

impl<V: Clone> From<&[V]> for Sequence<V> {
    fn from(elements: &[V]) -> Self {
        Self {
            elements: Arc::from(elements),
        }
    }
}

impl<V> FromIterator<V> for Sequence<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, V> IntoIterator for &'a Sequence<V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Display> fmt::Display for Sequence<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, value) in self.elements.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}
