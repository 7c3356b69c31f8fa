use std::fmt::{self, Debug};

/// An immutable key-value pair, the unit of map iteration and of entry
/// predicates.
///
/// Equality and hashing are structural: two entries are equal exactly when
/// their keys are equal and their values are equal.
///
/// # Examples
/// ```
/// use richmap::Entry;
///
/// let entry = Entry::new("a", 1);
/// assert_eq!(entry.key(), &"a");
/// assert_eq!(entry.value(), &1);
/// assert_eq!(entry, Entry::from(("a", 1)));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates an entry from a key and a value.
    pub fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }

    /// Returns a reference to the key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Returns a reference to the value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Borrows the entry as a pair of references.
    pub fn as_pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }

    /// Consumes the entry, returning the owned key and value.
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Entry { key, value }
    }
}

impl<K, V> From<Entry<K, V>> for (K, V) {
    fn from(entry: Entry<K, V>) -> Self {
        entry.into_pair()
    }
}

impl<K: Debug, V: Debug> Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Entry")
            .field(&self.key)
            .field(&self.value)
            .finish()
    }
}
