use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;
use std::ops::Index;

use crate::entry::Entry;
use crate::error::MapError;
use crate::hashset::RichSet;
use crate::list::RichList;
use crate::narrow::Narrow;
use crate::sequence::Sequence;

/// A hash map with default-insert retrieval, snapshot views and
/// type-narrowing filters. Under the hood a [`std::collections::HashMap`]
/// is used; the backing store is exclusively owned and never exposed.
///
/// Beyond the conventional map surface, a `RichMap` offers:
///
/// - [`get_or_insert`]: retrieval that is guaranteed to yield a value,
///   inserting the supplied default when the key is absent. The returned
///   reference points into the map, so writes through it are visible in the
///   map. No other operation in this crate aliases the backing store.
/// - Snapshot views ([`to_key_set`], [`to_value_list`], [`to_entry_set`])
///   and lazy restartable sequences ([`entry_sequence`], [`key_sequence`],
///   [`value_sequence`]), all independent copies that never reflect later
///   mutation of the map.
/// - Filters ([`filter_by_entry`], [`filter_by_key`], [`filter_by_value`]
///   and their fallible `try_` forms) and type-narrowing filters
///   ([`filter_value_type`], [`filter_key_type`], [`filter_pair_type`])
///   that build a new, independently-mutable map and never touch the
///   receiver.
///
/// Keys are unique; inserting an existing key overwrites its value
/// (last-write-wins). Iteration order is arbitrary but consistent for an
/// unmutated instance.
///
/// # Examples
/// ```
/// use richmap::RichMap;
///
/// let mut ages: RichMap<String, u32> = RichMap::new();
/// ages.insert("ada".to_owned(), 36);
/// ages.insert("grace".to_owned(), 85);
///
/// // Default-insert retrieval never comes back empty-handed.
/// assert_eq!(*ages.get_or_insert("alan".to_owned(), 41), 41);
/// assert_eq!(ages.get("alan"), Some(&41));
///
/// // Filters build a new map; the source is untouched.
/// let elders = ages.filter_by_value(|age| *age > 50);
/// assert_eq!(elders.len(), 1);
/// assert_eq!(ages.len(), 3);
/// ```
///
/// [`get_or_insert`]: RichMap::get_or_insert
/// [`to_key_set`]: RichMap::to_key_set
/// [`to_value_list`]: RichMap::to_value_list
/// [`to_entry_set`]: RichMap::to_entry_set
/// [`entry_sequence`]: RichMap::entry_sequence
/// [`key_sequence`]: RichMap::key_sequence
/// [`value_sequence`]: RichMap::value_sequence
/// [`filter_by_entry`]: RichMap::filter_by_entry
/// [`filter_by_key`]: RichMap::filter_by_key
/// [`filter_by_value`]: RichMap::filter_by_value
/// [`filter_value_type`]: RichMap::filter_value_type
/// [`filter_key_type`]: RichMap::filter_key_type
/// [`filter_pair_type`]: RichMap::filter_pair_type
#[derive(Clone)]
pub struct RichMap<K, V, S = RandomState> {
    inner: HashMap<K, V, S>,
}

impl<K, V> RichMap<K, V, RandomState> {
    /// Creates an empty map.
    ///
    /// # Examples
    /// ```
    /// use richmap::RichMap;
    ///
    /// let map: RichMap<&str, u32> = RichMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn new() -> Self {
        RichMap {
            inner: HashMap::new(),
        }
    }

    /// Creates an empty map with at least the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        RichMap {
            inner: HashMap::with_capacity(capacity),
        }
    }
}

impl<K, V, S> RichMap<K, V, S> {
    /// Creates an empty map which will use the given hash builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        RichMap {
            inner: HashMap::with_hasher(hash_builder),
        }
    }

    /// Creates an empty map with at least the specified capacity, using the
    /// given hash builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        RichMap {
            inner: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of entries the map can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Returns a reference to the map's hash builder.
    pub fn hasher(&self) -> &S {
        self.inner.hasher()
    }

    /// Clears the map, removing all entries. Keeps the allocated memory for
    /// reuse.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// An iterator visiting all key-value pairs in arbitrary order.
    ///
    /// # Examples
    /// ```
    /// use richmap::RichMap;
    ///
    /// let map: RichMap<&str, u32> = [("a", 1), ("b", 2)].into_iter().collect();
    /// let total: u32 = map.iter().map(|(_, v)| v).sum();
    /// assert_eq!(total, 3);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(self.inner.iter())
    }

    /// An iterator visiting all key-value pairs in arbitrary order, with
    /// mutable references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut(self.inner.iter_mut())
    }

    /// An iterator visiting all keys in arbitrary order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.inner.keys())
    }

    /// An iterator visiting all values in arbitrary order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.inner.values())
    }

    /// An iterator visiting all values mutably in arbitrary order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.inner.values_mut())
    }

    /// Clears the map, returning all key-value pairs as an iterator. Keeps
    /// the allocated memory for reuse.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain(self.inner.drain())
    }
}

impl<K, V, S> RichMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned. If it
    /// did, the value is overwritten and the old value is returned.
    ///
    /// # Examples
    /// ```
    /// use richmap::RichMap;
    ///
    /// let mut map: RichMap<&str, u32> = RichMap::new();
    /// assert_eq!(map.insert("a", 1), None);
    /// assert_eq!(map.insert("a", 2), Some(1));
    /// assert_eq!(map.get("a"), Some(&2));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key. No side
    /// effect.
    ///
    /// # Examples
    /// ```
    /// use richmap::RichMap;
    ///
    /// let mut map: RichMap<String, u32> = RichMap::new();
    /// map.insert("a".to_owned(), 1);
    /// assert_eq!(map.get("a"), Some(&1));
    /// assert_eq!(map.get("b"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get_mut(key)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get_key_value(key)
    }

    /// Returns true if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains_key(key)
    }

    /// Gets the value of the given key, inserting the supplied default
    /// first if the key is absent.
    ///
    /// If the key is present its current value is returned and the map is
    /// not mutated; the default is discarded. If the key is absent, the
    /// pair `(key, default)` is inserted and the freshly stored default is
    /// returned. Either way the call yields a value, never an absent
    /// result, and the map is guaranteed to contain the key afterwards.
    ///
    /// The returned reference points at the value stored in the map:
    /// writes through it are reflected in the map. The snapshot views make
    /// the opposite promise and never alias map storage.
    ///
    /// # Examples
    /// ```
    /// use richmap::RichMap;
    ///
    /// let mut map: RichMap<&str, u32> = [("a", 1)].into_iter().collect();
    ///
    /// // Present key: existing value, no mutation.
    /// assert_eq!(*map.get_or_insert("a", 9), 1);
    /// assert_eq!(map.len(), 1);
    ///
    /// // Absent key: default inserted and handed back.
    /// assert_eq!(*map.get_or_insert("z", 9), 9);
    /// assert_eq!(map.get("z"), Some(&9));
    ///
    /// // The reference writes through to the map.
    /// *map.get_or_insert("z", 0) += 1;
    /// assert_eq!(map.get("z"), Some(&10));
    /// ```
    pub fn get_or_insert(&mut self, key: K, default: V) -> &mut V {
        self.inner.entry(key).or_insert(default)
    }

    /// Like [`get_or_insert`], but the default is computed only when the
    /// key is absent.
    ///
    /// [`get_or_insert`]: RichMap::get_or_insert
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.inner.entry(key).or_insert_with(default)
    }

    /// Removes a key from the map, returning the value at the key if the
    /// key was previously in the map.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove(key)
    }

    /// Removes a key from the map, returning the stored key and value if
    /// the key was previously in the map.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove_entry(key)
    }

    /// Retains only the entries specified by the predicate, in place.
    ///
    /// # Examples
    /// ```
    /// use richmap::RichMap;
    ///
    /// let mut map: RichMap<u32, u32> = (0..8).map(|n| (n, n)).collect();
    /// map.retain(|k, _| k % 2 == 0);
    /// assert_eq!(map.len(), 4);
    /// ```
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.inner.retain(f);
    }

    /// Reserves capacity for at least `additional` more entries.
    ///
    /// # Panics
    /// Panics if the new allocation size overflows `usize`.
    pub fn reserve(&mut self, additional: usize) {
        self.inner.reserve(additional);
    }

    /// Shrinks the capacity of the backing store as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.inner.shrink_to_fit();
    }
}

impl<K, V, S> RichMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    /// Builds a map from a source of pairs in which a key or value slot may
    /// be absent, failing fast on the first absent slot.
    ///
    /// On success every pair has been admitted, last-write-wins on
    /// duplicate keys. On failure the error names the offending position
    /// and no map, not even a partial one, is observable.
    ///
    /// # Examples
    /// ```
    /// use richmap::{MapError, RichMap};
    ///
    /// let map: RichMap<&str, u32> =
    ///     RichMap::try_from_pairs([(Some("a"), Some(1)), (Some("b"), Some(2))]).unwrap();
    /// assert_eq!(map.len(), 2);
    ///
    /// let err = RichMap::<&str, u32>::try_from_pairs([
    ///     (Some("a"), Some(1)),
    ///     (Some("b"), None),
    /// ])
    /// .unwrap_err();
    /// assert_eq!(err, MapError::NilValue(1));
    /// ```
    pub fn try_from_pairs<I>(pairs: I) -> Result<Self, MapError>
    where
        I: IntoIterator<Item = (Option<K>, Option<V>)>,
    {
        let mut map = RichMap::with_hasher(S::default());
        for (index, (key, value)) in pairs.into_iter().enumerate() {
            let key = key.ok_or(MapError::NilKey(index))?;
            let value = value.ok_or(MapError::NilValue(index))?;
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<K, V, S> RichMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Returns a [`RichSet`] holding a snapshot of every key currently in
    /// the map.
    ///
    /// The view is an independent copy: mutating it never affects this map,
    /// and later mutation of this map is not reflected in the view.
    ///
    /// # Examples
    /// ```
    /// use richmap::RichMap;
    ///
    /// let mut map: RichMap<&str, u32> = [("a", 1)].into_iter().collect();
    /// let keys = map.to_key_set();
    /// map.insert("b", 2);
    /// assert_eq!(keys.len(), 1);
    /// ```
    pub fn to_key_set(&self) -> RichSet<K>
    where
        K: Clone,
    {
        self.inner.keys().cloned().collect()
    }

    /// Returns a [`RichList`] holding a snapshot of every value currently
    /// in the map. Duplicate values are retained. Snapshot semantics as for
    /// [`to_key_set`].
    ///
    /// [`to_key_set`]: RichMap::to_key_set
    pub fn to_value_list(&self) -> RichList<V>
    where
        V: Clone,
    {
        self.inner.values().cloned().collect()
    }

    /// Returns a [`RichSet`] holding a snapshot of every entry currently in
    /// the map. Snapshot semantics as for [`to_key_set`].
    ///
    /// [`to_key_set`]: RichMap::to_key_set
    pub fn to_entry_set(&self) -> RichSet<Entry<K, V>>
    where
        K: Clone,
        V: Clone + Eq + Hash,
    {
        self.inner
            .iter()
            .map(|(key, value)| Entry::new(key.clone(), value.clone()))
            .collect()
    }

    /// Produces a lazy, restartable [`Sequence`] of the map's entries,
    /// capturing a snapshot at the time of the call.
    ///
    /// The sequence is detached from the map: it never aliases map storage
    /// and later mutation of the map is not reflected in it. Clone an
    /// unconsumed sequence to restart it.
    ///
    /// # Examples
    /// ```
    /// use richmap::RichMap;
    ///
    /// let map: RichMap<&str, u32> = [("a", 1), ("b", 2)].into_iter().collect();
    /// let total: u32 = map.entry_sequence().map(|e| *e.value()).sum();
    /// assert_eq!(total, 3);
    ///
    /// let empty: RichMap<&str, u32> = RichMap::new();
    /// assert_eq!(empty.entry_sequence().next(), None);
    /// ```
    pub fn entry_sequence(&self) -> Sequence<Entry<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .iter()
            .map(|(key, value)| Entry::new(key.clone(), value.clone()))
            .collect()
    }

    /// Produces a lazy, restartable [`Sequence`] of the map's keys,
    /// capturing a snapshot at the time of the call. Snapshot semantics as
    /// for [`entry_sequence`].
    ///
    /// [`entry_sequence`]: RichMap::entry_sequence
    pub fn key_sequence(&self) -> Sequence<K>
    where
        K: Clone,
    {
        self.inner.keys().cloned().collect()
    }

    /// Produces a lazy, restartable [`Sequence`] of the map's values,
    /// capturing a snapshot at the time of the call. Snapshot semantics as
    /// for [`entry_sequence`].
    ///
    /// [`entry_sequence`]: RichMap::entry_sequence
    pub fn value_sequence(&self) -> Sequence<V>
    where
        V: Clone,
    {
        self.inner.values().cloned().collect()
    }
}

impl<K, V, S> RichMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Builds a new map retaining exactly the entries for which the
    /// predicate holds.
    ///
    /// The receiver is never mutated; the result owns a freshly allocated
    /// backing store, so the two maps can be mutated independently.
    ///
    /// # Examples
    /// ```
    /// use richmap::RichMap;
    ///
    /// let map: RichMap<&str, u32> =
    ///     [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    /// let odd = map.filter_by_entry(|e| e.value() % 2 == 1);
    /// assert_eq!(odd.len(), 2);
    /// assert_eq!(map.len(), 3);
    /// ```
    pub fn filter_by_entry<F>(&self, mut filter: F) -> Self
    where
        F: FnMut(&Entry<K, V>) -> bool,
    {
        let mut kept = RichMap::with_hasher(self.inner.hasher().clone());
        for (key, value) in &self.inner {
            let entry = Entry::new(key.clone(), value.clone());
            if filter(&entry) {
                let (key, value) = entry.into_pair();
                kept.insert(key, value);
            }
        }
        kept
    }

    /// Builds a new map retaining the entries whose key satisfies the
    /// predicate. Independence semantics as for [`filter_by_entry`].
    ///
    /// [`filter_by_entry`]: RichMap::filter_by_entry
    pub fn filter_by_key<F>(&self, mut filter: F) -> Self
    where
        F: FnMut(&K) -> bool,
    {
        let mut kept = RichMap::with_hasher(self.inner.hasher().clone());
        for (key, value) in &self.inner {
            if filter(key) {
                kept.insert(key.clone(), value.clone());
            }
        }
        kept
    }

    /// Builds a new map retaining the entries whose value satisfies the
    /// predicate. Independence semantics as for [`filter_by_entry`].
    ///
    /// # Examples
    /// ```
    /// use richmap::RichMap;
    ///
    /// let map: RichMap<&str, u32> =
    ///     [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    /// let big = map.filter_by_value(|v| *v > 1);
    /// assert_eq!(big.len(), 2);
    /// assert!(!big.contains_key("a"));
    /// ```
    ///
    /// [`filter_by_entry`]: RichMap::filter_by_entry
    pub fn filter_by_value<F>(&self, mut filter: F) -> Self
    where
        F: FnMut(&V) -> bool,
    {
        let mut kept = RichMap::with_hasher(self.inner.hasher().clone());
        for (key, value) in &self.inner {
            if filter(value) {
                kept.insert(key.clone(), value.clone());
            }
        }
        kept
    }

    /// Fallible form of [`filter_by_entry`]. The first `Err` from the
    /// predicate aborts the filter and is propagated unchanged; the
    /// partially-built result is discarded and the source map is left
    /// intact.
    ///
    /// # Examples
    /// ```
    /// use richmap::RichMap;
    ///
    /// let map: RichMap<&str, u32> = [("a", 1), ("b", 2)].into_iter().collect();
    /// let err: Result<_, &str> = map.try_filter_by_entry(|_| Err("boom"));
    /// assert_eq!(err.unwrap_err(), "boom");
    /// assert_eq!(map.len(), 2);
    /// ```
    ///
    /// [`filter_by_entry`]: RichMap::filter_by_entry
    pub fn try_filter_by_entry<F, E>(&self, mut filter: F) -> Result<Self, E>
    where
        F: FnMut(&Entry<K, V>) -> Result<bool, E>,
    {
        let mut kept = RichMap::with_hasher(self.inner.hasher().clone());
        for (key, value) in &self.inner {
            let entry = Entry::new(key.clone(), value.clone());
            if filter(&entry)? {
                let (key, value) = entry.into_pair();
                kept.insert(key, value);
            }
        }
        Ok(kept)
    }

    /// Fallible form of [`filter_by_key`]. Failure semantics as for
    /// [`try_filter_by_entry`].
    ///
    /// [`filter_by_key`]: RichMap::filter_by_key
    /// [`try_filter_by_entry`]: RichMap::try_filter_by_entry
    pub fn try_filter_by_key<F, E>(&self, mut filter: F) -> Result<Self, E>
    where
        F: FnMut(&K) -> Result<bool, E>,
    {
        let mut kept = RichMap::with_hasher(self.inner.hasher().clone());
        for (key, value) in &self.inner {
            if filter(key)? {
                kept.insert(key.clone(), value.clone());
            }
        }
        Ok(kept)
    }

    /// Fallible form of [`filter_by_value`]. Failure semantics as for
    /// [`try_filter_by_entry`].
    ///
    /// [`filter_by_value`]: RichMap::filter_by_value
    /// [`try_filter_by_entry`]: RichMap::try_filter_by_entry
    pub fn try_filter_by_value<F, E>(&self, mut filter: F) -> Result<Self, E>
    where
        F: FnMut(&V) -> Result<bool, E>,
    {
        let mut kept = RichMap::with_hasher(self.inner.hasher().clone());
        for (key, value) in &self.inner {
            if filter(value)? {
                kept.insert(key.clone(), value.clone());
            }
        }
        Ok(kept)
    }

    /// Builds a new map retaining exactly the entries whose value narrows
    /// to `W`, with the value type statically narrowed in the result.
    ///
    /// Entries whose value fails the [`Narrow`] test are dropped, not
    /// errored. The receiver is never mutated.
    ///
    /// # Examples
    /// ```
    /// use richmap::DynMap;
    ///
    /// let mut map = DynMap::new();
    /// map.insert_dyn("a", 1u32);
    /// map.insert_dyn("b", "two");
    ///
    /// let numbers = map.filter_value_type::<u32>();
    /// assert_eq!(numbers.len(), 1);
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn filter_value_type<W>(&self) -> RichMap<K, W, S>
    where
        V: Narrow<W>,
    {
        let mut kept = RichMap::with_hasher(self.inner.hasher().clone());
        for (key, value) in &self.inner {
            if let Ok(value) = value.clone().narrow() {
                kept.insert(key.clone(), value);
            }
        }
        kept
    }

    /// Builds a new map retaining exactly the entries whose key narrows to
    /// `L`, with the key type statically narrowed in the result. Semantics
    /// as for [`filter_value_type`].
    ///
    /// [`filter_value_type`]: RichMap::filter_value_type
    pub fn filter_key_type<L>(&self) -> RichMap<L, V, S>
    where
        K: Narrow<L>,
        L: Eq + Hash,
    {
        let mut kept = RichMap::with_hasher(self.inner.hasher().clone());
        for (key, value) in &self.inner {
            if let Ok(key) = key.clone().narrow() {
                kept.insert(key, value.clone());
            }
        }
        kept
    }

    /// Combined narrowing: retains only the entries whose key narrows to
    /// `L` and whose value narrows to `W`, with both types statically
    /// narrowed in the result. Semantics as for [`filter_value_type`].
    ///
    /// # Examples
    /// ```
    /// use richmap::DynMap;
    ///
    /// let mut map = DynMap::new();
    /// map.insert_dyn("a", 1u32);
    /// map.insert_dyn(7u8, 2u32);
    /// map.insert_dyn("c", "three");
    ///
    /// let narrowed = map.filter_pair_type::<&str, u32>();
    /// assert_eq!(narrowed.len(), 1);
    /// assert_eq!(narrowed.get("a"), Some(&1));
    /// ```
    ///
    /// [`filter_value_type`]: RichMap::filter_value_type
    pub fn filter_pair_type<L, W>(&self) -> RichMap<L, W, S>
    where
        K: Narrow<L>,
        V: Narrow<W>,
        L: Eq + Hash,
    {
        let mut kept = RichMap::with_hasher(self.inner.hasher().clone());
        for (key, value) in &self.inner {
            if let Ok(key) = key.clone().narrow() {
                if let Ok(value) = value.clone().narrow() {
                    kept.insert(key, value);
                }
            }
        }
        kept
    }
}

impl<K, V, S: Default> Default for RichMap<K, V, S> {
    fn default() -> Self {
        RichMap {
            inner: HashMap::default(),
        }
    }
}

impl<K: Debug, V: Debug, S> Debug for RichMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

impl<K, V, S> PartialEq for RichMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K, V, S> Eq for RichMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> From<HashMap<K, V, S>> for RichMap<K, V, S> {
    fn from(inner: HashMap<K, V, S>) -> Self {
        RichMap { inner }
    }
}

impl<K, V, S> From<RichMap<K, V, S>> for HashMap<K, V, S> {
    fn from(map: RichMap<K, V, S>) -> Self {
        map.inner
    }
}

impl<K, V, S> FromIterator<(K, V)> for RichMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RichMap {
            inner: HashMap::from_iter(iter),
        }
    }
}

impl<K, V, S> FromIterator<Entry<K, V>> for RichMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = Entry<K, V>>>(iter: I) -> Self {
        iter.into_iter().map(Entry::into_pair).collect()
    }
}

impl<K, V, S> Extend<(K, V)> for RichMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl<K, V, S> Extend<Entry<K, V>> for RichMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = Entry<K, V>>>(&mut self, iter: I) {
        self.inner.extend(iter.into_iter().map(Entry::into_pair));
    }
}

impl<K, Q, V, S> Index<&Q> for RichMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, S> IntoIterator for RichMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.inner.into_iter())
    }
}

impl<'a, K, V, S> IntoIterator for &'a RichMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut RichMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An iterator over the entries of a [`RichMap`].
///
/// This `struct` is created by the [`iter`] method on [`RichMap`].
///
/// [`iter`]: RichMap::iter
#[derive(Clone)]
pub struct Iter<'a, K, V>(std::collections::hash_map::Iter<'a, K, V>);

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`RichMap`].
///
/// This `struct` is created by the [`iter_mut`] method on [`RichMap`].
///
/// [`iter_mut`]: RichMap::iter_mut
pub struct IterMut<'a, K, V>(std::collections::hash_map::IterMut<'a, K, V>);

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of a [`RichMap`].
///
/// This `struct` is created by the [`keys`] method on [`RichMap`].
///
/// [`keys`]: RichMap::keys
#[derive(Clone)]
pub struct Keys<'a, K, V>(std::collections::hash_map::Keys<'a, K, V>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`RichMap`].
///
/// This `struct` is created by the [`values`] method on [`RichMap`].
///
/// [`values`]: RichMap::values
#[derive(Clone)]
pub struct Values<'a, K, V>(std::collections::hash_map::Values<'a, K, V>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a [`RichMap`].
///
/// This `struct` is created by the [`values_mut`] method on [`RichMap`].
///
/// [`values_mut`]: RichMap::values_mut
pub struct ValuesMut<'a, K, V>(std::collections::hash_map::ValuesMut<'a, K, V>);

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// A draining iterator over the entries of a [`RichMap`].
///
/// This `struct` is created by the [`drain`] method on [`RichMap`].
///
/// [`drain`]: RichMap::drain
pub struct Drain<'a, K, V>(std::collections::hash_map::Drain<'a, K, V>);

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}
impl<K, V> FusedIterator for Drain<'_, K, V> {}

/// An owning iterator over the entries of a [`RichMap`].
///
/// This `struct` is created by the [`into_iter`] method on [`RichMap`]
/// (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V>(std::collections::hash_map::IntoIter<K, V>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

#[cfg(test)]
mod tests {
    use crate::{Entry, MapError, Narrow, RichMap};

    #[test]
    fn test_basic_use() {
        let mut map: RichMap<String, u32> = RichMap::new();
        assert!(map.is_empty());

        assert_eq!(map.insert("a".to_owned(), 1), None);
        assert_eq!(map.insert("a".to_owned(), 2), Some(1));
        map.insert("b".to_owned(), 3);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&2));
        assert_eq!(map.get("missing"), None);
        assert!(map.contains_key("b"));
        assert_eq!(map["b"], 3);

        assert_eq!(map.remove("a"), Some(2));
        assert_eq!(map.remove("a"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_get_or_insert_aliases_storage() {
        let mut map: RichMap<&str, Vec<u32>> = RichMap::new();

        let slot = map.get_or_insert("nums", Vec::new());
        slot.push(1);
        slot.push(2);

        // Writes through the returned reference landed in the map.
        assert_eq!(map.get("nums"), Some(&vec![1, 2]));

        // Present key: the existing value comes back, the default is dropped.
        let slot = map.get_or_insert("nums", vec![9]);
        assert_eq!(slot, &vec![1, 2]);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_snapshot_views_are_independent() {
        let mut map: RichMap<&str, u32> = [("a", 1), ("b", 2)].into_iter().collect();

        let keys = map.to_key_set();
        let values = map.to_value_list();
        let entries = map.to_entry_set();

        map.insert("c", 3);
        map.remove("a");

        assert_eq!(keys.len(), 2);
        assert!(keys.contains("a"));
        assert_eq!(values.len(), 2);
        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&Entry::new("a", 1)));
    }

    #[test]
    fn test_filters_do_not_touch_the_source() {
        let map: RichMap<&str, u32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();

        let mut filtered = map.filter_by_value(|v| *v > 1);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.get("b"), Some(&2));
        assert_eq!(filtered.get("c"), Some(&3));
        assert_eq!(map.len(), 3);

        // Independent backing stores in both directions.
        filtered.insert("z", 9);
        filtered.remove("b");
        assert_eq!(map.len(), 3);
        assert!(!map.contains_key("z"));

        let by_key = map.filter_by_key(|k| *k != "a");
        assert_eq!(by_key.len(), 2);

        let by_entry = map.filter_by_entry(|e| *e.key() == "a" || *e.value() == 3);
        assert_eq!(by_entry.len(), 2);
    }

    #[test]
    fn test_try_filter_propagates_and_leaves_source_intact() {
        let map: RichMap<&str, u32> = [("a", 1), ("b", 2)].into_iter().collect();

        let ok = map.try_filter_by_value::<_, ()>(|v| Ok(*v == 1)).unwrap();
        assert_eq!(ok.len(), 1);

        let err: Result<_, &str> = map.try_filter_by_key(|_| Err("predicate failed"));
        assert_eq!(err.unwrap_err(), "predicate failed");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_narrowing_on_tagged_variants() {
        #[derive(Clone, Debug, PartialEq)]
        enum Num {
            Int(i64),
            Float(f64),
        }

        impl Narrow<i64> for Num {
            fn narrow_ref(&self) -> Option<&i64> {
                match self {
                    Num::Int(n) => Some(n),
                    Num::Float(_) => None,
                }
            }

            fn narrow(self) -> Result<i64, Self> {
                match self {
                    Num::Int(n) => Ok(n),
                    other => Err(other),
                }
            }
        }

        let map: RichMap<&str, Num> = [
            ("a", Num::Int(1)),
            ("b", Num::Float(2.5)),
            ("c", Num::Int(3)),
        ]
        .into_iter()
        .collect();

        let ints: RichMap<&str, i64> = map.filter_value_type();
        assert_eq!(ints.len(), 2);
        assert_eq!(ints.get("a"), Some(&1));
        assert_eq!(ints.get("c"), Some(&3));
        assert!(!ints.contains_key("b"));
        // The source keeps every entry, narrowed or not.
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_try_from_pairs_rejects_nil_slots() {
        let err = RichMap::<&str, u32>::try_from_pairs([(None, Some(1))]).unwrap_err();
        assert_eq!(err, MapError::NilKey(0));

        let err =
            RichMap::<&str, u32>::try_from_pairs([(Some("a"), Some(1)), (Some("b"), None)])
                .unwrap_err();
        assert_eq!(err, MapError::NilValue(1));

        let map =
            RichMap::<&str, u32>::try_from_pairs([(Some("a"), Some(1)), (Some("a"), Some(2))])
                .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&2));
    }

    #[test]
    fn test_entries_collect_back_into_a_map() {
        let map: RichMap<&str, u32> = [("a", 1), ("b", 2)].into_iter().collect();
        let rebuilt: RichMap<&str, u32> = map.entry_sequence().collect();
        assert_eq!(rebuilt, map);
    }
}
