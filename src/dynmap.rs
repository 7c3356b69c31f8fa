use std::any::Any;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

use crate::dynhash::DynKey;
use crate::dynvalue::DynValue;
use crate::hashmap::RichMap;

/// A fully dynamic [`RichMap`] in which keys and values are type-erased.
///
/// Any `Eq + Hash + Clone + 'static` key can live next to any other key
/// type, and likewise for `Clone + 'static` values. The narrowing filters
/// recover static types from such a map: filtering by value type `W` yields
/// a `RichMap<Box<dyn DynKey>, W, _>`, filtering by both sides yields a
/// fully concrete map.
///
/// # Examples
/// ```
/// use richmap::DynMap;
///
/// let mut registry = DynMap::new();
/// registry.insert_dyn("retries", 3u32);
/// registry.insert_dyn("name", "service-a".to_owned());
///
/// assert_eq!(registry.get_as::<_, u32>(&"retries"), Some(&3));
/// assert_eq!(registry.get_as::<_, u32>(&"name"), None);
///
/// let numbers = registry.filter_value_type::<u32>();
/// assert_eq!(numbers.len(), 1);
/// ```
pub type DynMap<S = RandomState> = RichMap<Box<dyn DynKey>, Box<dyn DynValue>, S>;

impl<V, S: BuildHasher> RichMap<Box<dyn DynKey>, V, S> {
    /// Looks up by a concrete, unboxed key.
    ///
    /// Available on any map with erased keys, including the output of the
    /// narrowing value filter.
    pub fn get_dyn<K>(&self, key: &K) -> Option<&V>
    where
        K: Eq + Hash + Clone + Any,
    {
        self.get(key as &dyn DynKey)
    }

    /// Returns true if the map contains the given concrete key.
    pub fn contains_key_dyn<K>(&self, key: &K) -> bool
    where
        K: Eq + Hash + Clone + Any,
    {
        self.contains_key(key as &dyn DynKey)
    }

    /// Removes a concrete key, returning its value if it was present.
    pub fn remove_dyn<K>(&mut self, key: &K) -> Option<V>
    where
        K: Eq + Hash + Clone + Any,
    {
        self.remove(key as &dyn DynKey)
    }
}

impl<S: BuildHasher> RichMap<Box<dyn DynKey>, Box<dyn DynValue>, S> {
    /// Boxes and inserts a concrete key-value pair, returning the previous
    /// erased value if the key was present.
    pub fn insert_dyn<K, V>(&mut self, key: K, value: V) -> Option<Box<dyn DynValue>>
    where
        K: Eq + Hash + Clone + Any,
        V: Clone + Any,
    {
        self.insert(Box::new(key), Box::new(value))
    }

    /// Looks up a concrete key and downcasts the value to `V`. Returns
    /// `None` when the key is absent or the stored value is not a `V`.
    pub fn get_as<K, V>(&self, key: &K) -> Option<&V>
    where
        K: Eq + Hash + Clone + Any,
        V: Any,
    {
        let value = self.get_dyn(key)?;
        (**value).as_any().downcast_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::DynMap;

    #[test]
    fn test_mixed_key_and_value_types() {
        let mut map = DynMap::new();
        map.insert_dyn("a", 1u32);
        map.insert_dyn(2u8, "two".to_owned());
        map.insert_dyn("c", 3.5f64);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get_as::<_, u32>(&"a"), Some(&1));
        assert_eq!(map.get_as::<_, String>(&2u8), Some(&"two".to_owned()));
        // Same key, wrong value type: soft miss.
        assert_eq!(map.get_as::<_, i64>(&"a"), None);
        // Keys of different concrete types never collide.
        assert!(!map.contains_key_dyn(&2u16));

        assert!(map.remove_dyn(&"c").is_some());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_narrowing_filters_recover_static_types() {
        let mut map = DynMap::new();
        map.insert_dyn("a", 1u32);
        map.insert_dyn("b", 2u32);
        map.insert_dyn("c", "three".to_owned());
        map.insert_dyn(4u8, 4u32);

        let by_value = map.filter_value_type::<u32>();
        assert_eq!(by_value.len(), 3);
        assert_eq!(by_value.get_dyn(&"a"), Some(&1));

        let by_key = map.filter_key_type::<&str>();
        assert_eq!(by_key.len(), 3);

        let narrowed = map.filter_pair_type::<&str, u32>();
        assert_eq!(narrowed.len(), 2);
        assert_eq!(narrowed.get("a"), Some(&1));
        assert_eq!(narrowed.get("b"), Some(&2));

        // The erased source is untouched.
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn test_overwrite_follows_last_write_wins() {
        let mut map = DynMap::new();
        assert!(map.insert_dyn("k", 1u32).is_none());
        let old = map.insert_dyn("k", 2u32).unwrap();
        assert_eq!((*old).as_any().downcast_ref::<u32>(), Some(&1));
        assert_eq!(map.get_as::<_, u32>(&"k"), Some(&2));
    }
}
