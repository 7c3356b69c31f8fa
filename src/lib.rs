//! Provides [`RichMap`], a hash map with default-insert retrieval, snapshot
//! views and type-narrowing filters, together with its view companions
//! [`RichSet`] and [`RichList`] and the lazy [`Sequence`] they all produce.
//!
//! ```
//! use richmap::{richmap, RichMap};
//!
//! let mut map = richmap! {
//!     "a" => 1,
//!     "b" => 2,
//!     "c" => 3,
//! };
//!
//! // Retrieval that never comes back empty-handed: the default is
//! // inserted when the key is absent, and the returned reference points
//! // at the value stored in the map.
//! assert_eq!(*map.get_or_insert("z", 9), 9);
//! assert_eq!(map.get("z"), Some(&9));
//! assert_eq!(map.len(), 4);
//!
//! // Filters build a new, independently-mutable map.
//! let big = map.filter_by_value(|v| *v > 1);
//! assert_eq!(big.len(), 3);
//! assert_eq!(map.len(), 4);
//!
//! // Views and sequences are snapshots; later mutation of the map is
//! // never reflected in them.
//! let keys = map.to_key_set();
//! map.insert("w", 0);
//! assert_eq!(keys.len(), 4);
//! ```
//!
//! The narrowing filters work against the [`Narrow`] trait: a
//! test-and-cast the key or value type supplies. Tagged variants implement
//! it by hand; the type-erased [`DynKey`]/[`DynValue`] boxes implement it
//! via exact-type downcast, which makes [`DynMap`] a heterogeneous map
//! whose filters recover static types:
//!
//! ```
//! use richmap::DynMap;
//!
//! let mut blackboard = DynMap::new();
//! blackboard.insert_dyn("retries", 3u32);
//! blackboard.insert_dyn("endpoint", "http://localhost".to_owned());
//! blackboard.insert_dyn(42u8, 0.5f64);
//!
//! // Statically typed result: RichMap<&str, u32>.
//! let counters = blackboard.filter_pair_type::<&str, u32>();
//! assert_eq!(counters.get("retries"), Some(&3));
//! assert_eq!(counters.len(), 1);
//! ```
//!
//! With the `serde` feature enabled, [`RichMap`], [`RichSet`], [`RichList`]
//! and [`Entry`] serialize as the plain map/sequence/tuple forms of their
//! std counterparts.

pub mod dynhash;
pub mod dynmap;
pub mod dynvalue;
pub mod entry;
pub mod error;
pub mod hashmap;
pub mod hashset;
pub mod list;
pub mod narrow;
pub mod sequence;

mod macros;

#[cfg(feature = "serde")]
mod serde_impls;

pub use crate::dynhash::DynKey;
pub use crate::dynmap::DynMap;
pub use crate::dynvalue::DynValue;
pub use crate::entry::Entry;
pub use crate::error::MapError;
pub use crate::hashmap::RichMap;
pub use crate::hashset::RichSet;
pub use crate::list::RichList;
pub use crate::narrow::Narrow;
pub use crate::sequence::Sequence;
