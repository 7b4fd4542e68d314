//! A hash map specialized for `i64` keys.
//!
//! [`LongMap`] is a chained hash table: a growable array of buckets,
//! each the head of a singly linked list of entries. The operation set lives
//! on the [`LongKeyedMap`] trait.
//!
//! ```
//! use longmap::{LongKeyedMap, LongMap};
//!
//! let mut map = LongMap::new();
//! assert_eq!(map.put(42, "hello"), None);
//! assert_eq!(map.get(42), Some(&"hello"));
//! assert_eq!(map.remove(42), Some("hello"));
//! assert!(map.is_empty());
//! ```

mod error;
pub mod map;

pub use error::{Error, Result};
pub use map::{Builder, LongKeyedMap, LongMap, DEFAULT_INITIAL_CAPACITY, MAXIMUM_CAPACITY};
