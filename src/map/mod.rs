//! This module contains the `i64`-keyed hash table and its operation set.

mod chain;
mod long_map;

pub use long_map::{Builder, LongMap, DEFAULT_INITIAL_CAPACITY, MAXIMUM_CAPACITY};

/// Common functionalities for maps keyed by `i64`.
///
/// Every entry holds a value slot that may be absent. Absent slots are only
/// observable through [`LongKeyedMap::contains_key`]; every other operation
/// reports them the same way as a missing key.
pub trait LongKeyedMap {
    /// Value type for a map implementation.
    type Val;

    /// Emplaces a key-value pair into the map, returning the previous value
    /// if there was one.
    ///
    /// If there were a key-value pair associated with this provided key,
    /// it will be overwritten.
    fn put(&mut self, key: i64, value: Self::Val) -> Option<Self::Val> {
        self.put_optional(key, Some(value))
    }

    /// Like [`LongKeyedMap::put`], but allows storing an absent value.
    fn put_optional(&mut self, key: i64, value: Option<Self::Val>) -> Option<Self::Val>;

    /// Get reference to a value associated with a key, if it exists.
    fn get(&self, key: i64) -> Option<&Self::Val>;

    /// Attempts to remove a key-value pair based on the provided key,
    /// returning the removed value.
    fn remove(&mut self, key: i64) -> Option<Self::Val>;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Check whether the map contains an entry for the given key.
    fn contains_key(&self, key: i64) -> bool;

    /// Check whether any entry holds a value equal to `value`.
    ///
    /// An absent `value` is never contained, even when absent values have
    /// been stored with [`LongKeyedMap::put_optional`].
    fn contains_value(&self, value: Option<&Self::Val>) -> bool
    where
        Self::Val: PartialEq;

    /// All keys, one per entry. The order is unspecified and may change
    /// whenever the map grows.
    fn keys(&self) -> Vec<i64>;

    /// All value slots, in the same order as [`LongKeyedMap::keys`].
    fn values(&self) -> Vec<Option<&Self::Val>>;

    /// Number of entries.
    fn size(&self) -> usize;

    /// Removes every entry. Allocated buckets are kept.
    fn clear(&mut self);
}
