use std::fmt;
use std::mem;

use tracing::{debug, trace};

use super::chain::{self, Entries, Entry, Link};
use super::LongKeyedMap;
use crate::error::{Error, Result};

pub const DEFAULT_INITIAL_CAPACITY: usize = 1 << 4;
pub const MAXIMUM_CAPACITY: usize = 1 << 30;
const MINIMUM_CAPACITY: usize = 1;

/// A hash table keyed by `i64`, resolving collisions by chaining.
///
/// Each bucket holds a singly linked chain of entries whose hashes reduce to
/// the bucket's index. New entries are prepended to their chain. Once the
/// number of entries exceeds `capacity * 4 / 3`, the bucket array doubles and
/// every entry is relinked into the new array; growth stops at the maximum
/// capacity, after which chains simply get longer.
///
/// The table never shrinks: neither [`LongKeyedMap::remove`] nor
/// [`LongKeyedMap::clear`] release buckets.
pub struct LongMap<V> {
    buckets: Box<[Link<V>]>,
    limit: usize,
    size: usize,
    maximum_capacity: usize,
}

/// Construction options for a [`LongMap`].
#[derive(Debug, Clone)]
pub struct Builder {
    initial_capacity: i64,
    maximum_capacity: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY as i64,
            maximum_capacity: MAXIMUM_CAPACITY,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buckets allocated up front. Negative values are rejected by
    /// [`Builder::build`]; values above the maximum capacity are clamped.
    pub fn initial_capacity(mut self, capacity: i64) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Upper bound on the number of buckets. Clamped to `[1, 2^30]`.
    pub fn maximum_capacity(mut self, capacity: usize) -> Self {
        self.maximum_capacity = capacity;
        self
    }

    pub fn build<V>(self) -> Result<LongMap<V>> {
        let maximum_capacity = clamp_maximum(self.maximum_capacity);
        let capacity = resolve_capacity(self.initial_capacity, maximum_capacity)?;
        Ok(LongMap::with_parts(capacity, maximum_capacity))
    }
}

impl<V> Default for LongMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LongMap<V> {
    pub fn new() -> Self {
        LongMap::with_parts(DEFAULT_INITIAL_CAPACITY, MAXIMUM_CAPACITY)
    }

    /// Creates a table with `initial_capacity` buckets.
    ///
    /// Fails with [`Error::IllegalCapacity`] if `initial_capacity` is
    /// negative. Capacities above 2^30 are clamped, and 0 is raised to 1.
    pub fn with_capacity(initial_capacity: i64) -> Result<Self> {
        Builder::new().initial_capacity(initial_capacity).build()
    }

    fn with_parts(capacity: usize, maximum_capacity: usize) -> Self {
        LongMap {
            buckets: new_buckets(capacity),
            limit: limit_for(capacity),
            size: 0,
            maximum_capacity,
        }
    }

    /// Current number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Entry count above which the next insert grows the table.
    pub fn limit(&self) -> usize {
        self.limit
    }

    fn entries(&self) -> Entries<'_, V> {
        Entries::new(&self.buckets)
    }

    fn resize(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity();
        let new_capacity = new_capacity.min(self.maximum_capacity);
        if new_capacity == old_capacity {
            trace!(
                capacity = old_capacity,
                size = self.size,
                "long map saturated at maximum capacity"
            );
            return;
        }

        trace!(old_capacity, new_capacity, size = self.size, "resizing long map");
        let mut buckets = new_buckets(new_capacity);
        for bucket in self.buckets.iter_mut() {
            chain::drain(bucket, |entry| {
                let index = index_for(entry.hash, new_capacity);
                chain::push_front(&mut buckets[index], entry);
            });
        }

        self.buckets = buckets;
        self.limit = limit_for(new_capacity);
    }

    // Chains are released one entry at a time so that a long chain is never
    // dropped recursively.
    fn release_chains(&mut self) {
        for bucket in self.buckets.iter_mut() {
            chain::drain(bucket, drop);
        }
        self.size = 0;
    }
}

impl<V> LongKeyedMap for LongMap<V> {
    type Val = V;

    fn put_optional(&mut self, key: i64, value: Option<V>) -> Option<V> {
        let hash = hash(key);
        let index = index_for(hash, self.capacity());

        if let Some(entry) = chain::find_mut(&mut self.buckets[index], hash, key) {
            return mem::replace(&mut entry.value, value);
        }

        chain::push_front(&mut self.buckets[index], Entry::new(hash, key, value));
        self.size += 1;
        if self.size > self.limit {
            self.resize(self.capacity().saturating_mul(2));
        }
        None
    }

    fn get(&self, key: i64) -> Option<&V> {
        let index = index_for(hash(key), self.capacity());
        chain::find(&self.buckets[index], key).and_then(|entry| entry.value.as_ref())
    }

    fn remove(&mut self, key: i64) -> Option<V> {
        let index = index_for(hash(key), self.capacity());
        let entry = chain::unlink(&mut self.buckets[index], key)?;
        self.size -= 1;
        entry.value
    }

    fn contains_key(&self, key: i64) -> bool {
        let index = index_for(hash(key), self.capacity());
        chain::find(&self.buckets[index], key).is_some()
    }

    fn contains_value(&self, value: Option<&V>) -> bool
    where
        V: PartialEq,
    {
        match value {
            None => false,
            Some(value) => self
                .entries()
                .any(|entry| entry.value.as_ref() == Some(value)),
        }
    }

    fn keys(&self) -> Vec<i64> {
        let mut keys = Vec::with_capacity(self.size);
        keys.extend(self.entries().map(|entry| entry.key));
        keys
    }

    fn values(&self) -> Vec<Option<&V>> {
        let mut values = Vec::with_capacity(self.size);
        values.extend(self.entries().map(|entry| entry.value.as_ref()));
        values
    }

    fn size(&self) -> usize {
        self.size
    }

    fn clear(&mut self) {
        self.release_chains();
    }
}

impl<V> Drop for LongMap<V> {
    fn drop(&mut self) {
        self.release_chains();
    }
}

impl<V: fmt::Debug> fmt::Debug for LongMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries().map(|entry| (entry.key, entry.value.as_ref())))
            .finish()
    }
}

impl<V> Extend<(i64, V)> for LongMap<V> {
    fn extend<I: IntoIterator<Item = (i64, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V> FromIterator<(i64, V)> for LongMap<V> {
    fn from_iter<I: IntoIterator<Item = (i64, V)>>(iter: I) -> Self {
        let mut map = LongMap::new();
        map.extend(iter);
        map
    }
}

/// Folds the key to 32 bits, then mixes the upper half into the lower half
/// since only the low bits survive the reduction to a bucket index.
fn hash(key: i64) -> i32 {
    let bits = key as u64;
    let h = (bits ^ (bits >> 32)) as u32;
    (h ^ (h >> 16)) as i32
}

/// `capacity` must be non-zero.
fn index_for(hash: i32, capacity: usize) -> usize {
    // capacity <= 2^30, so it fits in an i64 and the remainder fits in a usize.
    i64::from(hash).rem_euclid(capacity as i64) as usize
}

fn limit_for(capacity: usize) -> usize {
    (capacity as u64 * 4 / 3) as usize
}

fn new_buckets<V>(capacity: usize) -> Box<[Link<V>]> {
    (0..capacity).map(|_| None).collect()
}

fn clamp_maximum(maximum: usize) -> usize {
    let clamped = maximum.clamp(MINIMUM_CAPACITY, MAXIMUM_CAPACITY);
    if clamped != maximum {
        debug!(requested = maximum, clamped, "maximum capacity clamped");
    }
    clamped
}

fn resolve_capacity(requested: i64, maximum: usize) -> Result<usize> {
    if requested < 0 {
        return Err(Error::IllegalCapacity(requested));
    }

    let capacity = match usize::try_from(requested) {
        Ok(capacity) if capacity <= maximum => capacity,
        _ => {
            debug!(requested, maximum, "initial capacity clamped to maximum");
            maximum
        }
    };

    if capacity < MINIMUM_CAPACITY {
        debug!(requested, "initial capacity raised to minimum");
        return Ok(MINIMUM_CAPACITY);
    }
    Ok(capacity)
}
