//! Singly linked bucket chains.

/// Owning link to the head of a chain, or to an entry's successor.
pub(crate) type Link<V> = Option<Box<Entry<V>>>;

pub(crate) struct Entry<V> {
    pub(crate) hash: i32,
    pub(crate) key: i64,
    pub(crate) value: Option<V>,
    pub(crate) next: Link<V>,
}

impl<V> Entry<V> {
    pub(crate) fn new(hash: i32, key: i64, value: Option<V>) -> Box<Self> {
        Box::new(Self {
            hash,
            key,
            value,
            next: None,
        })
    }
}

/// Makes `entry` the new head of the chain.
pub(crate) fn push_front<V>(link: &mut Link<V>, mut entry: Box<Entry<V>>) {
    entry.next = link.take();
    *link = Some(entry);
}

pub(crate) fn find<V>(link: &Link<V>, key: i64) -> Option<&Entry<V>> {
    let mut cursor = link.as_deref();
    while let Some(entry) = cursor {
        if entry.key == key {
            return Some(entry);
        }
        cursor = entry.next.as_deref();
    }
    None
}

/// Finds the entry with both the given hash and key.
pub(crate) fn find_mut<V>(link: &mut Link<V>, hash: i32, key: i64) -> Option<&mut Entry<V>> {
    let mut cursor = link.as_deref_mut();
    while let Some(entry) = cursor {
        if entry.hash == hash && entry.key == key {
            return Some(entry);
        }
        cursor = entry.next.as_deref_mut();
    }
    None
}

/// Detaches the entry holding `key`, splicing its successor into its place.
pub(crate) fn unlink<V>(link: &mut Link<V>, key: i64) -> Option<Box<Entry<V>>> {
    let mut cursor = link;
    loop {
        let matched = cursor.as_ref()?.key == key;
        if matched {
            let mut entry = cursor.take()?;
            *cursor = entry.next.take();
            return Some(entry);
        }
        cursor = &mut cursor.as_mut()?.next;
    }
}

/// Detaches every entry of the chain, head first, handing each one to `f`
/// with its `next` link already cleared.
pub(crate) fn drain<V, F>(link: &mut Link<V>, mut f: F)
where
    F: FnMut(Box<Entry<V>>),
{
    let mut cursor = link.take();
    while let Some(mut entry) = cursor {
        cursor = entry.next.take();
        f(entry);
    }
}

/// Borrowing walk over every entry of a bucket array, in bucket order and
/// chain order within a bucket.
pub(crate) struct Entries<'a, V> {
    buckets: std::slice::Iter<'a, Link<V>>,
    chain: Option<&'a Entry<V>>,
}

impl<'a, V> Entries<'a, V> {
    pub(crate) fn new(buckets: &'a [Link<V>]) -> Self {
        Self {
            buckets: buckets.iter(),
            chain: None,
        }
    }
}

impl<'a, V> Iterator for Entries<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.chain {
                self.chain = entry.next.as_deref();
                return Some(entry);
            }
            self.chain = self.buckets.next()?.as_deref();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(keys: &[i64]) -> Link<i64> {
        let mut link = None;
        for &key in keys {
            push_front(&mut link, Entry::new(0, key, Some(key * 10)));
        }
        link
    }

    fn keys_of(link: &Link<i64>) -> Vec<i64> {
        let buckets = std::slice::from_ref(link);
        Entries::new(buckets).map(|entry| entry.key).collect()
    }

    #[test]
    fn push_front_prepends() {
        let link = chain_of(&[1, 2, 3]);
        assert_eq!(keys_of(&link), vec![3, 2, 1]);
    }

    #[test]
    fn find_walks_whole_chain() {
        let link = chain_of(&[1, 2, 3]);
        assert_eq!(find(&link, 1).and_then(|e| e.value), Some(10));
        assert!(find(&link, 4).is_none());
    }

    #[test]
    fn find_mut_requires_matching_hash() {
        let mut link = chain_of(&[7]);
        assert!(find_mut(&mut link, 1, 7).is_none());
        let entry = find_mut(&mut link, 0, 7).unwrap();
        entry.value = Some(0);
        assert_eq!(find(&link, 7).and_then(|e| e.value), Some(0));
    }

    #[test]
    fn unlink_head_middle_and_tail() {
        let mut link = chain_of(&[1, 2, 3, 4]);
        assert_eq!(unlink(&mut link, 4).map(|e| e.key), Some(4));
        assert_eq!(keys_of(&link), vec![3, 2, 1]);
        assert_eq!(unlink(&mut link, 2).map(|e| e.key), Some(2));
        assert_eq!(keys_of(&link), vec![3, 1]);
        assert_eq!(unlink(&mut link, 1).map(|e| e.key), Some(1));
        assert_eq!(keys_of(&link), vec![3]);
        assert!(unlink(&mut link, 9).is_none());
        assert_eq!(unlink(&mut link, 3).map(|e| e.key), Some(3));
        assert!(link.is_none());
    }

    #[test]
    fn drain_empties_chain() {
        let mut link = chain_of(&[1, 2, 3]);
        let mut seen = vec![];
        drain(&mut link, |entry| {
            assert!(entry.next.is_none());
            seen.push(entry.key);
        });
        assert_eq!(seen, vec![3, 2, 1]);
        assert!(link.is_none());
    }

    #[test]
    fn entries_skip_empty_buckets() {
        let buckets = vec![None, chain_of(&[1, 2]), None, None, chain_of(&[3])];
        let keys: Vec<i64> = Entries::new(&buckets).map(|entry| entry.key).collect();
        assert_eq!(keys, vec![2, 1, 3]);
    }
}
