//! ChainedMap: string keys to `i32` values, collisions resolved by
//! per-bucket singly-linked chains.
//!
//! Chain nodes live in a `SlotMap` arena; a bucket holds the arena key of
//! its chain head and every entry holds the key of its successor. Growing
//! the table relinks nodes into the new bucket array without touching key
//! buffers, and each entry caches its FNV-1a hash so rehashing never reads
//! the key bytes again.

use crate::diagnostics::{write_traversal, Describe, Layout};
use crate::error::{try_filled, TableError};
use crate::hashing::{bucket_of, fnv1a};
use crate::{GROWTH_FACTOR, MAX_LOAD_FACTOR};
use core::fmt;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    struct EntryKey;
}

#[derive(Clone, Debug)]
struct Entry {
    key: String,
    value: i32,
    hash: u32,
    next: Option<EntryKey>,
}

/// Separate-chaining hash map from `String` keys to `i32` values.
///
/// Grows to twice its bucket count whenever an insert pushes the load
/// factor above [`MAX_LOAD_FACTOR`]. Never shrinks.
#[derive(Clone, Debug)]
pub struct ChainedMap {
    buckets: Vec<Option<EntryKey>>,
    entries: SlotMap<EntryKey, Entry>,
}

impl ChainedMap {
    /// Creates a map with `capacity` empty buckets.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity);
        }
        Ok(Self {
            buckets: try_filled(capacity, None)?,
            entries: SlotMap::with_key(),
        })
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    fn find(&self, hash: u32, key: &str) -> Option<EntryKey> {
        let mut cursor = self.buckets[bucket_of(hash, self.buckets.len())];
        while let Some(k) = cursor {
            let entry = &self.entries[k];
            if entry.hash == hash && entry.key == key {
                return Some(k);
            }
            cursor = entry.next;
        }
        None
    }

    /// Inserts or overwrites `key`, returning the previous value if the key
    /// was already present.
    ///
    /// A new key is stored (as an owned copy) at the head of its chain. If
    /// the insert then needs the table to grow and that allocation fails,
    /// the entry stays in place, the table keeps its current bucket array
    /// and the error is returned.
    pub fn put(&mut self, key: &str, value: i32) -> Result<Option<i32>, TableError> {
        let hash = fnv1a(key);
        if let Some(k) = self.find(hash, key) {
            return Ok(Some(core::mem::replace(&mut self.entries[k].value, value)));
        }

        let bucket = bucket_of(hash, self.buckets.len());
        let next = self.buckets[bucket];
        let k = self.entries.insert(Entry {
            key: key.to_owned(),
            value,
            hash,
            next,
        });
        self.buckets[bucket] = Some(k);

        if self.load_factor() > MAX_LOAD_FACTOR {
            self.grow()?;
        }
        Ok(None)
    }

    pub fn get(&self, key: &str) -> Option<i32> {
        self.find(fnv1a(key), key).map(|k| self.entries[k].value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.find(fnv1a(key), key).is_some()
    }

    /// Unlinks `key` from its chain and returns its value.
    pub fn pop(&mut self, key: &str) -> Option<i32> {
        let hash = fnv1a(key);
        let bucket = bucket_of(hash, self.buckets.len());
        let mut prev: Option<EntryKey> = None;
        let mut cursor = self.buckets[bucket];
        while let Some(k) = cursor {
            let entry = &self.entries[k];
            if entry.hash == hash && entry.key == key {
                let next = entry.next;
                match prev {
                    None => self.buckets[bucket] = next,
                    Some(p) => self.entries[p].next = next,
                }
                return self.entries.remove(k).map(|e| e.value);
            }
            prev = cursor;
            cursor = entry.next;
        }
        None
    }

    /// Drops every entry; the bucket count is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.fill(None);
    }

    /// Deep copy with the same bucket count and layout. Key buffers are
    /// duplicated, so the copy shares no storage with `self`.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Entries in bucket order; within a bucket, most recent insert first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: &self.buckets,
            entries: &self.entries,
            bucket: 0,
            cursor: None,
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }

    pub fn values(&self) -> Vec<i32> {
        self.iter().map(|(_, v)| v).collect()
    }

    pub fn items(&self) -> Vec<(String, i32)> {
        self.iter().map(|(k, v)| (k.to_owned(), v)).collect()
    }

    /// `{ k1:v1 k2:v2 } : L.LL\n`, same as `Display`.
    pub fn traverse(&self) -> String {
        self.to_string()
    }

    /// One line per bucket: `<index> | {k,v} -> {k,v} -> \n`.
    pub fn describe(&self) -> Layout<'_, Self> {
        Layout(self)
    }

    fn grow(&mut self) -> Result<(), TableError> {
        let new_size = self
            .buckets
            .len()
            .checked_mul(GROWTH_FACTOR)
            .ok_or(TableError::AllocFailed {
                requested: usize::MAX,
            })?;
        self.rehash(new_size)
    }

    /// Moves every entry into a fresh array of `new_size` buckets.
    ///
    /// Old buckets are walked in index order and each chain head to tail;
    /// every node is pushed onto the head of its new bucket.
    fn rehash(&mut self, new_size: usize) -> Result<(), TableError> {
        let mut buckets = try_filled(new_size, None)?;
        for &head in &self.buckets {
            let mut cursor = head;
            while let Some(k) = cursor {
                let entry = &mut self.entries[k];
                cursor = entry.next;
                let b = bucket_of(entry.hash, new_size);
                entry.next = buckets[b];
                buckets[b] = Some(k);
            }
        }
        log::debug!(
            "chained map grew from {} to {} buckets ({} entries)",
            self.buckets.len(),
            new_size,
            self.entries.len()
        );
        self.buckets = buckets;
        Ok(())
    }
}

/// Iterator over `(key, value)` pairs of a `ChainedMap`.
pub struct Iter<'a> {
    buckets: &'a [Option<EntryKey>],
    entries: &'a SlotMap<EntryKey, Entry>,
    bucket: usize,
    cursor: Option<EntryKey>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, i32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(k) = self.cursor {
                let entry = &self.entries[k];
                self.cursor = entry.next;
                return Some((entry.key.as_str(), entry.value));
            }
            self.cursor = *self.buckets.get(self.bucket)?;
            self.bucket += 1;
        }
    }
}

impl<'a> IntoIterator for &'a ChainedMap {
    type Item = (&'a str, i32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

struct Pair<'a>(&'a str, i32);

impl fmt::Display for Pair<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

impl fmt::Display for ChainedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_traversal(f, self.iter().map(|(k, v)| Pair(k, v)), self.load_factor())
    }
}

impl Describe for ChainedMap {
    fn write_layout(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, &head) in self.buckets.iter().enumerate() {
            write!(f, "{index} | ")?;
            let mut cursor = head;
            while let Some(k) = cursor {
                let entry = &self.entries[k];
                write!(f, "{{{},{}}} -> ", entry.key, entry.value)?;
                cursor = entry.next;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
