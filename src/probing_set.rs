//! ProbingSet: open-addressing set of `i32` keys with double hashing.
//!
//! Every key lives directly in the slot array. A lookup walks the key's
//! probe sequence (see [`Probe`]) and stops at the first `Empty` slot;
//! removal leaves a `Deleted` tombstone so walks for other keys that passed
//! through the slot still reach them. Tombstones are reclaimed by inserts
//! and dropped wholesale on growth.
//!
//! Under [`Growth::Doubling`] the table size is not kept coprime with every
//! probe step, so some keys only reach a fraction of the slots. Walks are
//! bounded by the table size, and an insert whose whole cycle is occupied
//! grows the table and retries. [`Growth::Prime`] keeps sizes prime, which
//! makes every probe sequence a full permutation of the slots.

use crate::diagnostics::{write_traversal, Describe, Layout};
use crate::error::{try_filled, TableError};
use crate::hashing::{next_prime, Probe};
use crate::{GROWTH_FACTOR, MAX_LOAD_FACTOR};
use core::fmt;

/// State of one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Empty,
    Occupied(i32),
    /// Tombstone left by `discard`; probing walks through it.
    Deleted,
}

/// Sizing policy applied at construction and on every growth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Growth {
    /// Use the requested capacity as is and double it on growth.
    #[default]
    Doubling,
    /// Round the requested capacity up to a prime, and grow to the smallest
    /// prime at least twice the current size.
    Prime,
}

impl Growth {
    fn initial(self, capacity: usize) -> Option<usize> {
        match self {
            Growth::Doubling => Some(capacity),
            Growth::Prime => next_prime(capacity),
        }
    }

    fn next(self, size: usize) -> Option<usize> {
        let doubled = size.checked_mul(GROWTH_FACTOR)?;
        match self {
            Growth::Doubling => Some(doubled),
            Growth::Prime => next_prime(doubled),
        }
    }
}

/// Outcome of walking a key's probe sequence for insertion.
enum Vacancy {
    Present,
    At(usize),
    Saturated,
}

/// Open-addressing hash set of `i32` keys.
#[derive(Clone, Debug)]
pub struct ProbingSet {
    slots: Vec<Slot>,
    len: usize,
    growth: Growth,
}

impl ProbingSet {
    /// Creates a set with `capacity` empty slots that doubles on growth.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Self::with_growth(capacity, Growth::Doubling)
    }

    pub fn with_growth(capacity: usize, growth: Growth) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity);
        }
        let size = growth.initial(capacity).ok_or(TableError::AllocFailed {
            requested: usize::MAX,
        })?;
        Ok(Self {
            slots: try_filled(size, Slot::Empty)?,
            len: 0,
            growth,
        })
    }

    /// A set large enough to take `count` keys without crossing the load
    /// threshold.
    fn with_room_for(count: usize, growth: Growth) -> Result<Self, TableError> {
        let capacity = count
            .checked_mul(4)
            .map(|n| n.div_ceil(3))
            .ok_or(TableError::AllocFailed {
                requested: usize::MAX,
            })?;
        Self::with_growth(capacity.max(1), growth)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    pub fn growth(&self) -> Growth {
        self.growth
    }

    /// Number of `Deleted` slots.
    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|s| **s == Slot::Deleted).count()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    fn find(&self, key: i32) -> Option<usize> {
        for idx in Probe::new(key, self.slots.len()) {
            match self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(k) if k == key => return Some(idx),
                Slot::Occupied(_) | Slot::Deleted => {}
            }
        }
        None
    }

    /// Walks to the first `Empty` slot, remembering the first tombstone on
    /// the way. The key may still sit beyond a tombstone, so a tombstone is
    /// only claimed once the walk proves the key absent.
    fn vacancy_for(&self, key: i32) -> Vacancy {
        let mut tombstone = None;
        for idx in Probe::new(key, self.slots.len()) {
            match self.slots[idx] {
                Slot::Empty => return Vacancy::At(tombstone.unwrap_or(idx)),
                Slot::Deleted => {
                    tombstone.get_or_insert(idx);
                }
                Slot::Occupied(k) if k == key => return Vacancy::Present,
                Slot::Occupied(_) => {}
            }
        }
        tombstone.map_or(Vacancy::Saturated, Vacancy::At)
    }

    /// Adds `key`; returns `false` if it was already present.
    ///
    /// If the insert pushes the load factor over the threshold and growing
    /// fails to allocate, the key stays inserted in the current array and
    /// the error is returned.
    pub fn insert(&mut self, key: i32) -> Result<bool, TableError> {
        let idx = loop {
            match self.vacancy_for(key) {
                Vacancy::Present => return Ok(false),
                Vacancy::At(idx) => break idx,
                Vacancy::Saturated => {
                    log::trace!(
                        "probe cycle of key {key} saturated in {} slots",
                        self.slots.len()
                    );
                    self.grow()?;
                }
            }
        };
        self.slots[idx] = Slot::Occupied(key);
        self.len += 1;

        if self.load_factor() > MAX_LOAD_FACTOR {
            self.grow()?;
        }
        Ok(true)
    }

    /// Removes `key`, leaving a tombstone. Returns whether it was present.
    pub fn discard(&mut self, key: i32) -> bool {
        match self.find(key) {
            Some(idx) => {
                self.slots[idx] = Slot::Deleted;
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, key: i32) -> bool {
        self.find(key).is_some()
    }

    /// Resets every slot, tombstones included, to `Empty`.
    pub fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.len = 0;
    }

    /// Deep copy of slots and metadata.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Keys in slot order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// `{ k1 k2 } : L.LL\n`, same as `Display`.
    pub fn traverse(&self) -> String {
        self.to_string()
    }

    /// One line per slot: `<index> | EMP`, `<index> | <key>` or
    /// `<index> | DEL`.
    pub fn describe(&self) -> Layout<'_, Self> {
        Layout(self)
    }

    fn grow(&mut self) -> Result<(), TableError> {
        let old_size = self.slots.len();
        let mut size = old_size;
        loop {
            size = self.growth.next(size).ok_or(TableError::AllocFailed {
                requested: usize::MAX,
            })?;
            if let Some(slots) = self.rehashed(size)? {
                log::debug!(
                    "probing set grew from {old_size} to {size} slots ({} keys)",
                    self.len
                );
                self.slots = slots;
                return Ok(());
            }
            log::trace!("rehash into {size} slots saturated a probe cycle");
        }
    }

    /// Places every occupied key into a fresh array of `size` slots.
    /// `None` if some key's probe cycle fills up.
    fn rehashed(&self, size: usize) -> Result<Option<Vec<Slot>>, TableError> {
        let mut slots = try_filled(size, Slot::Empty)?;
        for key in self.iter() {
            match Probe::new(key, size).find(|&i| slots[i] == Slot::Empty) {
                Some(i) => slots[i] = Slot::Occupied(key),
                None => return Ok(None),
            }
        }
        Ok(Some(slots))
    }

    /// Keys in `self` or `other`.
    pub fn union(&self, other: &Self) -> Result<Self, TableError> {
        let mut out = Self::with_room_for(self.len + other.len, self.growth)?;
        for key in self.iter().chain(other.iter()) {
            out.insert(key)?;
        }
        Ok(out)
    }

    /// Keys in both `self` and `other`.
    pub fn intersection(&self, other: &Self) -> Result<Self, TableError> {
        let mut out = Self::with_room_for(self.len.min(other.len), self.growth)?;
        for key in self.iter().filter(|&k| other.contains(k)) {
            out.insert(key)?;
        }
        Ok(out)
    }

    /// Keys in `self` but not in `other`.
    pub fn difference(&self, other: &Self) -> Result<Self, TableError> {
        let mut out = Self::with_room_for(self.len, self.growth)?;
        for key in self.iter().filter(|&k| !other.contains(k)) {
            out.insert(key)?;
        }
        Ok(out)
    }

    /// Keys in exactly one of `self` and `other`.
    pub fn symmetric_difference(&self, other: &Self) -> Result<Self, TableError> {
        let mut out = Self::with_room_for(self.len + other.len, self.growth)?;
        let left = self.iter().filter(|&k| !other.contains(k));
        let right = other.iter().filter(|&k| !self.contains(k));
        for key in left.chain(right) {
            out.insert(key)?;
        }
        Ok(out)
    }

    /// Same keys, regardless of capacity, layout or tombstones.
    pub fn is_equal(&self, other: &Self) -> bool {
        self.len == other.len && self.is_subset(other)
    }

    /// Every key of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len <= other.len && self.iter().all(|k| other.contains(k))
    }

    pub fn is_proper_subset(&self, other: &Self) -> bool {
        self.len < other.len && self.is_subset(other)
    }

    /// Every key of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    pub fn is_proper_superset(&self, other: &Self) -> bool {
        other.is_proper_subset(self)
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        let (small, large) = if self.len <= other.len {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().all(|k| !large.contains(k))
    }
}

impl PartialEq for ProbingSet {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for ProbingSet {}

/// Iterator over the keys of a `ProbingSet`.
pub struct Iter<'a> {
    slots: core::slice::Iter<'a, Slot>,
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        self.slots.find_map(|slot| match *slot {
            Slot::Occupied(k) => Some(k),
            Slot::Empty | Slot::Deleted => None,
        })
    }
}

impl<'a> IntoIterator for &'a ProbingSet {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl fmt::Display for ProbingSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_traversal(f, self.iter(), self.load_factor())
    }
}

impl Describe for ProbingSet {
    fn write_layout(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{index} | EMP")?,
                Slot::Occupied(k) => writeln!(f, "{index} | {k}")?,
                Slot::Deleted => writeln!(f, "{index} | DEL")?,
            }
        }
        Ok(())
    }
}
