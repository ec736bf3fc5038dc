//! AtomicIntMap: fixed-capacity open-addressed table of atomic slots.

use crate::error::{CapacityError, InsertError};
use crate::probe::{self, Probe};
use crate::slot::{Claim, Slot, EMPTY};
use core::fmt;

/// Concurrent map from non-zero `u32` keys to `u32` values.
///
/// `insert` is lock-free and `get` is wait-free; both take `&self`, so the
/// map can be shared across threads behind an `Arc` or a scoped borrow.
/// Capacity is fixed at construction and must be a power of two. The table
/// never grows and entries cannot be removed, so callers must size it to
/// keep at least one slot empty.
pub struct AtomicIntMap {
    slots: Box<[Slot]>,
    mask: u32,
}

impl AtomicIntMap {
    /// Create a table with `capacity` slots, all empty.
    ///
    /// # Panics
    /// If `capacity` is not a non-zero power of two.
    pub fn new(capacity: u32) -> Self {
        match Self::try_new(capacity) {
            Ok(map) => map,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn try_new(capacity: u32) -> Result<Self, CapacityError> {
        if !capacity.is_power_of_two() {
            return Err(CapacityError::NotPowerOfTwo { capacity });
        }
        let slots: Box<[Slot]> = (0..capacity).map(|_| Slot::new()).collect();
        tracing::debug!(capacity, "allocated atomic int map");
        Ok(Self {
            slots,
            mask: capacity - 1,
        })
    }

    /// Create a table with room for `expected` keys at a load factor of at
    /// most one half.
    ///
    /// # Panics
    /// If the required capacity does not fit in a `u32`.
    pub fn with_expected_keys(expected: u32) -> Self {
        let capacity = expected
            .checked_mul(2)
            .and_then(|n| n.max(1).checked_next_power_of_two())
            .unwrap_or_else(|| panic!("no u32 power-of-two capacity fits {expected} keys"));
        Self::new(capacity)
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.mask + 1
    }

    /// Insert `key` or overwrite its value.
    ///
    /// Concurrent writers to the same key land in the same slot; whichever
    /// value store runs last wins.
    ///
    /// # Panics
    /// If `key` is 0. In debug builds, also if every slot holds some other
    /// key; release builds keep probing in that case.
    pub fn insert(&self, key: u32, value: u32) {
        assert!(key != EMPTY, "key 0 is reserved for empty slots");
        loop {
            if self.insert_once(key, value).is_some() {
                return;
            }
            probe::full_cycle(self.capacity());
        }
    }

    /// Like `insert`, but reports key 0 and a full table instead of
    /// panicking or spinning.
    pub fn try_insert(&self, key: u32, value: u32) -> Result<(), InsertError> {
        if key == EMPTY {
            return Err(InsertError::ZeroKey);
        }
        match self.insert_once(key, value) {
            Some(()) => Ok(()),
            None => {
                let capacity = self.capacity();
                tracing::warn!(capacity, key, "atomic int map is full");
                Err(InsertError::TableFull { capacity })
            }
        }
    }

    // One pass over the probe sequence; `None` if no slot could be claimed.
    #[inline]
    fn insert_once(&self, key: u32, value: u32) -> Option<()> {
        for idx in Probe::new(key, self.mask) {
            let slot = &self.slots[idx];
            if slot.claim(key) == Claim::Owned {
                slot.store_value(value);
                return Some(());
            }
        }
        None
    }

    /// Value stored for `key`, or 0 if the key is absent.
    ///
    /// A key that was just installed by another thread may still read as 0
    /// until that thread's value store becomes visible.
    ///
    /// # Panics
    /// If `key` is 0.
    pub fn get(&self, key: u32) -> u32 {
        assert!(key != EMPTY, "key 0 is reserved for empty slots");
        for idx in Probe::new(key, self.mask) {
            let slot = &self.slots[idx];
            match slot.key() {
                k if k == key => return slot.value(),
                EMPTY => return 0,
                _ => {}
            }
        }
        0
    }

    /// Owned copy of all entries whose key and value are both non-zero, in
    /// slot order. Not atomic as a whole under concurrent writes.
    pub fn snapshot(&self) -> Vec<(u32, u32)> {
        let mut out: Vec<(u32, u32)> = self.iter().collect();
        out.shrink_to_fit();
        out
    }

    /// Lazy form of [`snapshot`](Self::snapshot).
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            it: self.slots.iter(),
        }
    }

    /// Number of slots holding a key, including keys whose value is 0.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.key() != EMPTY).count()
    }

    /// Reset every slot to empty. Needs exclusive access, so no other
    /// operation can be in flight.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.reset();
        }
        tracing::debug!(capacity = self.capacity(), "cleared atomic int map");
    }
}

impl fmt::Debug for AtomicIntMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomicIntMap")
            .field("capacity", &self.capacity())
            .field("occupied", &self.occupied())
            .finish()
    }
}

/// Iterator over live `(key, value)` pairs of an `AtomicIntMap`.
pub struct Iter<'a> {
    it: core::slice::Iter<'a, Slot>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (u32, u32);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.find_map(Slot::entry)
    }
}

impl<'a> IntoIterator for &'a AtomicIntMap {
    type Item = (u32, u32);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::fmix32;

    // First `n` keys whose home slot in a table of `capacity` is `home`.
    fn keys_homed_at(home: u32, capacity: u32, n: usize) -> Vec<u32> {
        (1..u32::MAX)
            .filter(|&k| fmix32(k) & (capacity - 1) == home)
            .take(n)
            .collect()
    }

    /// Invariant: keys sharing a home slot are placed in consecutive slots and
    /// each resolves to its own value.
    #[test]
    fn colliding_keys_probe_linearly() {
        let m = AtomicIntMap::new(16);
        let keys = keys_homed_at(3, 16, 3);
        for (i, &k) in keys.iter().enumerate() {
            m.insert(k, i as u32 + 100);
        }
        for (i, &k) in keys.iter().enumerate() {
            assert_eq!(m.get(k), i as u32 + 100);
        }
        let placed: Vec<u32> = m.snapshot().iter().map(|&(k, _)| k).collect();
        assert_eq!(placed, keys, "collisions fill slots 3, 4, 5 in order");
    }

    /// Invariant: the probe wraps from the last slot back to slot 0.
    #[test]
    fn collision_at_last_slot_wraps_to_front() {
        let m = AtomicIntMap::new(8);
        let keys = keys_homed_at(7, 8, 2);
        m.insert(keys[0], 1);
        m.insert(keys[1], 2);
        assert_eq!(m.slots[7].key(), keys[0]);
        assert_eq!(m.slots[0].key(), keys[1]);
        assert_eq!(m.get(keys[1]), 2);
    }

    /// Invariant: lookup stops at the first empty slot on the probe path.
    #[test]
    fn get_stops_at_empty_slot() {
        let m = AtomicIntMap::new(16);
        let keys = keys_homed_at(5, 16, 2);
        m.insert(keys[0], 9);
        assert_eq!(m.get(keys[1]), 0);
    }

    /// Invariant: an update reuses the key's slot instead of claiming another.
    #[test]
    fn update_keeps_single_slot() {
        let m = AtomicIntMap::new(32);
        m.insert(77, 1);
        m.insert(77, 2);
        m.insert(77, 3);
        assert_eq!(m.occupied(), 1);
        assert_eq!(m.get(77), 3);
    }

    /// Invariant: a lookup on a completely full table terminates.
    #[test]
    fn get_on_full_table_terminates() {
        let m = AtomicIntMap::new(4);
        for k in 1..=4 {
            m.try_insert(k, k).unwrap();
        }
        assert_eq!(m.occupied(), 4);
        assert_eq!(m.get(1_000), 0);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn insert_into_full_table_panics_in_debug() {
        let m = AtomicIntMap::new(2);
        m.insert(1, 1);
        m.insert(2, 2);
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| m.insert(3, 3)));
        assert!(res.is_err(), "expected full table to panic in debug builds");
        // Existing keys can still be updated.
        m.insert(1, 10);
        assert_eq!(m.get(1), 10);
    }

    /// Invariant: `Debug` shows capacity and occupancy, not slot contents.
    #[test]
    fn debug_output() {
        let m = AtomicIntMap::new(8);
        m.insert(1, 1);
        assert_eq!(
            format!("{m:?}"),
            "AtomicIntMap { capacity: 8, occupied: 1 }"
        );
    }
}
