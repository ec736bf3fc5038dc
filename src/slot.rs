//! Slot: one key cell and one value cell, each independently atomic.

use core::sync::atomic::{AtomicU32, Ordering};

/// Key reserved to mark an unoccupied slot.
pub(crate) const EMPTY: u32 = 0;

/// Outcome of trying to claim a slot for a key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Claim {
    /// The slot now belongs to the key (freshly installed or already held).
    Owned,
    /// The slot holds a different key.
    Taken,
}

/// The key and value are never updated as one transaction; a reader can see
/// a freshly installed key while the value is still 0.
#[derive(Debug)]
pub(crate) struct Slot {
    key: AtomicU32,
    value: AtomicU32,
}

impl Slot {
    pub(crate) const fn new() -> Self {
        Self {
            key: AtomicU32::new(EMPTY),
            value: AtomicU32::new(0),
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> u32 {
        self.key.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn value(&self) -> u32 {
        self.value.load(Ordering::Relaxed)
    }

    #[inline]
    pub(crate) fn store_value(&self, value: u32) {
        self.value.store(value, Ordering::Relaxed);
    }

    /// CAS the key from `EMPTY` to `key`. A slot already holding `key`
    /// counts as owned so that racing writers converge on one slot.
    #[inline]
    pub(crate) fn claim(&self, key: u32) -> Claim {
        debug_assert_ne!(key, EMPTY);
        match self
            .key
            .compare_exchange(EMPTY, key, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => Claim::Owned,
            Err(prev) if prev == key => Claim::Owned,
            Err(_) => Claim::Taken,
        }
    }

    /// Both fields when the slot holds a live entry (key and value non-zero).
    #[inline]
    pub(crate) fn entry(&self) -> Option<(u32, u32)> {
        let key = self.key();
        let value = self.value();
        (key != EMPTY && value != 0).then_some((key, value))
    }

    pub(crate) fn reset(&mut self) {
        // Exclusive access; plain relaxed stores are enough.
        self.key.store(EMPTY, Ordering::Relaxed);
        self.value.store(0, Ordering::Relaxed);
    }
}
