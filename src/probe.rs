//! Linear probe sequence and the debug-only saturation guard.
//!
//! A `Probe` visits every slot of the table exactly once, starting at the
//! key's home slot and wrapping at the end. Callers that must keep looking
//! after a full cycle (the unbounded `insert`) report the cycle through
//! `full_cycle`: in debug builds that panics, in release builds it is a
//! no-op and the caller starts over.

use crate::hash::fmix32;

/// Cursor over the slot indices probed for one key.
#[derive(Clone, Debug)]
pub(crate) struct Probe {
    idx: u32,
    mask: u32,
    remaining: u32,
}

impl Probe {
    /// `mask` is `capacity - 1` for a power-of-two capacity.
    #[inline]
    pub(crate) fn new(key: u32, mask: u32) -> Self {
        Self {
            idx: fmix32(key) & mask,
            mask,
            remaining: mask.wrapping_add(1),
        }
    }
}

impl Iterator for Probe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let idx = self.idx;
        self.idx = idx.wrapping_add(1) & self.mask;
        Some(idx as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Probe {}

/// Called when a probe wrapped all the way around without finding a slot.
#[inline]
pub(crate) fn full_cycle(capacity: u32) {
    #[cfg(debug_assertions)]
    {
        panic!("table is full: every one of {capacity} slots holds another key");
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = capacity;
        core::hint::spin_loop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: the probe starts at the home slot and visits every index once.
    #[test]
    fn visits_every_slot_once_from_home() {
        let mask = 15;
        let key = 42;
        let seq: Vec<usize> = Probe::new(key, mask).collect();
        assert_eq!(seq.len(), 16);
        assert_eq!(seq[0], (fmix32(key) & mask) as usize);
        let mut sorted = seq.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }

    /// Invariant: indices advance by one and wrap to zero after the last slot.
    #[test]
    fn wraps_around() {
        let mask = 7;
        let seq: Vec<usize> = Probe::new(10, mask).collect();
        for w in seq.windows(2) {
            assert_eq!(w[1], (w[0] + 1) & mask as usize);
        }
    }

    /// Invariant: a single-slot table probes exactly index 0.
    #[test]
    fn single_slot_table() {
        let seq: Vec<usize> = Probe::new(123, 0).collect();
        assert_eq!(seq, vec![0]);
    }

    /// Invariant: the largest power-of-two capacity does not overflow the count.
    #[test]
    fn largest_capacity_length() {
        let p = Probe::new(1, (1u32 << 31) - 1);
        assert_eq!(p.len(), 1usize << 31);
    }

    #[cfg(debug_assertions)]
    #[test]
    fn full_cycle_panics_in_debug() {
        let res = std::panic::catch_unwind(|| full_cycle(4));
        assert!(res.is_err(), "expected saturation to panic in debug builds");
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn full_cycle_noop_in_release() {
        full_cycle(4);
    }
}
