//! Errors reported by the non-panicking constructors and inserts.

/// Rejected table capacity.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum CapacityError {
    #[error("capacity must be a non-zero power of two, got {capacity}")]
    NotPowerOfTwo { capacity: u32 },
}

/// Failure of `AtomicIntMap::try_insert`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum InsertError {
    /// Key 0 marks an empty slot and cannot be stored.
    #[error("key 0 is reserved for empty slots")]
    ZeroKey,
    /// Every slot holds some other key.
    #[error("table is full (capacity: {capacity})")]
    TableFull { capacity: u32 },
}
