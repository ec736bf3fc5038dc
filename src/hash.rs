//! Integer hash used to pick a key's home slot.

/// MurmurHash3 32-bit finalizer.
///
/// Deterministic avalanche mix with good average-case spread; not
/// collision resistant. Slot placement depends on these exact constants.
#[inline]
pub const fn fmix32(key: u32) -> u32 {
    let mut h = key;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
