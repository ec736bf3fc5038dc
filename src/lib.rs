//! atomic-int-map: a fixed-capacity, lock-free hash map from non-zero `u32`
//! keys to `u32` values, shared across threads without locks.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: the smallest table that lets many threads insert, update and
//!   look up integer pairs concurrently with no locks and no allocation
//!   after construction.
//! - Layers:
//!   - `fmix32`: MurmurHash3 finalizer picking each key's home slot.
//!   - `Slot`: an `AtomicU32` key and an `AtomicU32` value, updated
//!     independently.
//!   - `Probe`: linear probe over every slot once, starting at home.
//!   - `AtomicIntMap`: public API over a `Box<[Slot]>`.
//!
//! Constraints
//! - Capacity is a power of two, fixed at construction; the table never
//!   grows. Indexing uses `hash & (capacity - 1)`.
//! - Key 0 marks an empty slot and is rejected by `insert`/`get`.
//! - No removal: a slot goes from empty to occupied once and stays that
//!   way until `clear`.
//! - The table must never fill up. `insert` assumes a free slot exists
//!   (debug builds panic when it does not); `try_insert` reports
//!   `InsertError::TableFull` instead.
//!
//! Memory ordering
//! - Every access is `Relaxed`. The key CAS (0 -> key) is the only
//!   arbitration point: exactly one thread installs a given key in a
//!   given slot, and racing writers of the same key converge on it.
//! - Key and value are not published together. A reader can see a key
//!   whose value is still 0 because the inserting thread has not stored
//!   it yet. Callers that need "key visible implies value visible" must
//!   synchronize externally.
//! - Racing writers to one key: the last value store wins.
//!
//! Value 0
//! - `get` returns 0 for absent keys, so a stored 0 is indistinguishable
//!   from absence. `snapshot`/`iter` skip slots whose value is 0 for the
//!   same reason, even though `insert(k, 0)` is accepted.
//!
//! Clearing
//! - `clear` takes `&mut self`, so the borrow checker guarantees no other
//!   operation is in flight.

mod atomic_int_map;
mod error;
pub mod hash;
mod probe;
mod slot;

// Public surface
pub use atomic_int_map::{AtomicIntMap, Iter};
pub use error::{CapacityError, InsertError};
