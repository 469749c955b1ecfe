//! keyset: single-threaded, in-memory associative containers keyed by
//! strings or small integers.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small family of containers with all-or-nothing failure
//!   semantics, where each layer can be reasoned about on its own.
//! - Layers:
//!   - Set<T>: unordered unique `(key, item)` pairs; owns a private copy
//!     of every key, linear lookup over a linked list of arena nodes.
//!   - Hashtable<T, S>: a fixed array of Set buckets; hashes the key once
//!     with `S: BuildHasher` (Jenkins one-at-a-time by default) and
//!     forwards the operation to `slots[hash % nslots]`.
//!   - Counters: unordered `(usize key, usize count)` pairs with the same
//!     list layout as Set and no hashing layer.
//!
//! Constraints
//! - Single-threaded, synchronous; no internal locking.
//! - Unique keys; duplicate inserts fail and leave the container untouched.
//! - Failed operations never mutate: node room is reserved and the key
//!   copied before anything is linked in, and allocation failure is
//!   reported (`AllocFailed`, `AllocError`, or 0 from `Counters::add`).
//! - The slot count is fixed at construction; no resizing or rehashing.
//!
//! Ownership
//! - Set owns its key copies; Hashtable owns its slot array and every
//!   bucket. Items are stored as given: use `T = &'a X` to keep items
//!   owned by the caller, or hand owned items back through `delete_with`.
//! - Teardown is either `Drop` (items dropped in place, which for `&X`
//!   leaves the referent untouched) or `delete_with`, which passes each
//!   item to the caller's destructor exactly once.
//!
//! Notes and non-goals
//! - No removal of individual entries, only whole-container teardown.
//! - No ordering guarantees beyond "grouped by slot" for Hashtable.
//! - `Counters::get` returns 0 both for a stored zero and for an absent
//!   key; `Counters::contains_key` distinguishes the two.
//! - `print` output is a debugging aid, not a serialization format.
//!
//! Logging
//! - Construction and failure paths emit `tracing` events (`debug` for
//!   table construction, `trace` for duplicate rejection, `warn` for
//!   allocation failure). The library installs no subscriber.

mod containers_proptest;
pub mod counters;
pub mod error;
pub mod hashtable;
pub mod jenkins;
pub mod set;
mod test_support;

// Public surface
pub use counters::Counters;
pub use error::{AllocError, InsertError, NewError};
pub use hashtable::Hashtable;
pub use jenkins::{BuildJenkins, JenkinsHasher};
pub use set::Set;
