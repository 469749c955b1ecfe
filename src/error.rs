//! Error types shared by the containers.

use thiserror::Error;

/// Failure of `Set::insert` / `Hashtable::insert`. The container is left
/// exactly as it was before the call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum InsertError {
    /// An entry with an identical key is already stored.
    #[error("key already present")]
    DuplicateKey,
    /// The entry node or the private key copy could not be allocated.
    #[error("allocation failed while inserting")]
    AllocFailed,
}

/// Failure of `Hashtable::new` / `Hashtable::with_hasher`. No partially
/// built table is ever returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum NewError {
    #[error("slot count must be at least 1")]
    ZeroSlots,
    #[error("allocation failed for {0} slots")]
    AllocFailed(usize),
}

/// Allocation failure while growing a `Counters`. The counters are left
/// exactly as they were before the call.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("allocation failed")]
pub struct AllocError;
