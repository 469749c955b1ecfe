//! Hashtable: a fixed array of `Set` buckets indexed by a string hash.
//!
//! The slot count is fixed at construction; there is no resizing and no
//! stored entry count. Every operation hashes the key once, picks
//! `slots[hash(key) % nslots]` and forwards to that bucket's `Set`, so
//! keys that collide are still stored as distinct entries.

use crate::error::{InsertError, NewError};
use crate::jenkins::{slot_of, BuildJenkins};
use crate::set::Set;
use core::fmt;
use core::hash::BuildHasher;
use std::io::{self, Write};

pub struct Hashtable<T, S = BuildJenkins> {
    hasher: S,
    slots: Box<[Set<T>]>,
}

impl<T> Hashtable<T> {
    /// Create a table of `nslots` empty buckets hashed with Jenkins
    /// one-at-a-time.
    pub fn new(nslots: usize) -> Result<Self, NewError> {
        Self::with_hasher(nslots, BuildJenkins)
    }
}

impl<T, S> Hashtable<T, S>
where
    S: BuildHasher,
{
    /// Create a table of `nslots` empty buckets using `hasher` to pick slots.
    ///
    /// Fails on `nslots == 0` or when the slot array cannot be allocated.
    /// Construction is all-or-nothing: on failure nothing is kept.
    pub fn with_hasher(nslots: usize, hasher: S) -> Result<Self, NewError> {
        if nslots == 0 {
            tracing::debug!("hashtable rejected: zero slots");
            return Err(NewError::ZeroSlots);
        }
        let mut slots = Vec::new();
        if slots.try_reserve_exact(nslots).is_err() {
            tracing::warn!(nslots, "slot array allocation failed");
            return Err(NewError::AllocFailed(nslots));
        }
        slots.extend(core::iter::repeat_with(Set::new).take(nslots));
        tracing::debug!(nslots, "hashtable created");
        Ok(Self {
            hasher,
            slots: slots.into_boxed_slice(),
        })
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The bucket `key` hashes to, in `[0, slot_count())`.
    pub fn slot_index(&self, key: &str) -> usize {
        slot_of(&self.hasher, key, self.slots.len())
    }

    /// Borrow bucket `i`, if it exists.
    pub fn slot(&self, i: usize) -> Option<&Set<T>> {
        self.slots.get(i)
    }

    /// Number of stored entries, summed over the buckets.
    pub fn len(&self) -> usize {
        self.slots.iter().map(Set::len).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Set::is_empty)
    }

    pub fn insert(&mut self, key: &str, item: T) -> Result<(), InsertError> {
        let i = self.slot_index(key);
        self.slots[i].insert(key, item)
    }

    pub fn find(&self, key: &str) -> Option<&T> {
        self.slots[self.slot_index(key)].find(key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut T> {
        let i = self.slot_index(key);
        self.slots[i].find_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.slots[self.slot_index(key)].contains_key(key)
    }
}

impl<T, S> Hashtable<T, S> {
    /// Entries grouped by bucket, buckets in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> + '_ {
        self.slots.iter().flat_map(Set::iter)
    }

    pub fn iterate<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &T),
    {
        for slot in self.slots.iter() {
            slot.iterate(&mut visit);
        }
    }

    /// Write one `Slot[i]: {...}` line per bucket, empty buckets included.
    pub fn print<W, F>(&self, w: &mut W, mut item_print: F) -> io::Result<()>
    where
        W: io::Write + ?Sized,
        F: FnMut(&mut W, &str, &T) -> io::Result<()>,
    {
        for (i, slot) in self.slots.iter().enumerate() {
            write!(w, "Slot[{}]: ", i)?;
            slot.print(&mut *w, &mut item_print)?;
            w.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Tear down every bucket, handing each item to `item_delete` once.
    pub fn delete_with<F>(self, mut item_delete: F)
    where
        F: FnMut(T),
    {
        for slot in self.slots.into_vec() {
            slot.delete_with(&mut item_delete);
        }
    }
}

impl<T: fmt::Debug, S> fmt::Debug for Hashtable<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hashtable")
            .field("slots", &self.slots)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ConstBuildHasher;
    use std::collections::BTreeSet;

    fn sample() -> Hashtable<i32> {
        let mut ht = Hashtable::new(5).unwrap();
        for i in 0..4 {
            ht.insert(&format!("key{}", i), i * 10).unwrap();
        }
        ht
    }

    #[test]
    fn zero_slots_rejected() {
        assert!(matches!(
            Hashtable::<i32>::new(0),
            Err(NewError::ZeroSlots)
        ));
    }

    /// Invariant: an unsatisfiable slot array fails cleanly instead of aborting.
    #[test]
    fn oversized_slot_array_fails() {
        assert!(matches!(
            Hashtable::<i32>::new(usize::MAX),
            Err(NewError::AllocFailed(n)) if n == usize::MAX
        ));
    }

    #[test]
    fn duplicate_rejected_and_find_works() {
        let mut ht = sample();
        let dup = 999;
        assert_eq!(ht.insert("key1", dup), Err(InsertError::DuplicateKey));
        assert_eq!(ht.find("key1"), Some(&10));
        assert_eq!(ht.find("key3"), Some(&30));
        assert!(ht.find("key4").is_none());
        assert_eq!(ht.len(), 4);
    }

    /// Invariant: one line per slot, empty slots rendered as `{}`.
    #[test]
    fn print_emits_one_line_per_slot() {
        let ht = sample();
        let mut out = Vec::new();
        ht.print(&mut out, |w, k, v| write!(w, "{}={}", k, v)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 5);
        assert_eq!(
            text,
            "Slot[0]: {}\n\
             Slot[1]: {key0=0}\n\
             Slot[2]: {key3=30, key2=20, key1=10}\n\
             Slot[3]: {}\n\
             Slot[4]: {}\n"
        );
    }

    /// Invariant: iteration is grouped by slot in ascending index order.
    #[test]
    fn iteration_is_slot_ordered() {
        let mut ht: Hashtable<usize> = Hashtable::new(7).unwrap();
        for i in 0..100 {
            ht.insert(&format!("k{}", i), i).unwrap();
        }
        let slots: Vec<usize> = ht.iter().map(|(k, _)| ht.slot_index(k)).collect();
        assert_eq!(slots.len(), 100);
        assert!(slots.windows(2).all(|w| w[0] <= w[1]));

        let mut seen = BTreeSet::new();
        ht.iterate(|k, _| assert!(seen.insert(k.to_string())));
        assert_eq!(seen.len(), 100);
    }

    /// Invariant: colliding keys stay distinct entries within one bucket.
    #[test]
    fn collisions_stay_distinct() {
        let mut ht: Hashtable<i32, ConstBuildHasher> =
            Hashtable::with_hasher(4, ConstBuildHasher).unwrap();
        ht.insert("a", 1).unwrap();
        ht.insert("b", 2).unwrap();
        assert_eq!(ht.find("a"), Some(&1));
        assert_eq!(ht.find("b"), Some(&2));
        assert_eq!(ht.slot(0).map(Set::len), Some(2));
        assert!((1..4).all(|i| ht.slot(i).is_some_and(Set::is_empty)));
        assert!(ht.slot(4).is_none());
    }

    #[test]
    fn jenkins_spreads_keys() {
        let mut ht: Hashtable<usize> = Hashtable::new(10).unwrap();
        for i in 0..1000 {
            ht.insert(&format!("key{}", i), i).unwrap();
        }
        for i in 0..ht.slot_count() {
            let n = ht.slot(i).map(Set::len).unwrap();
            assert!((50..=150).contains(&n), "slot {} holds {}", i, n);
        }
    }

    #[test]
    fn single_slot_behaves_like_a_set() {
        let mut ht: Hashtable<i32> = Hashtable::new(1).unwrap();
        ht.insert("x", 1).unwrap();
        ht.insert("y", 2).unwrap();
        assert_eq!(ht.slot_index("anything"), 0);
        assert_eq!(ht.slot(0).map(Set::len), Some(2));
    }

    #[test]
    fn delete_with_reaches_every_slot() {
        let mut ht: Hashtable<Box<usize>> = Hashtable::new(3).unwrap();
        for i in 0..20 {
            ht.insert(&format!("k{}", i), Box::new(i)).unwrap();
        }
        let mut freed = Vec::new();
        ht.delete_with(|b| freed.push(*b));
        freed.sort();
        assert_eq!(freed, (0..20).collect::<Vec<_>>());
    }
}
