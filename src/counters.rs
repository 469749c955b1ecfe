//! Counters: unordered `(key, count)` pairs keyed by non-negative integers.
//!
//! Same arena-threaded list as `Set`, without key copies: keys and counts
//! are plain `usize`s stored by value. Growing the arena is the only
//! allocation and its failure is reported, never aborted on.

use crate::error::AllocError;
use core::fmt;
use slotmap::{DefaultKey, SlotMap};
use std::io::{self, Write};

#[derive(Debug)]
struct Counter {
    key: usize,
    count: usize,
    next: Option<DefaultKey>,
}

pub struct Counters {
    nodes: SlotMap<DefaultKey, Counter>,
    head: Option<DefaultKey>,
}

/// Iterator over `(key, count)` pairs, newest key first.
pub struct Iter<'a> {
    nodes: &'a SlotMap<DefaultKey, Counter>,
    cur: Option<DefaultKey>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, usize);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cur?)?;
        self.cur = node.next;
        Some((node.key, node.count))
    }
}

impl Counters {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn counter_mut(&mut self, key: usize) -> Option<&mut Counter> {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = self.nodes.get(k)?;
            if node.key == key {
                return self.nodes.get_mut(k);
            }
            cur = node.next;
        }
        None
    }

    fn push(&mut self, key: usize, count: usize) -> Result<(), AllocError> {
        if self.nodes.try_reserve(1).is_err() {
            tracing::warn!(key, "counter node allocation failed");
            return Err(AllocError);
        }
        let node = Counter {
            key,
            count,
            next: self.head,
        };
        self.head = Some(self.nodes.insert(node));
        Ok(())
    }

    /// Bump `key` by one, creating it at 1 when absent. Returns the new
    /// count, which saturates at `usize::MAX`, or 0 when a new entry could
    /// not be allocated.
    pub fn add(&mut self, key: usize) -> usize {
        if let Some(c) = self.counter_mut(key) {
            c.count = c.count.saturating_add(1);
            return c.count;
        }
        match self.push(key, 1) {
            Ok(()) => 1,
            Err(AllocError) => 0,
        }
    }

    /// Count for `key`, or 0 when `key` was never added. A stored zero
    /// reads the same as an absent key; use `contains_key` to tell them
    /// apart.
    pub fn get(&self, key: usize) -> usize {
        self.iter()
            .find(|&(k, _)| k == key)
            .map_or(0, |(_, count)| count)
    }

    /// Overwrite the count for `key`, creating the entry when absent.
    pub fn set(&mut self, key: usize, count: usize) -> Result<(), AllocError> {
        match self.counter_mut(key) {
            Some(c) => {
                c.count = count;
                Ok(())
            }
            None => self.push(key, count),
        }
    }

    pub fn contains_key(&self, key: usize) -> bool {
        self.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            cur: self.head,
        }
    }

    pub fn iterate<F>(&self, mut visit: F)
    where
        F: FnMut(usize, usize),
    {
        for (k, c) in self.iter() {
            visit(k, c);
        }
    }

    /// Write `{key=count, key=count}` to `w`.
    pub fn print<W>(&self, w: &mut W) -> io::Result<()>
    where
        W: Write + ?Sized,
    {
        w.write_all(b"{")?;
        for (i, (k, c)) in self.iter().enumerate() {
            if i > 0 {
                w.write_all(b", ")?;
            }
            write!(w, "{}={}", k, c)?;
        }
        w.write_all(b"}")
    }
}

impl Default for Counters {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Counters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
