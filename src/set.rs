//! Set: unordered collection of unique `(string key, item)` pairs.
//!
//! Entries live in a `SlotMap` arena and are threaded into a singly linked
//! list from `head`; new entries are linked in at the head. The Set owns
//! a private copy of every key. Items are stored as given: instantiate
//! `T = &'a X` to keep them owned by the caller.

use crate::error::InsertError;
use core::fmt;
use slotmap::{DefaultKey, SlotMap};
use std::io;

#[derive(Debug)]
struct Node<T> {
    key: String,
    item: T,
    next: Option<DefaultKey>,
}

pub struct Set<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
}

/// Iterator over the entries of a `Set`, newest first.
pub struct Iter<'a, T> {
    nodes: &'a SlotMap<DefaultKey, Node<T>>,
    cur: Option<DefaultKey>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a str, &'a T);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cur?)?;
        self.cur = node.next;
        Some((node.key.as_str(), &node.item))
    }
}

impl<T> Set<T> {
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

    fn find_node(&self, key: &str) -> Option<DefaultKey> {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = self.nodes.get(k)?;
            if node.key == key {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    /// Insert `item` under a private copy of `key`.
    ///
    /// Fails without touching the Set when `key` is already present or
    /// either the entry node or the key copy cannot be allocated.
    pub fn insert(&mut self, key: &str, item: T) -> Result<(), InsertError> {
        if self.find_node(key).is_some() {
            tracing::trace!(key, "duplicate key rejected");
            return Err(InsertError::DuplicateKey);
        }
        // Room for the node first, so a failed key copy has nothing to undo.
        if self.nodes.try_reserve(1).is_err() {
            tracing::warn!(len = self.nodes.len(), "entry node allocation failed");
            return Err(InsertError::AllocFailed);
        }
        let key = key_copy(key)?;
        let node = Node {
            key,
            item,
            next: self.head,
        };
        self.head = Some(self.nodes.insert(node));
        Ok(())
    }

    pub fn find(&self, key: &str) -> Option<&T> {
        let k = self.find_node(key)?;
        self.nodes.get(k).map(|n| &n.item)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut T> {
        let k = self.find_node(key)?;
        self.nodes.get_mut(k).map(|n| &mut n.item)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_node(key).is_some()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: &self.nodes,
            cur: self.head,
        }
    }

    /// Call `visit` once per entry, in `iter()` order.
    pub fn iterate<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &T),
    {
        for (k, v) in self.iter() {
            visit(k, v);
        }
    }

    /// Write `{a, b, c}` to `w`, where each element is rendered by
    /// `item_print` from the entry's key and item.
    pub fn print<W, F>(&self, w: &mut W, mut item_print: F) -> io::Result<()>
    where
        W: io::Write + ?Sized,
        F: FnMut(&mut W, &str, &T) -> io::Result<()>,
    {
        w.write_all(b"{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                w.write_all(b", ")?;
            }
            item_print(&mut *w, k, v)?;
        }
        w.write_all(b"}")
    }

    /// Tear the Set down, handing every item to `item_delete` once.
    pub fn delete_with<F>(mut self, mut item_delete: F)
    where
        F: FnMut(T),
    {
        let mut cur = self.head.take();
        while let Some(k) = cur {
            let Some(node) = self.nodes.remove(k) else {
                break;
            };
            cur = node.next;
            item_delete(node.item);
        }
    }
}

impl<T> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = (&'a str, &'a T);
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Copy `key` into a buffer the Set owns, surfacing allocation failure.
fn key_copy(key: &str) -> Result<String, InsertError> {
    let mut copy = String::new();
    if copy.try_reserve_exact(key.len()).is_err() {
        tracing::warn!(len = key.len(), "key copy allocation failed");
        return Err(InsertError::AllocFailed);
    }
    copy.push_str(key);
    Ok(copy)
}
