//! Singly-linked string queue with O(1) insertion at both ends.
//!
//! Provides [`StringQueue`], a FIFO/LIFO container of owned strings, and
//! [`AnyStringQueue`], an object-safe trait over it and `VecDeque<String>`.
//!
//! # Tail locator
//! Appending to a singly-linked list in O(1) needs to know which link slot currently
//! holds the end-of-list marker: the queue's own `head` when empty, otherwise the `next`
//! of the last node. [`TailLocator`] names that slot explicitly, so the empty and
//! non-empty cases share one append path and no sentinel node is needed.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, trace};

use crate::error::QueueError;
use crate::store::{HeapStore, Node, NodeStore};
use crate::utils::IndexType;

/// A trait for abstraction over different string queue types.
pub trait AnyStringQueue {
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn push_front_str(&mut self, s: &str) -> Result<(), QueueError>;
    fn push_back_str(&mut self, s: &str) -> Result<(), QueueError>;
    fn pop_front_string(&mut self) -> Option<String>;
    fn front_str(&self) -> Option<&str>;
    fn reverse(&mut self);
    fn clear(&mut self);
}

impl AnyStringQueue for VecDeque<String> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push_front_str(&mut self, s: &str) -> Result<(), QueueError> {
        self.push_front(s.to_owned());
        Ok(())
    }
    fn push_back_str(&mut self, s: &str) -> Result<(), QueueError> {
        self.push_back(s.to_owned());
        Ok(())
    }
    fn pop_front_string(&mut self) -> Option<String> {
        self.pop_front()
    }
    fn front_str(&self) -> Option<&str> {
        self.front().map(String::as_str)
    }
    fn reverse(&mut self) {
        self.make_contiguous().reverse();
    }
    fn clear(&mut self) {
        self.clear();
    }
}

/// The link slot that must be written to append a new last node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailLocator<I> {
    /// The queue's `head` link (the queue is empty).
    AtHead,
    /// The `next` link of the node at this index (the current last node).
    AfterNode(I),
}

/// A queue of owned strings over a singly-linked list.
///
/// # Overview
/// Nodes live in a [`NodeStore`] arena and are linked by index. Inserting at either end
/// and removing from the head are O(1); [`reverse`](Self::reverse) relinks the existing
/// nodes in place.
///
/// # Invariants
/// * `len == 0` iff `head` is `NONE`.
/// * Following `next` from `head` exactly `len` times reaches the slot named by `tail`,
///   and that slot holds `NONE`.
/// * The store holds exactly `len` live nodes.
pub struct StringQueue<S: NodeStore = HeapStore> {
    store: S,
    head: S::Index,
    tail: TailLocator<S::Index>,
    len: usize,
}

impl StringQueue<HeapStore> {
    /// Creates a new empty heap-backed queue. Allocates nothing.
    pub fn new() -> Self {
        Self::with_store()
    }
}

impl<S: NodeStore> StringQueue<S> {
    /// Creates a new empty queue over a default-constructed store.
    pub fn with_store() -> Self {
        Self {
            store: S::default(),
            head: S::Index::NONE,
            tail: TailLocator::AtHead,
            len: 0,
        }
    }

    // --- Inspection ---

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Same as [`len`](Self::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn front(&self) -> Option<&str> {
        if self.head.is_none() {
            None
        } else {
            Some(self.store.node(self.head).value())
        }
    }

    pub fn back(&self) -> Option<&str> {
        match self.tail {
            TailLocator::AtHead => None,
            TailLocator::AfterNode(idx) => Some(self.store.node(idx).value()),
        }
    }

    #[inline]
    pub fn tail_locator(&self) -> TailLocator<S::Index> {
        self.tail
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Modification ---

    /// Inserts a copy of `s` at the head.
    ///
    /// On failure the queue is left exactly as it was.
    pub fn insert_head(&mut self, s: &str) -> Result<(), QueueError> {
        let idx = self.alloc_node(s, self.head)?;

        self.head = idx;
        if self.len == 0 {
            self.tail = TailLocator::AfterNode(idx);
        }
        self.len += 1;
        Ok(())
    }

    /// Inserts a copy of `s` at the tail.
    ///
    /// On failure the queue is left exactly as it was.
    pub fn insert_tail(&mut self, s: &str) -> Result<(), QueueError> {
        let idx = self.alloc_node(s, S::Index::NONE)?;

        *self.link_mut(self.tail) = idx;
        self.tail = TailLocator::AfterNode(idx);
        self.len += 1;
        Ok(())
    }

    /// Removes the head node and returns its string, or `None` if the queue is empty.
    pub fn remove_head(&mut self) -> Option<String> {
        if self.len == 0 {
            return None;
        }
        let node = self.unlink_head();
        Some(node.value.into_string())
    }

    /// Removes the head node, copying its string into `out` as a NUL-terminated byte
    /// string.
    ///
    /// At most `out.len() - 1` bytes are copied; the remainder of the buffer is filled
    /// with NUL. Truncation is silent. Returns `false` without touching the queue when it
    /// is empty.
    ///
    /// An empty buffer receives nothing: the node is still removed and `true` returned.
    pub fn remove_head_into(&mut self, out: Option<&mut [u8]>) -> bool {
        if self.len == 0 {
            return false;
        }
        let node = self.unlink_head();
        if let Some(buf) = out {
            copy_truncated(&node.value, buf);
        }
        true
    }

    /// Reverses the order of the elements in place.
    ///
    /// No node is allocated or freed; only the links are rewritten.
    ///
    /// # Pseudo Code:
    /// ```text
    /// if len <= 1: return
    /// prev = head
    /// tail = AfterNode(head)        // before head.next is overwritten
    /// cur = head.next; head.next = NONE
    /// while cur != NONE:
    ///     next = cur.next
    ///     cur.next = prev
    ///     prev = cur
    ///     cur = next
    /// head = prev
    /// ```
    pub fn reverse(&mut self) {
        if self.len <= 1 {
            return;
        }
        trace!(len = self.len, "reversing queue");

        let mut prev = self.head;
        self.tail = TailLocator::AfterNode(prev);
        let mut cur = core::mem::replace(&mut self.store.node_mut(prev).next, S::Index::NONE);
        while !cur.is_none() {
            let next = core::mem::replace(&mut self.store.node_mut(cur).next, prev);
            prev = cur;
            cur = next;
        }
        self.head = prev;
    }

    /// Removes every element, front to back.
    pub fn clear(&mut self) {
        while self.len > 0 {
            drop(self.unlink_head());
        }
        self.store.clear();
    }

    // --- Validation ---

    /// Walks the list and checks every structural invariant.
    pub fn check_invariants(&self) -> Result<(), QueueError> {
        if (self.len == 0) != self.head.is_none() {
            return Err(QueueError::Corrupted("head does not match length"));
        }
        if self.store.live() != self.len {
            return Err(QueueError::Corrupted("store holds nodes outside the list"));
        }

        let mut slot = TailLocator::AtHead;
        let mut cur = self.head;
        for _ in 0..self.len {
            let node = self
                .store
                .get(cur)
                .ok_or(QueueError::Corrupted("link points at a vacant slot"))?;
            slot = TailLocator::AfterNode(cur);
            cur = node.next;
        }

        if !cur.is_none() {
            return Err(QueueError::Corrupted("list is longer than its length"));
        }
        if slot != self.tail {
            return Err(QueueError::Corrupted("tail locator is not the last link"));
        }
        Ok(())
    }

    // --- Internals ---

    /// Copies `s` into a new node linked to `next`. Nothing is linked into the list yet.
    fn alloc_node(&mut self, s: &str, next: S::Index) -> Result<S::Index, QueueError> {
        copy_value(s)
            .and_then(|value| self.store.try_insert(Node::new(value, next)))
            .inspect_err(|err| debug!(len = s.len(), %err, "node allocation failed"))
    }

    /// The link slot named by `loc`.
    fn link_mut(&mut self, loc: TailLocator<S::Index>) -> &mut S::Index {
        match loc {
            TailLocator::AtHead => &mut self.head,
            TailLocator::AfterNode(idx) => &mut self.store.node_mut(idx).next,
        }
    }

    /// Detaches the head node. Caller guarantees `len > 0`.
    fn unlink_head(&mut self) -> Node<S::Index> {
        let node = match self.store.remove(self.head) {
            Some(node) => node,
            None => unreachable!("non-empty queue with vacant head"),
        };
        self.head = node.next;
        self.len -= 1;
        if self.len == 0 {
            self.tail = TailLocator::AtHead;
        }
        node
    }
}

/// Copies `s` into a fresh exact-size allocation, reporting allocator failure.
fn copy_value(s: &str) -> Result<Box<str>, QueueError> {
    let mut buf = String::new();
    buf.try_reserve_exact(s.len())
        .map_err(|_| QueueError::OutOfMemory { bytes: s.len() })?;
    buf.push_str(s);
    Ok(buf.into_boxed_str())
}

/// Writes `value` into `buf` as a NUL-terminated byte string, truncating to fit.
fn copy_truncated(value: &str, buf: &mut [u8]) {
    let Some(room) = buf.len().checked_sub(1) else {
        return;
    };
    let n = value.len().min(room);
    buf[..n].copy_from_slice(&value.as_bytes()[..n]);
    buf[n..].fill(0);
}

// --- Iterators ---

/// Front-to-back iterator over a [`StringQueue`].
pub struct Iter<'a, S: NodeStore> {
    store: &'a S,
    cur: S::Index,
    remaining: usize,
}

impl<'a, S: NodeStore> Iterator for Iter<'a, S> {
    type Item = &'a str;
    fn next(&mut self) -> Option<&'a str> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.store.node(self.cur);
        self.cur = node.next;
        self.remaining -= 1;
        Some(node.value())
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<S: NodeStore> ExactSizeIterator for Iter<'_, S> {}

impl<S: NodeStore> StringQueue<S> {
    pub fn iter(&self) -> Iter<'_, S> {
        Iter {
            store: &self.store,
            cur: self.head,
            remaining: self.len,
        }
    }
}

impl<'a, S: NodeStore> IntoIterator for &'a StringQueue<S> {
    type Item = &'a str;
    type IntoIter = Iter<'a, S>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// --- Traits ---

impl<S: NodeStore> AnyStringQueue for StringQueue<S> {
    fn len(&self) -> usize {
        self.len()
    }
    fn push_front_str(&mut self, s: &str) -> Result<(), QueueError> {
        self.insert_head(s)
    }
    fn push_back_str(&mut self, s: &str) -> Result<(), QueueError> {
        self.insert_tail(s)
    }
    fn pop_front_string(&mut self) -> Option<String> {
        self.remove_head()
    }
    fn front_str(&self) -> Option<&str> {
        self.front()
    }
    fn reverse(&mut self) {
        self.reverse();
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<S: NodeStore> Drop for StringQueue<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<S: NodeStore + Clone> Clone for StringQueue<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            head: self.head,
            tail: self.tail,
            len: self.len,
        }
    }
}

impl<S: NodeStore> fmt::Debug for StringQueue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Default for StringQueue<HeapStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: NodeStore, T: NodeStore> PartialEq<StringQueue<T>> for StringQueue<S> {
    fn eq(&self, other: &StringQueue<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<S: NodeStore> Eq for StringQueue<S> {}

// --- Tests ---
