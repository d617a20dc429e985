//! Node arenas backing [`StringQueue`](crate::StringQueue).
//!
//! Nodes are addressed by slot index instead of by pointer, the same way the `heapless`
//! LRU caches of this crate family thread their lists through `nexts` arrays. Vacant
//! slots form a free list (`free_head -> next_free -> ... -> NONE`) so a removed node's
//! slot is reused before the arena grows.
//!
//! - [`HeapStore`]: growable `Vec` arena with `u32` links. Growth goes through
//!   `try_reserve`, so allocator failure is reported instead of aborting.
//! - [`HeaplessStore`]: fixed-capacity `heapless::Vec` arena that lives inline. Running
//!   out of slots is reported as an allocation failure.

use core::mem;

use crate::error::QueueError;
use crate::utils::IndexType;

/// One queue element: an owned copy of the inserted string and the link to its successor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<I> {
    pub(crate) value: Box<str>,
    pub(crate) next: I,
}

impl<I: IndexType> Node<I> {
    pub(crate) fn new(value: Box<str>, next: I) -> Self {
        Self { value, next }
    }

    /// The stored string.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Index of the successor, or `I::NONE` at the end of the list.
    pub fn next(&self) -> I {
        self.next
    }
}

#[derive(Debug, Clone)]
enum Slot<I> {
    Occupied(Node<I>),
    Vacant { next_free: I },
}

/// Storage abstraction over node arenas.
///
/// A store only owns nodes; the list order is kept by the `next` links and the queue's
/// head and tail locator.
pub trait NodeStore: Default {
    type Index: IndexType;

    /// Number of occupied slots.
    fn live(&self) -> usize;

    /// Moves `node` into a vacant slot and returns its index.
    ///
    /// On failure `node` is dropped and the store is unchanged.
    fn try_insert(&mut self, node: Node<Self::Index>) -> Result<Self::Index, QueueError>;

    /// Vacates the slot at `idx`, returning the node that lived there.
    fn remove(&mut self, idx: Self::Index) -> Option<Node<Self::Index>>;

    fn get(&self, idx: Self::Index) -> Option<&Node<Self::Index>>;

    fn get_mut(&mut self, idx: Self::Index) -> Option<&mut Node<Self::Index>>;

    /// Drops every node and forgets the free list.
    fn clear(&mut self);

    #[inline]
    fn node(&self, idx: Self::Index) -> &Node<Self::Index> {
        match self.get(idx) {
            Some(node) => node,
            None => unreachable!("dangling node index {:?}", idx),
        }
    }

    #[inline]
    fn node_mut(&mut self, idx: Self::Index) -> &mut Node<Self::Index> {
        match self.get_mut(idx) {
            Some(node) => node,
            None => unreachable!("dangling node index {:?}", idx),
        }
    }
}

// --- Free-list helpers shared by both arenas ---

/// Pops the first vacant slot off the free list.
fn pop_free<I: IndexType>(slots: &[Slot<I>], free_head: &mut I) -> Option<I> {
    if free_head.is_none() {
        return None;
    }
    let idx = *free_head;
    match slots.get(idx.as_usize()) {
        Some(Slot::Vacant { next_free }) => {
            *free_head = *next_free;
            Some(idx)
        }
        _ => unreachable!("free list points at an occupied slot"),
    }
}

/// Vacates `idx` and pushes it onto the free list.
fn release<I: IndexType>(slots: &mut [Slot<I>], free_head: &mut I, idx: I) -> Option<Node<I>> {
    let slot = slots.get_mut(idx.as_usize())?;
    if let Slot::Vacant { .. } = slot {
        return None;
    }
    match mem::replace(slot, Slot::Vacant { next_free: *free_head }) {
        Slot::Occupied(node) => {
            *free_head = idx;
            Some(node)
        }
        Slot::Vacant { .. } => unreachable!(),
    }
}

fn occupied<I>(slot: Option<&Slot<I>>) -> Option<&Node<I>> {
    match slot {
        Some(Slot::Occupied(node)) => Some(node),
        _ => None,
    }
}

fn occupied_mut<I>(slot: Option<&mut Slot<I>>) -> Option<&mut Node<I>> {
    match slot {
        Some(Slot::Occupied(node)) => Some(node),
        _ => None,
    }
}

// --- HeapStore ---

/// A growable node arena on the heap, linked with `u32` indices.
#[derive(Debug, Clone)]
pub struct HeapStore {
    slots: Vec<Slot<u32>>,
    free_head: u32,
    live: usize,
}

impl HeapStore {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: u32::NONE,
            live: 0,
        }
    }

    /// Number of slots allocated so far, occupied or vacant.
    pub fn slots(&self) -> usize {
        self.slots.len()
    }
}

impl Default for HeapStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeStore for HeapStore {
    type Index = u32;

    #[inline]
    fn live(&self) -> usize {
        self.live
    }

    fn try_insert(&mut self, node: Node<u32>) -> Result<u32, QueueError> {
        if let Some(idx) = pop_free(&self.slots, &mut self.free_head) {
            self.slots[idx.as_usize()] = Slot::Occupied(node);
            self.live += 1;
            return Ok(idx);
        }

        let idx = u32::try_from_usize(self.slots.len()).ok_or(QueueError::IndexOverflow)?;
        self.slots
            .try_reserve(1)
            .map_err(|_| QueueError::OutOfMemory {
                bytes: mem::size_of::<Slot<u32>>(),
            })?;
        self.slots.push(Slot::Occupied(node));
        self.live += 1;
        Ok(idx)
    }

    fn remove(&mut self, idx: u32) -> Option<Node<u32>> {
        let node = release(&mut self.slots, &mut self.free_head, idx)?;
        self.live -= 1;
        Some(node)
    }

    #[inline]
    fn get(&self, idx: u32) -> Option<&Node<u32>> {
        occupied(self.slots.get(idx.as_usize()))
    }

    #[inline]
    fn get_mut(&mut self, idx: u32) -> Option<&mut Node<u32>> {
        occupied_mut(self.slots.get_mut(idx.as_usize()))
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free_head = u32::NONE;
        self.live = 0;
    }
}

// --- HeaplessStore ---

/// A fixed-capacity node arena stored inline (no heap allocation for the nodes).
///
/// `N` is the slot capacity. `I` is the link width; it must be able to address `N`
/// slots below its `NONE` sentinel (e.g. `N <= 255` for `u8`), otherwise inserts past
/// the addressable range fail with [`QueueError::IndexOverflow`].
///
/// The string payloads themselves are still heap copies.
#[cfg(feature = "heapless")]
#[derive(Debug, Clone)]
pub struct HeaplessStore<const N: usize, I: IndexType = u8> {
    slots: heapless::Vec<Slot<I>, N>,
    free_head: I,
    live: usize,
}

#[cfg(feature = "heapless")]
impl<const N: usize, I: IndexType> HeaplessStore<N, I> {
    pub fn new() -> Self {
        Self {
            slots: heapless::Vec::new(),
            free_head: I::NONE,
            live: 0,
        }
    }

    /// Maximum number of nodes this store can hold.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }
}

#[cfg(feature = "heapless")]
impl<const N: usize, I: IndexType> Default for HeaplessStore<N, I> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "heapless")]
impl<const N: usize, I: IndexType> NodeStore for HeaplessStore<N, I> {
    type Index = I;

    #[inline]
    fn live(&self) -> usize {
        self.live
    }

    fn try_insert(&mut self, node: Node<I>) -> Result<I, QueueError> {
        if let Some(idx) = pop_free(&self.slots, &mut self.free_head) {
            self.slots[idx.as_usize()] = Slot::Occupied(node);
            self.live += 1;
            return Ok(idx);
        }

        if self.slots.is_full() {
            return Err(QueueError::CapacityExhausted { capacity: N });
        }
        let idx = I::try_from_usize(self.slots.len()).ok_or(QueueError::IndexOverflow)?;
        if self.slots.push(Slot::Occupied(node)).is_err() {
            return Err(QueueError::CapacityExhausted { capacity: N });
        }
        self.live += 1;
        Ok(idx)
    }

    fn remove(&mut self, idx: I) -> Option<Node<I>> {
        let node = release(&mut self.slots, &mut self.free_head, idx)?;
        self.live -= 1;
        Some(node)
    }

    #[inline]
    fn get(&self, idx: I) -> Option<&Node<I>> {
        occupied(self.slots.get(idx.as_usize()))
    }

    #[inline]
    fn get_mut(&mut self, idx: I) -> Option<&mut Node<I>> {
        occupied_mut(self.slots.get_mut(idx.as_usize()))
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free_head = I::NONE;
        self.live = 0;
    }
}
