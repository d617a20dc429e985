//! # String Queue
//!
//! A queue of owned strings over a singly-linked list, supporting both FIFO and LIFO
//! disciplines.
//!
//! [`StringQueue`] inserts at the head or the tail in O(1), removes from the head in
//! O(1) and reverses in place without allocating. The O(1) append comes from a
//! [`TailLocator`] that always names the link slot holding the end-of-list marker.
//!
//! ## Key Features
//!
//! * **Index-linked nodes:** Nodes live in an arena and link to each other by index, so
//!   there are no self-referential pointers and teardown is iterative.
//! * **Fallible allocation:** Inserts report [`QueueError`] instead of aborting, and a
//!   failed insert leaves the queue untouched.
//! * **Stack or heap nodes:** [`HeapStore`] grows on the heap; `HeaplessStore<N>`
//!   (feature `heapless`, on by default) keeps up to `N` nodes inline.
//! * **Absent-queue API:** [`api`] mirrors the classic nullable-pointer interface.
//!
//! ## Examples
//!
//! ```rust
//! use string_queue::StringQueue;
//!
//! let mut q = StringQueue::new();
//! q.insert_tail("a").unwrap();
//! q.insert_tail("b").unwrap();
//! q.insert_head("c").unwrap();
//! assert_eq!(q.iter().collect::<Vec<_>>(), ["c", "a", "b"]);
//!
//! q.reverse();
//! assert_eq!(q.remove_head().as_deref(), Some("b"));
//! assert_eq!(q.size(), 2);
//! ```
//!
//! ### Fixed capacity
//!
//! ```rust
//! # #[cfg(feature = "heapless")]
//! # {
//! use string_queue::{HeaplessStore, QueueError, StringQueue};
//!
//! let mut q: StringQueue<HeaplessStore<2>> = StringQueue::with_store();
//! q.insert_tail("a").unwrap();
//! q.insert_tail("b").unwrap();
//! assert_eq!(q.insert_tail("c"), Err(QueueError::CapacityExhausted { capacity: 2 }));
//! assert_eq!(q.size(), 2);
//! # }
//! ```

// --- Module Declarations ---

pub mod api;
pub mod error;
pub mod queue;
pub mod store;
pub mod utils;

// --- Re-exports ---

pub use error::QueueError;
pub use queue::{AnyStringQueue, Iter, StringQueue, TailLocator};
#[cfg(feature = "heapless")]
pub use store::HeaplessStore;
pub use store::{HeapStore, Node, NodeStore};
pub use utils::IndexType;
