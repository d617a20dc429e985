//! Free-function interface where the queue itself may be absent.
//!
//! Every function takes `Option<&mut StringQueue<S>>` (or `Option<&StringQueue<S>>`) and
//! treats `None` as an empty queue: mutators report `false` or do nothing, [`size`]
//! reports `0`. Errors from the queue are collapsed to `false`.
//!
//! ```rust
//! use string_queue::api;
//!
//! let mut q = api::new();
//! assert!(api::insert_tail(q.as_mut(), "a"));
//! assert!(api::insert_head(q.as_mut(), "b"));
//! assert_eq!(api::size(q.as_ref()), 2);
//!
//! let mut buf = [0u8; 8];
//! assert!(api::remove_head(q.as_mut(), Some(&mut buf[..])));
//! assert_eq!(&buf[..2], b"b\0");
//!
//! api::free(q);
//! assert!(!api::remove_head::<string_queue::HeapStore>(None, None));
//! ```

use crate::queue::StringQueue;
use crate::store::{HeapStore, NodeStore};

/// Creates an empty heap-backed queue.
///
/// An empty queue owns no heap memory, so this never returns `None`.
pub fn new() -> Option<StringQueue<HeapStore>> {
    Some(StringQueue::new())
}

/// Releases the queue and every string it still holds. `None` is a no-op.
pub fn free<S: NodeStore>(q: Option<StringQueue<S>>) {
    if let Some(mut q) = q {
        q.clear();
    }
}

/// Inserts a copy of `s` at the head. `false` if `q` is absent or allocation failed.
pub fn insert_head<S: NodeStore>(q: Option<&mut StringQueue<S>>, s: &str) -> bool {
    q.is_some_and(|q| q.insert_head(s).is_ok())
}

/// Inserts a copy of `s` at the tail. `false` if `q` is absent or allocation failed.
pub fn insert_tail<S: NodeStore>(q: Option<&mut StringQueue<S>>, s: &str) -> bool {
    q.is_some_and(|q| q.insert_tail(s).is_ok())
}

/// Removes the head element, copying it into `out` as a NUL-terminated byte string
/// truncated to `out.len() - 1` bytes. `false` if `q` is absent or empty.
pub fn remove_head<S: NodeStore>(q: Option<&mut StringQueue<S>>, out: Option<&mut [u8]>) -> bool {
    q.is_some_and(|q| q.remove_head_into(out))
}

/// Number of elements, `0` if `q` is absent.
pub fn size<S: NodeStore>(q: Option<&StringQueue<S>>) -> usize {
    q.map_or(0, StringQueue::len)
}

/// Reverses the queue in place. No effect if `q` is absent.
pub fn reverse<S: NodeStore>(q: Option<&mut StringQueue<S>>) {
    if let Some(q) = q {
        q.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(q: &mut Option<StringQueue>) -> Vec<String> {
        let mut out = Vec::new();
        let mut buf = [0u8; 16];
        while remove_head(q.as_mut(), Some(&mut buf[..])) {
            let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
            out.push(String::from_utf8(buf[..end].to_vec()).unwrap());
        }
        out
    }

    #[test]
    fn test_api_absent_queue() {
        assert!(!insert_head::<HeapStore>(None, "a"));
        assert!(!insert_tail::<HeapStore>(None, "a"));
        let mut buf = [b'z'; 4];
        assert!(!remove_head::<HeapStore>(None, Some(&mut buf[..])));
        assert_eq!(buf, [b'z'; 4]);
        assert_eq!(size::<HeapStore>(None), 0);
        reverse::<HeapStore>(None);
        free::<HeapStore>(None);
    }

    #[test]
    fn test_api_scenario() {
        let mut q = new();
        assert!(q.is_some());
        assert_eq!(size(q.as_ref()), 0);

        assert!(insert_tail(q.as_mut(), "a"));
        assert!(insert_tail(q.as_mut(), "b"));
        assert!(insert_head(q.as_mut(), "c"));
        assert_eq!(size(q.as_ref()), 3);

        reverse(q.as_mut());
        let mut buf = [0u8; 8];
        assert!(remove_head(q.as_mut(), Some(&mut buf[..])));
        assert_eq!(&buf[..2], b"b\0");
        assert_eq!(size(q.as_ref()), 2);

        assert_eq!(drain(&mut q), ["a", "c"]);
        assert!(!remove_head(q.as_mut(), None));
        free(q);
    }

    #[test]
    fn test_api_remove_truncates() {
        let mut q = new();
        assert!(insert_head(q.as_mut(), "hello"));
        let mut buf = [0xffu8; 3];
        assert!(remove_head(q.as_mut(), Some(&mut buf[..])));
        assert_eq!(&buf, b"he\0");
        assert_eq!(size(q.as_ref()), 0);
    }

    #[test]
    fn test_api_remove_without_buffer() {
        let mut q = new();
        assert!(insert_tail(q.as_mut(), "x"));
        assert!(remove_head(q.as_mut(), None));
        assert_eq!(size(q.as_ref()), 0);
    }

    #[cfg(feature = "heapless")]
    #[test]
    fn test_api_allocation_failure() {
        use crate::store::HeaplessStore;

        let mut q = Some(StringQueue::<HeaplessStore<1>>::with_store());
        assert!(insert_tail(q.as_mut(), "a"));
        assert!(!insert_tail(q.as_mut(), "b"));
        assert!(!insert_head(q.as_mut(), "c"));
        assert_eq!(size(q.as_ref()), 1);
        assert_eq!(q.as_ref().and_then(|q| q.front()), Some("a"));
        free(q);
    }
}
