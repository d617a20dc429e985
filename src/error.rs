//! Error type shared by the queue and its node stores.

use thiserror::Error;

/// Reasons a queue operation can fail.
///
/// Insert failures are atomic: the queue is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The value copy or the node arena could not obtain memory.
    #[error("out of memory allocating {bytes} bytes")]
    OutOfMemory { bytes: usize },

    /// A fixed-capacity store has no vacant slot left.
    #[error("node store is full (capacity {capacity})")]
    CapacityExhausted { capacity: usize },

    /// The arena grew past what its index type can address.
    #[error("node index space exhausted")]
    IndexOverflow,

    /// A structural invariant does not hold. Only reported by `check_invariants`.
    #[error("queue invariant violated: {0}")]
    Corrupted(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            QueueError::OutOfMemory { bytes: 12 }.to_string(),
            "out of memory allocating 12 bytes"
        );
        assert_eq!(
            QueueError::CapacityExhausted { capacity: 4 }.to_string(),
            "node store is full (capacity 4)"
        );
        assert_eq!(
            QueueError::Corrupted("tail slot occupied").to_string(),
            "queue invariant violated: tail slot occupied"
        );
    }
}
