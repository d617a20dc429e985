//! Compact index types used as node links inside the queue arenas.

use core::hash::Hash;
use std::fmt::Debug;

/// An integer type used as a **singly-linked-list node index**.
///
/// Nodes are addressed by their slot in an arena rather than by pointer. The all-ones
/// value is reserved as [`IndexType::NONE`], so a `u8` store can address at most 255
/// slots.
pub trait IndexType: Copy + Eq + Hash + Debug + 'static {
    /// Sentinel value indicating "no node" (the end of the list).
    const NONE: Self;

    /// Converts this index to a `usize` for slot access.
    fn as_usize(self) -> usize;

    /// Converts a slot position to this compact type.
    ///
    /// Returns `None` when `i` does not fit or would collide with [`IndexType::NONE`].
    fn try_from_usize(i: usize) -> Option<Self>;

    /// Returns true if this is the end-of-list sentinel.
    #[inline(always)]
    fn is_none(self) -> bool {
        self == Self::NONE
    }
}

macro_rules! impl_index_type {
    ($($t:ty),*) => {
        $(
            impl IndexType for $t {
                const NONE: Self = <$t>::MAX;
                #[inline(always)]
                fn as_usize(self) -> usize {
                    self as usize
                }
                #[inline(always)]
                fn try_from_usize(i: usize) -> Option<Self> {
                    <$t>::try_from(i).ok().filter(|&v| v != Self::NONE)
                }
            }
        )*
    };
}

impl_index_type!(u8, u16, u32);

#[cfg(test)]
mod tests {
    use super::*;

    fn test_index_type<I: IndexType>(max_valid: usize) {
        let zero = I::try_from_usize(0).unwrap();
        assert_eq!(zero.as_usize(), 0);
        assert!(!zero.is_none());

        let ten = I::try_from_usize(10).unwrap();
        assert_eq!(ten.as_usize(), 10);

        let last = I::try_from_usize(max_valid).unwrap();
        assert_eq!(last.as_usize(), max_valid);

        // The sentinel itself is never handed out as a slot index.
        assert_eq!(I::try_from_usize(max_valid + 1), None);
        assert!(I::NONE.is_none());
        assert_eq!(I::NONE.as_usize(), max_valid + 1);
    }

    #[test]
    fn test_u8_index() {
        test_index_type::<u8>(254);
        assert_eq!(u8::try_from_usize(1000), None);
    }

    #[test]
    fn test_u16_index() {
        test_index_type::<u16>(65534);
    }

    #[test]
    fn test_u32_index() {
        test_index_type::<u32>(u32::MAX as usize - 1);
    }
}
