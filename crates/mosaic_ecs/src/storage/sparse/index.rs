/// A key type usable with the paged sparse containers.
///
/// Each id newtype implements this for itself, so a container instantiated
/// for one id type cannot be fed another even when both wrap the same
/// integer width.
pub trait SparseIndex: Copy {
    /// The position this key addresses.
    fn to_index(self) -> usize;
}

impl SparseIndex for usize {
    #[inline(always)]
    fn to_index(self) -> usize {
        self
    }
}

impl SparseIndex for u32 {
    #[inline(always)]
    fn to_index(self) -> usize {
        self as usize
    }
}
