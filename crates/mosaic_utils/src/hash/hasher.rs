//! `FixedHasher` and `NoOpHasher`.
//!
//! `FixedHasher` is `foldhash` with a fixed seed, so results depend only on
//! the input. `NoOpHasher` passes a `u64` straight through and is meant for
//! keys that are already well-distributed small integers.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::FixedState;

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6D6F736169635F68);

/// The hasher produced by [`FixedHashState`].
pub type FixedHasher = <FixedState as BuildHasher>::Hasher;

/// A build-hasher with a fixed seed: equal inputs always produce equal
/// hashes, across runs and across maps.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use mosaic_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one(3u64);
/// let b = FixedHashState.hash_one(3u64);
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// A hasher that passes the value through untouched.
///
/// `write_u64` assigns directly. The byte fallback folds input bytes in
/// reverse with a rotate so that a single `write_u32(n)` and `write_u64(n)`
/// agree, which keeps differently-width id types compatible.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.hash = i as u64;
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Build-hasher for [`NoOpHasher`].
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use mosaic_utils::hash::NoOpHashState;
///
/// assert_eq!(NoOpHashState.hash_one(3u64), 3);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use super::{FixedHashState, NoOpHashState};

    #[test]
    fn fixed_state_is_deterministic() {
        assert_eq!(
            FixedHashState.hash_one("archetype"),
            FixedHashState.hash_one("archetype"),
        );
    }

    #[test]
    fn noop_passes_through() {
        assert_eq!(NoOpHashState.hash_one(7u64), 7);
        assert_eq!(NoOpHashState.hash_one(7u32), 7);
    }
}
