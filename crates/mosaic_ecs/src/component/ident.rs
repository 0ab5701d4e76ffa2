use core::fmt::{Debug, Display};
use core::hash::Hash;

use mosaic_utils::num::NonMaxU32;

use crate::storage::SparseIndex;

// -----------------------------------------------------------------------------
// ComponentId

/// A unique identifier for a component type within one [`World`].
///
/// Ids are dense (assigned from a counter at first registration) and only
/// meaningful inside the world that assigned them. The non-max
/// representation makes `Option<ComponentId>` the same size as the id, so
/// "not registered yet" costs nothing to express.
///
/// [`World`]: crate::world::World
#[derive(Clone, Copy, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ComponentId(NonMaxU32);

impl ComponentId {
    #[inline]
    pub(crate) const fn new(id: u32) -> Self {
        Self(NonMaxU32::new(id).expect("too many components"))
    }

    /// Returns the id as a u32.
    #[inline(always)]
    pub const fn index_u32(self) -> u32 {
        self.0.get()
    }

    /// Returns the id as a usize.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0.get() as usize
    }
}

impl SparseIndex for ComponentId {
    #[inline(always)]
    fn to_index(self) -> usize {
        self.index()
    }
}

impl PartialEq for ComponentId {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for ComponentId {}

impl Hash for ComponentId {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        // The pass-through hasher wants the logical value, not the
        // XOR-encoded bits.
        state.write_u32(self.0.get());
    }
}

impl Debug for ComponentId {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.index_u32(), f)
    }
}

impl Display for ComponentId {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.index_u32(), f)
    }
}
