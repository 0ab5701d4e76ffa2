use core::fmt::{Debug, Display};
use core::hash::Hash;

use mosaic_utils::num::NonMaxU32;

// -----------------------------------------------------------------------------
// MapId

/// Unique identifier for one [`ComponentSparseSet`] — equivalently, for one
/// sparse-stored component type that has storage prepared.
///
/// [`ComponentSparseSet`]: super::ComponentSparseSet
#[derive(Copy, Clone, PartialOrd, Ord)]
#[repr(transparent)]
pub struct MapId(NonMaxU32);

impl MapId {
    #[inline]
    pub(crate) const fn new(id: u32) -> Self {
        Self(NonMaxU32::new(id).expect("too many sparse sets"))
    }

    /// Returns the set index as a usize.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0.get() as usize
    }
}

impl Debug for MapId {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for MapId {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Hash for MapId {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.get());
    }
}

impl PartialEq for MapId {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for MapId {}

// -----------------------------------------------------------------------------
// MapRow

/// Dense row position inside a [`ComponentSparseSet`].
///
/// [`ComponentSparseSet`]: super::ComponentSparseSet
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct MapRow(pub u32);

impl MapRow {
    /// Returns the row as a usize.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Debug for MapRow {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for MapRow {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Hash for MapRow {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0);
    }
}
