use core::fmt::{Debug, Display};
use core::hash::Hash;

use mosaic_utils::num::NonMaxU32;

// -----------------------------------------------------------------------------
// ArcheId

/// Unique identifier for an [`Archetype`] — equivalently, for one unique
/// component signature.
///
/// [`Archetype`]: super::Archetype
#[derive(Copy, Clone, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ArcheId(NonMaxU32);

impl ArcheId {
    /// The reserved archetype holding component-less entities.
    pub const EMPTY: ArcheId = ArcheId(NonMaxU32::ZERO);

    #[inline(always)]
    pub(crate) const fn new(id: u32) -> Self {
        Self(NonMaxU32::new(id).expect("too many archetypes"))
    }

    /// Returns the archetype index as a usize.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0.get() as usize
    }
}

impl Debug for ArcheId {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0.get(), f)
    }
}

impl Display for ArcheId {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0.get(), f)
    }
}

impl Hash for ArcheId {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        // The pass-through hasher wants the logical value.
        state.write_u32(self.0.get());
    }
}

impl PartialEq for ArcheId {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for ArcheId {}

// -----------------------------------------------------------------------------
// ArcheRow

/// Row position within an archetype's entity vector.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ArcheRow(pub u32);

impl ArcheRow {
    /// Returns the row as a usize.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Debug for ArcheRow {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for ArcheRow {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Hash for ArcheRow {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0);
    }
}
