use core::fmt::{Debug, Display};
use core::hash::Hash;

use mosaic_utils::num::NonMaxU32;

// -----------------------------------------------------------------------------
// TableId

/// Unique identifier for a [`Table`] — equivalently, for one unique sorted
/// set of table-stored components.
///
/// Wraps a non-max u32 so `Option<TableId>` stays four bytes.
///
/// [`Table`]: super::Table
#[derive(Copy, Clone, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TableId(NonMaxU32);

impl TableId {
    /// The reserved table holding entities with no table components.
    pub const EMPTY: TableId = TableId(NonMaxU32::ZERO);

    /// Creates a new `TableId` from a raw index.
    ///
    /// # Panics
    /// Panics when the table count would exceed the id space.
    #[inline]
    pub(crate) const fn new(id: u32) -> Self {
        Self(NonMaxU32::new(id).expect("too many tables"))
    }

    /// Returns the table index as a usize.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0.get() as usize
    }
}

impl Debug for TableId {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for TableId {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Hash for TableId {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0.get());
    }
}

impl PartialEq for TableId {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for TableId {}

// -----------------------------------------------------------------------------
// TableRow

/// Row position within a table: the index of one entity in every column.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TableRow(pub u32);

impl TableRow {
    /// Returns the row as a usize.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Debug for TableRow {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for TableRow {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Hash for TableRow {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0);
    }
}

// -----------------------------------------------------------------------------
// TableCol

/// Column position within a table: the dense index of one component's
/// column.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TableCol(pub u32);

impl TableCol {
    /// Returns the column as a usize.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl Debug for TableCol {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.0, f)
    }
}

impl Display for TableCol {
    #[inline(always)]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Hash for TableCol {
    #[inline(always)]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.0);
    }
}
