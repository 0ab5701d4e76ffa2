//! The storage fabric: type-erased columns, paged sparse primitives, dense
//! tables, and per-component sparse sets.

mod column;
mod dense;
mod sparse;
mod sparse_comp;

pub use column::Column;

pub use sparse::{SparseArray, SparseIndex, SparseSet};

pub use dense::{Table, Tables};
pub use dense::{TableCol, TableId, TableRow};

pub use sparse_comp::{ComponentSparseSet, Maps};
pub use sparse_comp::{MapId, MapRow};

use crate::component::{ComponentInfo, ComponentStorage};

// -----------------------------------------------------------------------------
// Storages

/// The world's raw component storage: every table and every per-component
/// sparse set.
#[derive(Debug)]
pub struct Storages {
    pub tables: Tables,
    pub maps: Maps,
}

impl Storages {
    pub(crate) fn new() -> Storages {
        Storages {
            tables: Tables::new(),
            maps: Maps::new(),
        }
    }

    /// Makes sure the backing storage for a component exists.
    ///
    /// Tables are interned per component *set*, so only sparse components
    /// need per-component preparation.
    #[inline]
    pub fn prepare_component(&mut self, info: &ComponentInfo) {
        match info.storage() {
            ComponentStorage::Table => {}
            ComponentStorage::Sparse => {
                self.maps.prepare(info);
            }
        }
    }
}
