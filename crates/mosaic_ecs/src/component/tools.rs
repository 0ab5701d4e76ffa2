//! Bundle resolution and bundle writing.
//!
//! [`ComponentCollector`] runs at bundle registration: it resolves each
//! member type to its [`ComponentId`] in declaration order and partitions
//! the set by storage class. [`ComponentWriter`] runs on every spawn and
//! insert: it routes each erased member value into the destination table
//! column or sparse set.

use alloc::vec::Vec;
use core::any::TypeId;

use mosaic_ptr::OwningPtr;
use mosaic_utils::hash::SparseHashSet;

use crate::component::{Component, ComponentId, ComponentStorage, Components};
use crate::entity::Entity;
use crate::storage::{Maps, Table, TableRow};
use crate::utils::DebugCheckedUnwrap;

// -----------------------------------------------------------------------------
// ComponentCollector

/// Resolves a bundle's member types at registration time.
///
/// A bundle listing the same component twice is malformed; collection
/// panics rather than silently deduplicating.
pub struct ComponentCollector<'a> {
    components: &'a mut Components,
    declaration: Vec<ComponentId>,
    storages: Vec<ComponentStorage>,
    collected: SparseHashSet<ComponentId>,
}

/// The outcome of collecting one bundle type.
pub struct CollectResult {
    /// Member ids in declaration order.
    pub components: Vec<ComponentId>,
    /// Storage classes parallel to `components`.
    pub storages: Vec<ComponentStorage>,
    /// The table members, sorted.
    pub table: Vec<ComponentId>,
    /// The sparse members, sorted.
    pub sparse: Vec<ComponentId>,
}

impl<'a> ComponentCollector<'a> {
    #[inline]
    pub(crate) fn new(components: &'a mut Components) -> Self {
        ComponentCollector {
            components,
            declaration: Vec::new(),
            storages: Vec::new(),
            collected: SparseHashSet::default(),
        }
    }

    /// Registers member type `T` and records it.
    ///
    /// # Panics
    /// Panics when the bundle already listed `T`.
    #[inline(never)]
    pub fn collect<T: Component>(&mut self) {
        let id = self.components.register::<T>();
        if !self.collected.insert(id) {
            panic!(
                "bundle has duplicate component {}",
                core::any::type_name::<T>(),
            );
        }
        self.declaration.push(id);
        self.storages.push(T::STORAGE);
    }

    /// Finishes collection, producing the declaration-order lists plus the
    /// sorted per-storage partitions.
    pub(crate) fn finish(self) -> CollectResult {
        let mut table = Vec::new();
        let mut sparse = Vec::new();

        for (&id, storage) in self.declaration.iter().zip(&self.storages) {
            match storage {
                ComponentStorage::Table => table.push(id),
                ComponentStorage::Sparse => sparse.push(id),
            }
        }
        table.sort_unstable();
        sparse.sort_unstable();

        CollectResult {
            components: self.declaration,
            storages: self.storages,
            table,
            sparse,
        }
    }
}

// -----------------------------------------------------------------------------
// ComponentWriter

/// Writes one bundle's member values into their destination slots.
///
/// The writer owns the erased bundle value; each member is taken at its
/// field offset and moved into either the destination table column or the
/// component's sparse set. Members listed in `existing` already have a live
/// slot (the entity carried them before the operation), so their write is a
/// replace; everything else is a fresh push.
pub struct ComponentWriter<'a> {
    data: OwningPtr<'a>,
    components: &'a Components,
    maps: &'a mut Maps,
    table: &'a mut Table,
    entity: Entity,
    table_row: TableRow,
    existing: &'a [ComponentId],
}

impl ComponentWriter<'_> {
    /// # Safety
    /// - `data` must own a value of the bundle type being written.
    /// - `table` must be the destination table and `table_row` the entity's
    ///   freshly allocated (or, for an identity transition, current) row.
    /// - `existing` must be sorted and list exactly the bundle members
    ///   whose destination slots are already initialized.
    pub(crate) unsafe fn new<'a>(
        data: OwningPtr<'a>,
        components: &'a Components,
        maps: &'a mut Maps,
        table: &'a mut Table,
        entity: Entity,
        table_row: TableRow,
        existing: &'a [ComponentId],
    ) -> ComponentWriter<'a> {
        ComponentWriter {
            data,
            components,
            maps,
            table,
            entity,
            table_row,
            existing,
        }
    }

    /// Moves the member of type `T` at `offset` bytes into the bundle value
    /// to its destination.
    ///
    /// # Safety
    /// - `T` must be a member of the bundle being written and `offset` its
    ///   field offset.
    /// - Each member must be written exactly once.
    #[inline(never)]
    pub unsafe fn write<T: Component>(&mut self, offset: usize) {
        // SAFETY: collection registered every member type.
        let id = unsafe {
            self.components
                .get_id(TypeId::of::<T>())
                .debug_checked_unwrap()
        };

        let mut data = self.data.borrow_mut();
        // SAFETY: `offset` stays inside the bundle value; ownership of the
        // field transfers to the destination slot.
        let value = unsafe { data.byte_add(offset).promote() };

        match T::STORAGE {
            ComponentStorage::Table => unsafe {
                if self.existing.binary_search(&id).is_ok() {
                    self.table.replace_value(id, self.table_row, value);
                } else {
                    self.table.push_value(id, value);
                }
            },
            ComponentStorage::Sparse => unsafe {
                // The sparse set resolves present-vs-absent itself.
                let map = self.maps.get_by_component_mut(id).debug_checked_unwrap();
                map.insert(self.entity, value);
            },
        }
    }
}
