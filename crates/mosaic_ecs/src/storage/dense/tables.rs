use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use mosaic_utils::hash::HashMap;

use super::{Table, TableBuilder, TableId};
use crate::component::{ComponentId, Components};

// -----------------------------------------------------------------------------
// Tables

/// Registry of all tables, interned by their sorted component id set.
///
/// The empty table (no columns) is reserved at [`TableId::EMPTY`] and holds
/// every entity with no table components. Tables are never destroyed.
pub struct Tables {
    tables: Vec<Table>,
    mapper: HashMap<Box<[ComponentId]>, TableId>,
}

impl Debug for Tables {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.tables.iter().enumerate())
            .finish()
    }
}

impl Tables {
    /// Creates the registry with the empty table seeded at id 0.
    pub(crate) fn new() -> Self {
        let mut tables: Vec<Table> = Vec::new();
        let mut mapper: HashMap<Box<[ComponentId]>, TableId> = HashMap::default();

        tables.push(TableBuilder::new().build());
        mapper.insert(Box::new([]), TableId::EMPTY);

        Tables { tables, mapper }
    }

    /// Returns the number of tables, the empty table included.
    #[inline]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Always at least one: the empty table exists from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the table with the given id, if it exists.
    #[inline(always)]
    pub fn get(&self, id: TableId) -> Option<&Table> {
        self.tables.get(id.index())
    }

    /// Returns the table with the given id, mutably, if it exists.
    #[inline(always)]
    pub fn get_mut(&mut self, id: TableId) -> Option<&mut Table> {
        self.tables.get_mut(id.index())
    }

    /// Returns the table with the given id without bounds checking.
    ///
    /// # Safety
    /// `id` must have been handed out by this registry.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, id: TableId) -> &Table {
        debug_assert!(id.index() < self.tables.len());
        unsafe { self.tables.get_unchecked(id.index()) }
    }

    /// Returns the table with the given id, mutably, without bounds
    /// checking.
    ///
    /// # Safety
    /// `id` must have been handed out by this registry.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, id: TableId) -> &mut Table {
        debug_assert!(id.index() < self.tables.len());
        unsafe { self.tables.get_unchecked_mut(id.index()) }
    }

    /// Returns two distinct tables mutably at once, as migration needs a
    /// source and a destination.
    ///
    /// # Panics
    /// Panics if `a == b` or either id is out of range.
    pub fn get_2_mut(&mut self, a: TableId, b: TableId) -> (&mut Table, &mut Table) {
        assert!(a != b, "source and destination table must differ");
        if a.index() < b.index() {
            let (head, tail) = self.tables.split_at_mut(b.index());
            (&mut head[a.index()], &mut tail[0])
        } else {
            let (head, tail) = self.tables.split_at_mut(a.index());
            (&mut tail[0], &mut head[b.index()])
        }
    }

    /// Returns the id of the table exactly matching the component set.
    #[inline]
    pub fn get_id(&self, components: &[ComponentId]) -> Option<TableId> {
        self.mapper.get(components).copied()
    }

    /// Interns a table for the given sorted component set, creating it on
    /// first sight.
    ///
    /// # Safety
    /// `idents` must be sorted, duplicate-free, and registered in
    /// `components`.
    pub(crate) unsafe fn register(
        &mut self,
        components: &Components,
        idents: &[ComponentId],
    ) -> TableId {
        debug_assert!(idents.is_sorted());

        if let Some(&id) = self.mapper.get(idents) {
            return id;
        }

        let table_id = TableId::new(self.tables.len() as u32);
        let mut builder = TableBuilder::new();

        for &id in idents {
            unsafe {
                let info = components.get_unchecked(id);
                builder.insert(id, info.layout(), info.dropper());
            }
        }

        self.tables.push(builder.build());
        self.mapper.insert(Box::from(idents), table_id);

        table_id
    }
}
