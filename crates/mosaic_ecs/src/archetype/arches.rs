#![allow(clippy::len_without_is_empty, reason = "internal registry")]

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Debug;

use mosaic_utils::hash::{HashMap, SparseHashMap};

use crate::archetype::{ArcheId, Archetype};
use crate::component::ComponentId;
use crate::storage::{TableCol, TableId};

// -----------------------------------------------------------------------------
// Archetypes

/// The registry of every archetype, plus the component index.
///
/// Lookup paths:
/// - by [`ArcheId`] (primary, dense);
/// - by exact signature (the interning map, hit only when an edge misses);
/// - by component, through the **component index**: for each component id,
///   every archetype containing it, mapped to the component's column in
///   that archetype's table — or `None` when the component is
///   sparse-stored there.
///
/// The empty archetype is seeded at id 0. Archetypes are never destroyed;
/// one that loses its last entity stays registered and keeps its edges.
pub struct Archetypes {
    arches: Vec<Archetype>,
    precise_map: HashMap<Arc<[ComponentId]>, ArcheId>,
    component_index: Vec<SparseHashMap<ArcheId, Option<TableCol>>>,
}

impl Debug for Archetypes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.arches, f)
    }
}

impl Archetypes {
    /// Creates the registry with the empty archetype seeded at id 0.
    pub(crate) fn new() -> Self {
        let mut val = Archetypes {
            arches: Vec::new(),
            precise_map: HashMap::default(),
            component_index: Vec::new(),
        };

        let empty: Arc<[ComponentId]> = Arc::new([]);
        let arche = unsafe { Archetype::new(ArcheId::EMPTY, TableId::EMPTY, 0, empty.clone()) };
        val.arches.push(arche);
        val.precise_map.insert(empty, ArcheId::EMPTY);

        val
    }

    /// Returns the number of archetypes, the empty one included.
    #[inline]
    pub fn len(&self) -> usize {
        self.arches.len()
    }

    /// Returns the archetype with the given id, if it exists.
    #[inline]
    pub fn get(&self, id: ArcheId) -> Option<&Archetype> {
        self.arches.get(id.index())
    }

    /// Returns the archetype with the given id, mutably, if it exists.
    #[inline]
    pub fn get_mut(&mut self, id: ArcheId) -> Option<&mut Archetype> {
        self.arches.get_mut(id.index())
    }

    /// Returns the archetype with the given id without bounds checking.
    ///
    /// # Safety
    /// `id` must have been handed out by this registry.
    #[inline]
    pub unsafe fn get_unchecked(&self, id: ArcheId) -> &Archetype {
        debug_assert!(id.index() < self.arches.len());
        unsafe { self.arches.get_unchecked(id.index()) }
    }

    /// Returns the archetype with the given id, mutably, without bounds
    /// checking.
    ///
    /// # Safety
    /// `id` must have been handed out by this registry.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, id: ArcheId) -> &mut Archetype {
        debug_assert!(id.index() < self.arches.len());
        unsafe { self.arches.get_unchecked_mut(id.index()) }
    }

    /// Finds the archetype id for an exact signature.
    #[inline]
    pub fn get_id(&self, components: &[ComponentId]) -> Option<ArcheId> {
        self.precise_map.get(components).copied()
    }

    /// Interns a new archetype for a signature.
    ///
    /// Updates the component index: table components record their column
    /// position, sparse components record `None`.
    ///
    /// # Safety
    /// - The signature must not already have an archetype.
    /// - `components` must be sorted and duplicate-free within each half,
    ///   and `table_id` must name a table whose columns equal the prefix.
    pub(crate) unsafe fn register(
        &mut self,
        table_id: TableId,
        table_len: usize,
        components: Arc<[ComponentId]>,
    ) -> ArcheId {
        #[cold]
        #[inline(never)]
        fn resize_component_index(
            index: &mut Vec<SparseHashMap<ArcheId, Option<TableCol>>>,
            len: usize,
        ) {
            index.resize_with(len, SparseHashMap::default);
        }

        let arche_id = ArcheId::new(self.arches.len() as u32);
        let arche = unsafe { Archetype::new(arche_id, table_id, table_len, components.clone()) };
        self.arches.push(arche);

        for (position, &component) in components.iter().enumerate() {
            if component.index() >= self.component_index.len() {
                resize_component_index(&mut self.component_index, component.index() + 1);
            }

            // The table's columns are created in the same sorted order as
            // the signature prefix, so the prefix position is the column.
            let column = (position < table_len).then(|| TableCol(position as u32));
            self.component_index[component.index()].insert(arche_id, column);
        }

        self.precise_map.insert(components, arche_id);

        arche_id
    }

    /// Enumerates every archetype containing `component`, with the
    /// component's table column there (`None` when sparse-stored).
    pub fn archetypes_with(
        &self,
        component: ComponentId,
    ) -> impl Iterator<Item = (ArcheId, Option<TableCol>)> + '_ {
        self.component_index
            .get(component.index())
            .into_iter()
            .flat_map(|map| map.iter().map(|(&arche, &col)| (arche, col)))
    }

    /// Looks up the component index entry for `(component, archetype)`.
    ///
    /// Outer `None`: the archetype does not contain the component. Inner
    /// `None`: it does, in sparse storage.
    #[inline]
    pub fn component_column(
        &self,
        component: ComponentId,
        arche_id: ArcheId,
    ) -> Option<Option<TableCol>> {
        self.component_index
            .get(component.index())?
            .get(&arche_id)
            .copied()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use super::Archetypes;
    use crate::archetype::ArcheId;
    use crate::component::ComponentId;
    use crate::storage::{TableCol, TableId};

    fn ids(raw: &[u32]) -> Arc<[ComponentId]> {
        raw.iter().map(|&i| ComponentId::new(i)).collect()
    }

    #[test]
    fn empty_archetype_is_seeded() {
        let archetypes = Archetypes::new();
        assert_eq!(archetypes.len(), 1);
        assert_eq!(archetypes.get_id(&[]), Some(ArcheId::EMPTY));

        let empty = archetypes.get(ArcheId::EMPTY).unwrap();
        assert_eq!(empty.table_id(), TableId::EMPTY);
        assert!(empty.components().is_empty());
    }

    #[test]
    fn register_updates_component_index() {
        let mut archetypes = Archetypes::new();
        let signature = ids(&[0, 2, 5]);

        // Components 0 and 2 are table-stored, 5 is sparse.
        let arche_id =
            unsafe { archetypes.register(TableId::new(1), 2, signature.clone()) };

        assert_eq!(archetypes.get_id(&signature), Some(arche_id));
        assert_eq!(
            archetypes.component_column(ComponentId::new(0), arche_id),
            Some(Some(TableCol(0))),
        );
        assert_eq!(
            archetypes.component_column(ComponentId::new(2), arche_id),
            Some(Some(TableCol(1))),
        );
        assert_eq!(
            archetypes.component_column(ComponentId::new(5), arche_id),
            Some(None),
        );
        assert_eq!(
            archetypes.component_column(ComponentId::new(1), arche_id),
            None,
        );
    }

    #[test]
    fn archetypes_with_lists_every_holder() {
        let mut archetypes = Archetypes::new();
        let a = unsafe { archetypes.register(TableId::new(1), 1, ids(&[0])) };
        let b = unsafe { archetypes.register(TableId::new(2), 2, ids(&[0, 1])) };

        let mut holders: Vec<_> = archetypes
            .archetypes_with(ComponentId::new(0))
            .map(|(id, _)| id)
            .collect();
        holders.sort();
        assert_eq!(holders, [a, b]);
    }
}
