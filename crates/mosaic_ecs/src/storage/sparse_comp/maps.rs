use alloc::vec::Vec;
use core::fmt::Debug;

use super::{ComponentSparseSet, MapId};
use crate::component::{ComponentId, ComponentInfo, Components};
use crate::storage::SparseArray;

// -----------------------------------------------------------------------------
// Maps

/// Registry of every per-component sparse set.
///
/// Each sparse-stored component gets one [`ComponentSparseSet`], created
/// lazily the first time the component participates in an archetype. The
/// component-to-set mapping is itself a paged sparse array keyed by the
/// dense component id.
pub struct Maps {
    maps: Vec<ComponentSparseSet>,
    mapper: SparseArray<ComponentId, MapId, 256>,
}

impl Debug for Maps {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.maps.iter().enumerate()).finish()
    }
}

impl Maps {
    /// Creates an empty registry.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            maps: Vec::new(),
            mapper: SparseArray::new(),
        }
    }

    /// Returns the set with the given id, if it exists.
    #[inline(always)]
    pub fn get(&self, id: MapId) -> Option<&ComponentSparseSet> {
        self.maps.get(id.index())
    }

    /// Returns the set with the given id, mutably, if it exists.
    #[inline(always)]
    pub fn get_mut(&mut self, id: MapId) -> Option<&mut ComponentSparseSet> {
        self.maps.get_mut(id.index())
    }

    /// Returns the set with the given id without bounds checking.
    ///
    /// # Safety
    /// `id` must have been handed out by this registry.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, id: MapId) -> &ComponentSparseSet {
        debug_assert!(id.index() < self.maps.len());
        unsafe { self.maps.get_unchecked(id.index()) }
    }

    /// Returns the set with the given id, mutably, without bounds checking.
    ///
    /// # Safety
    /// `id` must have been handed out by this registry.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, id: MapId) -> &mut ComponentSparseSet {
        debug_assert!(id.index() < self.maps.len());
        unsafe { self.maps.get_unchecked_mut(id.index()) }
    }

    /// Returns the id of the set for the given component, if prepared.
    #[inline]
    pub fn get_id(&self, component: ComponentId) -> Option<MapId> {
        self.mapper.get(component).copied()
    }

    /// Returns the set for the given component, if prepared.
    #[inline]
    pub fn get_by_component(&self, component: ComponentId) -> Option<&ComponentSparseSet> {
        self.get(self.get_id(component)?)
    }

    /// Returns the set for the given component, mutably, if prepared.
    #[inline]
    pub fn get_by_component_mut(
        &mut self,
        component: ComponentId,
    ) -> Option<&mut ComponentSparseSet> {
        let id = self.get_id(component)?;
        self.get_mut(id)
    }

    /// Creates the sparse set for a component if it does not exist yet.
    pub(crate) fn prepare(&mut self, info: &ComponentInfo) {
        debug_assert!(info.storage().is_sparse());
        if !self.mapper.contains(info.id()) {
            let id = MapId::new(self.maps.len() as u32);
            let map = unsafe { ComponentSparseSet::new(info.layout(), info.dropper()) };
            self.maps.push(map);
            self.mapper.insert(info.id(), id);
        }
    }

    /// Prepares storage for a batch of sparse components.
    ///
    /// # Safety
    /// Every id in `idents` must be registered in `components` with sparse
    /// storage.
    pub(crate) unsafe fn register(&mut self, components: &Components, idents: &[ComponentId]) {
        for &id in idents {
            let info = unsafe { components.get_unchecked(id) };
            self.prepare(info);
        }
    }
}
