#![allow(clippy::len_without_is_empty, reason = "internal registry")]

use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt::Debug;

use mosaic_utils::extra::TypeIdMap;

use super::{Component, ComponentDescriptor, ComponentId, ComponentInfo};

// -----------------------------------------------------------------------------
// Components

/// The registry of every component type known to a world.
///
/// Registration is lazy and idempotent: the first `register::<T>()` assigns
/// the next dense [`ComponentId`] and stores the descriptor, every later
/// call returns the same id. Lookups by [`TypeId`] return `None` for types
/// never registered; the registry refuses no type.
pub struct Components {
    infos: Vec<ComponentInfo>,
    mapper: TypeIdMap<ComponentId>,
}

impl Debug for Components {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.infos, f)
    }
}

impl Components {
    /// Creates an empty registry.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            infos: Vec::new(),
            mapper: TypeIdMap::new(),
        }
    }

    /// Returns the number of registered component types.
    #[inline]
    pub const fn len(&self) -> usize {
        self.infos.len()
    }

    /// Looks up a component id by [`TypeId`].
    #[inline]
    pub fn get_id(&self, type_id: TypeId) -> Option<ComponentId> {
        self.mapper.get(&type_id).copied()
    }

    /// Returns the info for the given id.
    #[inline]
    pub fn get(&self, id: ComponentId) -> Option<&ComponentInfo> {
        self.infos.get(id.index())
    }

    /// Returns the info for the given id without bounds checking.
    ///
    /// # Safety
    /// `id` must have been handed out by this registry.
    #[inline]
    pub unsafe fn get_unchecked(&self, id: ComponentId) -> &ComponentInfo {
        debug_assert!(id.index() < self.infos.len());
        unsafe { self.infos.get_unchecked(id.index()) }
    }

    /// Registers component type `T`, returning its id.
    ///
    /// Repeated registration returns the existing id.
    #[inline]
    pub fn register<T: Component>(&mut self) -> ComponentId {
        #[cold]
        #[inline(never)]
        fn register_new<T: Component>(this: &mut Components) -> ComponentId {
            let type_id = TypeId::of::<T>();
            let descriptor = ComponentDescriptor::new::<T>();
            let id = ComponentId::new(this.infos.len() as u32);

            this.infos.push(ComponentInfo::new(id, descriptor));
            this.mapper.insert(type_id, id);

            id
        }

        if let Some(id) = self.get_id(TypeId::of::<T>()) {
            id
        } else {
            register_new::<T>(self)
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Components;
    use crate::component::{Component, ComponentStorage};

    struct Position;
    struct Velocity;

    unsafe impl Component for Position {}
    unsafe impl Component for Velocity {
        const STORAGE: ComponentStorage = ComponentStorage::Sparse;
    }

    #[test]
    fn registration_is_dense_and_idempotent() {
        let mut components = Components::new();

        let pos = components.register::<Position>();
        let vel = components.register::<Velocity>();
        assert_eq!(pos.index(), 0);
        assert_eq!(vel.index(), 1);

        assert_eq!(components.register::<Position>(), pos);
        assert_eq!(components.len(), 2);
    }

    #[test]
    fn lookup_before_registration_is_none() {
        let components = Components::new();
        assert!(
            components
                .get_id(core::any::TypeId::of::<Position>())
                .is_none()
        );
    }

    #[test]
    fn info_reflects_descriptor() {
        let mut components = Components::new();
        let id = components.register::<Velocity>();

        let info = components.get(id).unwrap();
        assert!(info.storage().is_sparse());
        assert_eq!(info.layout().size(), 0);
        assert!(info.dropper().is_none());
    }
}
