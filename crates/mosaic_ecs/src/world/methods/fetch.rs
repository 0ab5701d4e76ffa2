use core::any::TypeId;

use crate::component::{Component, ComponentStorage};
use crate::entity::{Entity, EntityError, EntityLocation};
use crate::world::World;

impl World {
    /// Returns `true` if `entity` names a live, spawned entity.
    #[inline]
    pub fn is_valid(&self, entity: Entity) -> bool {
        self.entities.is_valid(entity)
    }

    /// Returns the storage location of a spawned entity.
    #[inline]
    pub fn location(&self, entity: Entity) -> Result<EntityLocation, EntityError> {
        self.entities.get_spawned(entity)
    }

    /// Reads component `T` of an entity.
    ///
    /// `None` when the handle is stale, the component type was never
    /// registered, or the entity does not carry it.
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        let location = self.entities.get_spawned(entity).ok()?;
        let id = self.components.get_id(TypeId::of::<T>())?;

        match T::STORAGE {
            ComponentStorage::Table => {
                let table = self.storages.tables.get(location.table_id)?;
                let column = table.get_column(id)?;
                debug_assert!(location.table_row.index() < column.len());
                // SAFETY: the location's row is live in this table, and the
                // column stores `T` by registration.
                Some(unsafe { column.get(location.table_row.index()).as_ref::<T>() })
            }
            ComponentStorage::Sparse => {
                let map = self.storages.maps.get_by_component(id)?;
                let ptr = map.get(entity.id())?;
                // SAFETY: the set stores `T` by registration.
                Some(unsafe { ptr.as_ref::<T>() })
            }
        }
    }

    /// Reads component `T` of an entity, mutably.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        let location = self.entities.get_spawned(entity).ok()?;
        let id = self.components.get_id(TypeId::of::<T>())?;

        match T::STORAGE {
            ComponentStorage::Table => {
                let table = self.storages.tables.get_mut(location.table_id)?;
                let column = table.get_column_mut(id)?;
                debug_assert!(location.table_row.index() < column.len());
                // SAFETY: as in `get`; exclusivity comes from `&mut self`.
                Some(unsafe { column.get_mut(location.table_row.index()).consume::<T>() })
            }
            ComponentStorage::Sparse => {
                let map = self.storages.maps.get_by_component_mut(id)?;
                let ptr = map.get_mut(entity.id())?;
                // SAFETY: as in `get`; exclusivity comes from `&mut self`.
                Some(unsafe { ptr.consume::<T>() })
            }
        }
    }

    /// Returns `true` if the entity currently carries component `T`.
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::component::{Component, ComponentStorage};
    use crate::world::{World, WorldIdAllocator};

    #[derive(Debug, PartialEq)]
    struct Health(u32);

    #[derive(Debug, PartialEq)]
    struct Poisoned(u32);

    unsafe impl Component for Health {}
    unsafe impl Component for Poisoned {
        const STORAGE: ComponentStorage = ComponentStorage::Sparse;
    }

    fn world() -> World {
        World::new(WorldIdAllocator::new().alloc())
    }

    #[test]
    fn get_mut_writes_through_both_storages() {
        let mut world = world();
        let entity = world.spawn((Health(10), Poisoned(3))).entity();

        world.get_mut::<Health>(entity).unwrap().0 = 7;
        world.get_mut::<Poisoned>(entity).unwrap().0 = 2;

        assert_eq!(world.get::<Health>(entity), Some(&Health(7)));
        assert_eq!(world.get::<Poisoned>(entity), Some(&Poisoned(2)));
    }

    #[test]
    fn get_on_unregistered_component_is_none() {
        let mut world = world();
        let entity = world.spawn_empty().entity();
        assert!(world.get::<Health>(entity).is_none());
        assert!(!world.has::<Health>(entity));
    }

    /// Drives the read surface the way a query layer would: enumerate the
    /// archetypes holding a component through the component index, then
    /// walk the matching column slices and the sparse dense slices.
    #[test]
    fn component_index_supports_query_style_iteration() {
        let mut world = world();
        world.spawn(Health(1));
        world.spawn((Health(2), Poisoned(9)));
        world.spawn(Poisoned(5));

        let health = world
            .components
            .get_id(core::any::TypeId::of::<Health>())
            .unwrap();
        let poisoned = world
            .components
            .get_id(core::any::TypeId::of::<Poisoned>())
            .unwrap();

        // Archetypes with equal table component sets share one table, so a
        // dense walk visits each distinct table once.
        let mut tables = alloc::vec::Vec::new();
        for (arche_id, column) in world.archetypes.archetypes_with(health) {
            // Health is table-stored, so the index names its column.
            let column = column.unwrap();
            let table_id = world.archetypes.get(arche_id).unwrap().table_id();
            if !tables.contains(&(table_id, column)) {
                tables.push((table_id, column));
            }
        }

        let mut seen = alloc::vec::Vec::new();
        for (table_id, column) in tables {
            let table = world.storages.tables.get(table_id).unwrap();
            let values = unsafe { table.column_slice::<Health>(column) };
            assert_eq!(values.len(), table.entity_count());
            seen.extend(values.iter().map(|h| h.0));
        }
        seen.sort_unstable();
        assert_eq!(seen, [1, 2]);

        // Poisoned is sparse-stored: the index records no column, and the
        // values come from the component's sparse set.
        for (arche_id, column) in world.archetypes.archetypes_with(poisoned) {
            assert!(column.is_none());
            assert!(world.archetypes.get(arche_id).is_some());
        }
        let map = world.storages.maps.get_by_component(poisoned).unwrap();
        let mut values: alloc::vec::Vec<u32> = unsafe { map.values_as_slice::<Poisoned>() }
            .iter()
            .map(|p| p.0)
            .collect();
        values.sort_unstable();
        assert_eq!(values, [5, 9]);
        assert_eq!(map.entities().len(), 2);
    }
}
