use crate::entity::{Entity, EntityError};
use crate::utils::DebugCheckedUnwrap;
use crate::world::World;

impl World {
    /// Destroys an entity: its table row is swap-removed (dropping every
    /// column value), its sparse components are dropped from their sets,
    /// and its id is released with a bumped generation so stale handles
    /// stop validating.
    pub fn despawn(&mut self, entity: Entity) -> Result<(), EntityError> {
        let location = unsafe { self.entities.set_despawned(entity)? };

        let archetype = unsafe { self.archetypes.get_unchecked_mut(location.arche_id) };
        let arche_moved = unsafe { archetype.swap_remove(location.arche_row) };

        let table = unsafe { self.storages.tables.get_unchecked_mut(location.table_id) };
        let table_moved = unsafe { table.swap_remove_and_drop(location.table_row) };

        // Tear down every sparse component the signature lists.
        let maps = &mut self.storages.maps;
        for &component in archetype.sparse_components() {
            // SAFETY: the archetype's sparse sets were prepared when it was
            // registered.
            let map = unsafe { maps.get_by_component_mut(component).debug_checked_unwrap() };
            map.remove_and_drop(entity.id());
        }

        let next = unsafe { self.entities.free(entity.id(), 1) };
        self.allocator.free(next);

        match (arche_moved, table_moved) {
            (None, None) => Ok(()),
            (None, Some(moved)) => unsafe { self.entities.move_spawned(moved) },
            (Some(moved), None) => unsafe { self.entities.move_spawned(moved) },
            (Some(moved1), Some(moved2)) => unsafe {
                self.entities.move_spawned(moved1)?;
                self.entities.move_spawned(moved2)
            },
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};

    use crate::component::{Component, ComponentStorage};
    use crate::world::{World, WorldIdAllocator};

    #[derive(Debug, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    static SENSOR_DROPS: AtomicUsize = AtomicUsize::new(0);

    struct Sensor;

    impl Drop for Sensor {
        fn drop(&mut self) {
            SENSOR_DROPS.fetch_add(1, Ordering::Relaxed);
        }
    }

    unsafe impl Component for Position {}
    unsafe impl Component for Sensor {
        const STORAGE: ComponentStorage = ComponentStorage::Sparse;
    }

    fn world() -> World {
        World::new(WorldIdAllocator::new().alloc())
    }

    #[test]
    fn despawn_invalidates_the_handle_forever() {
        let mut world = world();
        let entity = world.spawn(Position { x: 0.0, y: 0.0 }).entity();

        world.despawn(entity).unwrap();

        assert!(!world.is_valid(entity));
        assert!(world.location(entity).is_err());
        assert!(world.despawn(entity).is_err());
    }

    #[test]
    fn slots_recycle_with_the_next_generation() {
        let mut world = world();
        let a = world.spawn_empty().entity();
        world.despawn(a).unwrap();
        let b = world.spawn_empty().entity();

        assert_eq!(b.index(), a.index());
        assert_eq!(b.generation(), a.generation().wrapping_add(1));
        assert!(!world.is_valid(a));
        assert!(world.is_valid(b));
    }

    #[test]
    fn swap_remove_fixes_up_the_displaced_entity() {
        let mut world = world();
        let e1 = world.spawn(Position { x: 1.0, y: 0.0 }).entity();
        let e2 = world.spawn(Position { x: 2.0, y: 0.0 }).entity();
        let e3 = world.spawn(Position { x: 3.0, y: 0.0 }).entity();

        world.despawn(e2).unwrap();

        let archetype = world
            .archetypes
            .get(world.location(e1).unwrap().arche_id)
            .unwrap();
        assert_eq!(archetype.entities(), &[e1, e3]);

        let loc3 = world.location(e3).unwrap();
        assert_eq!(loc3.arche_row.index(), 1);
        assert_eq!(loc3.table_row.index(), 1);
        assert!(!world.is_valid(e2));
        assert_eq!(world.get::<Position>(e3), Some(&Position { x: 3.0, y: 0.0 }));
    }

    #[test]
    fn despawn_drops_sparse_components() {
        let mut world = world();
        SENSOR_DROPS.store(0, Ordering::Relaxed);

        let entity = world.spawn((Position { x: 0.0, y: 0.0 }, Sensor)).entity();
        assert_eq!(SENSOR_DROPS.load(Ordering::Relaxed), 0);

        world.despawn(entity).unwrap();
        assert_eq!(SENSOR_DROPS.load(Ordering::Relaxed), 1);

        let sensor = world
            .components
            .get_id(core::any::TypeId::of::<Sensor>())
            .unwrap();
        let map = world.storages.maps.get_by_component(sensor).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn emptied_archetypes_survive() {
        let mut world = world();
        let entity = world.spawn(Position { x: 0.0, y: 0.0 }).entity();
        let arche_id = world.location(entity).unwrap().arche_id;
        let archetype_count = world.archetypes.len();

        world.despawn(entity).unwrap();

        assert_eq!(world.archetypes.len(), archetype_count);
        assert!(world.archetypes.get(arche_id).unwrap().is_empty());
    }
}
