use crate::bundle::{Bundle, BundleId};
use crate::entity::{Entity, EntityError, EntityLocation, RemoveError};
use crate::utils::DebugCheckedUnwrap;
use crate::world::World;

impl World {
    /// Removes every component of `B` from an existing entity, dropping the
    /// removed values.
    ///
    /// Members the entity does not have are silently ignored; when nothing
    /// is actually removed the entity stays where it is.
    pub fn remove<B: Bundle>(&mut self, entity: Entity) -> Result<(), EntityError> {
        let bundle_id = self.register_bundle::<B>();
        self.remove_internal(entity, bundle_id)
    }

    #[inline(never)]
    fn remove_internal(&mut self, entity: Entity, bundle_id: BundleId) -> Result<(), EntityError> {
        let location = self
            .entities
            .get_spawned(entity)
            .map_err(|e| RemoveError::from(crate::entity::FetchError::from(e)))?;

        let src_id = location.arche_id;
        let dest_id = self.archetype_after_remove(src_id, bundle_id);

        if dest_id == src_id {
            // No member of the bundle is present.
            return Ok(());
        }

        // Drop the removed sparse components: those in the source signature
        // but not in the destination's.
        {
            let src_arche = unsafe { self.archetypes.get_unchecked(src_id) };
            let dest_arche = unsafe { self.archetypes.get_unchecked(dest_id) };
            let maps = &mut self.storages.maps;

            for &component in src_arche.sparse_components() {
                if !dest_arche.contains_sparse_component(component) {
                    // SAFETY: the source archetype's sparse sets were
                    // prepared when it was registered.
                    let map =
                        unsafe { maps.get_by_component_mut(component).debug_checked_unwrap() };
                    map.remove_and_drop(entity.id());
                }
            }
        }

        // Move the table row; columns absent from the destination drop
        // their value on the way.
        let dest_table_id = unsafe { self.archetypes.get_unchecked(dest_id) }.table_id();

        let (new_table_row, table_moved) = if dest_table_id != location.table_id {
            let (src_table, dest_table) = self
                .storages
                .tables
                .get_2_mut(location.table_id, dest_table_id);
            unsafe { src_table.move_row_to(location.table_row, dest_table) }
        } else {
            (location.table_row, None)
        };

        let dest_arche = unsafe { self.archetypes.get_unchecked_mut(dest_id) };
        let new_arche_row = unsafe { dest_arche.allocate(entity) };
        let src_arche = unsafe { self.archetypes.get_unchecked_mut(src_id) };
        let arche_moved = unsafe { src_arche.swap_remove(location.arche_row) };

        unsafe {
            if let Some(moved) = table_moved {
                self.entities.move_spawned(moved)?;
            }
            if let Some(moved) = arche_moved {
                self.entities.move_spawned(moved)?;
            }

            self.entities.relocate(
                entity,
                EntityLocation {
                    arche_id: dest_id,
                    arche_row: new_arche_row,
                    table_id: dest_table_id,
                    table_row: new_table_row,
                },
            )
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::archetype::ArcheId;
    use crate::component::{Component, ComponentStorage};
    use crate::world::{World, WorldIdAllocator};

    #[derive(Debug, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    #[derive(Debug, PartialEq)]
    struct Velocity {
        x: f32,
        y: f32,
    }

    #[derive(Debug, PartialEq)]
    struct Render {
        handle: u64,
    }

    unsafe impl Component for Position {}
    unsafe impl Component for Velocity {
        const STORAGE: ComponentStorage = ComponentStorage::Sparse;
    }
    unsafe impl Component for Render {}

    fn world() -> World {
        World::new(WorldIdAllocator::new().alloc())
    }

    #[test]
    fn removing_the_spawn_bundle_returns_to_the_empty_archetype() {
        let mut world = world();
        let entity = world
            .spawn((Position { x: 1.0, y: 2.0 }, Velocity { x: 3.0, y: 4.0 }))
            .entity();

        world
            .remove::<(Position, Velocity)>(entity)
            .unwrap();

        let location = world.location(entity).unwrap();
        assert_eq!(location.arche_id, ArcheId::EMPTY);
        assert!(world.get::<Position>(entity).is_none());
        assert!(world.get::<Velocity>(entity).is_none());

        let velocity = world
            .components
            .get_id(core::any::TypeId::of::<Velocity>())
            .unwrap();
        let map = world.storages.maps.get_by_component(velocity).unwrap();
        assert!(!map.contains(entity.id()));
    }

    #[test]
    fn removing_a_missing_component_is_ignored() {
        let mut world = world();
        let entity = world.spawn(Position { x: 1.0, y: 2.0 }).entity();
        let before = world.location(entity).unwrap();

        // Render is not present; Position is.
        world.remove::<(Position, Render)>(entity).unwrap();

        let after = world.location(entity).unwrap();
        assert_ne!(before.arche_id, after.arche_id);
        assert_eq!(after.arche_id, ArcheId::EMPTY);
    }

    #[test]
    fn removing_nothing_present_is_a_no_op() {
        let mut world = world();
        let entity = world.spawn(Position { x: 1.0, y: 2.0 }).entity();
        let before = world.location(entity).unwrap();

        world.remove::<Render>(entity).unwrap();

        let after = world.location(entity).unwrap();
        assert_eq!(before.arche_id, after.arche_id);
        assert_eq!(before.table_row, after.table_row);
        assert_eq!(world.get::<Position>(entity), Some(&Position { x: 1.0, y: 2.0 }));
    }

    #[test]
    fn removing_only_sparse_components_keeps_the_table_row() {
        let mut world = world();
        let entity = world
            .spawn((Position { x: 1.0, y: 2.0 }, Velocity { x: 3.0, y: 4.0 }))
            .entity();

        world.remove::<Velocity>(entity).unwrap();

        let location = world.location(entity).unwrap();
        assert!(world.get::<Velocity>(entity).is_none());
        assert_eq!(world.get::<Position>(entity), Some(&Position { x: 1.0, y: 2.0 }));
        assert_eq!(location.table_row.index(), 0);
    }
}
