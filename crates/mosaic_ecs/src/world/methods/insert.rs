use mosaic_ptr::OwningPtr;

use crate::bundle::{Bundle, BundleId};
use crate::component::ComponentWriter;
use crate::entity::{Entity, EntityError, EntityLocation, InsertError};
use crate::utils::DebugCheckedUnwrap;
use crate::world::World;

impl World {
    /// Adds every component of `bundle` to an existing entity.
    ///
    /// Components the entity already has keep their slot and get the new
    /// value (the old one is dropped); genuinely new components move the
    /// entity along the cached edge to the destination archetype.
    // Inlined so the bundle value is built in place instead of copied.
    #[inline(always)]
    pub fn insert<B: Bundle>(&mut self, entity: Entity, bundle: B) -> Result<(), EntityError> {
        let bundle_id = self.register_bundle::<B>();

        mosaic_ptr::into_owning!(bundle);

        self.insert_internal(entity, bundle, bundle_id, B::write_components)
    }

    #[inline(never)]
    fn insert_internal(
        &mut self,
        entity: Entity,
        data: OwningPtr<'_>,
        bundle_id: BundleId,
        write: unsafe fn(&mut ComponentWriter, usize),
    ) -> Result<(), EntityError> {
        let location = self
            .entities
            .get_spawned(entity)
            .map_err(|e| InsertError::from(crate::entity::FetchError::from(e)))?;

        let src_id = location.arche_id;
        let dest_id = self.archetype_after_insert(src_id, bundle_id);

        if dest_id == src_id {
            // Identity transition: every member is already present; write
            // the new values into the existing slots.
            let archetype = unsafe { self.archetypes.get_unchecked(src_id) };
            // SAFETY: `archetype_after_insert` just cached this edge.
            let edge = unsafe {
                archetype
                    .edges
                    .get_insert(bundle_id)
                    .debug_checked_unwrap()
            };

            let table = unsafe {
                self.storages
                    .tables
                    .get_unchecked_mut(location.table_id)
            };
            unsafe {
                let mut writer = ComponentWriter::new(
                    data,
                    &self.components,
                    &mut self.storages.maps,
                    table,
                    entity,
                    location.table_row,
                    &edge.existing,
                );
                write(&mut writer, 0);
            }
            return Ok(());
        }

        // Migration. The destination table can equal the source table when
        // the bundle only adds sparse components; the entity's row then
        // stays where it is.
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

        // Write the bundle's values into the destination row and sparse
        // sets before any archetype bookkeeping.
        {
            let archetype = unsafe { self.archetypes.get_unchecked(src_id) };
            // SAFETY: `archetype_after_insert` just cached this edge.
            let edge = unsafe {
                archetype
                    .edges
                    .get_insert(bundle_id)
                    .debug_checked_unwrap()
            };

            let dest_table = unsafe { self.storages.tables.get_unchecked_mut(dest_table_id) };
            unsafe {
                let mut writer = ComponentWriter::new(
                    data,
                    &self.components,
                    &mut self.storages.maps,
                    dest_table,
                    entity,
                    new_table_row,
                    &edge.existing,
                );
                write(&mut writer, 0);
            }
        }

        // Archetype rows: append at the destination, swap-remove at the
        // source.
        let dest_arche = unsafe { self.archetypes.get_unchecked_mut(dest_id) };
        let new_arche_row = unsafe { dest_arche.allocate(entity) };
        let src_arche = unsafe { self.archetypes.get_unchecked_mut(src_id) };
        let arche_moved = unsafe { src_arche.swap_remove(location.arche_row) };

        // Repair displaced entities before recording this entity's new
        // location.
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
    use alloc::string::{String, ToString};

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

    // Deliberately not `Clone`: migration must move it.
    #[derive(Debug, PartialEq)]
    struct Name(String);

    unsafe impl Component for Position {}
    unsafe impl Component for Velocity {
        const STORAGE: ComponentStorage = ComponentStorage::Sparse;
    }
    unsafe impl Component for Render {}
    unsafe impl Component for Name {}

    fn world() -> World {
        World::new(WorldIdAllocator::new().alloc())
    }

    #[test]
    fn migration_preserves_values() {
        let mut world = world();
        let entity = world
            .spawn((
                Position { x: 1.0, y: 2.0 },
                Velocity { x: 3.0, y: 4.0 },
                Name("alpha".to_string()),
            ))
            .entity();
        let before = world.location(entity).unwrap();

        world.insert(entity, Render { handle: 7 }).unwrap();

        let after = world.location(entity).unwrap();
        assert_ne!(before.arche_id, after.arche_id);
        assert_ne!(before.table_id, after.table_id);
        assert_eq!(after.table_row.index(), 0);
        assert_eq!(after.arche_row.index(), 0);

        assert_eq!(world.get::<Position>(entity), Some(&Position { x: 1.0, y: 2.0 }));
        assert_eq!(world.get::<Name>(entity), Some(&Name("alpha".to_string())));
        assert_eq!(world.get::<Render>(entity), Some(&Render { handle: 7 }));
        // The sparse component never moved.
        assert_eq!(world.get::<Velocity>(entity), Some(&Velocity { x: 3.0, y: 4.0 }));

        // The old archetype is empty but still registered.
        assert!(world.archetypes.get(before.arche_id).unwrap().is_empty());
    }

    #[test]
    fn insert_of_present_component_replaces_the_value() {
        let mut world = world();
        let entity = world.spawn(Position { x: 1.0, y: 2.0 }).entity();
        let before = world.location(entity).unwrap();

        world.insert(entity, Position { x: 9.0, y: 8.0 }).unwrap();

        let after = world.location(entity).unwrap();
        assert_eq!(before.arche_id, after.arche_id);
        assert_eq!(before.table_row, after.table_row);
        assert_eq!(world.get::<Position>(entity), Some(&Position { x: 9.0, y: 8.0 }));
    }

    #[test]
    fn sparse_only_insert_keeps_the_table_row() {
        let mut world = world();
        let entity = world.spawn(Position { x: 1.0, y: 2.0 }).entity();
        let before = world.location(entity).unwrap();

        world.insert(entity, Velocity { x: 5.0, y: 6.0 }).unwrap();

        let after = world.location(entity).unwrap();
        assert_ne!(before.arche_id, after.arche_id);
        assert_eq!(before.table_id, after.table_id);
        assert_eq!(before.table_row, after.table_row);
        assert_eq!(world.get::<Velocity>(entity), Some(&Velocity { x: 5.0, y: 6.0 }));
    }

    #[test]
    fn chained_inserts_match_the_merged_bundle() {
        let mut world = world();

        let step_wise = world.spawn_empty().entity();
        world.insert(step_wise, Position { x: 0.0, y: 0.0 }).unwrap();
        world.insert(step_wise, Render { handle: 1 }).unwrap();

        let merged = world
            .spawn((Position { x: 0.0, y: 0.0 }, Render { handle: 1 }))
            .entity();

        assert_eq!(
            world.location(step_wise).unwrap().arche_id,
            world.location(merged).unwrap().arche_id,
        );
    }

    #[test]
    fn insert_edge_is_cached_across_entities() {
        let mut world = world();

        let a = world.spawn_empty().entity();
        world
            .insert(a, (Position { x: 0.0, y: 0.0 }, Velocity { x: 0.0, y: 0.0 }))
            .unwrap();
        let archetype_count = world.archetypes.len();

        // The second traversal takes the cached edge; no new archetype and
        // no signature interning happens.
        let b = world.spawn_empty().entity();
        world
            .insert(b, (Position { x: 1.0, y: 1.0 }, Velocity { x: 1.0, y: 1.0 }))
            .unwrap();

        assert_eq!(world.archetypes.len(), archetype_count);
        assert_eq!(
            world.location(a).unwrap().arche_id,
            world.location(b).unwrap().arche_id,
        );
    }

    #[test]
    fn insert_on_a_stale_handle_fails() {
        let mut world = world();
        let entity = world.spawn_empty().entity();
        world.despawn(entity).unwrap();

        assert!(world.insert(entity, Position { x: 0.0, y: 0.0 }).is_err());
    }
}
