use mosaic_ptr::OwningPtr;

use crate::archetype::ArcheId;
use crate::bundle::{Bundle, BundleId};
use crate::component::ComponentWriter;
use crate::entity::{Entity, EntityLocation};
use crate::storage::TableId;
use crate::world::{EntityWorldMut, World};

impl World {
    /// Creates an entity with no components.
    ///
    /// The entity lands in the empty archetype and the empty table.
    pub fn spawn_empty(&mut self) -> EntityWorldMut<'_> {
        let entity = self.allocator.alloc();

        let table = unsafe { self.storages.tables.get_unchecked_mut(TableId::EMPTY) };
        let table_row = unsafe { table.allocate(entity) };
        let archetype = unsafe { self.archetypes.get_unchecked_mut(ArcheId::EMPTY) };
        let arche_row = unsafe { archetype.allocate(entity) };

        let location = EntityLocation {
            arche_id: ArcheId::EMPTY,
            arche_row,
            table_id: TableId::EMPTY,
            table_row,
        };
        self.finish_spawn(entity, location)
    }

    /// Creates an entity carrying every component of `bundle`.
    ///
    /// Registers the bundle on first use, resolves the archetype through
    /// the empty archetype's edge cache, then writes each member value into
    /// its destination column or sparse set.
    // Inlined so the bundle value is built in place instead of copied.
    #[inline(always)]
    pub fn spawn<B: Bundle>(&mut self, bundle: B) -> EntityWorldMut<'_> {
        let bundle_id = self.register_bundle::<B>();

        mosaic_ptr::into_owning!(bundle);

        self.spawn_internal(bundle, bundle_id, B::write_components)
    }

    #[inline(never)]
    fn spawn_internal(
        &mut self,
        data: OwningPtr<'_>,
        bundle_id: BundleId,
        write: unsafe fn(&mut ComponentWriter, usize),
    ) -> EntityWorldMut<'_> {
        let arche_id = self.archetype_after_insert(ArcheId::EMPTY, bundle_id);
        let entity = self.allocator.alloc();

        let archetype = unsafe { self.archetypes.get_unchecked_mut(arche_id) };
        let table_id = archetype.table_id();

        let table = unsafe { self.storages.tables.get_unchecked_mut(table_id) };
        let table_row = unsafe { table.allocate(entity) };
        let arche_row = unsafe { archetype.allocate(entity) };

        unsafe {
            let mut writer = ComponentWriter::new(
                data,
                &self.components,
                &mut self.storages.maps,
                table,
                entity,
                table_row,
                // Spawning from nothing: every member is new.
                &[],
            );
            write(&mut writer, 0);
        }

        let location = EntityLocation {
            arche_id,
            arche_row,
            table_id,
            table_row,
        };
        self.finish_spawn(entity, location)
    }

    fn finish_spawn(&mut self, entity: Entity, location: EntityLocation) -> EntityWorldMut<'_> {
        // A handle fresh out of the allocator always matches its slot.
        if let Err(e) = unsafe { self.entities.set_spawned(entity, location) } {
            e.handle_error();
        }

        EntityWorldMut {
            world: self,
            entity,
            location,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::archetype::ArcheId;
    use crate::component::{Component, ComponentStorage};
    use crate::storage::TableId;
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

    struct Marker;

    unsafe impl Component for Position {}
    unsafe impl Component for Velocity {
        const STORAGE: ComponentStorage = ComponentStorage::Sparse;
    }
    unsafe impl Component for Marker {}

    fn world() -> World {
        World::new(WorldIdAllocator::new().alloc())
    }

    #[test]
    fn spawn_empty_lands_in_the_empty_archetype() {
        let mut world = world();
        let entity = world.spawn_empty().entity();

        let location = world.location(entity).unwrap();
        assert_eq!(location.arche_id, ArcheId::EMPTY);
        assert_eq!(location.table_id, TableId::EMPTY);
        assert_eq!(world.archetypes.get(ArcheId::EMPTY).unwrap().entities(), &[entity]);
    }

    #[test]
    fn spawn_writes_table_and_sparse_values() {
        let mut world = world();
        let entity = world
            .spawn((Position { x: 1.0, y: 2.0 }, Velocity { x: 3.0, y: 4.0 }))
            .entity();

        assert_eq!(
            world.get::<Position>(entity),
            Some(&Position { x: 1.0, y: 2.0 }),
        );
        assert_eq!(
            world.get::<Velocity>(entity),
            Some(&Velocity { x: 3.0, y: 4.0 }),
        );

        // One table component, one sparse component.
        let location = world.location(entity).unwrap();
        let archetype = world.archetypes.get(location.arche_id).unwrap();
        assert_eq!(archetype.table_components().len(), 1);
        assert_eq!(archetype.sparse_components().len(), 1);

        let velocity = world.components.get_id(core::any::TypeId::of::<Velocity>()).unwrap();
        let map = world.storages.maps.get_by_component(velocity).unwrap();
        assert!(map.contains(entity.id()));
    }

    #[test]
    fn zero_sized_components_take_a_row_but_no_bytes() {
        let mut world = world();
        let entity = world.spawn(Marker).entity();

        let location = world.location(entity).unwrap();
        let table = world.storages.tables.get(location.table_id).unwrap();
        let marker = world.components.get_id(core::any::TypeId::of::<Marker>()).unwrap();

        let column = table.get_column(marker).unwrap();
        assert_eq!(column.len(), 1);
        assert!(column.is_zst());
        assert!(column.as_bytes().is_empty());
        assert!(world.get::<Marker>(entity).is_some());
    }

    #[test]
    fn first_entity_has_generation_zero() {
        let mut world = world();
        let entity = world.spawn(Marker).entity();
        assert_eq!(entity.generation(), crate::entity::EntityGeneration::FIRST);
        assert_eq!(entity.index(), 1);
    }

    #[test]
    fn spawning_two_bundles_shares_one_archetype() {
        let mut world = world();
        let a = world.spawn(Position { x: 0.0, y: 0.0 }).entity();
        let b = world.spawn(Position { x: 1.0, y: 1.0 }).entity();

        let loc_a = world.location(a).unwrap();
        let loc_b = world.location(b).unwrap();
        assert_eq!(loc_a.arche_id, loc_b.arche_id);
        assert_eq!(loc_a.table_id, loc_b.table_id);
        assert_eq!(loc_b.table_row.index(), 1);
    }
}
