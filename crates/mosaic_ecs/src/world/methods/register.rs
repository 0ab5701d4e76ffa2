use core::any::TypeId;

use crate::bundle::{Bundle, BundleId};
use crate::component::{Component, ComponentCollector, ComponentId};
use crate::world::World;

impl World {
    /// Registers component type `T`, returning its id. Idempotent.
    #[inline]
    pub fn register_component<T: Component>(&mut self) -> ComponentId {
        self.components.register::<T>()
    }

    /// Makes sure the backing storage for a registered component exists.
    #[inline]
    pub fn prepare_component(&mut self, id: ComponentId) {
        if let Some(info) = self.components.get(id) {
            self.storages.prepare_component(info);
        }
    }

    /// Registers bundle type `B`, returning its id. Idempotent; the first
    /// registration resolves and registers every member component.
    #[inline]
    pub fn register_bundle<B: Bundle>(&mut self) -> BundleId {
        if let Some(id) = self.bundles.get_id(TypeId::of::<B>()) {
            id
        } else {
            self.register_bundle_slow(TypeId::of::<B>(), B::collect_components)
        }
    }

    #[cold]
    #[inline(never)]
    fn register_bundle_slow(
        &mut self,
        type_id: TypeId,
        collect_fn: unsafe fn(&mut ComponentCollector),
    ) -> BundleId {
        let mut collector = ComponentCollector::new(&mut self.components);
        unsafe {
            collect_fn(&mut collector);
        }
        let result = collector.finish();

        // SAFETY: the collector produced consistent declaration and sorted
        // lists out of registered components.
        unsafe { self.bundles.register(type_id, result) }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::component::{Component, ComponentStorage};
    use crate::world::{World, WorldIdAllocator};

    struct Position;
    struct Velocity;

    unsafe impl Component for Position {}
    unsafe impl Component for Velocity {
        const STORAGE: ComponentStorage = ComponentStorage::Sparse;
    }

    fn world() -> World {
        World::new(WorldIdAllocator::new().alloc())
    }

    #[test]
    fn bundle_registration_is_idempotent() {
        let mut world = world();
        let first = world.register_bundle::<(Position, Velocity)>();
        let second = world.register_bundle::<(Position, Velocity)>();
        assert_eq!(first, second);
    }

    #[test]
    fn equal_component_sets_share_a_bundle_id() {
        let mut world = world();
        let ab = world.register_bundle::<(Position, Velocity)>();
        let ba = world.register_bundle::<(Velocity, Position)>();
        assert_eq!(ab, ba);
    }

    #[test]
    fn bundle_partitions_by_storage() {
        let mut world = world();
        let id = world.register_bundle::<(Position, Velocity)>();

        let info = world.bundles.get(id).unwrap();
        assert_eq!(info.components().len(), 2);
        assert_eq!(info.table_components().len(), 1);
        assert_eq!(info.sparse_components().len(), 1);
    }

    #[test]
    #[should_panic(expected = "duplicate component")]
    fn duplicate_component_in_bundle_is_fatal() {
        let mut world = world();
        world.register_bundle::<(Position, Position)>();
    }
}
