use crate::bundle::Bundle;
use crate::component::Component;
use crate::entity::{Entity, EntityError, EntityLocation};
use crate::world::World;

// -----------------------------------------------------------------------------
// EntityWorldMut

/// Exclusive access to one entity and the world it lives in.
///
/// Returned by the spawn methods so a freshly created entity can be
/// inspected and extended without repeating the handle.
pub struct EntityWorldMut<'a> {
    pub(crate) world: &'a mut World,
    pub(crate) entity: Entity,
    pub(crate) location: EntityLocation,
}

impl EntityWorldMut<'_> {
    /// The entity this access wraps.
    #[inline]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// The entity's current storage location.
    #[inline]
    pub fn location(&self) -> EntityLocation {
        self.location
    }

    /// Reads component `T` of this entity.
    #[inline]
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.world.get::<T>(self.entity)
    }

    /// Reads component `T` of this entity, mutably.
    #[inline]
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.world.get_mut::<T>(self.entity)
    }

    /// Adds a bundle to this entity.
    pub fn insert<B: Bundle>(&mut self, bundle: B) -> &mut Self {
        // The handle is live by construction, so this cannot fail.
        if let Err(e) = self.world.insert(self.entity, bundle) {
            e.handle_error();
        }
        self.location = self
            .world
            .location(self.entity)
            .unwrap_or_else(|e| e.handle_error());
        self
    }

    /// Removes a bundle from this entity.
    pub fn remove<B: Bundle>(&mut self) -> &mut Self {
        if let Err(e) = self.world.remove::<B>(self.entity) {
            e.handle_error();
        }
        self.location = self
            .world
            .location(self.entity)
            .unwrap_or_else(|e| e.handle_error());
        self
    }

    /// Destroys this entity.
    pub fn despawn(self) -> Result<(), EntityError> {
        self.world.despawn(self.entity)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::component::Component;
    use crate::world::{World, WorldIdAllocator};

    #[derive(Debug, PartialEq)]
    struct Health(u32);

    #[derive(Debug, PartialEq)]
    struct Armor(u32);

    unsafe impl Component for Health {}
    unsafe impl Component for Armor {}

    #[test]
    fn builder_style_entity_setup() {
        let mut world = World::new(WorldIdAllocator::new().alloc());

        let mut entity = world.spawn(Health(10));
        entity.insert(Armor(5));
        entity.get_mut::<Health>().unwrap().0 = 8;
        let id = entity.entity();

        assert_eq!(world.get::<Health>(id), Some(&Health(8)));
        assert_eq!(world.get::<Armor>(id), Some(&Armor(5)));
    }

    #[test]
    fn despawn_through_the_access() {
        let mut world = World::new(WorldIdAllocator::new().alloc());
        let entity = world.spawn(Health(1));
        let id = entity.entity();
        entity.despawn().unwrap();
        assert!(!world.is_valid(id));
    }
}
