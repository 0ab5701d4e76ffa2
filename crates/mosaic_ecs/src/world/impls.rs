use core::fmt::Debug;

use crate::archetype::Archetypes;
use crate::bundle::Bundles;
use crate::component::Components;
use crate::entity::{Entities, EntityAllocator};
use crate::storage::Storages;
use crate::world::WorldId;

// -----------------------------------------------------------------------------
// World

/// The facade over the whole storage fabric.
///
/// Owns every registry — entities, components, bundles, tables, sparse
/// sets and archetypes — and composes them into the entity lifecycle
/// operations: spawn, insert, remove, despawn.
///
/// A world is strictly single-threaded: all operations take `&mut self` or
/// `&self` and complete synchronously. Pointers handed out by the read
/// surface are invalidated by any structural mutation.
pub struct World {
    id: WorldId,
    pub entities: Entities,
    pub allocator: EntityAllocator,
    pub components: Components,
    pub bundles: Bundles,
    pub storages: Storages,
    pub archetypes: Archetypes,
}

impl Debug for World {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("World")
            .field("id", &self.id)
            .field("entities", &self.entities)
            .field("allocator", &self.allocator)
            .field("components", &self.components)
            .field("bundles", &self.bundles)
            .field("storages", &self.storages)
            .field("archetypes", &self.archetypes)
            .finish()
    }
}

impl World {
    /// Creates an empty world.
    ///
    /// The empty table and the empty archetype exist from the start; every
    /// other registry begins blank.
    pub fn new(id: WorldId) -> World {
        Self {
            id,
            entities: Entities::new(),
            allocator: EntityAllocator::new(),
            components: Components::new(),
            bundles: Bundles::new(),
            storages: Storages::new(),
            archetypes: Archetypes::new(),
        }
    }

    /// Returns this world's id.
    pub fn id(&self) -> WorldId {
        self.id
    }
}
