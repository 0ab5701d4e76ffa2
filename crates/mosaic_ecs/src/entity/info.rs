use alloc::vec::Vec;
use core::fmt::Debug;

use crate::archetype::{ArcheId, ArcheRow};
use crate::entity::error::{DespawnError, FetchError, MoveError, SpawnError};
use crate::entity::{Entity, EntityError, EntityGeneration, EntityId};
use crate::storage::{TableId, TableRow};

// -----------------------------------------------------------------------------
// EntityLocation

/// The precise storage location of a live entity.
///
/// The archetype row and the table row are independent coordinates: the
/// former indexes the archetype's entity vector, the latter the table's
/// columns, and each is renumbered by its own swap-removes.
#[derive(Debug, Clone, Copy)]
pub struct EntityLocation {
    pub arche_id: ArcheId,
    pub arche_row: ArcheRow,
    pub table_id: TableId,
    pub table_row: TableRow,
}

// -----------------------------------------------------------------------------
// EntityInfo

/// Tracking state of one entity slot.
#[derive(Debug, Clone, Copy)]
struct EntityInfo {
    generation: EntityGeneration,
    location: Option<EntityLocation>,
}

// -----------------------------------------------------------------------------
// Entities

/// The registry of every entity slot: current generation plus, for spawned
/// entities, their storage location.
///
/// A handle is honored iff its slot exists, the generations match, and the
/// slot has a location. Generations advance when a slot is released, which
/// is what invalidates stale handles; a wrap is possible after four billion
/// reuses of one slot and is logged when it happens.
pub struct Entities {
    infos: Vec<EntityInfo>,
}

impl Debug for Entities {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(
                self.infos
                    .iter()
                    .enumerate()
                    .filter(|(_, info)| info.location.is_some())
                    .map(|(id, info)| alloc::format!("{id}v{}", info.generation)),
            )
            .finish()
    }
}

impl Entities {
    /// Creates an empty registry.
    pub(crate) const fn new() -> Self {
        Self { infos: Vec::new() }
    }

    /// Returns `true` if `entity` currently names a live, spawned entity.
    pub fn is_valid(&self, entity: Entity) -> bool {
        self.infos
            .get(entity.index())
            .is_some_and(|info| info.generation == entity.generation() && info.location.is_some())
    }

    /// Retrieves the location of a spawned entity.
    pub fn get_spawned(&self, entity: Entity) -> Result<EntityLocation, EntityError> {
        let Some(info) = self.infos.get(entity.index()) else {
            return Err(FetchError::NotFound(entity.id()).into());
        };
        if info.generation != entity.generation() {
            return Err(FetchError::Mismatch {
                expect: entity,
                actual: Entity::new(entity.id(), info.generation),
            }
            .into());
        }
        info.location.ok_or(FetchError::NotSpawned(entity).into())
    }

    /// Resolves an entity index to the handle its slot currently honors.
    pub fn resolve(&self, id: EntityId) -> Entity {
        if let Some(info) = self.infos.get(id.index()) {
            Entity::new(id, info.generation)
        } else {
            Entity::from_id(id)
        }
    }

    /// Grows the slot vector to cover a new entity index.
    #[cold]
    #[inline(never)]
    fn resize(&mut self, len: usize) {
        self.infos.resize(
            len,
            const {
                EntityInfo {
                    generation: EntityGeneration::FIRST,
                    location: None,
                }
            },
        );
    }

    /// Releases a slot for reuse, advancing its generation by `versions`.
    ///
    /// Returns the handle the slot's next occupant will carry; stale
    /// handles to the previous occupant stop validating immediately. Warns
    /// when the generation counter wraps, since aliasing becomes possible.
    ///
    /// # Safety
    /// The slot must not be spawned.
    pub unsafe fn free(&mut self, id: EntityId, versions: u32) -> Entity {
        let index = id.index();
        if index >= self.infos.len() {
            self.resize(index + 1);
        }

        let info = unsafe { self.infos.get_unchecked_mut(index) };
        debug_assert!(info.location.is_none());

        let (new_generation, wrapped) = info.generation.checked_add(versions);
        info.generation = new_generation;
        if wrapped {
            log::warn!("entity slot {id} generation wrapped; stale handles may alias");
        }

        Entity::new(id, new_generation)
    }

    /// Records a freshly spawned entity's location.
    ///
    /// # Safety
    /// `location` must describe rows that actually hold this entity.
    pub unsafe fn set_spawned(
        &mut self,
        entity: Entity,
        location: EntityLocation,
    ) -> Result<(), EntityError> {
        let index = entity.index();
        if index >= self.infos.len() {
            self.resize(index + 1);
        }

        let info = unsafe { self.infos.get_unchecked_mut(index) };
        if info.generation != entity.generation() {
            return Err(SpawnError::Mismatch {
                expect: entity,
                actual: Entity::new(entity.id(), info.generation),
            }
            .into());
        }
        if info.location.is_some() {
            return Err(SpawnError::AlreadySpawned(entity).into());
        }

        info.location = Some(location);
        Ok(())
    }

    /// Clears a spawned entity's location, returning where it lived.
    ///
    /// # Safety
    /// The caller must actually tear the entity's rows down.
    pub unsafe fn set_despawned(&mut self, entity: Entity) -> Result<EntityLocation, EntityError> {
        let Some(info) = self.infos.get_mut(entity.index()) else {
            return Err(DespawnError::NotFound(entity.id()).into());
        };
        if info.generation != entity.generation() {
            return Err(DespawnError::Mismatch {
                expect: entity,
                actual: Entity::new(entity.id(), info.generation),
            }
            .into());
        }

        core::mem::take(&mut info.location).ok_or(DespawnError::NotSpawned(entity).into())
    }

    /// Overwrites a spawned entity's location after an archetype change.
    ///
    /// # Safety
    /// `location` must describe rows that actually hold this entity.
    pub unsafe fn relocate(
        &mut self,
        entity: Entity,
        location: EntityLocation,
    ) -> Result<(), EntityError> {
        let Some(info) = self.infos.get_mut(entity.index()) else {
            return Err(MoveError::NotFound(entity.id()).into());
        };
        if info.generation != entity.generation() {
            return Err(MoveError::Mismatch {
                expect: entity,
                actual: Entity::new(entity.id(), info.generation),
            }
            .into());
        }
        if info.location.is_none() {
            return Err(MoveError::NotSpawned(entity).into());
        }

        info.location = Some(location);
        Ok(())
    }

    /// Repairs the row coordinate of an entity displaced by a swap-remove.
    ///
    /// # Safety
    /// The move must actually have happened.
    pub unsafe fn move_spawned(&mut self, moved: MovedEntity) -> Result<(), EntityError> {
        let entity = moved.entity;

        let Some(info) = self.infos.get_mut(entity.index()) else {
            return Err(MoveError::NotFound(entity.id()).into());
        };
        if info.generation != entity.generation() {
            return Err(MoveError::Mismatch {
                expect: entity,
                actual: Entity::new(entity.id(), info.generation),
            }
            .into());
        }
        let Some(location) = &mut info.location else {
            return Err(MoveError::NotSpawned(entity).into());
        };
        match moved.new_row {
            Row::Arche(arche_row) => location.arche_row = arche_row,
            Row::Table(table_row) => location.table_row = table_row,
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// MovedEntity

/// Which row coordinate a displaced entity needs rewritten.
#[derive(Debug, Clone, Copy)]
enum Row {
    Arche(ArcheRow),
    Table(TableRow),
}

/// Records that a swap-remove moved some other entity into a vacated row.
///
/// Produced by table and archetype removals, consumed by
/// [`Entities::move_spawned`] to keep locations coherent.
#[derive(Debug, Clone, Copy)]
pub struct MovedEntity {
    entity: Entity,
    new_row: Row,
}

impl MovedEntity {
    /// The displaced entity now lives at `row` of its table.
    #[inline(always)]
    pub const fn in_table(entity: Entity, row: TableRow) -> Self {
        Self {
            entity,
            new_row: Row::Table(row),
        }
    }

    /// The displaced entity now lives at `row` of its archetype.
    #[inline(always)]
    pub const fn in_arche(entity: Entity, row: ArcheRow) -> Self {
        Self {
            entity,
            new_row: Row::Arche(row),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Entities, EntityLocation};
    use crate::archetype::{ArcheId, ArcheRow};
    use crate::entity::{Entity, EntityId};
    use crate::storage::{TableId, TableRow};

    fn location() -> EntityLocation {
        EntityLocation {
            arche_id: ArcheId::EMPTY,
            arche_row: ArcheRow(0),
            table_id: TableId::EMPTY,
            table_row: TableRow(0),
        }
    }

    #[test]
    fn spawn_then_fetch() {
        let mut entities = Entities::new();
        let entity = Entity::from_id(EntityId::new(1).unwrap());

        unsafe { entities.set_spawned(entity, location()).unwrap() };
        assert!(entities.is_valid(entity));
        assert!(entities.get_spawned(entity).is_ok());
    }

    #[test]
    fn free_invalidates_old_handle() {
        let mut entities = Entities::new();
        let entity = Entity::from_id(EntityId::new(1).unwrap());

        unsafe {
            entities.set_spawned(entity, location()).unwrap();
            entities.set_despawned(entity).unwrap();
        }
        let next = unsafe { entities.free(entity.id(), 1) };

        assert!(!entities.is_valid(entity));
        assert!(entities.get_spawned(entity).is_err());
        assert_eq!(next.generation(), entity.generation().wrapping_add(1));
        assert_eq!(entities.resolve(entity.id()), next);
    }

    #[test]
    fn double_spawn_is_rejected() {
        let mut entities = Entities::new();
        let entity = Entity::from_id(EntityId::new(3).unwrap());

        unsafe {
            entities.set_spawned(entity, location()).unwrap();
            assert!(entities.set_spawned(entity, location()).is_err());
        }
    }
}
