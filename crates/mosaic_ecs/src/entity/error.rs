use thiserror::Error;

use crate::entity::{Entity, EntityId};

// -----------------------------------------------------------------------------
// Per-operation errors

#[derive(Debug, Error, Clone, Copy)]
#[non_exhaustive]
pub enum FetchError {
    #[error("entity with id {0} was not found during fetch")]
    NotFound(EntityId),

    #[error("entity {0} has not been spawned")]
    NotSpawned(Entity),

    #[error("stale entity handle: expected {expect:?}, slot now holds {actual:?}")]
    Mismatch { expect: Entity, actual: Entity },
}

#[derive(Debug, Error, Clone, Copy)]
#[non_exhaustive]
pub enum SpawnError {
    #[error("entity {0} has already been spawned")]
    AlreadySpawned(Entity),

    #[error("stale entity handle during spawn: expected {expect:?}, slot now holds {actual:?}")]
    Mismatch { expect: Entity, actual: Entity },
}

#[derive(Debug, Error, Clone, Copy)]
#[non_exhaustive]
pub enum DespawnError {
    #[error("entity with id {0} was not found during despawn")]
    NotFound(EntityId),

    #[error("entity {0} has not been spawned")]
    NotSpawned(Entity),

    #[error("stale entity handle during despawn: expected {expect:?}, slot now holds {actual:?}")]
    Mismatch { expect: Entity, actual: Entity },
}

#[derive(Debug, Error, Clone, Copy)]
#[non_exhaustive]
pub enum MoveError {
    #[error("entity with id {0} was not found during location fixup")]
    NotFound(EntityId),

    #[error("entity {0} has not been spawned")]
    NotSpawned(Entity),

    #[error("stale entity handle during location fixup: expected {expect:?}, slot now holds {actual:?}")]
    Mismatch { expect: Entity, actual: Entity },
}

#[derive(Debug, Error, Clone, Copy)]
#[non_exhaustive]
pub enum InsertError {
    #[error("entity with id {0} was not found during bundle insertion")]
    NotFound(EntityId),

    #[error("entity {0} has not been spawned")]
    NotSpawned(Entity),

    #[error("stale entity handle during bundle insertion: expected {expect:?}, slot now holds {actual:?}")]
    Mismatch { expect: Entity, actual: Entity },
}

#[derive(Debug, Error, Clone, Copy)]
#[non_exhaustive]
pub enum RemoveError {
    #[error("entity with id {0} was not found during bundle removal")]
    NotFound(EntityId),

    #[error("entity {0} has not been spawned")]
    NotSpawned(Entity),

    #[error("stale entity handle during bundle removal: expected {expect:?}, slot now holds {actual:?}")]
    Mismatch { expect: Entity, actual: Entity },
}

// -----------------------------------------------------------------------------
// EntityError

/// Umbrella error for every entity-handle failure.
///
/// All variants mean the same thing at bottom — the caller used a handle
/// the registry does not currently honor — but keeping the operation in the
/// type makes logs actionable.
#[derive(Debug, Error, Clone, Copy)]
#[non_exhaustive]
pub enum EntityError {
    #[error("spawn failed: {0}")]
    Spawn(SpawnError),

    #[error("despawn failed: {0}")]
    Despawn(DespawnError),

    #[error("fetch failed: {0}")]
    Fetch(FetchError),

    #[error("location fixup failed: {0}")]
    Move(MoveError),

    #[error("bundle insertion failed: {0}")]
    Insert(InsertError),

    #[error("bundle removal failed: {0}")]
    Remove(RemoveError),
}

impl EntityError {
    #[cold]
    #[inline(never)]
    pub fn handle_error(&self) -> ! {
        panic!("{self}");
    }
}

macro_rules! impl_from {
    ($name:ident, $variant:ident) => {
        impl From<EntityError> for $name {
            #[inline]
            fn from(value: EntityError) -> Self {
                if let EntityError::$variant(ret) = value {
                    ret
                } else {
                    value.handle_error();
                }
            }
        }

        impl From<$name> for EntityError {
            #[inline]
            fn from(value: $name) -> Self {
                EntityError::$variant(value)
            }
        }

        impl $name {
            #[cold]
            #[inline(never)]
            pub fn handle_error(&self) -> ! {
                panic!("{self}");
            }
        }
    };
}

impl_from!(FetchError, Fetch);
impl_from!(SpawnError, Spawn);
impl_from!(DespawnError, Despawn);
impl_from!(MoveError, Move);
impl_from!(InsertError, Insert);
impl_from!(RemoveError, Remove);

// A failed handle lookup surfaces under the operation that performed it.

impl From<FetchError> for InsertError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NotFound(id) => InsertError::NotFound(id),
            FetchError::NotSpawned(entity) => InsertError::NotSpawned(entity),
            FetchError::Mismatch { expect, actual } => InsertError::Mismatch { expect, actual },
        }
    }
}

impl From<FetchError> for RemoveError {
    fn from(value: FetchError) -> Self {
        match value {
            FetchError::NotFound(id) => RemoveError::NotFound(id),
            FetchError::NotSpawned(entity) => RemoveError::NotSpawned(entity),
            FetchError::Mismatch { expect, actual } => RemoveError::Mismatch { expect, actual },
        }
    }
}
