use alloc::vec::Vec;
use core::fmt::Debug;

use super::{Entity, EntityId};

// -----------------------------------------------------------------------------
// EntityAllocator

/// Allocates entity handles, recycling freed slots.
///
/// Fresh indices are handed out sequentially starting at 1. Freed entities
/// go onto a freelist *already carrying their next generation* (the
/// registry bumps the generation when the slot is released), so allocation
/// is a plain pop — no generation bookkeeping happens here.
pub struct EntityAllocator {
    free: Vec<Entity>,
    next_index: u32,
}

impl Debug for EntityAllocator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EntityAllocator")
            .field("next_index", &self.next_index)
            .field("free", &self.free.len())
            .finish()
    }
}

impl EntityAllocator {
    /// Creates an allocator with no slot handed out yet.
    pub(crate) const fn new() -> Self {
        Self {
            free: Vec::new(),
            next_index: 1,
        }
    }

    /// Returns the number of indices ever minted.
    #[inline]
    pub fn minted(&self) -> usize {
        (self.next_index - 1) as usize
    }

    /// Returns the number of slots waiting for reuse.
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Allocates an entity, preferring a recycled slot.
    pub fn alloc(&mut self) -> Entity {
        #[cold]
        #[inline(never)]
        fn fresh(this: &mut EntityAllocator) -> Entity {
            let index = this.next_index;
            assert!(index < u32::MAX, "entity index space exhausted");
            this.next_index = index + 1;
            // SAFETY: `index` starts at 1 and only increments.
            Entity::from_id(unsafe { EntityId::new(index).unwrap_unchecked() })
        }

        self.free.pop().unwrap_or_else(|| fresh(self))
    }

    /// Returns a slot to the freelist.
    ///
    /// `entity` must already carry the generation its next occupant will
    /// have; see [`Entities::free`](super::Entities::free).
    #[inline]
    pub fn free(&mut self, entity: Entity) {
        debug_assert!((entity.index() as u32) < self.next_index);
        self.free.push(entity);
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::EntityAllocator;

    #[test]
    fn fresh_indices_are_sequential_from_one() {
        let mut allocator = EntityAllocator::new();
        assert_eq!(allocator.alloc().index(), 1);
        assert_eq!(allocator.alloc().index(), 2);
        assert_eq!(allocator.alloc().index(), 3);
        assert_eq!(allocator.minted(), 3);
    }

    #[test]
    fn freed_slots_are_reused_first() {
        let mut allocator = EntityAllocator::new();
        let a = allocator.alloc();
        let b = allocator.alloc();

        allocator.free(b);
        allocator.free(a);

        assert_eq!(allocator.alloc(), a);
        assert_eq!(allocator.alloc(), b);
        assert_eq!(allocator.alloc().index(), 3);
    }
}
