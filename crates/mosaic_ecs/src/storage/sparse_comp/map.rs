use alloc::vec::Vec;
use core::alloc::Layout;
use core::fmt::Debug;

use mosaic_ptr::{OwningPtr, Ptr, PtrMut};

use super::MapRow;
use crate::entity::{Entity, EntityId};
use crate::storage::{Column, SparseArray};
use crate::utils::Dropper;

// -----------------------------------------------------------------------------
// ComponentSparseSet

/// Per-component storage for one sparse-stored component type.
///
/// A sparse-to-dense set keyed by entity index: the paged sparse side maps
/// an [`EntityId`] to a dense [`MapRow`], and the dense side is an entity
/// vector parallel to a type-erased [`Column`] of values. Iteration walks
/// the dense side contiguously; attach and detach never touch any table.
///
/// Removal swap-removes on the dense side and rewrites the sparse pointer
/// of whichever entity got moved into the hole.
pub struct ComponentSparseSet {
    sparse: SparseArray<EntityId, MapRow>,
    entities: Vec<Entity>,
    column: Column,
}

impl Debug for ComponentSparseSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ComponentSparseSet")
            .field("entities", &self.entities)
            .field("item_layout", &self.column.item_layout())
            .finish()
    }
}

impl ComponentSparseSet {
    /// Creates an empty set for a component with the given layout and drop
    /// hook.
    ///
    /// # Safety
    /// `layout` and `dropper` must describe one component type, and every
    /// value inserted later must be of that type.
    pub(crate) unsafe fn new(layout: Layout, dropper: Option<Dropper>) -> Self {
        Self {
            sparse: SparseArray::new(),
            entities: Vec::new(),
            column: unsafe { Column::new(layout, dropper) },
        }
    }

    /// Returns the number of entities holding this component.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity holds this component.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// The entities holding this component, in dense order.
    #[inline(always)]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The values in dense order, parallel to [`entities`](Self::entities).
    ///
    /// # Safety
    /// `T` must be the stored component type.
    #[inline(always)]
    pub unsafe fn values_as_slice<T>(&self) -> &[T] {
        unsafe { self.column.as_slice::<T>() }
    }

    /// Returns `true` if the entity index has a value here.
    #[inline]
    pub fn contains(&self, id: EntityId) -> bool {
        self.sparse.contains(id)
    }

    /// Returns the dense row for an entity index, if present.
    #[inline]
    pub fn get_row(&self, id: EntityId) -> Option<MapRow> {
        self.sparse.get(id).copied()
    }

    /// Returns a pointer to the entity's value, if present.
    #[inline]
    pub fn get(&self, id: EntityId) -> Option<Ptr<'_>> {
        let row = *self.sparse.get(id)?;
        debug_assert!(row.index() < self.column.len());
        // SAFETY: the sparse side only points at initialized dense rows.
        Some(unsafe { self.column.get(row.index()) })
    }

    /// Returns a mutable pointer to the entity's value, if present.
    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> Option<PtrMut<'_>> {
        let row = *self.sparse.get(id)?;
        debug_assert!(row.index() < self.column.len());
        // SAFETY: the sparse side only points at initialized dense rows.
        Some(unsafe { self.column.get_mut(row.index()) })
    }

    /// Inserts a value for `entity`, replacing (and dropping) any value the
    /// entity already had.
    ///
    /// # Safety
    /// `value` must be a valid instance of the stored component type.
    pub unsafe fn insert(&mut self, entity: Entity, value: OwningPtr<'_>) {
        if let Some(&row) = self.sparse.get(entity.id()) {
            debug_assert_eq!(self.entities[row.index()].id(), entity.id());
            self.entities[row.index()] = entity;
            unsafe {
                self.column.replace(row.index(), value);
            }
        } else {
            let row = MapRow(self.entities.len() as u32);
            self.sparse.insert(entity.id(), row);
            self.entities.push(entity);
            unsafe {
                self.column.push(value);
            }
        }
    }

    /// Removes and drops the entity's value. Returns `false` if the entity
    /// had none.
    pub fn remove_and_drop(&mut self, id: EntityId) -> bool {
        let Some(row) = self.sparse.remove(id) else {
            return false;
        };

        let dense = row.index();
        self.entities.swap_remove(dense);
        unsafe {
            self.column.swap_remove_drop(dense);
        }

        if let Some(&moved) = self.entities.get(dense) {
            self.sparse.insert(moved.id(), row);
        }

        true
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::alloc::Layout;

    use mosaic_ptr::OwningPtr;

    use super::ComponentSparseSet;
    use crate::entity::{Entity, EntityId};
    use crate::utils::Dropper;

    fn entity(index: u32) -> Entity {
        Entity::from_id(EntityId::new(index).unwrap())
    }

    fn set_of_u64() -> ComponentSparseSet {
        unsafe { ComponentSparseSet::new(Layout::new::<u64>(), Dropper::of::<u64>()) }
    }

    fn insert(set: &mut ComponentSparseSet, e: Entity, value: u64) {
        OwningPtr::make(value, |ptr| unsafe { set.insert(e, ptr) });
    }

    #[test]
    fn insert_and_fetch() {
        let mut set = set_of_u64();
        insert(&mut set, entity(1), 100);
        insert(&mut set, entity(9), 900);

        assert!(set.contains(EntityId::new(1).unwrap()));
        let ptr = set.get(EntityId::new(9).unwrap()).unwrap();
        assert_eq!(unsafe { *ptr.as_ref::<u64>() }, 900);
        assert_eq!(unsafe { set.values_as_slice::<u64>() }, &[100, 900]);
    }

    #[test]
    fn insert_replaces_existing_value() {
        let mut set = set_of_u64();
        insert(&mut set, entity(4), 1);
        insert(&mut set, entity(4), 2);

        assert_eq!(set.len(), 1);
        let ptr = set.get(EntityId::new(4).unwrap()).unwrap();
        assert_eq!(unsafe { *ptr.as_ref::<u64>() }, 2);
    }

    #[test]
    fn remove_fixes_up_moved_entity() {
        let mut set = set_of_u64();
        for i in 1..=3 {
            insert(&mut set, entity(i), i as u64 * 10);
        }

        assert!(set.remove_and_drop(EntityId::new(1).unwrap()));
        assert!(!set.remove_and_drop(EntityId::new(1).unwrap()));

        // Entity 3 moved into dense slot 0 and must still resolve.
        assert_eq!(set.entities()[0], entity(3));
        let ptr = set.get(EntityId::new(3).unwrap()).unwrap();
        assert_eq!(unsafe { *ptr.as_ref::<u64>() }, 30);
        assert_eq!(set.len(), 2);
    }
}
