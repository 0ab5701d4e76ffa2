#![allow(clippy::new_without_default, reason = "internal type")]

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Debug;

use mosaic_utils::hash::{NoOpHashState, SparseHashMap};

use crate::archetype::{ArcheId, ArcheRow};
use crate::bundle::BundleId;
use crate::component::ComponentId;
use crate::entity::{Entity, MovedEntity};
use crate::storage::TableId;

// -----------------------------------------------------------------------------
// Edges

/// A memoized insert transition: the destination archetype plus the split
/// of the bundle into components the source already had and components the
/// move adds.
///
/// `existing` is sorted; the component writer consults it to decide
/// between initializing a fresh slot and replacing a live value.
pub(crate) struct InsertEdge {
    pub arche_id: ArcheId,
    pub existing: Box<[ComponentId]>,
}

/// Per-archetype cache of bundle transitions.
///
/// Edges hold archetype *ids*, never references — the graph stays acyclic
/// in ownership even though remove edges point backwards.
pub(crate) struct Edges {
    insert: SparseHashMap<BundleId, InsertEdge>,
    remove: SparseHashMap<BundleId, ArcheId>,
}

impl Edges {
    pub const fn new() -> Self {
        Self {
            insert: SparseHashMap::with_hasher(NoOpHashState),
            remove: SparseHashMap::with_hasher(NoOpHashState),
        }
    }

    #[inline]
    pub fn get_insert(&self, bundle: BundleId) -> Option<&InsertEdge> {
        self.insert.get(&bundle)
    }

    #[inline]
    pub fn set_insert(&mut self, bundle: BundleId, edge: InsertEdge) {
        self.insert.insert(bundle, edge);
    }

    #[inline]
    pub fn get_remove(&self, bundle: BundleId) -> Option<ArcheId> {
        self.remove.get(&bundle).copied()
    }

    #[inline]
    pub fn set_remove(&mut self, bundle: BundleId, arche_id: ArcheId) {
        self.remove.insert(bundle, arche_id);
    }
}

// -----------------------------------------------------------------------------
// Archetype

/// A collection of entities sharing the exact same set of component types.
///
/// The signature is one sorted `Arc` slice split at `table_len`: the prefix
/// is the table sub-sequence (and matches the column set of `table_id`),
/// the suffix is the sparse sub-sequence. Both halves are sorted and
/// duplicate-free.
pub struct Archetype {
    id: ArcheId,
    table_id: TableId,
    table_len: usize,
    components: Arc<[ComponentId]>,
    entities: Vec<Entity>,
    pub(crate) edges: Edges,
}

impl Debug for Archetype {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Archetype")
            .field("id", &self.id)
            .field("table_id", &self.table_id)
            .field("table_components", &self.table_components())
            .field("sparse_components", &self.sparse_components())
            .field("entities", &self.entities)
            .finish()
    }
}

impl Archetype {
    /// Creates an archetype for a signature.
    ///
    /// # Safety
    /// - `components` must be sorted and duplicate-free within each half.
    /// - `table_id` must name a table whose column set equals the prefix.
    pub(crate) unsafe fn new(
        id: ArcheId,
        table_id: TableId,
        table_len: usize,
        components: Arc<[ComponentId]>,
    ) -> Self {
        debug_assert!(components[..table_len].is_sorted());
        debug_assert!(components[table_len..].is_sorted());

        Self {
            id,
            table_id,
            table_len,
            components,
            entities: Vec::new(),
            edges: Edges::new(),
        }
    }

    /// Returns this archetype's id.
    #[inline(always)]
    pub fn id(&self) -> ArcheId {
        self.id
    }

    /// Returns the table holding this archetype's table components.
    #[inline(always)]
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// The full signature: table components, then sparse components.
    #[inline(always)]
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    /// The sorted table sub-sequence.
    #[inline(always)]
    pub fn table_components(&self) -> &[ComponentId] {
        &self.components[..self.table_len]
    }

    /// The sorted sparse sub-sequence.
    #[inline(always)]
    pub fn sparse_components(&self) -> &[ComponentId] {
        &self.components[self.table_len..]
    }

    /// Returns `true` if the signature contains `id` in either half.
    #[inline]
    pub fn contains_component(&self, id: ComponentId) -> bool {
        self.contains_table_component(id) || self.contains_sparse_component(id)
    }

    /// Returns `true` if `id` is one of the table components.
    #[inline]
    pub fn contains_table_component(&self, id: ComponentId) -> bool {
        self.table_components().binary_search(&id).is_ok()
    }

    /// Returns `true` if `id` is one of the sparse components.
    #[inline]
    pub fn contains_sparse_component(&self, id: ComponentId) -> bool {
        self.sparse_components().binary_search(&id).is_ok()
    }

    /// The member entities; position `i` is archetype row `i`.
    #[inline(always)]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns the number of member entities.
    #[inline(always)]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Returns `true` if no entity currently has this shape.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Appends `entity` to the member vector, returning its row.
    ///
    /// # Safety
    /// The entity must not already be a member.
    #[inline]
    pub unsafe fn allocate(&mut self, entity: Entity) -> ArcheRow {
        let row = ArcheRow(self.entities.len() as u32);
        self.entities.push(entity);
        row
    }

    /// Swap-removes a member row.
    ///
    /// Returns the entity moved into `row`, if any, so the caller can
    /// repair its archetype row.
    ///
    /// # Safety
    /// `row` must be a valid member row; it is invalid afterwards.
    pub unsafe fn swap_remove(&mut self, row: ArcheRow) -> Option<MovedEntity> {
        debug_assert!(row.index() < self.entities.len());

        self.entities.swap_remove(row.index());
        self.entities
            .get(row.index())
            .map(|&swapped| MovedEntity::in_arche(swapped, row))
    }
}
