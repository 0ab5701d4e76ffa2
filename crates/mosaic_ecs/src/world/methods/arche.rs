use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::archetype::{ArcheId, InsertEdge};
use crate::bundle::BundleId;
use crate::component::ComponentId;
use crate::world::World;

impl World {
    /// Resolves the archetype an entity of `src` lands in after inserting
    /// `bundle`, taking the cached edge when one exists.
    pub(crate) fn archetype_after_insert(&mut self, src: ArcheId, bundle: BundleId) -> ArcheId {
        let arche = unsafe { self.archetypes.get_unchecked(src) };
        if let Some(edge) = arche.edges.get_insert(bundle) {
            return edge.arche_id;
        }
        self.after_insert_slow(src, bundle)
    }

    /// Computes and caches the insert edge: partition the bundle against
    /// the source signature, then intern the merged signature (and its
    /// table and sparse storage) if anything new appears.
    #[cold]
    #[inline(never)]
    fn after_insert_slow(&mut self, src: ArcheId, bundle: BundleId) -> ArcheId {
        let info = unsafe { self.bundles.get_unchecked(bundle) };
        let arche = unsafe { self.archetypes.get_unchecked(src) };

        let mut existing: Vec<ComponentId> = Vec::new();
        let mut new_table: Vec<ComponentId> = Vec::new();
        let mut new_sparse: Vec<ComponentId> = Vec::new();

        for &id in info.table_components() {
            if arche.contains_table_component(id) {
                existing.push(id);
            } else {
                new_table.push(id);
            }
        }
        for &id in info.sparse_components() {
            if arche.contains_sparse_component(id) {
                existing.push(id);
            } else {
                new_sparse.push(id);
            }
        }
        existing.sort_unstable();

        // Nothing new: the transition is the identity. The values of the
        // already-present members are still replaced by the writer.
        if new_table.is_empty() && new_sparse.is_empty() {
            let edge = InsertEdge {
                arche_id: src,
                existing: existing.into_boxed_slice(),
            };
            let arche = unsafe { self.archetypes.get_unchecked_mut(src) };
            arche.edges.set_insert(bundle, edge);
            return src;
        }

        new_table.extend_from_slice(arche.table_components());
        new_sparse.extend_from_slice(arche.sparse_components());
        new_table.sort_unstable();
        new_sparse.sort_unstable();

        let table_len = new_table.len();
        let mut all = new_table;
        all.append(&mut new_sparse);

        let dest = self.intern_archetype(all, table_len);

        let edge = InsertEdge {
            arche_id: dest,
            existing: existing.into_boxed_slice(),
        };
        let arche = unsafe { self.archetypes.get_unchecked_mut(src) };
        arche.edges.set_insert(bundle, edge);
        dest
    }

    /// Resolves the archetype an entity of `src` lands in after removing
    /// `bundle`, taking the cached edge when one exists.
    pub(crate) fn archetype_after_remove(&mut self, src: ArcheId, bundle: BundleId) -> ArcheId {
        let arche = unsafe { self.archetypes.get_unchecked(src) };
        if let Some(cached) = arche.edges.get_remove(bundle) {
            return cached;
        }
        self.after_remove_slow(src, bundle)
    }

    /// Computes and caches the remove edge: the source signature minus
    /// whatever subset of the bundle is present. Members the entity does
    /// not have are ignored.
    #[cold]
    #[inline(never)]
    fn after_remove_slow(&mut self, src: ArcheId, bundle: BundleId) -> ArcheId {
        let info = unsafe { self.bundles.get_unchecked(bundle) };
        let arche = unsafe { self.archetypes.get_unchecked(src) };

        let table: Vec<ComponentId> = arche
            .table_components()
            .iter()
            .copied()
            .filter(|id| info.table_components().binary_search(id).is_err())
            .collect();
        let sparse: Vec<ComponentId> = arche
            .sparse_components()
            .iter()
            .copied()
            .filter(|id| info.sparse_components().binary_search(id).is_err())
            .collect();

        let unchanged = table.len() == arche.table_components().len()
            && sparse.len() == arche.sparse_components().len();
        if unchanged {
            let arche = unsafe { self.archetypes.get_unchecked_mut(src) };
            arche.edges.set_remove(bundle, src);
            return src;
        }

        let table_len = table.len();
        let mut all = table;
        all.extend(sparse);

        let dest = self.intern_archetype(all, table_len);

        let arche = unsafe { self.archetypes.get_unchecked_mut(src) };
        arche.edges.set_remove(bundle, dest);
        dest
    }

    /// Interns the archetype for a signature, creating its table and
    /// preparing its sparse sets on first sight.
    fn intern_archetype(&mut self, all: Vec<ComponentId>, table_len: usize) -> ArcheId {
        if let Some(id) = self.archetypes.get_id(&all) {
            return id;
        }

        let components: Arc<[ComponentId]> = all.into();
        unsafe {
            self.storages
                .maps
                .register(&self.components, &components[table_len..]);
            let table_id = self
                .storages
                .tables
                .register(&self.components, &components[..table_len]);
            self.archetypes.register(table_id, table_len, components)
        }
    }
}
