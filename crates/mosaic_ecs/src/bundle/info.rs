use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt::Debug;

use mosaic_utils::extra::TypeIdMap;
use mosaic_utils::hash::HashMap;

use crate::bundle::BundleId;
use crate::component::{CollectResult, ComponentId, ComponentStorage};

// -----------------------------------------------------------------------------
// BundleInfo

/// Metadata of a registered bundle.
///
/// Keeps the component ids in the tuple's declaration order with their
/// parallel storage classes, plus the sorted table / sparse sub-sequences
/// the archetype graph consumes for transitions.
pub struct BundleInfo {
    id: BundleId,
    components: Box<[ComponentId]>,
    storages: Box<[ComponentStorage]>,
    /// Sorted table components, then sorted sparse components; also the
    /// interning key shared with the registry's map.
    sorted: Arc<[ComponentId]>,
    table_len: u32,
}

impl BundleInfo {
    /// Returns this bundle's id.
    #[inline(always)]
    pub fn id(&self) -> BundleId {
        self.id
    }

    /// The component ids in declaration order.
    #[inline(always)]
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    /// The storage classes, parallel to [`components`](Self::components).
    #[inline(always)]
    pub fn storages(&self) -> &[ComponentStorage] {
        &self.storages
    }

    /// The sorted table sub-sequence.
    #[inline(always)]
    pub fn table_components(&self) -> &[ComponentId] {
        &self.sorted[..self.table_len as usize]
    }

    /// The sorted sparse sub-sequence.
    #[inline(always)]
    pub fn sparse_components(&self) -> &[ComponentId] {
        &self.sorted[self.table_len as usize..]
    }
}

impl Debug for BundleInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bundle")
            .field("id", &self.id)
            .field("components", &self.components)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Bundles

/// The registry of every bundle known to a world.
///
/// Lookup goes by tuple [`TypeId`] on the hot path; the set-keyed map makes
/// distinct tuple types with equal component sets share one [`BundleId`].
pub struct Bundles {
    infos: Vec<BundleInfo>,
    mapper: HashMap<Arc<[ComponentId]>, BundleId>,
    type_mapper: TypeIdMap<BundleId>,
}

impl Debug for Bundles {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Debug::fmt(&self.infos, f)
    }
}

impl Bundles {
    /// Creates the registry with the empty bundle seeded at id 0.
    pub(crate) fn new() -> Self {
        let mut val = Bundles {
            infos: Vec::new(),
            mapper: HashMap::default(),
            type_mapper: TypeIdMap::new(),
        };

        let components: Arc<[ComponentId]> = Arc::new([]);
        val.mapper.insert(components.clone(), BundleId::EMPTY);
        val.type_mapper.insert(TypeId::of::<()>(), BundleId::EMPTY);
        val.infos.push(BundleInfo {
            id: BundleId::EMPTY,
            components: Box::new([]),
            storages: Box::new([]),
            sorted: components,
            table_len: 0,
        });

        val
    }

    /// Registers a resolved bundle under `type_id`, or maps the type onto
    /// an existing bundle with the same component set.
    ///
    /// # Safety
    /// `collect` must come from a [`ComponentCollector`] run: declaration
    /// ids valid and duplicate-free, sorted halves consistent with them.
    ///
    /// [`ComponentCollector`]: crate::component::ComponentCollector
    pub(crate) unsafe fn register(&mut self, type_id: TypeId, collect: CollectResult) -> BundleId {
        let CollectResult {
            components,
            storages,
            table,
            sparse,
        } = collect;

        let table_len = table.len() as u32;
        let mut sorted: Vec<ComponentId> = table;
        sorted.extend(sparse);

        if let Some(&id) = self.mapper.get(sorted.as_slice()) {
            self.type_mapper.insert(type_id, id);
            return id;
        }

        let index = self.infos.len();
        assert!(index < u32::MAX as usize, "too many bundles");
        let id = BundleId::new(index as u32);

        let sorted: Arc<[ComponentId]> = sorted.into();
        self.infos.push(BundleInfo {
            id,
            components: components.into_boxed_slice(),
            storages: storages.into_boxed_slice(),
            sorted: sorted.clone(),
            table_len,
        });
        self.mapper.insert(sorted, id);
        self.type_mapper.insert(type_id, id);

        id
    }

    /// Returns the bundle id registered for a tuple type, if any.
    #[inline]
    pub fn get_id(&self, type_id: TypeId) -> Option<BundleId> {
        self.type_mapper.get(&type_id).copied()
    }

    /// Returns the bundle info for an id, if it exists.
    #[inline]
    pub fn get(&self, id: BundleId) -> Option<&BundleInfo> {
        self.infos.get(id.index())
    }

    /// Returns the bundle info for an id without bounds checking.
    ///
    /// # Safety
    /// `id` must have been handed out by this registry.
    #[inline]
    pub unsafe fn get_unchecked(&self, id: BundleId) -> &BundleInfo {
        debug_assert!(id.index() < self.infos.len());
        unsafe { self.infos.get_unchecked(id.index()) }
    }
}
