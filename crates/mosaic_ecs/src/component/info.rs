use core::alloc::Layout;
use core::any::TypeId;
use core::fmt::Debug;

use super::{Component, ComponentId, ComponentStorage};
use crate::utils::{Cloner, DebugName, Defaulter, Dropper};

// -----------------------------------------------------------------------------
// ComponentDescriptor

/// The static description of a component type: name, identity, memory
/// layout, storage strategy, and lifecycle hooks.
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    pub name: DebugName,
    pub type_id: TypeId,
    pub layout: Layout,
    pub storage: ComponentStorage,
    pub dropper: Option<Dropper>,
    pub cloner: Option<Cloner>,
    pub defaulter: Option<Defaulter>,
}

impl ComponentDescriptor {
    /// Creates the descriptor for component type `T`.
    pub const fn new<T: Component>() -> Self {
        const {
            Self {
                name: DebugName::type_name::<T>(),
                type_id: TypeId::of::<T>(),
                layout: Layout::new::<T>(),
                storage: T::STORAGE,
                dropper: T::DROPPER,
                cloner: T::CLONER,
                defaulter: T::DEFAULTER,
            }
        }
    }
}

// -----------------------------------------------------------------------------
// ComponentInfo

/// Runtime information for a registered component: its dense id plus its
/// static descriptor.
pub struct ComponentInfo {
    id: ComponentId,
    descriptor: ComponentDescriptor,
}

impl Debug for ComponentInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id)
            .field("name", &self.descriptor.name)
            .field("storage", &self.descriptor.storage)
            .finish()
    }
}

impl ComponentInfo {
    #[inline]
    pub(crate) fn new(id: ComponentId, descriptor: ComponentDescriptor) -> Self {
        Self { id, descriptor }
    }

    /// Returns the component's unique id.
    #[inline(always)]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Returns the component's display name.
    #[inline(always)]
    pub fn name(&self) -> DebugName {
        self.descriptor.name
    }

    /// Returns the component's [`TypeId`].
    #[inline(always)]
    pub fn type_id(&self) -> TypeId {
        self.descriptor.type_id
    }

    /// Returns the component's memory layout.
    #[inline(always)]
    pub fn layout(&self) -> Layout {
        self.descriptor.layout
    }

    /// Returns the component's storage strategy.
    #[inline(always)]
    pub fn storage(&self) -> ComponentStorage {
        self.descriptor.storage
    }

    /// Returns the destructor hook, if any.
    #[inline(always)]
    pub fn dropper(&self) -> Option<Dropper> {
        self.descriptor.dropper
    }

    /// Returns the copy hook, if any.
    #[inline(always)]
    pub fn cloner(&self) -> Option<Cloner> {
        self.descriptor.cloner
    }

    /// Returns the default-construct hook, if any.
    #[inline(always)]
    pub fn defaulter(&self) -> Option<Defaulter> {
        self.descriptor.defaulter
    }
}
