use super::ComponentStorage;
use crate::utils::{Cloner, Defaulter, Dropper};

// -----------------------------------------------------------------------------
// Component

/// The trait every component type implements.
///
/// The associated constants are the component's entire runtime description:
/// its storage strategy plus the type-erased lifecycle hooks the storage
/// layer calls on its behalf. Moves are plain byte copies and need no hook.
///
/// ```
/// use mosaic_ecs::component::{Component, ComponentStorage};
///
/// struct Position { x: f32, y: f32 }
///
/// // Table storage, default hooks.
/// unsafe impl Component for Position {}
///
/// struct Cooldown(f32);
///
/// unsafe impl Component for Cooldown {
///     const STORAGE: ComponentStorage = ComponentStorage::Sparse;
/// }
/// ```
///
/// # Safety
///
/// Overridden constants must be consistent with `Self`: hooks built for a
/// different type corrupt memory, and a mismatched `STORAGE` breaks the
/// archetype invariants.
pub unsafe trait Component: Sized + Send + Sync + 'static {
    /// Where values of this component live.
    const STORAGE: ComponentStorage = ComponentStorage::Table;

    /// Destructor hook; `None` for trivially destructible types.
    const DROPPER: Option<Dropper> = Dropper::of::<Self>();

    /// Copy hook; components that want [`Column::push_clone`] support set
    /// this to [`Cloner::clonable`] or [`Cloner::copyable`].
    ///
    /// [`Column::push_clone`]: crate::storage::Column::push_clone
    const CLONER: Option<Cloner> = None;

    /// Default-construct hook; required for [`Column::resize`] growth.
    ///
    /// [`Column::resize`]: crate::storage::Column::resize
    const DEFAULTER: Option<Defaulter> = None;
}
