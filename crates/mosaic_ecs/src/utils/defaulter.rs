use mosaic_ptr::OwningPtr;

// -----------------------------------------------------------------------------
// Defaulter

/// The type-erased default-constructor of a component type.
///
/// Backs [`Column::resize`] growth: every new slot is filled through this
/// hook. Components opt in by setting [`Component::DEFAULTER`].
///
/// [`Column::resize`]: crate::storage::Column::resize
/// [`Component::DEFAULTER`]: crate::component::Component::DEFAULTER
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Defaulter {
    func: unsafe fn(OwningPtr<'_>),
}

impl Defaulter {
    /// # Safety
    /// `dst` must be an uninitialized, aligned slot for a `T`.
    unsafe fn default_fn<T: Default>(dst: OwningPtr<'_>) {
        dst.debug_assert_aligned::<T>();
        unsafe {
            core::ptr::write::<T>(dst.as_ptr().cast(), T::default());
        }
    }

    /// Returns the defaulter for `T`.
    pub const fn of<T: Default>() -> Self {
        Self {
            func: Self::default_fn::<T>,
        }
    }

    /// Writes a default value into the uninitialized slot `dst`.
    ///
    /// # Safety
    /// `dst` must be an uninitialized, aligned slot of the type this
    /// defaulter was built for.
    #[inline(always)]
    pub(crate) unsafe fn call(self, dst: OwningPtr<'_>) {
        unsafe { (self.func)(dst) }
    }
}
