use mosaic_ptr::{OwningPtr, Ptr};

// -----------------------------------------------------------------------------
// Cloner

/// The type-erased copy hook of a component type.
///
/// Components opt in by setting [`Component::CLONER`]; the storage layer only
/// ever copies a value when a cloner is present.
///
/// [`Component::CLONER`]: crate::component::Component::CLONER
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Cloner {
    func: unsafe fn(Ptr<'_>, OwningPtr<'_>),
}

impl Cloner {
    /// # Safety
    /// - `src` must point to a valid, aligned `T`.
    /// - `dst` must be an uninitialized, aligned slot for a `T`.
    unsafe fn clone_via_clone<T: Clone>(src: Ptr<'_>, dst: OwningPtr<'_>) {
        src.debug_assert_aligned::<T>();
        dst.debug_assert_aligned::<T>();
        unsafe {
            let val = src.as_ref::<T>();
            core::ptr::write::<T>(dst.as_ptr().cast(), val.clone());
        }
    }

    /// # Safety
    /// - `src` must point to a valid, aligned `T`.
    /// - `dst` must be an uninitialized, aligned slot for a `T`.
    unsafe fn clone_via_copy<T: Copy>(src: Ptr<'_>, dst: OwningPtr<'_>) {
        src.debug_assert_aligned::<T>();
        dst.debug_assert_aligned::<T>();
        unsafe {
            core::ptr::copy_nonoverlapping::<T>(src.as_ptr().cast(), dst.as_ptr().cast(), 1);
        }
    }

    /// A cloner that goes through [`Clone`].
    pub const fn clonable<T: Clone>() -> Self {
        Self {
            func: Self::clone_via_clone::<T>,
        }
    }

    /// A cloner that performs a bitwise copy; valid for [`Copy`] types and
    /// cheaper than the trait call.
    pub const fn copyable<T: Copy>() -> Self {
        Self {
            func: Self::clone_via_copy::<T>,
        }
    }

    /// Duplicates `src` into the uninitialized slot `dst`.
    ///
    /// # Safety
    /// Both pointers must refer to the type this cloner was built for; `dst`
    /// must be uninitialized.
    #[inline(always)]
    pub(crate) unsafe fn call(self, src: Ptr<'_>, dst: OwningPtr<'_>) {
        unsafe { (self.func)(src, dst) }
    }
}
