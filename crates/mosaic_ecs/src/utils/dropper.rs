use mosaic_ptr::OwningPtr;

// -----------------------------------------------------------------------------
// Dropper

/// The type-erased destructor of a component type.
///
/// Present only for types that actually need dropping; trivially destructible
/// components carry `None` and the storage layer skips the call entirely.
#[derive(Debug, Clone, Copy)]
#[repr(transparent)]
pub struct Dropper {
    func: unsafe fn(OwningPtr<'_>),
}

impl Dropper {
    /// # Safety
    /// `ptr` must point to a valid, aligned `T`.
    unsafe fn drop_fn<T>(ptr: OwningPtr<'_>) {
        ptr.debug_assert_aligned::<T>();
        unsafe {
            ptr.drop_as::<T>();
        }
    }

    /// Returns the dropper for `T`, or `None` if `T` needs no drop.
    pub const fn of<T>() -> Option<Dropper> {
        if ::core::mem::needs_drop::<T>() {
            Some(Dropper {
                func: Self::drop_fn::<T>,
            })
        } else {
            None
        }
    }

    /// Destroys the pointee.
    ///
    /// # Safety
    /// `ptr` must own a valid value of the type this dropper was built for.
    #[inline(always)]
    pub(crate) unsafe fn call(self, ptr: OwningPtr<'_>) {
        unsafe { (self.func)(ptr) }
    }
}
