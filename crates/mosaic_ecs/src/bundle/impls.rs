use crate::component::{Component, ComponentCollector, ComponentWriter};

// -----------------------------------------------------------------------------
// Bundle

/// A set of components applied to an entity in one atomic operation.
///
/// Every [`Component`] is a one-element bundle, and tuples of bundles up to
/// length 15 are bundles. A bundle goes through two phases:
///
/// 1. **Collection** (once per bundle type): [`collect_components`] resolves
///    every member to its component id, in declaration order. The resolved
///    set determines the archetype transition.
/// 2. **Writing** (every spawn/insert): [`write_components`] moves each
///    member value out of the erased bundle at its field offset and into
///    its destination slot.
///
/// [`collect_components`]: Self::collect_components
/// [`write_components`]: Self::write_components
///
/// # Safety
///
/// Manual implementations must keep the two phases consistent: every member
/// written must have been collected, each exactly once, and the offsets
/// passed to the writer must be the members' real field offsets. A bundle
/// must not list the same component type twice — collection treats that as
/// a fatal error.
pub unsafe trait Bundle: Sized + Send + Sync + 'static {
    /// Registers every member of this bundle, in declaration order.
    ///
    /// # Safety
    /// Must collect exactly the member types that `write_components`
    /// writes.
    unsafe fn collect_components(collector: &mut ComponentCollector);

    /// Writes every member value; `base` is this bundle's byte offset
    /// inside the outermost bundle value.
    ///
    /// # Safety
    /// The writer's erased value must contain a valid `Self` at `base`.
    unsafe fn write_components(writer: &mut ComponentWriter, base: usize);
}

/// Any single component is a bundle of one.
unsafe impl<T: Component> Bundle for T {
    unsafe fn collect_components(collector: &mut ComponentCollector) {
        collector.collect::<T>();
    }

    unsafe fn write_components(writer: &mut ComponentWriter, base: usize) {
        unsafe {
            writer.write::<T>(base);
        }
    }
}

macro_rules! impl_bundle_for_tuple {
    (0: []) => {
        unsafe impl Bundle for () {
            unsafe fn collect_components(_collector: &mut ComponentCollector) {}
            unsafe fn write_components(_writer: &mut ComponentWriter, _base: usize) {}
        }
    };
    ($num:literal : [$($index:tt : $name:ident),*]) => {
        unsafe impl<$($name: Bundle),*> Bundle for ($($name,)*) {
            unsafe fn collect_components(collector: &mut ComponentCollector) {
                $( unsafe { <$name>::collect_components(collector); } )*
            }

            unsafe fn write_components(writer: &mut ComponentWriter, base: usize) {
                $(unsafe {
                    let offset = ::core::mem::offset_of!(Self, $index) + base;
                    <$name>::write_components(writer, offset);
                })*
            }
        }
    };
}

impl_bundle_for_tuple!(0: []);
impl_bundle_for_tuple!(1: [0: P0]);
impl_bundle_for_tuple!(2: [0: P0, 1: P1]);
impl_bundle_for_tuple!(3: [0: P0, 1: P1, 2: P2]);
impl_bundle_for_tuple!(4: [0: P0, 1: P1, 2: P2, 3: P3]);
impl_bundle_for_tuple!(5: [0: P0, 1: P1, 2: P2, 3: P3, 4: P4]);
impl_bundle_for_tuple!(6: [0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5]);
impl_bundle_for_tuple!(7: [0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6]);
impl_bundle_for_tuple!(8: [0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7]);
impl_bundle_for_tuple!(9: [0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7, 8: P8]);
impl_bundle_for_tuple!(10: [0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7, 8: P8, 9: P9]);
impl_bundle_for_tuple!(11: [0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7, 8: P8, 9: P9, 10: P10]);
impl_bundle_for_tuple!(12: [0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7, 8: P8, 9: P9, 10: P10, 11: P11]);
impl_bundle_for_tuple!(13: [0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7, 8: P8, 9: P9, 10: P10, 11: P11, 12: P12]);
impl_bundle_for_tuple!(14: [0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7, 8: P8, 9: P9, 10: P10, 11: P11, 12: P12, 13: P13]);
impl_bundle_for_tuple!(15: [0: P0, 1: P1, 2: P2, 3: P3, 4: P4, 5: P5, 6: P6, 7: P7, 8: P8, 9: P9, 10: P10, 11: P11, 12: P12, 13: P13, 14: P14]);
