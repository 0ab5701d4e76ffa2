//! Integers that are known not to equal their maximum value.

use core::cmp::Ordering;
use core::fmt::{Binary, Debug, Display, LowerHex, Octal, UpperHex};
use core::hash::{Hash, Hasher};
use core::mem;
use core::num::NonZero;

macro_rules! impl_non_max {
    ($NonMax:ident, $Int:ty) => {
        /// An integer that is known not to equal its maximum value.
        ///
        /// The maximum value becomes a niche, so `Option<NonMax*>` is the
        /// same size as the underlying integer:
        ///
        /// ```
        /// use core::mem::size_of;
        /// use mosaic_utils::num::NonMaxU32;
        ///
        /// assert_eq!(size_of::<Option<NonMaxU32>>(), size_of::<u32>());
        /// ```
        ///
        /// Internally the value is stored XOR-ed with `MAX` inside a
        /// `NonZero`, so reading it back costs one XOR. The representation
        /// is guaranteed:
        /// `transmute::<$NonMax, $Int>(v) == v.get() ^ <$Int>::MAX`.
        #[repr(transparent)]
        #[derive(Clone, Copy)]
        pub struct $NonMax(NonZero<$Int>);

        impl $NonMax {
            /// The value `0`.
            pub const ZERO: $NonMax = unsafe { mem::transmute((0 as $Int) ^ <$Int>::MAX) };

            /// The largest representable value, `<$Int>::MAX - 1`.
            pub const MAX: $NonMax = unsafe { mem::transmute((<$Int>::MAX - 1) ^ <$Int>::MAX) };

            /// Creates a non-max value, or `None` if `n` is the maximum.
            #[inline(always)]
            pub const fn new(n: $Int) -> Option<Self> {
                match NonZero::<$Int>::new(n ^ <$Int>::MAX) {
                    Some(inner) => Some(Self(inner)),
                    None => None,
                }
            }

            /// Creates a non-max value without checking.
            ///
            /// # Safety
            /// `n` must not be the maximum value of the underlying integer.
            #[inline(always)]
            pub const unsafe fn new_unchecked(n: $Int) -> Self {
                unsafe { mem::transmute(n ^ <$Int>::MAX) }
            }

            /// Returns the value as the primitive integer type.
            #[inline(always)]
            pub const fn get(self) -> $Int {
                unsafe { mem::transmute::<Self, $Int>(self) ^ <$Int>::MAX }
            }
        }

        impl PartialEq for $NonMax {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl Eq for $NonMax {}

        impl PartialOrd for $NonMax {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $NonMax {
            #[inline]
            fn cmp(&self, other: &Self) -> Ordering {
                self.get().cmp(&other.get())
            }
        }

        impl Hash for $NonMax {
            #[inline]
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.get().hash(state)
            }
        }

        impl From<$NonMax> for $Int {
            #[inline]
            fn from(nonmax: $NonMax) -> Self {
                nonmax.get()
            }
        }

        impl Debug for $NonMax {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                Debug::fmt(&self.get(), f)
            }
        }

        impl Display for $NonMax {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                Display::fmt(&self.get(), f)
            }
        }

        impl Binary for $NonMax {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                Binary::fmt(&self.get(), f)
            }
        }

        impl Octal for $NonMax {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                Octal::fmt(&self.get(), f)
            }
        }

        impl LowerHex for $NonMax {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                LowerHex::fmt(&self.get(), f)
            }
        }

        impl UpperHex for $NonMax {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                UpperHex::fmt(&self.get(), f)
            }
        }
    };
}

impl_non_max!(NonMaxU8, u8);
impl_non_max!(NonMaxU16, u16);
impl_non_max!(NonMaxU32, u32);
impl_non_max!(NonMaxU64, u64);
impl_non_max!(NonMaxUsize, usize);

#[cfg(test)]
mod tests {
    use core::mem::size_of;

    use super::*;

    #[test]
    fn size_optimization() {
        assert_eq!(size_of::<Option<NonMaxU32>>(), size_of::<u32>());
        assert_eq!(size_of::<Option<NonMaxU64>>(), size_of::<u64>());
    }

    #[test]
    fn constants() {
        assert_eq!(NonMaxU32::ZERO.get(), 0);
        assert_eq!(NonMaxU32::MAX.get(), u32::MAX - 1);
    }

    #[test]
    fn new_and_get() {
        assert_eq!(NonMaxU32::new(0).unwrap().get(), 0);
        assert_eq!(NonMaxU32::new(42).unwrap().get(), 42);
        assert_eq!(NonMaxU32::new(u32::MAX - 1).unwrap().get(), u32::MAX - 1);
        assert!(NonMaxU32::new(u32::MAX).is_none());
    }

    #[test]
    fn ordering_uses_logical_value() {
        let small = NonMaxU32::new(10).unwrap();
        let large = NonMaxU32::new(20).unwrap();
        assert!(small < large);
        assert_eq!(small.max(large), large);
    }

    #[test]
    fn transmute_guarantee() {
        let nonmax = NonMaxU8::new(42).unwrap();
        let transmuted: u8 = unsafe { core::mem::transmute(nonmax) };
        assert_eq!(transmuted, 42 ^ u8::MAX);
    }

    #[test]
    fn all_values_except_max() {
        for i in 0..u8::MAX {
            assert_eq!(NonMaxU8::new(i).unwrap().get(), i);
        }
        assert!(NonMaxU8::new(u8::MAX).is_none());
    }
}
