//! Type-erased pointer wrappers used throughout the mosaic ECS.
//!
//! [`Ptr`] and [`PtrMut`] behave like `&T` / `&mut T` whose pointee type has
//! been erased: they carry a lifetime and optional alignment checks, which
//! brings them much closer to references than raw pointers.
//!
//! [`OwningPtr`] additionally represents *ownership* of the pointee. Whoever
//! holds one must either read the value out ([`read`](OwningPtr::read)) or
//! destroy it in place ([`drop_as`](OwningPtr::drop_as)); doing neither leaks.
//! It never manages the memory itself — it typically points into a column
//! buffer or at a stack value wrapped in `ManuallyDrop`.
#![expect(unsafe_code, reason = "raw pointers are inherently unsafe")]
#![no_std]

mod type_erased;

pub use type_erased::{OwningPtr, Ptr, PtrMut};
