//! The storage core of the mosaic ECS.
//!
//! Entities are partitioned by their exact component set into *archetypes*.
//! Components declared with table storage live in columnar [`Table`]s shared
//! by every archetype with the same table component set; components declared
//! with sparse storage live in per-component sparse sets. Bundles apply
//! several components atomically, and archetype transitions are memoized on
//! per-bundle edges.
//!
//! [`Table`]: crate::storage::Table
#![expect(unsafe_code, reason = "type-erased storage requires raw memory")]
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod bundle;
pub mod utils;

pub mod component;
pub mod storage;

pub mod archetype;
pub mod entity;

pub mod world;
