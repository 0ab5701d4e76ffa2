//! Shared utility types for the mosaic ECS: niche-optimized integers,
//! hashing states tuned for dense ids, and a `TypeId`-keyed map.
#![expect(unsafe_code, reason = "NonMax relies on layout guarantees")]
#![no_std]

#[cfg(test)]
extern crate std;

extern crate alloc;

pub mod extra;
pub mod hash;
pub mod num;
