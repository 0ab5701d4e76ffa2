// -----------------------------------------------------------------------------
// Modules

mod allocator;
mod error;
mod ident;
mod info;

// -----------------------------------------------------------------------------
// Exports

pub use allocator::EntityAllocator;
pub use error::*;
pub use ident::{Entity, EntityGeneration, EntityId};
pub use info::{Entities, EntityLocation, MovedEntity};
