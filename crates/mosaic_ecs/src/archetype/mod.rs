// -----------------------------------------------------------------------------
// Modules

mod arches;
mod ident;
mod info;

// -----------------------------------------------------------------------------
// Exports

pub use arches::Archetypes;
pub use ident::{ArcheId, ArcheRow};
pub use info::Archetype;

pub(crate) use info::InsertEdge;
