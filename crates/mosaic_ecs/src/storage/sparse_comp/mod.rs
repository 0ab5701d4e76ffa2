// -----------------------------------------------------------------------------
// Modules

mod ident;
mod map;
mod maps;

// -----------------------------------------------------------------------------
// Exports

pub use ident::{MapId, MapRow};
pub use map::ComponentSparseSet;
pub use maps::Maps;
