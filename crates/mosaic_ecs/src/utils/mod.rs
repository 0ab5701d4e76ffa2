// -----------------------------------------------------------------------------
// Modules

mod cloner;
mod debug_name;
mod debug_unwrap;
mod defaulter;
mod dropper;

// -----------------------------------------------------------------------------
// Exports

pub use cloner::Cloner;
pub use debug_name::DebugName;
pub use debug_unwrap::DebugCheckedUnwrap;
pub use defaulter::Defaulter;
pub use dropper::Dropper;
