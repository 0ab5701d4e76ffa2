// -----------------------------------------------------------------------------
// Modules

mod ident;
mod impls;
mod info;

// -----------------------------------------------------------------------------
// Exports

pub use ident::BundleId;
pub use impls::Bundle;
pub use info::{BundleInfo, Bundles};
