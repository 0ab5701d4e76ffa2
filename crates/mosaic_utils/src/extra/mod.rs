//! Extra containers that do not fit the plain hash aliases.

mod typeid_map;

pub use typeid_map::TypeIdMap;
