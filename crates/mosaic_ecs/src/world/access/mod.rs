mod entity_world;

pub use entity_world::EntityWorldMut;
