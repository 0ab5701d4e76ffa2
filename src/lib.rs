#![doc = include_str!("../README.md")]
#![no_std]

pub use mosaic_ecs as ecs;
pub use mosaic_ptr as ptr;
pub use mosaic_utils as utils;
