//! Voxel occupancy grid and spatial queries

pub mod volume;
pub mod collision;

pub use volume::{CaveVolume, Cell, WORLD_MIN, WORLD_SPAN};
pub use collision::collides;
