//! Karst - procedural voxel cave generation

pub mod core;
pub mod noise;
pub mod voxel;
pub mod terrain;
pub mod generation;
pub mod placement;
pub mod spawn;
pub mod session;
