//! Surface fields derived from the cave volume

pub mod heightfield;
pub use heightfield::HeightField;

pub mod normals;
pub use normals::NormalField;
