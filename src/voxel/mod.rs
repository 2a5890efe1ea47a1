//! Voxel data structures

pub mod color;
pub mod face;
pub mod grid;
pub mod palette;

pub use color::Color;
pub use face::Face;
pub use grid::{Extent, ObserverId, VoxelGrid};
pub use palette::Palette;
