//! Zoxel - editing core for a voxel model editor
//!
//! Holds a bounded voxel grid with change tracking, an interchangeable set of
//! editing tools and pluggable file codecs. Rendering and windowing live
//! outside this crate and talk to it through [`session::EditorSession`].

pub mod core;
pub mod math;
pub mod voxel;
pub mod tool;
pub mod io;
pub mod session;
