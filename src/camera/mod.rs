//! Camera state and automatic scene framing.

/// Perspective camera struct and matrix builders.
pub mod core;
/// Bounding-volume auto-framing.
pub mod framer;

pub use core::Camera;
pub use framer::frame_bounds;
