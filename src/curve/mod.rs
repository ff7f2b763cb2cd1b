//! Closed route construction and sampling.
//!
//! A route is built from ordered control points. Near-corner auxiliary points
//! are inserted so the interpolating spline hugs turns instead of rounding
//! them off, then the whole loop is sampled through a closed Catmull-Rom
//! curve with an arc-length table for uniform-speed traversal.

pub mod builder;
pub mod spline;

pub use builder::{build_route_spline, corner_tightened_loop};
pub use spline::ClosedSpline;
