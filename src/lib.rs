// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Closed-path fleet animation and auto-framing camera core.
//!
//! Motorcade drives a fleet of vehicle actors around a closed spline route
//! through a static city scene, and places the camera so the loaded model
//! fills the view. Rendering, asset parsing, and windowing stay outside:
//! a loader populates the [`scene::Scene`] graph and signals
//! [`engine::DriveEngine::on_scene_ready`]; a frame scheduler calls
//! [`engine::DriveEngine::tick`] with elapsed seconds.
//!
//! # Key entry points
//!
//! - [`engine::DriveEngine`] - the session context: scene, camera, route
//! - [`curve::ClosedSpline`] - seamless closed-loop sampling with an
//!   arc-length table
//! - [`camera::frame_bounds`] - fit a camera to a bounding volume
//! - [`options::Options`] - runtime configuration (camera, path tuning)
//!
//! # Architecture
//!
//! Single-threaded and frame-driven: each `tick` is pure in-memory
//! computation, completing synchronously before the next. The route spline
//! and scene bounds are computed once at load and immutable afterwards;
//! per-tick work is limited to sampling the curve and writing actor mount
//! transforms.

pub mod camera;
pub mod curve;
pub mod demo;
pub mod engine;
pub mod error;
pub mod fleet;
pub mod options;
pub mod scene;
pub mod util;
