use serde::{Deserialize, Serialize};

use crate::curve::spline::DEFAULT_ARC_SAMPLES;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Path-following tuning.
pub struct PathOptions {
    /// Loop fraction traversed per second of elapsed time.
    pub speed_scale: f64,
    /// Loop fraction sampled ahead of an actor to derive its facing.
    pub look_ahead: f64,
    /// Fraction toward the next control point for the inserted near-corner
    /// auxiliary points (`0.1` inserts at 10% and 90%).
    pub corner_tightness: f32,
    /// Sample count for the spline's arc-length table.
    pub arc_samples: usize,
    /// Segment count when tessellating the route into line geometry.
    pub line_divisions: usize,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            speed_scale: 0.01,
            look_ahead: 0.01,
            corner_tightness: 0.1,
            arc_samples: DEFAULT_ARC_SAMPLES,
            line_divisions: 250,
        }
    }
}
