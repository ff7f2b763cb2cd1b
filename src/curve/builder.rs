//! Route construction: control points → closed interpolation loop.

use glam::Vec3;

use super::spline::ClosedSpline;
use crate::error::MotorcadeError;

/// Two control points closer than this are treated as the same point when
/// validating the route.
const DISTINCT_EPSILON: f32 = 1e-6;

/// Expand a control-point ring into a corner-tightened closed loop.
///
/// For each control point `i`, emits the triple `(p_i, lerp(p_i, p_j, t),
/// lerp(p_i, p_j, 1 - t))` where `p_j` is the next control point (wrapping)
/// and `t` is `tightness`. The auxiliary points near each corner keep the
/// interpolating spline from over-rounding turns.
///
/// # Errors
///
/// Returns [`MotorcadeError::InvalidPath`] if fewer than three distinct
/// control points are supplied.
pub fn corner_tightened_loop(
    control_points: &[Vec3],
    tightness: f32,
) -> Result<Vec<Vec3>, MotorcadeError> {
    let distinct = count_distinct(control_points);
    if distinct < 3 {
        return Err(MotorcadeError::InvalidPath { distinct });
    }

    let t = tightness.clamp(0.0, 0.5);
    let n = control_points.len();
    let mut loop_points = Vec::with_capacity(n * 3);
    for (i, &p0) in control_points.iter().enumerate() {
        let p1 = control_points[(i + 1) % n];
        loop_points.push(p0);
        loop_points.push(p0.lerp(p1, t));
        loop_points.push(p0.lerp(p1, 1.0 - t));
    }
    Ok(loop_points)
}

/// Build the closed route spline for a control-point ring.
///
/// Convenience wrapper: tighten corners, then construct a [`ClosedSpline`]
/// with an `arc_samples`-entry arc-length table.
///
/// # Errors
///
/// Returns [`MotorcadeError::InvalidPath`] if fewer than three distinct
/// control points are supplied.
pub fn build_route_spline(
    control_points: &[Vec3],
    tightness: f32,
    arc_samples: usize,
) -> Result<ClosedSpline, MotorcadeError> {
    let loop_points = corner_tightened_loop(control_points, tightness)?;
    ClosedSpline::new(loop_points, arc_samples)
}

fn count_distinct(points: &[Vec3]) -> usize {
    let mut distinct: Vec<Vec3> = Vec::with_capacity(points.len());
    for &p in points {
        if !distinct
            .iter()
            .any(|&q| p.distance_squared(q) < DISTINCT_EPSILON * DISTINCT_EPSILON)
        {
            distinct.push(p);
        }
    }
    distinct.len()
}
