//! Closed Catmull-Rom sampling with arc-length parameterization.

use glam::Vec3;

use crate::error::MotorcadeError;

/// Default number of samples in the arc-length table.
pub const DEFAULT_ARC_SAMPLES: usize = 512;

/// A closed interpolating curve over a ring of points.
///
/// The curve passes through every point and wraps without a seam: sampling
/// at `u` and at `u + 1` yields identical positions. Immutable after
/// construction.
///
/// [`sample`](Self::sample) wraps its parameter into `[0,1)` with
/// `rem_euclid` — out-of-range values are folded, never an error. Callers
/// that want the strict domain contract use
/// [`sample_checked`](Self::sample_checked).
#[derive(Debug, Clone)]
pub struct ClosedSpline {
    points: Vec<Vec3>,
    /// Normalized cumulative arc length at parameter `j / (len - 1)`.
    arc_table: Vec<f32>,
}

impl ClosedSpline {
    /// Build a closed spline over `points`, precomputing an
    /// `arc_samples`-entry arc-length table for uniform-speed sampling.
    ///
    /// # Errors
    ///
    /// Returns [`MotorcadeError::InvalidPath`] if fewer than three points
    /// are supplied.
    pub fn new(
        points: Vec<Vec3>,
        arc_samples: usize,
    ) -> Result<Self, MotorcadeError> {
        if points.len() < 3 {
            return Err(MotorcadeError::InvalidPath {
                distinct: points.len(),
            });
        }
        let mut spline = Self {
            points,
            arc_table: Vec::new(),
        };
        spline.arc_table = spline.build_arc_table(arc_samples.max(2));
        Ok(spline)
    }

    /// Number of interpolation points in the ring.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// The interpolation points, in ring order.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Sample the curve at parameter `u` in segment space.
    ///
    /// `u` is wrapped into `[0,1)` with `rem_euclid(1.0)`, so `sample(u)`
    /// equals `sample(u + 1)` for every `u`. Segment-space parameterization:
    /// equal parameter steps cover one spline segment each, regardless of
    /// segment length.
    #[must_use]
    pub fn sample(&self, u: f32) -> Vec3 {
        let u = u.rem_euclid(1.0);
        let n = self.points.len();
        let s = u * n as f32;
        let i = (s.floor() as usize).min(n - 1);
        let t = s - i as f32;

        let p0 = self.points[(i + n - 1) % n];
        let p1 = self.points[i];
        let p2 = self.points[(i + 1) % n];
        let p3 = self.points[(i + 2) % n];

        let t2 = t * t;
        let t3 = t2 * t;
        0.5 * ((2.0 * p1)
            + (-p0 + p2) * t
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
            + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
    }

    /// Strict-domain variant of [`sample`](Self::sample).
    ///
    /// # Errors
    ///
    /// Returns [`MotorcadeError::Domain`] if `u` is outside `[0,1)`.
    pub fn sample_checked(&self, u: f32) -> Result<Vec3, MotorcadeError> {
        if !(0.0..1.0).contains(&u) {
            return Err(MotorcadeError::Domain(u));
        }
        Ok(self.sample(u))
    }

    /// Sample the curve at parameter `u` in arc-length space.
    ///
    /// Equal parameter steps cover equal distances along the curve, so an
    /// actor advancing `u` at a constant rate moves at constant speed. `u`
    /// wraps like [`sample`](Self::sample).
    #[must_use]
    pub fn sample_uniform(&self, u: f32) -> Vec3 {
        self.sample(self.arc_to_segment(u.rem_euclid(1.0)))
    }

    /// Tessellate the curve into `divisions + 1` points (the last repeats
    /// the first, closing the loop). Used to build the path-visual geometry.
    #[must_use]
    pub fn tessellate(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|j| self.sample(j as f32 / divisions as f32))
            .collect()
    }

    /// Map a normalized arc-length parameter to a segment-space parameter
    /// via the precomputed table.
    fn arc_to_segment(&self, u: f32) -> f32 {
        let table = &self.arc_table;
        let last = table.len() - 1;
        let j = table.partition_point(|&len| len < u).min(last);
        if j == 0 {
            return 0.0;
        }
        let below = table[j - 1];
        let span = table[j] - below;
        let fraction = if span > f32::EPSILON {
            (u - below) / span
        } else {
            0.0
        };
        ((j - 1) as f32 + fraction) / last as f32
    }

    /// Cumulative chord lengths over `samples` segment-space steps,
    /// normalized to end at 1. A fully degenerate curve (all points
    /// coincident) falls back to the identity ramp so arc-length sampling
    /// still behaves.
    fn build_arc_table(&self, samples: usize) -> Vec<f32> {
        let mut table = Vec::with_capacity(samples + 1);
        table.push(0.0);
        let mut total = 0.0;
        let mut previous = self.sample(0.0);
        for j in 1..=samples {
            let current = self.sample(j as f32 / samples as f32);
            total += previous.distance(current);
            table.push(total);
            previous = current;
        }
        if total > f32::EPSILON {
            for len in &mut table {
                *len /= total;
            }
        } else {
            for (j, len) in table.iter_mut().enumerate() {
                *len = j as f32 / samples as f32;
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::build_route_spline;

    fn square_spline() -> ClosedSpline {
        ClosedSpline::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(10.0, 0.0, 10.0),
                Vec3::new(0.0, 0.0, 10.0),
            ],
            256,
        )
        .unwrap()
    }

    #[test]
    fn interpolates_through_ring_points() {
        let spline = square_spline();
        assert!((spline.sample(0.0) - Vec3::ZERO).length() < 1e-5);
        assert!(
            (spline.sample(0.25) - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5
        );
    }

    #[test]
    fn loop_is_seamless() {
        let spline = square_spline();
        let at_start = spline.sample(0.0);
        let near_end = spline.sample(1.0 - 1e-6);
        assert!(
            (at_start - near_end).length() < 1e-3,
            "seam discontinuity: {at_start:?} vs {near_end:?}"
        );
    }

    #[test]
    fn parameter_wraps_by_whole_turns() {
        let spline = square_spline();
        for u in [0.1, 0.37, 0.9] {
            assert!((spline.sample(u) - spline.sample(u + 1.0)).length() < 1e-5);
            assert!((spline.sample(u) - spline.sample(u - 1.0)).length() < 1e-5);
        }
    }

    #[test]
    fn checked_sampling_rejects_out_of_domain() {
        let spline = square_spline();
        assert!(spline.sample_checked(0.5).is_ok());
        assert!(matches!(
            spline.sample_checked(1.0),
            Err(MotorcadeError::Domain(_))
        ));
        assert!(matches!(
            spline.sample_checked(-0.1),
            Err(MotorcadeError::Domain(_))
        ));
    }

    #[test]
    fn uniform_sampling_moves_at_constant_speed() {
        // A long/short segment mix: segment-space sampling would bunch
        // points on the short corner spans, arc-length sampling must not.
        let spline = build_route_spline(
            &[
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(40.0, 0.0, 0.0),
                Vec3::new(40.0, 0.0, 10.0),
                Vec3::new(0.0, 0.0, 10.0),
            ],
            0.1,
            1024,
        )
        .unwrap();

        let steps = 64;
        let distances: Vec<f32> = (0..steps)
            .map(|j| {
                let a = spline.sample_uniform(j as f32 / steps as f32);
                let b = spline.sample_uniform((j + 1) as f32 / steps as f32);
                a.distance(b)
            })
            .collect();
        let mean = distances.iter().sum::<f32>() / steps as f32;
        for d in &distances {
            assert!(
                (d - mean).abs() < mean * 0.25,
                "uneven step {d} vs mean {mean}"
            );
        }
    }

    #[test]
    fn degenerate_ring_samples_without_nan() {
        let p = Vec3::new(3.0, 1.0, -2.0);
        let spline = ClosedSpline::new(vec![p, p, p], 16).unwrap();
        for u in [0.0, 0.3, 0.99] {
            let s = spline.sample_uniform(u);
            assert!(s.is_finite());
            assert!((s - p).length() < 1e-5);
        }
    }

    #[test]
    fn too_few_ring_points_rejected() {
        let err =
            ClosedSpline::new(vec![Vec3::ZERO, Vec3::ONE], 16).unwrap_err();
        assert!(matches!(err, MotorcadeError::InvalidPath { distinct: 2 }));
    }

    #[test]
    fn tessellation_closes_the_loop() {
        let spline = square_spline();
        let line = spline.tessellate(250);
        assert_eq!(line.len(), 251);
        assert!((line[0] - line[250]).length() < 1e-4);
    }

    #[test]
    fn route_builder_round_trip() {
        let spline = build_route_spline(
            &[
                Vec3::new(0.0, 5.0, 0.0),
                Vec3::new(10.0, 5.0, 0.0),
                Vec3::new(5.0, 5.0, 8.0),
            ],
            0.1,
            128,
        )
        .unwrap();
        assert_eq!(spline.point_count(), 9);
        // The tightened loop still passes through the original corners.
        assert!((spline.sample(0.0) - Vec3::new(0.0, 5.0, 0.0)).length() < 1e-5);
    }
}
