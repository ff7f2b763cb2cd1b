//! Per-tick path following for the registered fleet.

use glam::Mat4;

use super::registry::ActorRegistry;
use crate::curve::ClosedSpline;
use crate::scene::Scene;

/// Drives every registered actor along the route each tick.
///
/// Holds only tuning constants; all mutable state lives in the scene. The
/// path parameter is accumulated in `f64` and folded with `rem_euclid`
/// before narrowing to `f32` at the sampling boundary, which keeps the
/// wrap precise over long sessions.
#[derive(Debug, Clone, Copy)]
pub struct FleetAnimator {
    /// Seconds-to-parameter rate: one second advances the loop fraction by
    /// this much.
    speed_scale: f64,
    /// Loop fraction sampled ahead of each actor to derive its facing
    /// direction.
    look_ahead: f64,
}

impl FleetAnimator {
    /// Animator with the given tuning constants.
    #[must_use]
    pub fn new(speed_scale: f64, look_ahead: f64) -> Self {
        Self {
            speed_scale,
            look_ahead,
        }
    }

    /// Path parameter for phase `phase` at `elapsed_seconds`, folded into
    /// [0,1).
    #[must_use]
    pub fn path_parameter(&self, elapsed_seconds: f64, phase: f64) -> f64 {
        (elapsed_seconds * self.speed_scale + phase).rem_euclid(1.0)
    }

    /// Advance every actor to its pose at `elapsed_seconds`.
    ///
    /// Per actor: sample the route at its path parameter and slightly ahead
    /// of it, remap both points through `path_world` (the route visual's
    /// world transform — the rendered curve may be scaled and positioned
    /// independently of the logical curve), face the mount toward the
    /// look-ahead point, then rest the mount at the midpoint of the two
    /// samples. The midpoint placement leads the raw sample by half the
    /// look-ahead, which visibly reduces lag on tight segments.
    ///
    /// An empty registry is a no-op. A degenerate route (coincident
    /// samples) moves the actor without touching its orientation.
    pub fn update(
        &self,
        scene: &mut Scene,
        registry: &ActorRegistry,
        spline: &ClosedSpline,
        path_world: &Mat4,
        elapsed_seconds: f64,
    ) {
        for actor in registry.actors() {
            let u = self.path_parameter(elapsed_seconds, actor.phase);
            let ahead_u =
                self.path_parameter(elapsed_seconds, actor.phase + self.look_ahead);

            let position =
                path_world.transform_point3(spline.sample_uniform(u as f32));
            let ahead = path_world
                .transform_point3(spline.sample_uniform(ahead_u as f32));

            let Some(mount) = scene.node_mut(actor.mount) else {
                continue;
            };
            mount.position = position;
            mount.look_at(ahead, glam::Vec3::Y);
            mount.position = position.lerp(ahead, 0.5);
        }
    }
}
