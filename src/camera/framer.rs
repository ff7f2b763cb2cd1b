//! Bounding-volume camera auto-framing.
//!
//! Places the camera so a bounding volume fills the vertical field of view,
//! approaching from the camera's current horizontal bearing. Right-triangle
//! relation: half the framed extent is the opposite side, the eye-to-center
//! distance the adjacent side, so `distance = half_extent / tan(fovy / 2)`.

use glam::Vec3;

use super::core::Camera;
use crate::error::MotorcadeError;
use crate::scene::Aabb;

/// Approach direction used when the camera sits directly above or below the
/// volume center and no horizontal bearing exists.
pub const FALLBACK_APPROACH: Vec3 = Vec3::Z;

/// Horizontal unit vector from `center` toward `eye`.
///
/// The vertical component is discarded first, preserving the camera's
/// horizontal bearing while ignoring its prior height.
///
/// # Errors
///
/// Returns [`MotorcadeError::DegenerateDirection`] when the horizontal
/// projection is the zero vector.
pub fn horizontal_approach(
    eye: Vec3,
    center: Vec3,
) -> Result<Vec3, MotorcadeError> {
    let flat = (eye - center) * Vec3::new(1.0, 0.0, 1.0);
    if flat.length_squared() < 1e-12 {
        return Err(MotorcadeError::DegenerateDirection);
    }
    Ok(flat.normalize())
}

/// Move and aim `camera` so `bounds` fits its view frustum.
///
/// Mutates eye, target, and near/far planes only. Near/far get generous
/// margins (`diagonal / 100` and `diagonal * 100`) so the whole volume is
/// inside the frustum regardless of shape. Degenerate horizontal bearing
/// falls back to [`FALLBACK_APPROACH`]. Idempotent for a fixed volume and
/// field of view; an empty or zero-size volume leaves the camera untouched.
pub fn frame_bounds(camera: &mut Camera, bounds: &Aabb) {
    let diagonal = bounds.diagonal();
    if diagonal <= f32::EPSILON {
        return;
    }
    let center = bounds.center();
    let half_extent = diagonal * 0.5;
    let half_fovy = (camera.fovy * 0.5).to_radians();
    let distance = half_extent / half_fovy.tan();

    let direction = match horizontal_approach(camera.eye, center) {
        Ok(dir) => dir,
        Err(_) => {
            log::debug!(
                "camera directly above scene center; framing along +Z"
            );
            FALLBACK_APPROACH
        }
    };

    camera.eye = center + direction * distance;
    camera.znear = diagonal / 100.0;
    camera.zfar = diagonal * 100.0;
    camera.look_at(center);

    log::debug!(
        "framed bounds: center {center:?}, diagonal {diagonal:.2}, distance {distance:.2}"
    );
}
