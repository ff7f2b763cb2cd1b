//! Axis-aligned bounding volumes and subtree bounds queries.

use glam::{Mat4, Vec3};

use super::{NodeId, Scene};

// ---------------------------------------------------------------------------
// Aabb
// ---------------------------------------------------------------------------

/// An axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// The empty box: unions with it are identity, queries no-op.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Box from explicit corners.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box from a center point and full extents.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Whether the box contains no space.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// The smallest box containing both inputs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow to contain `point`.
    pub fn include_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Midpoint of the corners.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Per-axis extents.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Length of the corner-to-corner diagonal.
    #[must_use]
    pub fn diagonal(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.size().length()
        }
    }

    /// The axis-aligned box enclosing this box after transformation.
    ///
    /// Transforms all eight corners and rebuilds; conservative under
    /// rotation.
    #[must_use]
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        if self.is_empty() {
            return *self;
        }
        let mut out = Self::EMPTY;
        for corner in 0..8 {
            let p = Vec3::new(
                if corner & 1 == 0 { self.min.x } else { self.max.x },
                if corner & 2 == 0 { self.min.y } else { self.max.y },
                if corner & 4 == 0 { self.min.z } else { self.max.z },
            );
            out.include_point(matrix.transform_point3(p));
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Subtree bounds
// ---------------------------------------------------------------------------

/// Union of every leaf geometry's bounds under `root` (inclusive), each
/// taken through its node's accumulated world transform.
///
/// World transforms must be up to date — call
/// [`Scene::update_world_transforms`] first. Returns [`Aabb::EMPTY`] when
/// the subtree holds no geometry.
#[must_use]
pub fn compute_subtree_bounds(scene: &Scene, root: NodeId) -> Aabb {
    let mut bounds = Aabb::EMPTY;
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        let Some(node) = scene.node(id) else { continue };
        if let Some(local) = node.geometry_bounds {
            bounds = bounds.union(&local.transformed(&node.world_matrix()));
        }
        stack.extend_from_slice(node.children());
    }
    bounds
}
