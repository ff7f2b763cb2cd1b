use glam::{EulerRot, Mat4, Quat, Vec3};

use super::bounds::Aabb;
use super::NodeId;

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// What a scene node represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Pure transform node with no geometry of its own.
    Group,
    /// Leaf node carrying mesh geometry (and local bounds).
    Mesh,
    /// Leaf node carrying line geometry (the rendered route).
    Line,
}

impl NodeKind {
    /// Label used by the scene-graph dump.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Mesh => "Mesh",
            Self::Line => "Line",
        }
    }
}

// ---------------------------------------------------------------------------
// SceneNode
// ---------------------------------------------------------------------------

/// A node in the scene graph: a name, a local TRS transform, optional leaf
/// geometry bounds, and a cached world matrix.
///
/// The world matrix is refreshed only by
/// [`Scene::update_world_transforms`](super::Scene::update_world_transforms);
/// reading it after a local-transform change without a refresh yields the
/// previous frame's value.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Node name; matched by subtree lookups and the correction table.
    pub name: String,
    /// What the node represents.
    pub kind: NodeKind,
    /// Local translation.
    pub position: Vec3,
    /// Local rotation.
    pub rotation: Quat,
    /// Local scale.
    pub scale: Vec3,
    /// Local-space bounds of leaf geometry, if this node carries any.
    pub geometry_bounds: Option<Aabb>,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) world: Mat4,
}

impl SceneNode {
    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            geometry_bounds: None,
            parent: None,
            children: Vec::new(),
            world: Mat4::IDENTITY,
        }
    }

    /// A transform-only group node.
    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    /// A mesh leaf with local-space geometry bounds.
    #[must_use]
    pub fn mesh(name: impl Into<String>, bounds: Aabb) -> Self {
        let mut node = Self::new(name, NodeKind::Mesh);
        node.geometry_bounds = Some(bounds);
        node
    }

    /// A line leaf (the rendered route visual). Carries no bounds — the
    /// route is excluded from scene framing, matching a hidden helper
    /// object.
    #[must_use]
    pub fn line(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Line)
    }

    /// Builder-style local position.
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder-style local scale.
    #[must_use]
    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set the local rotation from XYZ Euler angles in radians.
    pub fn set_rotation_euler(&mut self, euler: Vec3) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, euler.x, euler.y, euler.z);
    }

    /// Local rotation as XYZ Euler angles in radians.
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    /// The local transform matrix.
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.position,
        )
    }

    /// Cached world matrix from the last
    /// [`Scene::update_world_transforms`](super::Scene::update_world_transforms).
    #[must_use]
    pub fn world_matrix(&self) -> Mat4 {
        self.world
    }

    /// World position from the cached world matrix.
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    /// Parent node, if any.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Rotate this node so its local +Z axis points from its position
    /// toward `target` (both in the parent's coordinate space).
    ///
    /// When `target` coincides with the node's position there is no
    /// discernible direction; the previous orientation is left unchanged.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let forward = target - self.position;
        if forward.length_squared() < 1e-12 {
            return;
        }
        let z = forward.normalize();
        let mut x = up.cross(z);
        if x.length_squared() < 1e-12 {
            // up parallel to the view direction; pick a fallback axis
            let alt = if z.y.abs() < 0.9 { Vec3::Y } else { Vec3::X };
            x = alt.cross(z);
        }
        let x = x.normalize();
        let y = z.cross(x);
        self.rotation =
            Quat::from_mat3(&glam::Mat3::from_cols(x, y, z)).normalize();
    }
}
