//! Actor discovery and registration.

use glam::Vec3;

use super::correction::CorrectionTable;
use crate::error::MotorcadeError;
use crate::scene::{NodeId, Scene, SceneNode};

/// One registered path-following actor.
#[derive(Debug, Clone)]
pub struct Actor {
    /// Mount node driven by the animator each tick. A direct child of the
    /// scene root, so its local transform is its world transform.
    pub mount: NodeId,
    /// Body node (the visual mesh) carrying the fixed per-class correction.
    pub body: NodeId,
    /// Starting fraction along the loop, in [0,1). Derived from insertion
    /// order: actor `i` of `n` gets `i / n`.
    pub phase: f64,
    /// Body node name, kept for logging.
    pub name: String,
}

/// The registered fleet. Entries are created once at discovery and persist
/// for the life of the scene.
#[derive(Debug, Default)]
pub struct ActorRegistry {
    actors: Vec<Actor>,
}

impl ActorRegistry {
    /// Register every direct child of `group` as an actor.
    ///
    /// For each child, in order: look up its correction class, create a
    /// mount node at the child's current world position under the scene
    /// root, reparent the child onto the mount, and apply the class
    /// correction to the child's local transform (vertical offset + fixed
    /// rotation). Phase offsets are assigned as `i / n` by insertion order.
    ///
    /// Refreshes world transforms before reading positions, so callers
    /// don't have to.
    ///
    /// # Errors
    ///
    /// Returns [`MotorcadeError::UnmatchedActor`] if any child's name
    /// matches no correction rule. The scene may already hold mounts for
    /// earlier children at that point; treat the error as fatal.
    pub fn discover(
        scene: &mut Scene,
        group: NodeId,
        table: &CorrectionTable,
    ) -> Result<Self, MotorcadeError> {
        scene.update_world_transforms();

        let bodies: Vec<NodeId> = scene.children(group).to_vec();
        let count = bodies.len();
        let mut actors = Vec::with_capacity(count);

        for (index, body) in bodies.into_iter().enumerate() {
            let Some(node) = scene.node(body) else { continue };
            let name = node.name.clone();
            let world_position = node.world_position();
            let rule = table.lookup(&name)?;

            let root = scene.root();
            let mount = scene
                .insert(root, SceneNode::group(format!("{name}.mount")));
            if let Some(m) = scene.node_mut(mount) {
                m.position = world_position;
            }
            scene.reparent(body, mount);
            if let Some(b) = scene.node_mut(body) {
                b.position = Vec3::new(0.0, rule.height, 0.0);
                b.set_rotation_euler(rule.rotation);
            }

            log::debug!(
                "registered actor {name} (class {}) at phase {:.3}",
                rule.prefix,
                index as f64 / count as f64
            );
            actors.push(Actor {
                mount,
                body,
                phase: index as f64 / count as f64,
                name,
            });
        }

        Ok(Self { actors })
    }

    /// The registered actors, in discovery order.
    #[must_use]
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Number of registered actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the registry holds no actors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}
