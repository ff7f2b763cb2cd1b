//! Scene graph: an id-based node arena with explicit world-transform
//! refresh.
//!
//! The graph models what the loader hands the core after an asset load —
//! named nodes, local TRS transforms, leaf geometry bounds. Nodes are never
//! removed; ids stay valid for the life of the scene. World matrices are
//! cached and refreshed on demand via
//! [`Scene::update_world_transforms`], mirroring a lazily-updated matrix
//! hierarchy.

pub mod bounds;
pub mod dump;
mod node;

use glam::Mat4;
use rustc_hash::FxHashMap;

pub use bounds::{compute_subtree_bounds, Aabb};
pub use node::{NodeKind, SceneNode};

/// Stable node identifier (arena index).
pub type NodeId = u32;

const NO_CHILDREN: &[NodeId] = &[];

/// The scene graph. Owns all nodes in a flat arena; node 0 is the root.
pub struct Scene {
    nodes: Vec<SceneNode>,
    names: FxHashMap<String, NodeId>,
}

impl Scene {
    /// An empty scene holding only the root group node.
    #[must_use]
    pub fn new() -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            names: FxHashMap::default(),
        };
        let root = scene.push(SceneNode::group("Scene"));
        debug_assert_eq!(root, 0);
        scene
    }

    /// The root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        0
    }

    /// Number of nodes in the scene, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene holds only the root node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    // -- Node management --

    /// Insert `node` as the last child of `parent`. Returns the new id.
    ///
    /// The first node inserted under a given name wins the global name
    /// lookup; later duplicates stay reachable through subtree search.
    pub fn insert(&mut self, parent: NodeId, node: SceneNode) -> NodeId {
        let id = self.push(node);
        if let Some(n) = self.nodes.get_mut(id as usize) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.nodes.get_mut(parent as usize) {
            p.children.push(id);
        }
        id
    }

    fn push(&mut self, node: SceneNode) -> NodeId {
        let id = self.nodes.len() as NodeId;
        if !node.name.is_empty() {
            let _ = self.names.entry(node.name.clone()).or_insert(id);
        }
        self.nodes.push(node);
        id
    }

    /// Read access to a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id as usize)
    }

    /// Write access to a node.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id as usize)
    }

    /// Children of `id`, in insertion order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id as usize)
            .map_or(NO_CHILDREN, SceneNode::children)
    }

    /// Detach `id` from its current parent and attach it as the last child
    /// of `new_parent`. Local transforms are left untouched; the caller
    /// re-seeds them (and refreshes world matrices) as needed.
    pub fn reparent(&mut self, id: NodeId, new_parent: NodeId) {
        if id == new_parent
            || self.nodes.get(id as usize).is_none()
            || self.nodes.get(new_parent as usize).is_none()
        {
            return;
        }
        if let Some(op) = self.nodes[id as usize].parent {
            if let Some(p) = self.nodes.get_mut(op as usize) {
                p.children.retain(|&c| c != id);
            }
        }
        self.nodes[new_parent as usize].children.push(id);
        self.nodes[id as usize].parent = Some(new_parent);
    }

    // -- Lookup --

    /// Global name lookup (first node inserted under that name).
    #[must_use]
    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Depth-first search for the first node named `name` within the
    /// subtree rooted at `root` (the root itself included).
    #[must_use]
    pub fn find_in_subtree(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(id as usize) else {
                continue;
            };
            if node.name == name {
                return Some(id);
            }
            // Reverse so the leftmost child is visited first.
            stack.extend(node.children.iter().rev());
        }
        None
    }

    // -- World transforms --

    /// Recompute every node's cached world matrix from the root down.
    ///
    /// Must be called after local-transform or hierarchy changes and before
    /// any world-space query (bounds, world positions).
    pub fn update_world_transforms(&mut self) {
        let mut stack = vec![(self.root(), Mat4::IDENTITY)];
        while let Some((id, parent_world)) = stack.pop() {
            let world = match self.nodes.get_mut(id as usize) {
                Some(node) => {
                    node.world = parent_world * node.local_matrix();
                    node.world
                }
                None => continue,
            };
            for &child in &self.nodes[id as usize].children {
                stack.push((child, world));
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
