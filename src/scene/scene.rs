use glam::Affine3A;
use slotmap::SlotMap;

use crate::scene::NodeHandle;
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::transform::Transform;

/// Scene graph container.
///
/// Nodes live in a slot map; `root_nodes` lists the nodes without a parent.
/// The scene carries its own [`Transform`], applied above every root, which
/// is what the mouse-driven rotation turns.
pub struct Scene {
    nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,
    pub lights: Vec<Light>,
    pub transform: Transform,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            lights: Vec::new(),
            transform: Transform::new(),
        }
    }

    /// Inserts a node at the root level.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn create_node_with_name(&mut self, name: &str) -> NodeHandle {
        self.add_node(Node::with_name(name))
    }

    /// Inserts a node directly under `parent`.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.add_node(child);
        self.attach(handle, parent);
        handle
    }

    /// Moves `child` under `parent`, detaching it from its previous parent
    /// (or from the root list).
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach");
            return;
        }

        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Depth-first search for the first node called `name` in the subtree
    /// rooted at `root` (the root itself included).
    #[must_use]
    pub fn get_node_by_name(&self, root: NodeHandle, name: &str) -> Option<NodeHandle> {
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if node.name == name {
                return Some(current);
            }
            // Reverse so the first child is visited first.
            stack.extend(node.children.iter().rev().copied());
        }
        None
    }

    /// Searches every root subtree, in root order.
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.root_nodes
            .iter()
            .find_map(|&root| self.get_node_by_name(root, name))
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Recomputes every node's world matrix, with the scene transform as the
    /// parent of all roots.
    pub fn update_world_matrices(&mut self) {
        let scene_matrix = self.transform.update_local_matrix();
        self.transform.set_world_matrix(scene_matrix);

        let mut stack: Vec<(NodeHandle, Affine3A)> = self
            .root_nodes
            .iter()
            .map(|&root| (root, scene_matrix))
            .collect();

        while let Some((handle, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };
            let world = parent_world * node.transform.update_local_matrix();
            node.transform.set_world_matrix(world);
            stack.extend(node.children.iter().map(|&child| (child, world)));
        }
    }

    /// Every node with its handle, in storage order.
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeHandle, &Node)> {
        self.nodes.iter()
    }
}
