use std::sync::Arc;

use crate::animation::clip::AnimationClip;
use crate::resources::Mesh;
use crate::scene::node::Node;
use crate::scene::transform::Transform;
use crate::scene::{NodeHandle, Scene};

/// Prefab node: plain data, children referenced by index.
#[derive(Debug, Clone)]
pub struct PrefabNode {
    pub name: String,
    pub transform: Transform,
    /// Indices into [`Prefab::nodes`].
    pub children_indices: Vec<usize>,
    pub mesh: Option<Mesh>,
    /// Initial morph weights, one per morph target of the mesh.
    pub morph_weights: Option<Vec<f32>>,
}

impl PrefabNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::new(),
            children_indices: Vec::new(),
            mesh: None,
            morph_weights: None,
        }
    }
}

/// Intermediate form of a decoded asset.
///
/// Holds no scene handles; [`Scene::instantiate`] turns it into nodes.
#[derive(Debug, Clone, Default)]
pub struct Prefab {
    /// Name of the root group created on instantiation.
    pub name: String,
    pub nodes: Vec<PrefabNode>,
    /// Indices of the top-level nodes of the default scene.
    pub root_indices: Vec<usize>,
    /// Clips in asset order.
    pub animations: Vec<Arc<AnimationClip>>,
}

impl Prefab {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Scene {
    /// Creates a root group node named after the prefab and instantiates the
    /// prefab's node tree beneath it. Returns the group handle.
    pub fn instantiate(&mut self, prefab: &Prefab) -> NodeHandle {
        let root = self.create_node_with_name(&prefab.name);

        let mut stack: Vec<(usize, NodeHandle)> = prefab
            .root_indices
            .iter()
            .rev()
            .map(|&index| (index, root))
            .collect();

        let mut visited = vec![false; prefab.nodes.len()];

        while let Some((index, parent)) = stack.pop() {
            let Some(source) = prefab.nodes.get(index) else {
                log::warn!("Prefab '{}' references missing node {index}", prefab.name);
                continue;
            };
            if std::mem::replace(&mut visited[index], true) {
                log::warn!("Prefab '{}' reaches node {index} twice, skipping", prefab.name);
                continue;
            }

            let mut node = Node::with_name(source.name.clone());
            node.transform = source.transform.clone();
            node.mesh.clone_from(&source.mesh);
            if let Some(weights) = &source.morph_weights {
                node.morph_target_influences = weights.iter().copied().collect();
            }

            let handle = self.add_to_parent(node, parent);
            stack.extend(
                source
                    .children_indices
                    .iter()
                    .rev()
                    .map(|&child| (child, handle)),
            );
        }

        root
    }
}
