use smallvec::SmallVec;

use crate::resources::Mesh;
use crate::scene::NodeHandle;
use crate::scene::transform::Transform;

/// A scene node.
///
/// `morph_target_influences` holds one weight per morph target slot. An
/// empty list means the node exposes no slots, and writers must skip it.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub transform: Transform,
    pub mesh: Option<Mesh>,
    pub morph_target_influences: SmallVec<[f32; 4]>,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("")
    }

    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            mesh: None,
            morph_target_influences: SmallVec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Overwrites the influence at `index`. Returns `false` if the slot does
    /// not exist.
    pub fn set_morph_influence(&mut self, index: usize, weight: f32) -> bool {
        match self.morph_target_influences.get_mut(index) {
            Some(slot) => {
                *slot = weight;
                true
            }
            None => false,
        }
    }

    /// Copies as many leading weights as the node has slots.
    pub fn set_morph_weights(&mut self, weights: &[f32]) {
        for (slot, weight) in self.morph_target_influences.iter_mut().zip(weights) {
            *slot = *weight;
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
