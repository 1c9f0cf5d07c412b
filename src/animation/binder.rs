use rustc_hash::FxHashMap;

use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::scene::{NodeHandle, Scene};

pub struct Binder;

impl Binder {
    /// Resolves each track of `clip` to the node of the same name under
    /// `root`. Tracks whose node cannot be found are skipped.
    ///
    /// When several nodes share a name, the first in depth-first order wins.
    #[must_use]
    pub fn bind(scene: &Scene, root: NodeHandle, clip: &AnimationClip) -> Vec<PropertyBinding> {
        let index = Self::name_index(scene, root);
        let mut bindings = Vec::with_capacity(clip.tracks.len());

        for (track_index, track) in clip.tracks.iter().enumerate() {
            match index.get(track.meta.node_name.as_str()) {
                Some(&node) => bindings.push(PropertyBinding {
                    track_index,
                    node,
                    target: track.meta.target,
                }),
                None => log::warn!(
                    "Clip '{}': no node named '{}' for track {}",
                    clip.name,
                    track.meta.node_name,
                    track_index
                ),
            }
        }

        bindings
    }

    /// Name -> handle for the subtree under `root`, in depth-first order.
    fn name_index<'a>(scene: &'a Scene, root: NodeHandle) -> FxHashMap<&'a str, NodeHandle> {
        let mut index = FxHashMap::default();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            let Some(node) = scene.get_node(current) else {
                continue;
            };
            index.entry(node.name.as_str()).or_insert(current);
            stack.extend(node.children().iter().rev().copied());
        }
        index
    }
}
