use std::sync::Arc;

use crate::animation::action::{AnimationAction, TrackValue};
use crate::animation::binder::Binder;
use crate::animation::binding::TargetPath;
use crate::animation::clip::AnimationClip;
use crate::scene::{NodeHandle, Scene};

/// Plays clip actions against the subtree rooted at `root`.
///
/// Actions are applied in creation order; when two running actions write
/// the same property the later one wins.
pub struct AnimationMixer {
    root: NodeHandle,
    actions: Vec<AnimationAction>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new(root: NodeHandle) -> Self {
        Self {
            root,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Returns the action for `clip`, creating and binding it on first use.
    pub fn clip_action(&mut self, clip: &Arc<AnimationClip>, scene: &Scene) -> &mut AnimationAction {
        let index = match self
            .actions
            .iter()
            .position(|a| Arc::ptr_eq(a.clip(), clip))
        {
            Some(index) => index,
            None => {
                let mut action = AnimationAction::new(Arc::clone(clip));
                action.bindings = Binder::bind(scene, self.root, clip);
                log::debug!(
                    "Bound clip '{}': {}/{} tracks",
                    clip.name,
                    action.bindings.len(),
                    clip.tracks.len()
                );
                self.actions.push(action);
                self.actions.len() - 1
            }
        };
        &mut self.actions[index]
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    #[must_use]
    pub fn playing_count(&self) -> usize {
        self.actions.iter().filter(|a| a.is_running()).count()
    }

    pub fn stop_all(&mut self) {
        for action in &mut self.actions {
            action.stop();
        }
    }

    /// Advances every action by `dt` seconds and writes the sampled values
    /// into the bound scene nodes.
    pub fn update(&mut self, dt: f32, scene: &mut Scene) {
        for action in &mut self.actions {
            action.update(dt);

            if !action.enabled || action.weight <= 0.0 {
                continue;
            }

            // Sampling needs `&mut action`, so walk bindings by index.
            for binding_index in 0..action.bindings.len() {
                let binding = action.bindings[binding_index].clone();
                let Some(value) = action.sample_track(binding.track_index) else {
                    continue;
                };
                let Some(node) = scene.get_node_mut(binding.node) else {
                    continue;
                };

                match (binding.target, value) {
                    (TargetPath::Translation, TrackValue::Vector3(v)) => {
                        node.transform.position = v;
                    }
                    (TargetPath::Scale, TrackValue::Vector3(v)) => {
                        node.transform.scale = v;
                    }
                    (TargetPath::Rotation, TrackValue::Quaternion(q)) => {
                        node.transform.rotation = q;
                    }
                    (TargetPath::Weights, TrackValue::MorphWeights(w)) => {
                        node.set_morph_weights(&w.weights);
                    }
                    _ => {}
                }
            }
        }
    }
}
