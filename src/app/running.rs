use crate::animation::AnimationMixer;
use crate::app::stage::Stage;
use crate::errors::Result;
use crate::renderer::Renderer;
use crate::scene::NodeHandle;
use crate::utils::time::Clock;

/// Outcome of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Weight written to the sea's first morph target.
    pub morph_weight: f32,
    /// Scene Y rotation after smoothing.
    pub rotation_y: f32,
    pub playing_clips: usize,
    pub frame_index: u64,
}

/// The loaded scene. Only this state has a per-frame update.
pub struct RunningGiant<R: Renderer> {
    stage: Stage<R>,
    mixer: AnimationMixer,
    root: NodeHandle,
    sea_mesh: NodeHandle,
}

impl<R: Renderer> RunningGiant<R> {
    pub(crate) fn new(mut stage: Stage<R>, mixer: AnimationMixer, root: NodeHandle, sea_mesh: NodeHandle) -> Self {
        // The first tick after load starts the clock.
        stage.context.clock = Clock::new();
        Self {
            stage,
            mixer,
            root,
            sea_mesh,
        }
    }

    #[must_use]
    pub fn stage(&self) -> &Stage<R> {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage<R> {
        &mut self.stage
    }

    #[must_use]
    pub fn mixer(&self) -> &AnimationMixer {
        &self.mixer
    }

    /// Root group the asset was instantiated under.
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    #[must_use]
    pub fn sea_mesh(&self) -> NodeHandle {
        self.sea_mesh
    }

    /// Advances by the clock's delta. The first tick advances by 0.
    pub fn tick(&mut self) -> Result<FrameReport> {
        let delta = self.stage.context.clock.get_delta();
        self.frame(delta)
    }

    /// Advances the animation by `delta` seconds and renders.
    pub fn frame(&mut self, delta: f32) -> Result<FrameReport> {
        let stage = &mut self.stage;

        self.mixer.update(delta, &mut stage.scene);

        let morph_weight = stage.context.oscillator.advance(delta);
        if let Some(node) = stage.scene.get_node_mut(self.sea_mesh) {
            node.set_morph_influence(0, morph_weight);
        }

        let rotation_y = stage
            .context
            .lerp
            .advance(stage.config.smoothing.mode, delta);
        stage.scene.transform.set_rotation_y(rotation_y);

        let info = stage.renderer.render(&mut stage.scene, &mut stage.camera)?;
        log::trace!("frame {}: dt={delta:.4} w={morph_weight:.3} ry={rotation_y:.4}", info.frame_index);

        Ok(FrameReport {
            delta,
            morph_weight,
            rotation_y,
            playing_clips: self.mixer.playing_count(),
            frame_index: info.frame_index,
        })
    }
}
