use crate::errors::Result;
use crate::renderer::extract::collect_draws;
use crate::renderer::{FrameInfo, RenderSettings, Renderer, prepare_frame};
use crate::scene::{PerspectiveCamera, Scene};

/// Renderer without an output surface.
///
/// Keeps the size and pixel ratio the scene asked for, counts frames and
/// builds the draw list a GPU backend would submit.
#[derive(Debug, Clone)]
pub struct HeadlessRenderer {
    settings: RenderSettings,
    pixel_ratio: f32,
    width: u32,
    height: u32,
    frames_rendered: u64,
    last_frame: Option<FrameInfo>,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            pixel_ratio: 1.0,
            width: 0,
            height: 0,
            frames_rendered: 0,
            last_frame: None,
        }
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&FrameInfo> {
        self.last_frame.as_ref()
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

impl Renderer for HeadlessRenderer {
    fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, scene: &mut Scene, camera: &mut PerspectiveCamera) -> Result<FrameInfo> {
        let view_projection = prepare_frame(scene, camera);
        self.frames_rendered += 1;

        let info = FrameInfo {
            frame_index: self.frames_rendered,
            width: self.width,
            height: self.height,
            view_projection,
            draw_calls: collect_draws(scene).len(),
        };
        self.last_frame = Some(info);
        Ok(info)
    }
}
