use web_sys::HtmlCanvasElement;

use crate::errors::{GiantError, Result};
use crate::renderer::gpu::GpuBackend;
use crate::renderer::{FrameInfo, RenderSettings, Renderer, prepare_frame};
use crate::scene::{PerspectiveCamera, Scene};

/// Renderer bound to a page `<canvas>`.
///
/// Sizing follows the usual canvas convention: the backing store is
/// `css size * pixel ratio` device pixels, the element's CSS box is the CSS
/// size. Device creation is async, so the GPU backend is attached after
/// construction; frames rendered before that draw nothing.
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    settings: RenderSettings,
    pixel_ratio: f32,
    width: u32,
    height: u32,
    frames_rendered: u64,
    gpu: Option<GpuBackend>,
}

impl CanvasRenderer {
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, settings: RenderSettings) -> Self {
        Self {
            canvas,
            settings,
            pixel_ratio: 1.0,
            width: 0,
            height: 0,
            frames_rendered: 0,
            gpu: None,
        }
    }

    #[must_use]
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Creates a GPU backend for this renderer's canvas at its current size.
    ///
    /// Takes only owned inputs, so callers can release any borrow of the
    /// renderer while the device request is pending.
    pub async fn create_gpu(
        canvas: HtmlCanvasElement,
        settings: RenderSettings,
        drawing_buffer_size: (u32, u32),
    ) -> Result<GpuBackend> {
        let (width, height) = drawing_buffer_size;
        GpuBackend::for_canvas(canvas, &settings, width, height).await
    }

    pub fn attach_gpu(&mut self, mut gpu: GpuBackend) {
        let (width, height) = self.drawing_buffer_size();
        gpu.resize(width, height);
        self.gpu = Some(gpu);
    }

    #[must_use]
    pub fn has_gpu(&self) -> bool {
        self.gpu.is_some()
    }

    fn apply_size(&mut self) -> Result<()> {
        let (buffer_width, buffer_height) = self.drawing_buffer_size();
        self.canvas.set_width(buffer_width);
        self.canvas.set_height(buffer_height);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(buffer_width, buffer_height);
        }

        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", self.width))?;
        style.set_property("height", &format!("{}px", self.height))?;
        Ok(())
    }
}

impl Renderer for CanvasRenderer {
    fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = ratio;
        if let Err(err) = self.apply_size() {
            log::warn!("Failed to apply canvas size: {err}");
        }
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        if let Err(err) = self.apply_size() {
            log::warn!("Failed to apply canvas size: {err}");
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn render(&mut self, scene: &mut Scene, camera: &mut PerspectiveCamera) -> Result<FrameInfo> {
        if !self.canvas.is_connected() {
            return Err(GiantError::Render("canvas detached from document".into()));
        }

        let view_projection = prepare_frame(scene, camera);
        let draw_calls = match &mut self.gpu {
            Some(gpu) => gpu.render(scene, view_projection, camera.transform.position)?,
            None => {
                log::trace!("No GPU attached yet, frame not drawn");
                0
            }
        };
        self.frames_rendered += 1;
        log::trace!(
            "frame {} at {}x{} (x{}), {draw_calls} draws",
            self.frames_rendered,
            self.width,
            self.height,
            self.pixel_ratio
        );

        Ok(FrameInfo {
            frame_index: self.frames_rendered,
            width: self.width,
            height: self.height,
            view_projection,
            draw_calls,
        })
    }
}
