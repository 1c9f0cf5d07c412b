//! Renderer
//!
//! The scene talks to whatever draws it through the [`Renderer`] trait. Two
//! backends ship here:
//!
//! - [`HeadlessRenderer`]: no output surface; sizes, frame bookkeeping and
//!   the draw list, for tests and native hosts
//! - [`CanvasRenderer`] (wasm): owns the page canvas and its backing size,
//!   and draws through wgpu ([`gpu`]) once a device is attached
//!
//! Both prepare the frame the same way ([`prepare_frame`]): world matrices
//! are refreshed and the camera's view matrix is rebuilt. [`extract`] turns
//! the prepared scene into vertex and uniform data.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod extract;
#[cfg(target_arch = "wasm32")]
pub mod gpu;
pub mod headless;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use headless::HeadlessRenderer;
pub use settings::RenderSettings;

use glam::Mat4;

use crate::errors::Result;
use crate::scene::{PerspectiveCamera, Scene};

/// What a render call consumed, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Frames rendered so far, this one included.
    pub frame_index: u64,
    pub width: u32,
    pub height: u32,
    pub view_projection: Mat4,
    /// Mesh primitives drawn.
    pub draw_calls: usize,
}

pub trait Renderer {
    fn settings(&self) -> &RenderSettings;

    /// Device pixels per CSS pixel.
    fn set_pixel_ratio(&mut self, ratio: f32);

    fn pixel_ratio(&self) -> f32;

    /// Resizes the output, in CSS pixels.
    fn set_size(&mut self, width: u32, height: u32);

    /// Output size in CSS pixels.
    fn size(&self) -> (u32, u32);

    fn render(&mut self, scene: &mut Scene, camera: &mut PerspectiveCamera) -> Result<FrameInfo>;

    /// Backing-store size in device pixels.
    fn drawing_buffer_size(&self) -> (u32, u32) {
        let (width, height) = self.size();
        let ratio = self.pixel_ratio();
        (
            (width as f32 * ratio).floor() as u32,
            (height as f32 * ratio).floor() as u32,
        )
    }
}

/// Shared per-frame preparation: world matrices, then the camera view.
pub fn prepare_frame(scene: &mut Scene, camera: &mut PerspectiveCamera) -> Mat4 {
    scene.update_world_matrices();
    camera.update_view_matrix();
    camera.view_projection_matrix()
}
