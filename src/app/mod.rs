//! The giant scene application.
//!
//! Lifecycle: [`GiantScene::new`] bootstraps renderer, camera and lights;
//! [`GiantScene::load`] (or [`GiantScene::on_load`] with an already decoded
//! asset) yields a [`RunningGiant`], the only state with a per-frame update;
//! [`FrameLoop`] drives it until its [`StopHandle`] fires.
//!
//! ```rust,ignore
//! let scene = GiantScene::new(SceneConfig::default(), HeadlessRenderer::default(), 800, 1.0)?;
//! let running = scene.load(&FileAssetReader::new("assets"), "atlas_giant.glb").await?;
//! let mut frame_loop = FrameLoop::new(running);
//! frame_loop.run_fixed(60, 1.0 / 60.0);
//! ```

pub mod context;
pub mod frame_loop;
pub mod input;
pub mod lerp;
pub mod oscillator;
pub mod running;
pub mod stage;
pub mod viewport;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use context::SceneContext;
pub use frame_loop::{FrameLoop, StopHandle};
pub use input::{InputEvent, rotation_target};
pub use lerp::LerpState;
pub use oscillator::MorphOscillator;
pub use running::{FrameReport, RunningGiant};
pub use stage::{GiantScene, Stage};
pub use viewport::Viewport;
