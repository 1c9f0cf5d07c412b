#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod app;
pub mod assets;
pub mod config;
pub mod errors;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod utils;

pub use animation::{AnimationAction, AnimationClip, AnimationMixer, Binder, LoopMode};
pub use app::{FrameLoop, FrameReport, GiantScene, InputEvent, RunningGiant, Stage, StopHandle};
pub use assets::{AssetReader, GltfLoader, Prefab};
pub use config::SceneConfig;
pub use errors::{GiantError, Result};
pub use renderer::{HeadlessRenderer, RenderSettings, Renderer};
pub use scene::{Light, Node, NodeHandle, PerspectiveCamera, Scene};
