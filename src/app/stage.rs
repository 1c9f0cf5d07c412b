//! Scene bootstrap and the pre-load state.
//!
//! [`GiantScene`] is what exists between page load and asset load: renderer,
//! camera, lights and input handling are live, but there is nothing to
//! animate. Turning it into a [`RunningGiant`] requires a decoded asset,
//! which is the only way to obtain the per-frame update.

use glam::Vec3;
use smallvec::smallvec;

use crate::animation::{AnimationMixer, LoopMode};
use crate::app::context::SceneContext;
use crate::app::input::{InputEvent, rotation_target};
use crate::app::running::RunningGiant;
use crate::app::viewport::Viewport;
use crate::assets::{AssetReader, GltfLoader, Prefab};
use crate::config::SceneConfig;
use crate::errors::{GiantError, Result};
use crate::renderer::Renderer;
use crate::scene::{Light, PerspectiveCamera, Scene};

/// Everything the handlers touch, before and after load.
pub struct Stage<R: Renderer> {
    pub config: SceneConfig,
    pub renderer: R,
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub context: SceneContext,
}

impl<R: Renderer> Stage<R> {
    fn new(config: SceneConfig, mut renderer: R, container_width: u32, device_pixel_ratio: f32) -> Result<Self> {
        config.validate()?;

        let viewport = Viewport::fit(container_width, config.max_height);
        renderer.set_pixel_ratio(device_pixel_ratio);
        renderer.set_size(viewport.width, viewport.height);

        let camera_config = &config.camera;
        let mut camera = PerspectiveCamera::new(
            camera_config.fov,
            viewport.aspect(),
            camera_config.near,
            camera_config.far,
        );
        camera.set_position(Vec3::from_array(camera_config.position));
        camera.look_at(Vec3::from_array(camera_config.look_at));

        let mut scene = Scene::new();
        for light in Light::rig_from_config(&config.lighting) {
            scene.add_light(light);
        }

        let context = SceneContext::new(&config, viewport);

        log::info!(
            "Scene bootstrapped: {}x{} @ {}x, camera fov {}",
            viewport.width,
            viewport.height,
            device_pixel_ratio,
            camera_config.fov
        );

        Ok(Self {
            config,
            renderer,
            scene,
            camera,
            context,
        })
    }

    /// Refits the viewport to a new container width.
    pub fn handle_resize(&mut self, container_width: u32) {
        let viewport = Viewport::fit(container_width, self.config.max_height);
        self.camera.aspect = viewport.aspect();
        self.camera.update_projection_matrix();
        self.renderer.set_size(viewport.width, viewport.height);
        self.context.viewport = viewport;
        log::debug!("Resized to {}x{}", viewport.width, viewport.height);
    }

    /// Retargets the scene rotation from the cursor position.
    pub fn handle_mouse_move(&mut self, client_x: f32) {
        let width = self.context.viewport.width;
        match rotation_target(client_x, width, self.config.rotation_coeff) {
            Some(target) => self.context.lerp.target = target,
            None => log::debug!("Ignoring mouse move on a zero-width viewport"),
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Resize { container_width } => self.handle_resize(container_width),
            InputEvent::MouseMove { client_x } => self.handle_mouse_move(client_x),
        }
    }
}

/// The scene before its asset has loaded.
pub struct GiantScene<R: Renderer> {
    stage: Stage<R>,
}

impl<R: Renderer> GiantScene<R> {
    /// Validates `config`, sizes the renderer to the container and sets up
    /// the camera and lights.
    pub fn new(config: SceneConfig, renderer: R, container_width: u32, device_pixel_ratio: f32) -> Result<Self> {
        let stage = Stage::new(config, renderer, container_width, device_pixel_ratio)?;
        Ok(Self { stage })
    }

    #[must_use]
    pub fn stage(&self) -> &Stage<R> {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage<R> {
        &mut self.stage
    }

    /// Reads and decodes the asset at `path`, then finishes the setup.
    pub async fn load<A: AssetReader>(self, reader: &A, path: &str) -> Result<RunningGiant<R>> {
        let prefab = match reader.read_bytes(path).await.and_then(|bytes| GltfLoader::parse(&bytes)) {
            Ok(prefab) => prefab,
            Err(err) => {
                log::error!("Failed to load '{path}': {err}");
                return Err(err);
            }
        };
        self.on_load(&prefab)
    }

    /// Adds the asset to the scene and starts its clips.
    ///
    /// Fails if the sea mesh is missing or the asset has fewer clips than
    /// configured; nothing is left running in that case.
    pub fn on_load(self, asset: &Prefab) -> Result<RunningGiant<R>> {
        let mut stage = self.stage;
        let asset_config = stage.config.asset.clone();

        let root = stage.scene.instantiate(asset);

        let Some(sea_mesh) = stage.scene.get_node_by_name(root, &asset_config.sea_mesh_name) else {
            log::error!("Sea mesh '{}' not found in asset", asset_config.sea_mesh_name);
            return Err(GiantError::MeshNotFound(asset_config.sea_mesh_name));
        };
        if let Some(node) = stage.scene.get_node_mut(sea_mesh) {
            node.morph_target_influences = smallvec![0.0];
        }

        if asset.animations.len() < asset_config.clip_count {
            log::error!(
                "Asset has {} clips, {} required",
                asset.animations.len(),
                asset_config.clip_count
            );
            return Err(GiantError::NotEnoughClips {
                expected: asset_config.clip_count,
                found: asset.animations.len(),
            });
        }

        let mut mixer = AnimationMixer::new(root);
        for clip in &asset.animations[..asset_config.clip_count] {
            mixer
                .clip_action(clip, &stage.scene)
                .set_loop(LoopMode::Loop)
                .play();
        }

        log::info!(
            "Loaded '{}': {} nodes, playing {} of {} clips",
            asset.name,
            asset.nodes.len(),
            mixer.playing_count(),
            asset.animations.len()
        );

        Ok(RunningGiant::new(stage, mixer, root, sea_mesh))
    }
}
