//! Giant Scene Tests
//!
//! Tests for:
//! - Bootstrap: renderer sizing, camera and lights from config
//! - Resize and mouse handlers before and after load
//! - Asset-load callback: sea mesh lookup, clip count, playing actions
//! - Per-frame update: mixer, morph oscillation, rotation smoothing, render
//! - FrameLoop and StopHandle

mod common;

use glam::Vec3;

use atlas_giant::app::{FrameLoop, GiantScene, InputEvent, RunningGiant, StopHandle};
use atlas_giant::assets::{FileAssetReader, GltfLoader, Prefab};
use atlas_giant::config::{SceneConfig, SmoothingMode};
use atlas_giant::errors::{GiantError, Result};
use atlas_giant::renderer::extract::collect_draws;
use atlas_giant::renderer::{FrameInfo, HeadlessRenderer, RenderSettings, Renderer};
use atlas_giant::scene::{PerspectiveCamera, Scene};

use common::{BOAT_TRAVEL, GlbFixture};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn bootstrap(width: u32) -> GiantScene<HeadlessRenderer> {
    GiantScene::new(SceneConfig::default(), HeadlessRenderer::default(), width, 2.0).unwrap()
}

fn fixture(fixture: &GlbFixture) -> Prefab {
    GltfLoader::parse(&fixture.build()).unwrap()
}

fn running(width: u32) -> RunningGiant<HeadlessRenderer> {
    bootstrap(width).on_load(&fixture(&GlbFixture::default())).unwrap()
}

// ============================================================================
// Bootstrap
// ============================================================================

#[test]
fn bootstrap_sizes_renderer_to_container() {
    let scene = bootstrap(400);
    let stage = scene.stage();

    assert_eq!(stage.renderer.size(), (400, 400));
    assert!(approx(stage.renderer.pixel_ratio(), 2.0));
    assert_eq!(stage.renderer.drawing_buffer_size(), (800, 800));
    assert!(approx(stage.camera.aspect, 1.0));
}

#[test]
fn bootstrap_uses_page_rig() {
    let scene = bootstrap(1200);
    let stage = scene.stage();

    assert_eq!(stage.renderer.size(), (1200, 500));
    assert_eq!(stage.renderer.settings(), &RenderSettings::default());
    assert!(approx(stage.camera.fov_degrees(), 15.0));
    assert_eq!(stage.camera.transform.position, Vec3::new(-35.0, 8.0, 0.0));
    assert_eq!(stage.scene.lights.len(), 2);
    assert!(stage.scene.root_nodes.is_empty());
}

#[test]
fn bootstrap_rejects_invalid_config() {
    let mut config = SceneConfig::default();
    config.max_height = 0;
    let result = GiantScene::new(config, HeadlessRenderer::default(), 800, 1.0);
    assert!(matches!(result, Err(GiantError::InvalidConfig(_))));
}

// ============================================================================
// Input Handlers
// ============================================================================

#[test]
fn resize_refits_viewport_renderer_and_camera() {
    let mut scene = bootstrap(400);
    let stage = scene.stage_mut();

    stage.handle_resize(800);
    assert_eq!(stage.renderer.size(), (800, 500));
    assert!(approx(stage.camera.aspect, 1.6));
    assert_eq!(stage.context.viewport.width, 800);

    stage.handle_event(InputEvent::Resize { container_width: 300 });
    assert_eq!(stage.renderer.size(), (300, 300));
    assert!(approx(stage.camera.aspect, 1.0));
}

#[test]
fn mouse_target_is_linear_in_x() {
    let mut scene = bootstrap(800);
    let stage = scene.stage_mut();

    let mut target_at = |x: f32| {
        stage.handle_mouse_move(x);
        stage.context.lerp.target
    };
    assert!(approx(target_at(0.0), -0.15));
    assert!(approx(target_at(400.0), 0.0));
    assert!(approx(target_at(800.0), 0.15));
    assert!(approx(target_at(200.0), -0.075));
}

#[test]
fn mouse_target_follows_latest_width() {
    let mut scene = bootstrap(800);
    let stage = scene.stage_mut();
    stage.handle_resize(400);
    stage.handle_event(InputEvent::MouseMove { client_x: 400.0 });
    assert!(approx(stage.context.lerp.target, 0.15));
}

#[test]
fn mouse_on_zero_width_keeps_target() {
    let mut scene = bootstrap(800);
    let stage = scene.stage_mut();
    stage.handle_mouse_move(800.0);
    stage.handle_resize(0);
    stage.handle_mouse_move(10.0);
    assert!(approx(stage.context.lerp.target, 0.15));
}

#[test]
fn mouse_before_load_carries_into_running_scene() {
    let mut scene = bootstrap(800);
    scene.stage_mut().handle_mouse_move(800.0);

    let mut running = scene.on_load(&fixture(&GlbFixture::default())).unwrap();
    let report = running.frame(1.0 / 60.0).unwrap();
    assert!(approx(report.rotation_y, 0.015));
}

// ============================================================================
// Asset-Load Callback
// ============================================================================

#[test]
fn load_plays_three_clips_and_renders() {
    let mut running = running(800);

    assert_eq!(running.mixer().actions().len(), 3);
    assert_eq!(running.mixer().playing_count(), 3);

    let sea = running.stage().scene.get_node(running.sea_mesh()).unwrap();
    assert_eq!(sea.name, "Cube003");
    assert_eq!(sea.morph_target_influences.as_slice(), &[0.0_f32]);

    let report = running.frame(1.0 / 60.0).unwrap();
    assert_eq!(report.playing_clips, 3);
    assert_eq!(report.frame_index, 1);
    assert_eq!(running.stage().renderer.frames_rendered(), 1);
}

#[test]
fn load_plays_only_configured_clip_count() {
    let running = bootstrap(800).on_load(&fixture(&GlbFixture::with_clips(5))).unwrap();
    assert_eq!(running.mixer().playing_count(), 3);

    let mut config = SceneConfig::default();
    config.asset.clip_count = 1;
    let running = GiantScene::new(config, HeadlessRenderer::default(), 800, 1.0)
        .unwrap()
        .on_load(&fixture(&GlbFixture::with_clips(5)))
        .unwrap();
    assert_eq!(running.mixer().playing_count(), 1);
}

#[test]
fn missing_sea_mesh_is_fatal() {
    let result = bootstrap(800).on_load(&fixture(&GlbFixture::without_sea_mesh()));
    assert!(matches!(result, Err(GiantError::MeshNotFound(name)) if name == "Cube003"));
}

#[test]
fn too_few_clips_is_fatal() {
    let result = bootstrap(800).on_load(&fixture(&GlbFixture::with_clips(2)));
    assert!(matches!(
        result,
        Err(GiantError::NotEnoughClips { expected: 3, found: 2 })
    ));
}

#[test]
fn exporter_named_sea_mesh_is_found() {
    let mut running = bootstrap(800)
        .on_load(&fixture(&GlbFixture::with_sea_name("Cube.003")))
        .unwrap();

    running.frame(0.25).unwrap();
    let report = running.frame(0.25).unwrap();
    let sea = running.stage().scene.get_node(running.sea_mesh()).unwrap();
    assert_eq!(sea.name, "Cube003");
    assert!(approx(sea.morph_target_influences[0], report.morph_weight));
}

#[test]
fn unnamed_target_nodes_still_animate() {
    let prefab = fixture(&GlbFixture {
        name_boat: false,
        ..GlbFixture::default()
    });
    let mut running = bootstrap(800).on_load(&prefab).unwrap();
    running.frame(0.5).unwrap();

    let boat = running.stage().scene.get_node_by_name(running.root(), "Node_1").unwrap();
    let position = running.stage().scene.get_node(boat).unwrap().transform.position;
    assert!(approx(position.x, BOAT_TRAVEL / 2.0));
}

#[tokio::test]
async fn load_reads_asset_from_disk() {
    let dir = std::env::temp_dir().join(format!("atlas-giant-app-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("atlas_giant.glb"), GlbFixture::default().build()).unwrap();

    let reader = FileAssetReader::new(&dir);
    let running = bootstrap(800).load(&reader, "atlas_giant.glb").await.unwrap();
    assert_eq!(running.mixer().playing_count(), 3);

    let missing = bootstrap(800).load(&reader, "missing.glb").await;
    assert!(matches!(missing, Err(GiantError::AssetNotFound(_))));

    std::fs::remove_dir_all(&dir).ok();
}

// ============================================================================
// Per-Frame Update
// ============================================================================

#[test]
fn frame_advances_clips() {
    let mut running = running(800);
    running.frame(0.25).unwrap();
    running.frame(0.25).unwrap();

    let boat = running.stage().scene.get_node_by_name(running.root(), "Boat").unwrap();
    let position = running.stage().scene.get_node(boat).unwrap().transform.position;
    assert!((position - Vec3::new(BOAT_TRAVEL / 2.0, 0.0, 0.0)).length() < EPSILON);
}

#[test]
fn morph_weight_follows_pre_advance_phase() {
    let mut running = running(800);

    let first = running.frame(0.1).unwrap();
    assert!(approx(first.morph_weight, 0.5));

    let second = running.frame(0.1).unwrap();
    assert!(approx(second.morph_weight, 0.5_f32.sin() * 0.5 + 0.5));

    let sea = running.stage().scene.get_node(running.sea_mesh()).unwrap();
    assert!(approx(sea.morph_target_influences[0], second.morph_weight));
}

#[test]
fn frame_draws_sea_with_its_morph_weight() {
    let mut running = running(800);
    running.frame(0.1).unwrap();
    let report = running.frame(0.1).unwrap();

    let info = running.stage().renderer.last_frame().unwrap();
    assert_eq!(info.draw_calls, 1);

    let draws = collect_draws(&running.stage().scene);
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].node, running.sea_mesh());
    assert!(approx(draws[0].uniforms.morph_weights[0], report.morph_weight));
    assert!(approx(draws[0].uniforms.material[0], 0.0));
}

#[test]
fn morph_weight_stays_in_unit_range() {
    let mut running = running(800);
    for i in 0..600 {
        let report = running.frame(0.004 * (i % 9) as f32).unwrap();
        assert!((0.0..=1.0).contains(&report.morph_weight));
    }
}

#[test]
fn rotation_eases_monotonically_without_overshoot() {
    let mut running = running(800);
    running.stage_mut().handle_mouse_move(800.0);

    let mut previous = 0.0;
    for _ in 0..200 {
        let report = running.frame(1.0 / 60.0).unwrap();
        assert!(report.rotation_y >= previous);
        assert!(report.rotation_y <= 0.15 + EPSILON);
        previous = report.rotation_y;
    }
    assert!((previous - 0.15).abs() < 1e-3);

    let scene_yaw = running.stage().scene.transform.rotation_y();
    assert!((scene_yaw - previous).abs() < 1e-4);
}

#[test]
fn time_based_smoothing_ignores_frame_rate() {
    let config = SceneConfig::from_json_str(
        r#"{ "smoothing": { "mode": { "kind": "time_based", "reference_fps": 60.0 } } }"#,
    )
    .unwrap();
    assert_eq!(
        config.smoothing.mode,
        SmoothingMode::TimeBased { reference_fps: 60.0 }
    );

    let prefab = fixture(&GlbFixture::default());
    let mut at_30 = GiantScene::new(config.clone(), HeadlessRenderer::default(), 800, 1.0)
        .unwrap()
        .on_load(&prefab)
        .unwrap();
    let mut at_120 = GiantScene::new(config, HeadlessRenderer::default(), 800, 1.0)
        .unwrap()
        .on_load(&prefab)
        .unwrap();
    at_30.stage_mut().handle_mouse_move(800.0);
    at_120.stage_mut().handle_mouse_move(800.0);

    let mut slow = 0.0;
    for _ in 0..15 {
        slow = at_30.frame(1.0 / 30.0).unwrap().rotation_y;
    }
    let mut fast = 0.0;
    for _ in 0..60 {
        fast = at_120.frame(1.0 / 120.0).unwrap().rotation_y;
    }
    assert!((slow - fast).abs() < 1e-4, "{slow} vs {fast}");
}

#[test]
fn first_tick_has_zero_delta() {
    let mut running = running(800);
    std::thread::sleep(std::time::Duration::from_millis(5));

    let first = running.tick().unwrap();
    assert_eq!(first.delta, 0.0);
    assert_eq!(first.frame_index, 1);

    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = running.tick().unwrap();
    assert!(second.delta > 0.0);
    assert_eq!(running.stage().context.clock.frame_count, 2);
}

// ============================================================================
// FrameLoop & StopHandle
// ============================================================================

/// Renders `budget` frames, then fails.
struct FlakyRenderer {
    inner: HeadlessRenderer,
    budget: u64,
}

impl Renderer for FlakyRenderer {
    fn settings(&self) -> &RenderSettings {
        self.inner.settings()
    }

    fn set_pixel_ratio(&mut self, ratio: f32) {
        self.inner.set_pixel_ratio(ratio);
    }

    fn pixel_ratio(&self) -> f32 {
        self.inner.pixel_ratio()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.inner.set_size(width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.inner.size()
    }

    fn render(&mut self, scene: &mut Scene, camera: &mut PerspectiveCamera) -> Result<FrameInfo> {
        if self.inner.frames_rendered() >= self.budget {
            return Err(GiantError::Render("device lost".into()));
        }
        self.inner.render(scene, camera)
    }
}

#[test]
fn run_fixed_counts_frames() {
    let mut frame_loop = FrameLoop::new(running(800));
    assert_eq!(frame_loop.run_fixed(30, 1.0 / 60.0), 30);
    assert_eq!(frame_loop.frames(), 30);
    assert_eq!(frame_loop.running().stage().renderer.frames_rendered(), 30);
    assert!(frame_loop.step().is_some());
}

#[test]
fn stop_handle_halts_loop() {
    let stop = StopHandle::new();
    let mut frame_loop = FrameLoop::with_stop_handle(running(800), stop.clone());
    assert_eq!(frame_loop.run_for(3), 3);

    stop.stop();
    assert!(frame_loop.stop_handle().is_stopped());
    assert!(frame_loop.step_fixed(1.0 / 60.0).is_none());
    assert_eq!(frame_loop.run_fixed(10, 1.0 / 60.0), 0);
    assert_eq!(frame_loop.into_running().stage().renderer.frames_rendered(), 3);
}

#[test]
fn render_error_ends_loop() {
    let renderer = FlakyRenderer {
        inner: HeadlessRenderer::default(),
        budget: 5,
    };
    let running = GiantScene::new(SceneConfig::default(), renderer, 800, 1.0)
        .unwrap()
        .on_load(&fixture(&GlbFixture::default()))
        .unwrap();

    let mut frame_loop = FrameLoop::new(running);
    assert_eq!(frame_loop.run_fixed(10, 1.0 / 60.0), 5);
    assert!(frame_loop.stop_handle().is_stopped());
}
