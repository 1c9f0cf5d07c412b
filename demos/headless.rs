//! Headless Giant Scene
//!
//! Loads the giant asset from disk and runs the frame loop without a
//! window, printing what each second of animation did to the scene.
//!
//! Usage:
//! - `cargo run --example headless -- <asset.glb> [config.json] [frames]`
//!
//! The mouse is swept from the left edge to the right edge over the run, so
//! the log shows the scene rotation easing toward its target.

use atlas_giant::app::{FrameLoop, GiantScene, InputEvent};
use atlas_giant::assets::FileAssetReader;
use atlas_giant::config::SceneConfig;
use atlas_giant::renderer::HeadlessRenderer;

const FRAME_DELTA: f32 = 1.0 / 60.0;
const CONTAINER_WIDTH: u32 = 1280;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let asset = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: headless <asset.glb> [config.json] [frames]"))?;
    let config = match args.next() {
        Some(path) => SceneConfig::from_json_str(&tokio::fs::read_to_string(&path).await?)?,
        None => SceneConfig::default(),
    };
    let frames: u64 = args.next().map_or(Ok(300), |n| n.parse())?;

    let asset_path = std::path::Path::new(&asset);
    let file_name = asset_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow::anyhow!("not a file path: {asset}"))?;
    let reader = FileAssetReader::new(asset_path);

    let scene = GiantScene::new(config, HeadlessRenderer::default(), CONTAINER_WIDTH, 1.0)?;
    let running = scene.load(&reader, file_name).await?;
    let mut frame_loop = FrameLoop::new(running);

    for frame in 0..frames {
        let client_x = CONTAINER_WIDTH as f32 * frame as f32 / frames.max(1) as f32;
        frame_loop
            .running_mut()
            .stage_mut()
            .handle_event(InputEvent::MouseMove { client_x });

        let Some(report) = frame_loop.step_fixed(FRAME_DELTA) else {
            break;
        };
        if frame % 60 == 0 {
            println!(
                "frame {:>4}: weight {:.3}  rotation {:+.4}  clips {}",
                report.frame_index, report.morph_weight, report.rotation_y, report.playing_clips
            );
        }
    }

    let ran = frame_loop.run_fixed(60, FRAME_DELTA);
    println!("settled for {ran} more frames, {} in total", frame_loop.frames());

    Ok(())
}
