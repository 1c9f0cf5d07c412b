//! Scene Configuration
//!
//! [`SceneConfig`] gathers every tunable the giant scene reads: the mouse
//! rotation coefficient, the canvas height cap, smoothing, the morph
//! oscillation speed, the camera rig, the two lights, the asset location and
//! the renderer flags.
//!
//! Defaults reproduce the shipped page exactly. A config can also be read
//! from JSON, where every field is optional:
//!
//! ```rust,ignore
//! let config = SceneConfig::from_json_str(r#"{ "rotation_coeff": 0.3 }"#)?;
//! assert_eq!(config.max_height, 500);
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::{GiantError, Result};
use crate::renderer::RenderSettings;

/// How the rotation lerp is applied each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SmoothingMode {
    /// `ease` is applied once per display callback, whatever the frame time.
    #[default]
    PerFrame,
    /// `ease` is treated as the per-frame factor at `reference_fps` and
    /// rescaled by the measured delta, so smoothing speed no longer depends
    /// on the refresh rate.
    TimeBased { reference_fps: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    pub ease: f32,
    pub mode: SmoothingMode,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            ease: 0.1,
            mode: SmoothingMode::PerFrame,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub look_at: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 15.0,
            near: 1.0,
            far: 100.0,
            position: [-35.0, 8.0, 0.0],
            look_at: [0.0, 2.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLightConfig {
    /// 0xRRGGBB
    pub color: u32,
    pub intensity: f32,
    pub position: [f32; 3],
    pub cast_shadows: bool,
}

impl Default for DirectionalLightConfig {
    fn default() -> Self {
        Self {
            color: 0x00ff_ffff,
            intensity: 3.0,
            position: [-2.0, 8.0, -5.0],
            cast_shadows: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientLightConfig {
    /// 0xRRGGBB
    pub color: u32,
    pub intensity: f32,
}

impl Default for AmbientLightConfig {
    fn default() -> Self {
        Self {
            color: 0x00ff_ffff,
            intensity: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LightingConfig {
    pub directional: DirectionalLightConfig,
    pub ambient: AmbientLightConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Relative path or URL of the `.glb` file.
    pub path: String,
    /// Name of the node whose first morph target is driven by the oscillator.
    pub sea_mesh_name: String,
    /// How many clips, starting at index 0, are played.
    pub clip_count: usize,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            path: "./atlas_giant.glb".to_string(),
            sea_mesh_name: "Cube003".to_string(),
            clip_count: 3,
        }
    }
}

/// Page-level element ids the web entry point binds to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub container_id: String,
    pub canvas_id: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            container_id: "app".to_string(),
            canvas_id: "giantCanvas".to_string(),
        }
    }
}

/// Root configuration of the giant scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// How far the scene rotates (radians) when the cursor reaches either
    /// edge of the viewport.
    pub rotation_coeff: f32,
    /// Maximum canvas height in CSS pixels. Width follows the container.
    pub max_height: u32,
    /// Phase speed multiplier of the sea morph oscillation.
    pub oscillation_speed: f32,
    pub smoothing: SmoothingConfig,
    pub camera: CameraConfig,
    pub lighting: LightingConfig,
    pub asset: AssetConfig,
    pub page: PageConfig,
    pub renderer: RenderSettings,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            rotation_coeff: 0.15,
            max_height: 500,
            oscillation_speed: 5.0,
            smoothing: SmoothingConfig::default(),
            camera: CameraConfig::default(),
            lighting: LightingConfig::default(),
            asset: AssetConfig::default(),
            page: PageConfig::default(),
            renderer: RenderSettings::default(),
        }
    }
}

impl SceneConfig {
    /// Parses a JSON document, filling absent fields with defaults, and
    /// validates the result.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let ease = self.smoothing.ease;
        if !(ease > 0.0 && ease <= 1.0) {
            return Err(GiantError::InvalidConfig(format!(
                "smoothing.ease must be in (0, 1], got {ease}"
            )));
        }
        if let SmoothingMode::TimeBased { reference_fps } = self.smoothing.mode
            && reference_fps <= 0.0
        {
            return Err(GiantError::InvalidConfig(format!(
                "smoothing.mode.reference_fps must be positive, got {reference_fps}"
            )));
        }
        if self.max_height == 0 {
            return Err(GiantError::InvalidConfig(
                "max_height must be positive".to_string(),
            ));
        }
        if !self.rotation_coeff.is_finite() {
            return Err(GiantError::InvalidConfig(
                "rotation_coeff must be finite".to_string(),
            ));
        }
        let camera = &self.camera;
        if !(camera.fov > 0.0 && camera.fov < 180.0) {
            return Err(GiantError::InvalidConfig(format!(
                "camera.fov must be in (0, 180), got {}",
                camera.fov
            )));
        }
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(GiantError::InvalidConfig(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                camera.near, camera.far
            )));
        }
        if self.asset.clip_count == 0 {
            return Err(GiantError::InvalidConfig(
                "asset.clip_count must be at least 1".to_string(),
            ));
        }
        if self.asset.sea_mesh_name.is_empty() {
            return Err(GiantError::InvalidConfig(
                "asset.sea_mesh_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Converts a `0xRRGGBB` color into linear-ish `[0, 1]` RGB components.
#[must_use]
pub fn color_from_hex(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}
