//! Renderer Settings
//!
//! Context options the giant scene asks of its renderer: an antialiased,
//! alpha-transparent canvas with shadow maps and sRGB output.
//!
//! ```rust,ignore
//! use atlas_giant::renderer::RenderSettings;
//!
//! let settings = RenderSettings {
//!     shadows: false,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Multisampled edges.
    pub antialias: bool,
    /// Transparent clear color, so the page shows through empty pixels.
    pub alpha: bool,
    /// Shadow maps for lights with `cast_shadows`.
    pub shadows: bool,
    /// Encode the final color in sRGB.
    pub srgb_output: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            antialias: true,
            alpha: true,
            shadows: true,
            srgb_output: true,
        }
    }
}
