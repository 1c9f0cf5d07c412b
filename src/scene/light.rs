use glam::Vec3;

use crate::config::{color_from_hex, LightingConfig};

#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    /// Light arriving from `position` toward the origin.
    Directional { position: Vec3 },
    /// Uniform light on every surface.
    Ambient,
}

#[derive(Debug, Clone)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,

    /// Only directional lights cast shadows.
    pub cast_shadows: bool,
}

impl Light {
    #[must_use]
    pub fn new_directional(color: Vec3, intensity: f32, position: Vec3) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Directional { position },
            cast_shadows: false,
        }
    }

    #[must_use]
    pub fn new_ambient(color: Vec3, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Ambient,
            cast_shadows: false,
        }
    }

    #[must_use]
    pub fn with_shadows(mut self, cast_shadows: bool) -> Self {
        self.cast_shadows = cast_shadows && matches!(self.kind, LightKind::Directional { .. });
        self
    }

    /// The directional + ambient pair the giant scene is lit with.
    #[must_use]
    pub fn rig_from_config(config: &LightingConfig) -> [Light; 2] {
        let directional = &config.directional;
        let ambient = &config.ambient;
        [
            Light::new_directional(
                color_from_hex(directional.color),
                directional.intensity,
                Vec3::from_array(directional.position),
            )
            .with_shadows(directional.cast_shadows),
            Light::new_ambient(color_from_hex(ambient.color), ambient.intensity),
        ]
    }
}
