use glam::{Vec3, Vec4};

/// Metallic-roughness surface factors.
///
/// Defaults are the glTF defaults for a primitive without a material.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: Option<String>,
    /// Linear RGBA.
    pub base_color: Vec4,
    pub metalness: f32,
    pub roughness: f32,
    /// Linear RGB.
    pub emissive: Vec3,
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            base_color: Vec4::ONE,
            metalness: 1.0,
            roughness: 1.0,
            emissive: Vec3::ZERO,
            double_sided: false,
        }
    }
}
