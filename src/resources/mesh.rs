use std::sync::Arc;

use crate::resources::geometry::Geometry;
use crate::resources::material::Material;

/// One drawable piece of a mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPrimitive {
    pub geometry: Arc<Geometry>,
    pub material: Arc<Material>,
}

/// Mesh attached to a node.
///
/// Primitives are shared between instantiations of the same asset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub name: Option<String>,
    /// Largest morph target count over the primitives.
    pub morph_target_count: usize,
    pub primitives: Vec<MeshPrimitive>,
}

impl Mesh {
    #[must_use]
    pub fn new(name: Option<String>, primitives: Vec<MeshPrimitive>) -> Self {
        let morph_target_count = primitives
            .iter()
            .map(|primitive| primitive.geometry.morph_target_count())
            .max()
            .unwrap_or(0);
        Self {
            name,
            morph_target_count,
            primitives,
        }
    }
}
