//! Frame extraction.
//!
//! Walks the scene once per frame and produces what a GPU backend uploads:
//! packed vertex data per geometry, one [`DrawUniforms`] block per drawn
//! primitive and one [`FrameUniforms`] block for camera and lights. Nothing
//! here touches a device, so the layout is shared by every backend.

use bytemuck::{Pod, Zeroable};
use glam::{Affine3A, Mat3, Mat4, Vec3};

use crate::resources::{Geometry, Material, MeshPrimitive};
use crate::scene::light::LightKind;
use crate::scene::{Light, NodeHandle, Scene};

/// Morph slots blended in the vertex stage. Later targets are ignored.
pub const MAX_MORPH_TARGETS: usize = 4;

/// Floats per packed vertex: position, normal, RGBA color, then the
/// position deltas and the normal deltas of each morph slot.
pub const VERTEX_FLOATS: usize = 3 + 3 + 4 + 2 * 3 * MAX_MORPH_TARGETS;

/// Camera and lights, shared by every draw of a frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_projection: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    /// Unit vector toward the directional light, world space.
    pub light_direction: [f32; 4],
    /// Linear RGB scaled by intensity.
    pub light_color: [f32; 4],
    pub ambient_color: [f32; 4],
}

impl FrameUniforms {
    /// Lights belong to the scene, so the scene transform turns them along
    /// with the model. Directional lights shine toward the world origin.
    #[must_use]
    pub fn new(view_projection: Mat4, camera_position: Vec3, scene: &Scene) -> Self {
        let scene_matrix = *scene.transform.world_matrix();

        let mut light_direction = Vec3::Y;
        let mut light_color = Vec3::ZERO;
        let mut ambient_color = Vec3::ZERO;
        let mut has_directional = false;

        for light in &scene.lights {
            let radiance = linear_color(light);
            match light.kind {
                LightKind::Directional { position } if !has_directional => {
                    has_directional = true;
                    light_direction = scene_matrix
                        .transform_vector3(position)
                        .try_normalize()
                        .unwrap_or(Vec3::Y);
                    light_color = radiance;
                }
                LightKind::Directional { .. } => {
                    log::trace!("Only the first directional light is shaded");
                }
                LightKind::Ambient => ambient_color += radiance,
            }
        }

        Self {
            view_projection: view_projection.to_cols_array_2d(),
            camera_position: camera_position.extend(1.0).to_array(),
            light_direction: light_direction.extend(0.0).to_array(),
            light_color: light_color.extend(1.0).to_array(),
            ambient_color: ambient_color.extend(1.0).to_array(),
        }
    }
}

/// Per-primitive transform, material and morph weights.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    pub emissive: [f32; 4],
    pub morph_weights: [f32; MAX_MORPH_TARGETS],
    /// `x` metalness, `y` roughness.
    pub material: [f32; 4],
}

impl DrawUniforms {
    #[must_use]
    pub fn new(world: &Affine3A, material: &Material, influences: &[f32]) -> Self {
        let model = Mat4::from(*world);
        let linear = Mat3::from(world.matrix3);
        // Degenerate scale has no inverse; fall back to the linear part.
        let normal = if linear.determinant().abs() > f32::EPSILON {
            linear.inverse().transpose()
        } else {
            linear
        };

        let mut morph_weights = [0.0; MAX_MORPH_TARGETS];
        for (slot, weight) in morph_weights.iter_mut().zip(influences) {
            *slot = *weight;
        }

        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: Mat4::from_mat3(normal).to_cols_array_2d(),
            base_color: material.base_color.to_array(),
            emissive: material.emissive.extend(0.0).to_array(),
            morph_weights,
            material: [material.metalness, material.roughness, 0.0, 0.0],
        }
    }
}

/// One primitive to draw this frame.
#[derive(Debug, Clone)]
pub struct DrawItem<'a> {
    pub node: NodeHandle,
    /// Index of the primitive within its node's mesh.
    pub primitive_index: usize,
    pub primitive: &'a MeshPrimitive,
    pub uniforms: DrawUniforms,
}

/// Every mesh primitive in the scene with its current uniforms.
///
/// World matrices must be current, see
/// [`prepare_frame`](crate::renderer::prepare_frame).
#[must_use]
pub fn collect_draws(scene: &Scene) -> Vec<DrawItem<'_>> {
    let mut draws = Vec::new();
    for (handle, node) in scene.iter_nodes() {
        let Some(mesh) = &node.mesh else {
            continue;
        };
        let world = node.transform.world_matrix();
        for (primitive_index, primitive) in mesh.primitives.iter().enumerate() {
            draws.push(DrawItem {
                node: handle,
                primitive_index,
                primitive,
                uniforms: DrawUniforms::new(world, &primitive.material, &node.morph_target_influences),
            });
        }
    }
    draws
}

/// Interleaves a geometry into [`VERTEX_FLOATS`]-wide vertices.
///
/// Missing normals, colors and morph deltas are filled with zeros (white
/// for colors), so every geometry shares one vertex layout.
#[must_use]
pub fn pack_vertices(geometry: &Geometry) -> Vec<f32> {
    let count = geometry.vertex_count();
    if geometry.morph_target_count() > MAX_MORPH_TARGETS {
        log::warn!(
            "Geometry has {} morph targets, only the first {MAX_MORPH_TARGETS} are blended",
            geometry.morph_target_count()
        );
    }

    let attribute = |list: &[[f32; 3]], i: usize| list.get(i).copied().unwrap_or([0.0; 3]);
    let morph = |targets: &[Vec<[f32; 3]>], slot: usize, i: usize| {
        targets.get(slot).map_or([0.0; 3], |deltas| attribute(deltas, i))
    };

    let mut packed = Vec::with_capacity(count * VERTEX_FLOATS);
    for i in 0..count {
        packed.extend_from_slice(&geometry.positions[i]);
        packed.extend_from_slice(&attribute(&geometry.normals, i));
        let color = geometry
            .colors
            .as_ref()
            .and_then(|colors| colors.get(i).copied())
            .unwrap_or([1.0; 4]);
        packed.extend_from_slice(&color);
        for slot in 0..MAX_MORPH_TARGETS {
            packed.extend_from_slice(&morph(&geometry.morph_positions, slot, i));
        }
        for slot in 0..MAX_MORPH_TARGETS {
            packed.extend_from_slice(&morph(&geometry.morph_normals, slot, i));
        }
    }
    packed
}

/// Light colors are authored in sRGB hex; shading happens in linear space.
fn linear_color(light: &Light) -> Vec3 {
    let channel = |c: f32| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(channel(light.color.x), channel(light.color.y), channel(light.color.z)) * light.intensity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_blocks_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<FrameUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<DrawUniforms>() % 16, 0);
    }

    #[test]
    fn packing_fills_missing_attributes() {
        let mut geometry = Geometry::from_positions(vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
        ]);
        geometry.morph_positions.push(vec![[0.0, 0.5, 0.0]; 3]);

        let packed = pack_vertices(&geometry);
        assert_eq!(packed.len(), 3 * VERTEX_FLOATS);

        let second = &packed[VERTEX_FLOATS..2 * VERTEX_FLOATS];
        assert_eq!(&second[0..3], &[1.0, 0.0, 0.0]);
        assert_eq!(&second[3..6], &[0.0, 0.0, 1.0]);
        assert_eq!(&second[6..10], &[1.0; 4]);
        assert_eq!(&second[10..13], &[0.0, 0.5, 0.0]);
        assert!(second[13..].iter().all(|f| *f == 0.0));
    }

    #[test]
    fn influences_beyond_the_slots_are_dropped() {
        let uniforms = DrawUniforms::new(
            &Affine3A::IDENTITY,
            &Material::default(),
            &[0.1, 0.2, 0.3, 0.4, 0.5],
        );
        assert_eq!(uniforms.morph_weights, [0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn white_light_is_linear_intensity() {
        let light = Light::new_ambient(Vec3::ONE, 1.5);
        assert!((linear_color(&light) - Vec3::splat(1.5)).length() < 1e-6);
    }
}
