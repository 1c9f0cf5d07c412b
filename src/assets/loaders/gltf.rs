//! glTF / GLB decoding.
//!
//! Parsing and buffer resolution are done by the `gltf` crate; this module
//! lifts the parts the scene uses (node tree, triangle geometry with morph
//! targets, material factors, animation channels) into a [`Prefab`].
//! Textures and skins are not read.

use std::sync::Arc;

use glam::{Quat, Vec3, Vec4};
use gltf::animation::Interpolation;
use gltf::animation::util::ReadOutputs;
use gltf::mesh::Mode;

use crate::animation::binding::TargetPath;
use crate::animation::clip::{AnimationClip, Track, TrackData, TrackMeta};
use crate::animation::tracks::{InterpolationMode, KeyframeTrack};
use crate::animation::values::MorphWeightData;
use crate::assets::prefab::{Prefab, PrefabNode};
use crate::errors::{GiantError, Result};
use crate::resources::{Geometry, Material, Mesh, MeshPrimitive};
use crate::scene::transform::Transform;

/// Characters that would break a `node.property` binding path.
const RESERVED_NAME_CHARS: [char; 5] = ['[', ']', '.', ':', '/'];

/// Makes a node name usable as a binding key: whitespace becomes `_` and
/// path separators are dropped.
#[must_use]
pub fn sanitize_node_name(name: &str) -> String {
    name.chars()
        .filter(|c| !RESERVED_NAME_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

pub struct GltfLoader;

impl GltfLoader {
    /// Decodes a self-contained glTF document (`.glb`, or `.gltf` with
    /// embedded buffers) into a prefab.
    pub fn parse(bytes: &[u8]) -> Result<Prefab> {
        let (document, buffers, _images) = gltf::import_slice(bytes)?;
        let buffers: Vec<&[u8]> = buffers.iter().map(|data| data.0.as_slice()).collect();

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or(GiantError::EmptyScene)?;

        let meshes = Self::load_meshes(&document, &buffers);

        let mut prefab = Prefab::new(scene.name().unwrap_or("Scene"));
        prefab.nodes = document
            .nodes()
            .map(|node| Self::load_node(&node, &meshes))
            .collect();
        prefab.root_indices = scene.nodes().map(|node| node.index()).collect();
        prefab.animations = Self::load_animations(&document, &buffers)
            .into_iter()
            .map(Arc::new)
            .collect();

        log::info!(
            "Decoded glTF scene '{}': {} nodes, {} animations",
            prefab.name,
            prefab.nodes.len(),
            prefab.animations.len()
        );

        Ok(prefab)
    }

    /// Name a node is known by; unnamed nodes get `Node_<index>`.
    ///
    /// Names go through [`sanitize_node_name`], so an exporter's `Cube.003`
    /// is looked up as `Cube003`.
    #[must_use]
    pub fn node_name(node: &gltf::Node) -> String {
        node.name()
            .map_or_else(|| format!("Node_{}", node.index()), sanitize_node_name)
    }

    fn load_node(node: &gltf::Node, meshes: &[Mesh]) -> PrefabNode {
        let mut prefab_node = PrefabNode::new(Self::node_name(node));

        let (translation, rotation, scale) = node.transform().decomposed();
        prefab_node.transform = Transform::from_trs(translation, rotation, scale);
        prefab_node.children_indices = node.children().map(|child| child.index()).collect();

        if let Some(gltf_mesh) = node.mesh()
            && let Some(mesh) = meshes.get(gltf_mesh.index())
        {
            if mesh.morph_target_count > 0 {
                let defaults = node.weights().or_else(|| gltf_mesh.weights());
                let mut weights = vec![0.0; mesh.morph_target_count];
                if let Some(defaults) = defaults {
                    for (slot, weight) in weights.iter_mut().zip(defaults) {
                        *slot = *weight;
                    }
                }
                prefab_node.morph_weights = Some(weights);
            }
            prefab_node.mesh = Some(mesh.clone());
        }

        prefab_node
    }

    fn load_materials(document: &gltf::Document) -> Vec<Arc<Material>> {
        document
            .materials()
            .map(|material| Arc::new(Self::convert_material(&material)))
            .collect()
    }

    fn convert_material(material: &gltf::Material) -> Material {
        let pbr = material.pbr_metallic_roughness();
        Material {
            name: material.name().map(ToString::to_string),
            base_color: Vec4::from_array(pbr.base_color_factor()),
            metalness: pbr.metallic_factor(),
            roughness: pbr.roughness_factor(),
            emissive: Vec3::from_array(material.emissive_factor()),
            double_sided: material.double_sided(),
        }
    }

    fn load_meshes(document: &gltf::Document, buffers: &[&[u8]]) -> Vec<Mesh> {
        let materials = Self::load_materials(document);
        let default_material = Arc::new(Material::default());

        document
            .meshes()
            .map(|mesh| {
                let primitives = mesh
                    .primitives()
                    .filter_map(|primitive| {
                        let geometry = Self::load_primitive_geometry(&primitive, buffers)?;
                        let material = primitive
                            .material()
                            .index()
                            .and_then(|index| materials.get(index))
                            .map_or_else(|| Arc::clone(&default_material), Arc::clone);
                        Some(MeshPrimitive {
                            geometry: Arc::new(geometry),
                            material,
                        })
                    })
                    .collect();
                let mut loaded = Mesh::new(mesh.name().map(ToString::to_string), primitives);
                // Slot count follows the declared targets even for skipped primitives.
                loaded.morph_target_count = mesh
                    .primitives()
                    .map(|primitive| primitive.morph_targets().count())
                    .max()
                    .unwrap_or(0);
                loaded
            })
            .collect()
    }

    /// Reads one triangle-list primitive. Other topologies and primitives
    /// without positions are skipped.
    fn load_primitive_geometry(primitive: &gltf::Primitive, buffers: &[&[u8]]) -> Option<Geometry> {
        if primitive.mode() != Mode::Triangles {
            log::warn!("Primitive {} uses {:?}, only triangles are drawn", primitive.index(), primitive.mode());
            return None;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).copied());

        let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
        if positions.is_empty() {
            return None;
        }

        let mut geometry = Geometry {
            indices: match reader.read_indices() {
                Some(indices) => indices.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            },
            colors: reader
                .read_colors(0)
                .map(|colors| colors.into_rgba_f32().collect()),
            positions,
            ..Geometry::default()
        };

        match reader.read_normals() {
            Some(normals) => geometry.normals = normals.collect(),
            None => geometry.compute_vertex_normals(),
        }

        for (positions, normals, _tangents) in reader.read_morph_targets() {
            geometry
                .morph_positions
                .push(positions.map(Iterator::collect).unwrap_or_default());
            geometry
                .morph_normals
                .push(normals.map(Iterator::collect).unwrap_or_default());
        }

        Some(geometry)
    }

    fn load_animations(document: &gltf::Document, buffers: &[&[u8]]) -> Vec<AnimationClip> {
        let mut animations = Vec::new();

        for (anim_index, anim) in document.animations().enumerate() {
            let mut tracks = Vec::new();

            for channel in anim.channels() {
                let reader = channel.reader(|buffer| buffers.get(buffer.index()).copied());
                let target = channel.target();
                let node_name = Self::node_name(&target.node());

                let Some(inputs) = reader.read_inputs() else {
                    log::warn!("Animation {anim_index}: channel without input times, skipped");
                    continue;
                };
                let times: Vec<f32> = inputs.collect();

                let Some(outputs) = reader.read_outputs() else {
                    log::warn!("Animation {anim_index}: channel without outputs, skipped");
                    continue;
                };

                let interpolation = match channel.sampler().interpolation() {
                    Interpolation::Linear => InterpolationMode::Linear,
                    Interpolation::Step => InterpolationMode::Step,
                    Interpolation::CubicSpline => InterpolationMode::CubicSpline,
                };

                let (target_path, data) = match outputs {
                    ReadOutputs::Translations(iter) => (
                        TargetPath::Translation,
                        TrackData::Vector3(KeyframeTrack::new(
                            times,
                            iter.map(Vec3::from_array).collect(),
                            interpolation,
                        )),
                    ),
                    ReadOutputs::Rotations(iter) => (
                        TargetPath::Rotation,
                        TrackData::Quaternion(KeyframeTrack::new(
                            times,
                            iter.into_f32().map(Quat::from_array).collect(),
                            interpolation,
                        )),
                    ),
                    ReadOutputs::Scales(iter) => (
                        TargetPath::Scale,
                        TrackData::Vector3(KeyframeTrack::new(
                            times,
                            iter.map(Vec3::from_array).collect(),
                            interpolation,
                        )),
                    ),
                    ReadOutputs::MorphTargetWeights(iter) => {
                        let flat: Vec<f32> = iter.into_f32().collect();
                        let values = Self::chunk_morph_weights(&flat, times.len(), interpolation);
                        (
                            TargetPath::Weights,
                            TrackData::MorphWeights(KeyframeTrack::new(times, values, interpolation)),
                        )
                    }
                };

                tracks.push(Track {
                    meta: TrackMeta {
                        node_name,
                        target: target_path,
                    },
                    data,
                });
            }

            let name = anim
                .name()
                .map_or_else(|| format!("Animation_{anim_index}"), ToString::to_string);
            animations.push(AnimationClip::new(name, tracks));
        }

        animations
    }

    /// Splits a flat weights accessor into one [`MorphWeightData`] per
    /// output element (three per key for cubic splines).
    fn chunk_morph_weights(
        flat: &[f32],
        key_count: usize,
        interpolation: InterpolationMode,
    ) -> Vec<MorphWeightData> {
        let elements = match interpolation {
            InterpolationMode::CubicSpline => key_count * 3,
            _ => key_count,
        };
        if elements == 0 {
            return Vec::new();
        }
        let per_element = flat.len() / elements;
        if per_element == 0 {
            return Vec::new();
        }
        flat.chunks_exact(per_element)
            .map(MorphWeightData::from_slice)
            .collect()
    }
}
