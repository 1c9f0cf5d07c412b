//! GLB fixtures for integration tests.
//!
//! Builds a minimal binary glTF in memory: an unindexed triangle with one
//! morph target and a "Water" material on the sea node, a boat node animated
//! by translation clips, and a group node holding both.

#![allow(dead_code)]

use serde_json::json;

const GLB_MAGIC: u32 = 0x4654_6C67;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

/// Options for [`GlbFixture::build`].
#[derive(Debug, Clone)]
pub struct GlbFixture {
    /// Name of the morph-target mesh node; `None` names it "Ocean" instead.
    pub sea_mesh_name: Option<String>,
    pub clip_count: usize,
    /// When false the boat node is unnamed and loads as `Node_1`.
    pub name_boat: bool,
}

impl Default for GlbFixture {
    fn default() -> Self {
        Self {
            sea_mesh_name: Some("Cube003".to_string()),
            clip_count: 3,
            name_boat: true,
        }
    }
}

/// Distance the boat travels over each one-second clip.
pub const BOAT_TRAVEL: f32 = 2.0;

impl GlbFixture {
    pub fn with_clips(clip_count: usize) -> Self {
        Self {
            clip_count,
            ..Self::default()
        }
    }

    /// Names the sea node the way an exporter would, e.g. `Cube.003`.
    pub fn with_sea_name(name: &str) -> Self {
        Self {
            sea_mesh_name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn without_sea_mesh() -> Self {
        Self {
            sea_mesh_name: None,
            ..Self::default()
        }
    }

    pub fn build(&self) -> Vec<u8> {
        let bin = binary_chunk();

        let mut boat = json!({});
        if self.name_boat {
            boat["name"] = json!("Boat");
        }
        let sea_name = self.sea_mesh_name.clone().unwrap_or_else(|| "Ocean".to_string());

        let animations: Vec<_> = (0..self.clip_count)
            .map(|i| {
                json!({
                    "name": format!("Clip_{i}"),
                    "channels": [{ "sampler": 0, "target": { "node": 1, "path": "translation" } }],
                    "samplers": [{ "input": 2, "output": 3, "interpolation": "LINEAR" }],
                })
            })
            .collect();

        let mut document = json!({
            "asset": { "version": "2.0" },
            "scene": 0,
            "scenes": [{ "name": "Atlas", "nodes": [2] }],
            "nodes": [
                { "name": sea_name, "mesh": 0 },
                boat,
                { "name": "Giant", "children": [0, 1] },
            ],
            "meshes": [{
                "name": "Sea",
                "primitives": [{
                    "attributes": { "POSITION": 0 },
                    "targets": [{ "POSITION": 1 }],
                    "material": 0,
                }],
                "weights": [0.0],
            }],
            "materials": [{
                "name": "Water",
                "pbrMetallicRoughness": {
                    "baseColorFactor": [0.1, 0.3, 0.8, 1.0],
                    "metallicFactor": 0.0,
                    "roughnessFactor": 0.5,
                },
            }],
            "buffers": [{ "byteLength": bin.len() }],
            "bufferViews": [
                { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
                { "buffer": 0, "byteOffset": 36, "byteLength": 36 },
                { "buffer": 0, "byteOffset": 72, "byteLength": 8 },
                { "buffer": 0, "byteOffset": 80, "byteLength": 24 },
            ],
            "accessors": [
                { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                  "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
                { "bufferView": 1, "componentType": 5126, "count": 3, "type": "VEC3",
                  "min": [0.0, 0.5, 0.0], "max": [0.0, 0.5, 0.0] },
                { "bufferView": 2, "componentType": 5126, "count": 2, "type": "SCALAR",
                  "min": [0.0], "max": [1.0] },
                { "bufferView": 3, "componentType": 5126, "count": 2, "type": "VEC3" },
            ],
        });
        if !animations.is_empty() {
            document["animations"] = json!(animations);
        }

        glb(&serde_json::to_vec(&document).expect("fixture json"), &bin)
    }
}

fn binary_chunk() -> Vec<u8> {
    let floats: [f32; 26] = [
        // positions
        0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
        // morph target deltas
        0.0, 0.5, 0.0, 0.0, 0.5, 0.0, 0.0, 0.5, 0.0,
        // keyframe times
        0.0, 1.0,
        // boat translations
        0.0, 0.0, 0.0, BOAT_TRAVEL, 0.0, 0.0,
    ];
    floats.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn padded(mut bytes: Vec<u8>, fill: u8) -> Vec<u8> {
    while bytes.len() % 4 != 0 {
        bytes.push(fill);
    }
    bytes
}

fn glb(json: &[u8], bin: &[u8]) -> Vec<u8> {
    let json = padded(json.to_vec(), b' ');
    let bin = padded(bin.to_vec(), 0);
    let total = 12 + 8 + json.len() + 8 + bin.len();

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());

    out.extend_from_slice(&(json.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json);

    out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
    out.extend_from_slice(&bin);
    out
}
