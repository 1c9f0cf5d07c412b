//! Drawable resources
//!
//! CPU-side data the renderer uploads, independent of any GPU backend:
//! - [`Geometry`]: vertex attributes, indices and morph target deltas
//! - [`Material`]: metallic-roughness factors of a primitive
//! - [`Mesh`]: the primitives a node draws

pub mod geometry;
pub mod material;
pub mod mesh;

pub use geometry::Geometry;
pub use material::Material;
pub use mesh::{Mesh, MeshPrimitive};
