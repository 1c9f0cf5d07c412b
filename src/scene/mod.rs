//! Scene Graph
//!
//! Hierarchy and components the giant scene is built from:
//! - [`Node`]: named scene node with parent/children, transform and morph influences
//! - [`Transform`]: position, rotation, scale with cached matrices
//! - [`Scene`]: node storage, lights and the scene's own root transform
//! - [`PerspectiveCamera`]: the single camera framing the model
//! - [`Light`]: directional and ambient lights

pub mod camera;
pub mod light;
pub mod node;
pub mod scene;
pub mod transform;

pub use camera::PerspectiveCamera;
pub use light::{Light, LightKind};
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
