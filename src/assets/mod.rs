//! Asset Loading
//!
//! - [`io`]: byte readers for local files and (on the web) `fetch`
//! - [`loaders`]: glTF/GLB decoding into a [`Prefab`]
//! - [`prefab`]: scene-independent node tree plus animation clips, turned
//!   into live nodes by [`Scene::instantiate`](crate::scene::Scene::instantiate)

pub mod io;
pub mod loaders;
pub mod prefab;

pub use io::AssetReader;
#[cfg(not(target_arch = "wasm32"))]
pub use io::FileAssetReader;
#[cfg(target_arch = "wasm32")]
pub use io::FetchAssetReader;
pub use loaders::{GltfLoader, sanitize_node_name};
pub use prefab::{Prefab, PrefabNode};
