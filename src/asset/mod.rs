// Model asset loading: async fetch with progress, then glTF decoding

pub mod gltf_scene;
pub mod loader;
pub mod types;

pub use gltf_scene::{compute_vertex_normals, parse_scene};
pub use loader::{AssetLoad, AssetSource, load_asset};
pub use types::{AssetNode, CpuMesh, LoadProgress, SceneAsset};
