mod error;
mod format;
mod gltf_io;
mod import;
mod mesh;
mod normalize;
mod obj_io;
mod stl_io;

pub use error::ImportError;
pub use format::MeshFormat;
pub use import::import;
pub use mesh::Mesh;
pub use normalize::{normalize, TARGET_DIAMETER};

pub use maquette_scene::{Aabb, SceneMaterial, SceneNode, ScenePrimitive};
