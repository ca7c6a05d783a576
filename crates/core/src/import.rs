use maquette_scene::SceneNode;

use crate::error::ImportError;
use crate::format::MeshFormat;
use crate::{gltf_io, obj_io, stl_io};

/// Decode raw upload bytes into a scene node. Single attempt, CPU memory
/// only; on success the node is guaranteed to have a non-empty vertex set.
pub fn import(data: &[u8], format: MeshFormat) -> Result<SceneNode, ImportError> {
    let node = match format {
        MeshFormat::Obj => obj_io::import_obj(data),
        MeshFormat::Stl => stl_io::import_stl(data),
        MeshFormat::Gltf => gltf_io::import_gltf(data),
    }?;

    if node.vertex_count() == 0 {
        return Err(ImportError::EmptyGeometry);
    }

    tracing::debug!(
        %format,
        primitives = node.primitives.len(),
        vertices = node.vertex_count(),
        "model imported"
    );
    Ok(node)
}
