use std::io::{BufReader, Cursor};

use maquette_scene::{SceneMaterial, SceneNode, ScenePrimitive};

use crate::error::ImportError;
use crate::mesh::Mesh;

/// Decode Wavefront OBJ bytes into one primitive per model group. Material
/// library references are answered with an empty set; the viewer's default
/// material is applied instead.
pub fn import_obj(data: &[u8]) -> Result<SceneNode, ImportError> {
    let options = tobj::LoadOptions {
        triangulate: true,
        single_index: true,
        ..Default::default()
    };
    let mut reader = BufReader::new(Cursor::new(data));
    let (models, _) = tobj::load_obj_buf(&mut reader, &options, |_path| {
        Ok((Vec::new(), Default::default()))
    })
    .map_err(|err| ImportError::Parse(format!("OBJ load failed: {err}")))?;

    if models.is_empty() {
        return Err(ImportError::Parse("OBJ has no geometry".to_string()));
    }

    let mut primitives: Vec<ScenePrimitive> = Vec::new();
    for model in models {
        let obj_mesh = model.mesh;
        if obj_mesh.positions.len() % 3 != 0 {
            return Err(ImportError::Parse("OBJ has malformed positions".to_string()));
        }
        if obj_mesh.positions.is_empty() {
            continue;
        }

        let positions: Vec<[f32; 3]> = obj_mesh
            .positions
            .chunks_exact(3)
            .map(|v| [v[0], v[1], v[2]])
            .collect();

        let mut mesh = Mesh::with_positions_indices(positions, obj_mesh.indices);
        if obj_mesh.normals.len() == mesh.positions.len() * 3 {
            mesh.normals = Some(
                obj_mesh
                    .normals
                    .chunks_exact(3)
                    .map(|n| [n[0], n[1], n[2]])
                    .collect(),
            );
        }

        primitives.push(mesh.into_primitive(SceneMaterial::viewer_default()));
    }

    if primitives.is_empty() {
        return Err(ImportError::Parse("OBJ has no geometry".to_string()));
    }

    Ok(SceneNode::from_primitives(primitives))
}
