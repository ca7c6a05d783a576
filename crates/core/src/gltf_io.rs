use glam::Mat4;
use maquette_scene::{SceneMaterial, SceneNode, ScenePrimitive};

use crate::error::ImportError;
use crate::mesh::Mesh;

/// Decode glTF or GLB bytes. The full default-scene hierarchy is walked and
/// each node's world transform is baked into its primitives, so the result
/// is a flat primitive list under an identity root. Source materials and
/// textures are discarded in favor of the viewer default.
pub fn import_gltf(data: &[u8]) -> Result<SceneNode, ImportError> {
    let (document, buffers, _) = gltf::import_slice(data)
        .map_err(|err| ImportError::Parse(format!("glTF load failed: {err}")))?;

    let mut primitives: Vec<ScenePrimitive> = Vec::new();

    let scenes: Vec<gltf::Scene> = match document.default_scene() {
        Some(scene) => vec![scene],
        None => document.scenes().collect(),
    };
    for scene in scenes {
        for node in scene.nodes() {
            collect_node(&node, Mat4::IDENTITY, &buffers, &mut primitives)?;
        }
    }

    // Meshes not referenced by any scene node still count as geometry.
    if primitives.is_empty() {
        for mesh in document.meshes() {
            collect_mesh(&mesh, Mat4::IDENTITY, &buffers, &mut primitives)?;
        }
    }

    if primitives.is_empty() {
        return Err(ImportError::Parse(
            "glTF has no triangle geometry".to_string(),
        ));
    }

    Ok(SceneNode::from_primitives(primitives))
}

fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<ScenePrimitive>,
) -> Result<(), ImportError> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        collect_mesh(&mesh, world, buffers, out)?;
    }
    for child in node.children() {
        collect_node(&child, world, buffers, out)?;
    }
    Ok(())
}

fn collect_mesh(
    mesh: &gltf::Mesh,
    world: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<ScenePrimitive>,
) -> Result<(), ImportError> {
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            continue;
        }
        let reader = primitive
            .reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or_else(|| {
                ImportError::Parse("glTF primitive missing POSITION attribute".to_string())
            })?
            .collect();
        if positions.is_empty() {
            continue;
        }

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };

        let mut decoded = Mesh::with_positions_indices(positions, indices);
        if let Some(iter) = reader.read_normals() {
            let normals: Vec<[f32; 3]> = iter.collect();
            if normals.len() == decoded.positions.len() {
                decoded.normals = Some(normals);
            }
        }
        bake_transform(&mut decoded, world);

        out.push(decoded.into_primitive(SceneMaterial::viewer_default()));
    }
    Ok(())
}

fn bake_transform(mesh: &mut Mesh, world: Mat4) {
    if world == Mat4::IDENTITY {
        return;
    }

    for p in &mut mesh.positions {
        *p = world.transform_point3(glam::Vec3::from(*p)).to_array();
    }

    if let Some(normals) = &mut mesh.normals {
        let normal_matrix = world.inverse().transpose();
        for n in normals {
            let v = normal_matrix.transform_vector3(glam::Vec3::from(*n));
            let len = v.length();
            *n = if len > 0.0 {
                (v / len).to_array()
            } else {
                [0.0, 1.0, 0.0]
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One triangle at (0,0,0), (4,0,0), (0,4,0); the buffer is the 36
    // position bytes base64-embedded, the node scales it by 2.
    const TRIANGLE_GLTF: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "mesh": 0, "scale": [2.0, 2.0, 2.0] }],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
        "accessors": [{
            "bufferView": 0,
            "componentType": 5126,
            "count": 3,
            "type": "VEC3",
            "min": [0.0, 0.0, 0.0],
            "max": [4.0, 4.0, 0.0]
        }],
        "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
        "buffers": [{
            "byteLength": 36,
            "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAQAAAAAAAAAAAAAAAAAAAgEAAAAAA"
        }]
    }"#;

    #[test]
    fn embedded_json_triangle_imports_with_baked_scale() {
        let node = import_gltf(TRIANGLE_GLTF.as_bytes()).expect("import");
        assert_eq!(node.primitives.len(), 1);
        let primitive = &node.primitives[0];
        assert_eq!(primitive.positions.len(), 3);
        // No indices in the document, so the trivial fallback applies.
        assert_eq!(primitive.indices, vec![0, 1, 2]);
        // The node's scale is baked into the vertices.
        assert_eq!(primitive.positions[1], [8.0, 0.0, 0.0]);
    }

    #[test]
    fn imported_document_normalizes_to_canonical_frame() {
        let node = import_gltf(TRIANGLE_GLTF.as_bytes()).expect("import");
        let node = crate::normalize(node).expect("normalize");
        let bounds = node.bounds().expect("bounds");
        assert!((bounds.max_dim() - crate::TARGET_DIAMETER).abs() < 1.0e-4);
        for axis in bounds.center() {
            assert!(axis.abs() < 1.0e-4);
        }
    }

    #[test]
    fn garbage_bytes_fail_with_parse_error() {
        match import_gltf(b"not a gltf document") {
            Err(ImportError::Parse(detail)) => assert!(detail.contains("glTF")),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn truncated_glb_header_fails() {
        // Valid magic, nothing else.
        match import_gltf(b"glTF") {
            Err(ImportError::Parse(_)) => {}
            other => panic!("expected Parse error, got {other:?}"),
        }
    }
}
