use glam::Vec3;
use maquette_scene::{SceneMaterial, SceneNode, ScenePrimitive};

use crate::error::ImportError;

const BINARY_HEADER_LEN: usize = 84;
const BINARY_TRIANGLE_LEN: usize = 50;

/// Decode STL bytes into a single triangle-soup primitive. The binary and
/// ASCII sub-formats are auto-detected; facet normals missing or zeroed in
/// the file are synthesized from winding order.
pub fn import_stl(data: &[u8]) -> Result<SceneNode, ImportError> {
    let triangles = if is_binary(data) {
        parse_binary(data)?
    } else {
        parse_ascii(data)?
    };

    if triangles.is_empty() {
        return Err(ImportError::Parse("STL has no triangles".to_string()));
    }

    let mut positions = Vec::with_capacity(triangles.len() * 3);
    let mut normals = Vec::with_capacity(triangles.len() * 3);
    for tri in &triangles {
        let normal = facet_normal(tri);
        for vertex in tri.vertices {
            positions.push(vertex);
            normals.push(normal);
        }
    }
    let indices = (0..positions.len() as u32).collect();

    Ok(SceneNode::from_primitives(vec![ScenePrimitive {
        positions,
        normals,
        indices,
        material: SceneMaterial::viewer_default(),
    }]))
}

struct Facet {
    normal: [f32; 3],
    vertices: [[f32; 3]; 3],
}

/// Some binary exporters write "solid" into the 80-byte header, so the size
/// equation is checked before the ASCII keyword.
fn is_binary(data: &[u8]) -> bool {
    if data.len() >= BINARY_HEADER_LEN {
        let count = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;
        if data.len() == BINARY_HEADER_LEN + count * BINARY_TRIANGLE_LEN {
            return true;
        }
    }
    !data.trim_ascii_start().starts_with(b"solid")
}

fn parse_binary(data: &[u8]) -> Result<Vec<Facet>, ImportError> {
    if data.len() < BINARY_HEADER_LEN {
        return Err(ImportError::Parse(
            "STL too small for header and triangle count".to_string(),
        ));
    }

    let count = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;
    let expected = BINARY_HEADER_LEN + count * BINARY_TRIANGLE_LEN;
    if data.len() < expected {
        return Err(ImportError::Parse(format!(
            "STL truncated: expected {expected} bytes for {count} triangles, got {}",
            data.len()
        )));
    }

    let mut facets = Vec::with_capacity(count);
    let mut offset = BINARY_HEADER_LEN;
    for _ in 0..count {
        let normal = read_vec3(data, offset);
        offset += 12;
        let mut vertices = [[0.0f32; 3]; 3];
        for vertex in &mut vertices {
            *vertex = read_vec3(data, offset);
            offset += 12;
        }
        offset += 2; // attribute byte count
        facets.push(Facet { normal, vertices });
    }
    Ok(facets)
}

fn parse_ascii(data: &[u8]) -> Result<Vec<Facet>, ImportError> {
    let text = std::str::from_utf8(data)
        .map_err(|_| ImportError::Parse("ASCII STL is not valid UTF-8".to_string()))?;

    let mut facets = Vec::new();
    let mut normal = [0.0f32; 3];
    let mut vertices: Vec<[f32; 3]> = Vec::with_capacity(3);
    let mut in_facet = false;

    for (line_no, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("facet") => {
                if tokens.next() != Some("normal") {
                    return Err(parse_error(line_no, "facet without normal"));
                }
                normal = read_triplet(&mut tokens).ok_or_else(|| {
                    parse_error(line_no, "malformed facet normal")
                })?;
                vertices.clear();
                in_facet = true;
            }
            Some("vertex") => {
                if !in_facet {
                    return Err(parse_error(line_no, "vertex outside facet"));
                }
                let v = read_triplet(&mut tokens)
                    .ok_or_else(|| parse_error(line_no, "malformed vertex"))?;
                vertices.push(v);
            }
            Some("endfacet") => {
                if vertices.len() != 3 {
                    return Err(parse_error(line_no, "facet does not have 3 vertices"));
                }
                facets.push(Facet {
                    normal,
                    vertices: [vertices[0], vertices[1], vertices[2]],
                });
                in_facet = false;
            }
            _ => {}
        }
    }

    if in_facet {
        return Err(ImportError::Parse("ASCII STL ends inside a facet".to_string()));
    }
    Ok(facets)
}

fn facet_normal(facet: &Facet) -> [f32; 3] {
    let n = Vec3::from(facet.normal);
    if n.is_finite() && n.length_squared() > 0.0 {
        return n.normalize().to_array();
    }

    let p0 = Vec3::from(facet.vertices[0]);
    let p1 = Vec3::from(facet.vertices[1]);
    let p2 = Vec3::from(facet.vertices[2]);
    let winding = (p1 - p0).cross(p2 - p0);
    if winding.length_squared() > 0.0 {
        winding.normalize().to_array()
    } else {
        [0.0, 1.0, 0.0]
    }
}

fn read_vec3(data: &[u8], offset: usize) -> [f32; 3] {
    [
        read_f32(data, offset),
        read_f32(data, offset + 4),
        read_f32(data, offset + 8),
    ]
}

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn read_triplet<'a, I: Iterator<Item = &'a str>>(tokens: &mut I) -> Option<[f32; 3]> {
    let x = tokens.next()?.parse().ok()?;
    let y = tokens.next()?.parse().ok()?;
    let z = tokens.next()?.parse().ok()?;
    Some([x, y, z])
}

fn parse_error(line_no: usize, detail: &str) -> ImportError {
    ImportError::Parse(format!("ASCII STL line {}: {detail}", line_no + 1))
}
