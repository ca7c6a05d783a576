use glam::Vec3;
use maquette_scene::{SceneMaterial, ScenePrimitive};

/// CPU-side mesh as decoded from an upload, before it becomes a renderable
/// primitive. Import happens entirely in this representation; GPU upload is
/// the session's job and only runs on a fully-parsed result.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub normals: Option<Vec<[f32; 3]>>,
}

impl Mesh {
    pub fn with_positions_indices(positions: Vec<[f32; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices,
            normals: None,
        }
    }

    /// Area-weighted vertex normals from triangle winding order. Returns
    /// false when the index buffer is not triangles or there are no points.
    pub fn compute_normals(&mut self) -> bool {
        if self.indices.len() % 3 != 0 || self.positions.is_empty() {
            return false;
        }

        let mut accum = vec![Vec3::ZERO; self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let i0 = tri[0] as usize;
            let i1 = tri[1] as usize;
            let i2 = tri[2] as usize;
            if i0 >= self.positions.len()
                || i1 >= self.positions.len()
                || i2 >= self.positions.len()
            {
                continue;
            }

            let p0 = Vec3::from(self.positions[i0]);
            let p1 = Vec3::from(self.positions[i1]);
            let p2 = Vec3::from(self.positions[i2]);
            let normal = (p1 - p0).cross(p2 - p0);
            accum[i0] += normal;
            accum[i1] += normal;
            accum[i2] += normal;
        }

        let normals = accum
            .into_iter()
            .map(|n| {
                let len = n.length();
                if len > 0.0 {
                    (n / len).to_array()
                } else {
                    [0.0, 1.0, 0.0]
                }
            })
            .collect();

        self.normals = Some(normals);
        true
    }

    /// Finish the decode: guarantee per-vertex normals and attach the
    /// viewer's default material.
    pub fn into_primitive(mut self, material: SceneMaterial) -> ScenePrimitive {
        let has_full_normals = self
            .normals
            .as_ref()
            .map(|n| n.len() == self.positions.len())
            .unwrap_or(false);
        if !has_full_normals && !self.compute_normals() {
            self.normals = Some(vec![[0.0, 1.0, 0.0]; self.positions.len()]);
        }

        ScenePrimitive {
            positions: self.positions,
            normals: self.normals.unwrap_or_default(),
            indices: self.indices,
            material,
        }
    }
}
