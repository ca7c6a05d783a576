use glam::{Mat4, Vec3};

/// Axis-aligned bounding box in the node's transformed space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Aabb {
    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn max_dim(&self) -> f32 {
        let size = self.size();
        size[0].max(size[1]).max(size[2])
    }
}

/// Uniform look applied to every imported primitive. Embedded materials are
/// intentionally discarded so uploads read consistently across formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneMaterial {
    pub base_color: [f32; 3],
    pub metallic: f32,
    pub roughness: f32,
}

impl SceneMaterial {
    pub fn viewer_default() -> Self {
        Self {
            base_color: [0.388, 0.451, 0.949],
            metallic: 0.1,
            roughness: 0.3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScenePrimitive {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub material: SceneMaterial,
}

impl ScenePrimitive {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// A renderable node: one or more primitives under a shared root transform.
/// An installed node exclusively owns its geometry; nothing else may keep a
/// handle to the same buffers across a dispose.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub primitives: Vec<ScenePrimitive>,
    pub transform: Mat4,
}

impl SceneNode {
    pub fn from_primitives(primitives: Vec<ScenePrimitive>) -> Self {
        Self {
            primitives,
            transform: Mat4::IDENTITY,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.primitives.iter().map(|p| p.positions.len()).sum()
    }

    /// Running min/max fold over every primitive's positions, transformed by
    /// the root transform. `None` when the node has no vertices at all.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        let mut found = false;

        for primitive in &self.primitives {
            for pos in &primitive.positions {
                let p = self.transform.transform_point3(Vec3::from(*pos)).to_array();
                for i in 0..3 {
                    min[i] = min[i].min(p[i]);
                    max[i] = max[i].max(p[i]);
                }
                found = true;
            }
        }

        if found {
            Some(Aabb { min, max })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_node() -> SceneNode {
        SceneNode::from_primitives(vec![ScenePrimitive {
            positions: vec![[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 4.0, 0.0]],
            normals: vec![[0.0, 0.0, 1.0]; 3],
            indices: vec![0, 1, 2],
            material: SceneMaterial::viewer_default(),
        }])
    }

    #[test]
    fn bounds_fold_min_max() {
        let node = triangle_node();
        let bounds = node.bounds().expect("bounds");
        assert_eq!(bounds.min, [0.0, 0.0, 0.0]);
        assert_eq!(bounds.max, [2.0, 4.0, 0.0]);
        assert_eq!(bounds.center(), [1.0, 2.0, 0.0]);
        assert_eq!(bounds.max_dim(), 4.0);
    }

    #[test]
    fn bounds_respect_root_transform() {
        let mut node = triangle_node();
        node.transform = Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0));
        let bounds = node.bounds().expect("bounds");
        assert_eq!(bounds.min[0], 10.0);
        assert_eq!(bounds.max[0], 12.0);
    }

    #[test]
    fn empty_node_has_no_bounds() {
        let node = SceneNode::from_primitives(Vec::new());
        assert!(node.bounds().is_none());
    }

    #[test]
    fn flat_mesh_has_positive_max_dim() {
        let node = triangle_node();
        let bounds = node.bounds().expect("bounds");
        assert_eq!(bounds.size()[2], 0.0);
        assert!(bounds.max_dim() > 0.0);
    }
}
