use glam::{Mat4, Vec3};
use maquette_scene::SceneNode;

use crate::error::ImportError;

/// Diameter of the canonical viewing frame. Every successfully loaded model
/// is centered at the origin and scaled so its longest axis spans this.
pub const TARGET_DIAMETER: f32 = 2.0;

/// Recenter and rescale a node into the canonical frame by composing a
/// correction onto its root transform. Uploads arrive in arbitrary source
/// units; after this the camera can assume every model occupies the same
/// volume. Applying it to an already-normalized node changes nothing beyond
/// floating-point tolerance.
pub fn normalize(mut node: SceneNode) -> Result<SceneNode, ImportError> {
    let bounds = node.bounds().ok_or(ImportError::EmptyGeometry)?;
    let max_dim = bounds.max_dim();
    if !max_dim.is_finite() || max_dim <= 0.0 {
        return Err(ImportError::DegenerateGeometry);
    }

    let center = Vec3::from(bounds.center());
    let scale = TARGET_DIAMETER / max_dim;
    let correction = Mat4::from_scale(Vec3::splat(scale)) * Mat4::from_translation(-center);
    node.transform = correction * node.transform;

    tracing::debug!(max_dim, scale, "model normalized to canonical frame");
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use maquette_scene::{SceneMaterial, ScenePrimitive};

    const TOLERANCE: f32 = 1.0e-4;

    fn node_from_positions(positions: Vec<[f32; 3]>) -> SceneNode {
        let indices = (0..positions.len() as u32).collect();
        let count = positions.len();
        SceneNode::from_primitives(vec![ScenePrimitive {
            positions,
            normals: vec![[0.0, 1.0, 0.0]; count],
            indices,
            material: SceneMaterial::viewer_default(),
        }])
    }

    #[test]
    fn normalized_node_is_centered_and_unit_sized() {
        let node = node_from_positions(vec![
            [10.0, 5.0, -3.0],
            [14.0, 7.0, -3.0],
            [10.0, 9.0, 1.0],
        ]);
        let node = normalize(node).expect("normalize");
        let bounds = node.bounds().expect("bounds");
        let center = bounds.center();
        for axis in center {
            assert!(axis.abs() < TOLERANCE, "center {center:?} not at origin");
        }
        assert!((bounds.max_dim() - TARGET_DIAMETER).abs() < TOLERANCE);
    }

    #[test]
    fn normalize_is_idempotent() {
        let node = node_from_positions(vec![
            [100.0, 0.0, 0.0],
            [250.0, 30.0, 0.0],
            [100.0, 30.0, 80.0],
        ]);
        let once = normalize(node).expect("first");
        let first_transform = once.transform;
        let twice = normalize(once).expect("second");
        let a = first_transform.to_cols_array();
        let b = twice.transform.to_cols_array();
        for i in 0..16 {
            assert!((a[i] - b[i]).abs() < TOLERANCE);
        }
    }

    #[test]
    fn single_point_is_degenerate() {
        let node = node_from_positions(vec![[3.0, 3.0, 3.0]]);
        match normalize(node) {
            Err(ImportError::DegenerateGeometry) => {}
            other => panic!("expected DegenerateGeometry, got {other:?}"),
        }
    }

    #[test]
    fn flat_mesh_is_still_valid() {
        let node = node_from_positions(vec![
            [0.0, 0.0, 0.0],
            [5.0, 0.0, 0.0],
            [0.0, 5.0, 0.0],
        ]);
        let node = normalize(node).expect("planar mesh should normalize");
        let bounds = node.bounds().expect("bounds");
        assert!((bounds.max_dim() - TARGET_DIAMETER).abs() < TOLERANCE);
    }

    #[test]
    fn empty_node_reports_empty_geometry() {
        let node = SceneNode::from_primitives(Vec::new());
        match normalize(node) {
            Err(ImportError::EmptyGeometry) => {}
            other => panic!("expected EmptyGeometry, got {other:?}"),
        }
    }
}
