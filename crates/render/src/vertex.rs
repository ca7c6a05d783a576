use bytemuck::{Pod, Zeroable};
use maquette_scene::{SceneMaterial, SceneNode};

/// Interleaved layout handed to the rendering engine.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

pub const VERTEX_STRIDE: usize = std::mem::size_of::<Vertex>();

/// One primitive's GPU-ready buffers: packed vertex bytes plus the index
/// and material data the engine needs to draw it.
#[derive(Debug, Clone)]
pub struct PrimitiveBuffers {
    pub vertex_bytes: Vec<u8>,
    pub indices: Vec<u32>,
    pub material: SceneMaterial,
}

impl PrimitiveBuffers {
    pub fn vertex_count(&self) -> usize {
        self.vertex_bytes.len() / VERTEX_STRIDE
    }
}

/// Pack a node's primitives into upload-ready byte buffers. Pure CPU work;
/// the actual allocation happens behind the `GpuBackend` boundary.
pub fn pack_node(node: &SceneNode) -> Vec<PrimitiveBuffers> {
    node.primitives
        .iter()
        .map(|primitive| {
            let vertices: Vec<Vertex> = primitive
                .positions
                .iter()
                .enumerate()
                .map(|(i, position)| Vertex {
                    position: *position,
                    normal: primitive.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                })
                .collect();
            PrimitiveBuffers {
                vertex_bytes: bytemuck::cast_slice(&vertices).to_vec(),
                indices: primitive.indices.clone(),
                material: primitive.material,
            }
        })
        .collect()
}
