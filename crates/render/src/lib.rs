mod camera;
mod gpu;
mod vertex;
mod viewport;

pub use camera::{camera_position, camera_view_proj, CameraState, Projection};
pub use gpu::{GpuBackend, GpuNodeId, NullBackend};
pub use vertex::{pack_node, PrimitiveBuffers, Vertex, VERTEX_STRIDE};
pub use viewport::{ControlFlags, ViewportController, ViewportTuning};
