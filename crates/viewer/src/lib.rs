mod config;
mod logging;
mod session;

pub use config::ViewerConfig;
pub use logging::init_logging;
pub use session::{ModelSession, ModelSource, SessionStatus, ViewerFrame};

pub use maquette_core::{import, normalize, ImportError, MeshFormat, TARGET_DIAMETER};
pub use maquette_render::{
    CameraState, ControlFlags, GpuBackend, GpuNodeId, NullBackend, Projection,
    ViewportController, ViewportTuning,
};
pub use maquette_scene::{Aabb, SceneMaterial, SceneNode, ScenePrimitive};
