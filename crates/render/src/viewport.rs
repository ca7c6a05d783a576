use maquette_scene::Aabb;

use crate::camera::{CameraState, Projection};

/// Home pose, the classic three-quarter view from (5, 5, 5).
const DEFAULT_DISTANCE: f32 = 8.6603;
const DEFAULT_YAW: f32 = std::f32::consts::FRAC_PI_4;
const DEFAULT_PITCH: f32 = 0.6155;

/// Per-control enablement surfaced to the host's orbit controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlFlags {
    pub rotate: bool,
    pub pan: bool,
    pub zoom: bool,
}

impl ControlFlags {
    pub const ALL: ControlFlags = ControlFlags {
        rotate: true,
        pan: true,
        zoom: true,
    };

    pub const NONE: ControlFlags = ControlFlags {
        rotate: false,
        pan: false,
        zoom: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTuning {
    pub fov_y_degrees: f32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fit_padding: f32,
    pub top_down_height: f32,
}

impl Default for ViewportTuning {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            zoom_in_factor: 0.8,
            zoom_out_factor: 1.2,
            min_distance: 0.5,
            max_distance: 100.0,
            fit_padding: 1.2,
            top_down_height: 10.0,
        }
    }
}

/// Owns the camera pose and projection mode and answers the commands the
/// surrounding UI exposes. Holds direct state rather than re-discovering
/// control objects per interaction.
#[derive(Debug, Clone)]
pub struct ViewportController {
    camera: CameraState,
    tuning: ViewportTuning,
    flags: ControlFlags,
    locked: bool,
}

impl ViewportController {
    pub fn new(tuning: ViewportTuning) -> Self {
        Self {
            camera: default_camera(),
            tuning,
            flags: ControlFlags::ALL,
            locked: false,
        }
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn tuning(&self) -> ViewportTuning {
        self.tuning
    }

    pub fn fov_y(&self) -> f32 {
        self.tuning.fov_y_degrees.to_radians()
    }

    /// Effective control flags: the interaction lock wins over everything,
    /// and orbiting is meaningless from directly overhead.
    pub fn controls(&self) -> ControlFlags {
        if self.locked {
            return ControlFlags::NONE;
        }
        ControlFlags {
            rotate: self.flags.rotate && self.camera.projection == Projection::Orbit3D,
            pan: self.flags.pan,
            zoom: self.flags.zoom,
        }
    }

    /// Session-level lock while a load is in flight.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn set_control_flags(&mut self, flags: ControlFlags) {
        self.flags = flags;
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(self.tuning.zoom_in_factor);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(self.tuning.zoom_out_factor);
    }

    fn zoom_by(&mut self, factor: f32) {
        if !self.controls().zoom {
            return;
        }
        self.camera.distance = (self.camera.distance * factor)
            .clamp(self.tuning.min_distance, self.tuning.max_distance);
    }

    /// Restore the default orbit pose. Also flips the projection back to
    /// Orbit3D regardless of the current mode.
    pub fn reset_view(&mut self) {
        self.camera = default_camera();
    }

    /// Snap between the orbit and top-down poses. No animation; the camera
    /// is recomputed immediately to the entered state's canonical pose.
    pub fn toggle_projection(&mut self) {
        match self.camera.projection {
            Projection::Orbit3D => {
                self.camera.projection = Projection::TopDown2D;
                self.camera.distance = self.tuning.top_down_height;
            }
            Projection::TopDown2D => {
                self.camera = default_camera();
            }
        }
    }

    /// Pull the camera back along the current view direction until the box
    /// fits the field of view, with some padding. Projection is untouched.
    pub fn fit_to_bounds(&mut self, bounds: &Aabb) {
        let max_dim = bounds.max_dim();
        if !max_dim.is_finite() || max_dim <= 0.0 {
            return;
        }
        let distance = (max_dim * 0.5) / (self.fov_y() * 0.5).tan() * self.tuning.fit_padding;
        self.camera.distance =
            distance.clamp(self.tuning.min_distance, self.tuning.max_distance);
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportTuning::default())
    }
}

fn default_camera() -> CameraState {
    CameraState {
        target: [0.0, 0.0, 0.0],
        distance: DEFAULT_DISTANCE,
        yaw: DEFAULT_YAW,
        pitch: DEFAULT_PITCH,
        projection: Projection::Orbit3D,
    }
}
