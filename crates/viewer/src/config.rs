use maquette_render::ViewportTuning;
use serde::{Deserialize, Serialize};

/// Viewer-level settings the surrounding dashboard may persist alongside a
/// project. Unknown fields are ignored and missing fields fall back to the
/// built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub fov_y_degrees: f32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub fit_padding: f32,
    pub top_down_height: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let tuning = ViewportTuning::default();
        Self {
            fov_y_degrees: tuning.fov_y_degrees,
            zoom_in_factor: tuning.zoom_in_factor,
            zoom_out_factor: tuning.zoom_out_factor,
            min_distance: tuning.min_distance,
            max_distance: tuning.max_distance,
            fit_padding: tuning.fit_padding,
            top_down_height: tuning.top_down_height,
        }
    }
}

impl ViewerConfig {
    pub fn from_json(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    pub fn tuning(&self) -> ViewportTuning {
        ViewportTuning {
            fov_y_degrees: self.fov_y_degrees,
            zoom_in_factor: self.zoom_in_factor,
            zoom_out_factor: self.zoom_out_factor,
            min_distance: self.min_distance,
            max_distance: self.max_distance,
            fit_padding: self.fit_padding,
            top_down_height: self.top_down_height,
        }
    }
}
