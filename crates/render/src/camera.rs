use glam::{Mat4, Vec3};

/// How the viewport frames the model: a free orbit around the origin, or a
/// fixed top-down plan view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    Orbit3D,
    TopDown2D,
}

/// Camera pose around a look-at target fixed at the origin. The render loop
/// re-reads this every frame; nothing here is animated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub target: [f32; 3],
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub projection: Projection,
}

pub fn camera_position(camera: CameraState) -> Vec3 {
    let target = Vec3::from(camera.target);
    match camera.projection {
        Projection::Orbit3D => target + camera_direction(camera) * camera.distance.max(0.1),
        Projection::TopDown2D => target + Vec3::Y * camera.distance.max(0.1),
    }
}

pub fn camera_view_proj(camera: CameraState, aspect: f32, fov_y: f32) -> Mat4 {
    let aspect = aspect.max(0.001);
    let target = Vec3::from(camera.target);
    let position = camera_position(camera);

    let up = match camera.projection {
        Projection::Orbit3D => Vec3::Y,
        // Looking straight down the up axis; world -Z keeps the plan upright.
        Projection::TopDown2D => Vec3::NEG_Z,
    };
    let view = Mat4::look_at_rh(position, target, up);

    let projection = match camera.projection {
        Projection::Orbit3D => Mat4::perspective_rh(fov_y, aspect, 0.01, 1000.0),
        Projection::TopDown2D => {
            // Size the ortho frustum from the distance so zoom still works.
            let half_height = (camera.distance.max(0.1) * (fov_y * 0.5).tan()).max(0.001);
            let half_width = half_height * aspect;
            Mat4::orthographic_rh(
                -half_width,
                half_width,
                -half_height,
                half_height,
                0.01,
                1000.0,
            )
        }
    };
    projection * view
}

fn camera_direction(camera: CameraState) -> Vec3 {
    let pitch = camera.pitch.clamp(-1.54, 1.54);
    let yaw = camera.yaw;

    let cos_pitch = pitch.cos();
    let sin_pitch = pitch.sin();
    let cos_yaw = yaw.cos();
    let sin_yaw = yaw.sin();

    Vec3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_down_position_is_straight_above_target() {
        let camera = CameraState {
            target: [0.0, 0.0, 0.0],
            distance: 10.0,
            yaw: 1.3,
            pitch: 0.4,
            projection: Projection::TopDown2D,
        };
        let position = camera_position(camera);
        assert_eq!(position, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn orbit_position_respects_distance() {
        let camera = CameraState {
            target: [0.0, 0.0, 0.0],
            distance: 5.0,
            yaw: 0.0,
            pitch: 0.0,
            projection: Projection::Orbit3D,
        };
        let position = camera_position(camera);
        assert!((position.length() - 5.0).abs() < 1.0e-5);
    }

    #[test]
    fn view_proj_is_finite_in_both_projections() {
        for projection in [Projection::Orbit3D, Projection::TopDown2D] {
            let camera = CameraState {
                target: [0.0, 0.0, 0.0],
                distance: 8.0,
                yaw: 0.7,
                pitch: 0.5,
                projection,
            };
            let matrix = camera_view_proj(camera, 16.0 / 9.0, 75_f32.to_radians());
            assert!(matrix.to_cols_array().iter().all(|v| v.is_finite()));
        }
    }
}
