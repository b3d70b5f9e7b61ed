use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Orbit camera circling a target point
///
/// Eye position is derived from `distance`, `pitch` and `yaw`; the scene is
/// Y-up, so yaw sweeps the XZ plane and pitch lifts the eye toward +Y.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // recalculated in `update()`
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Deg(75.0).into(),
            znear: 0.1,
            zfar: 100.0,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance.max(1.01)) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        self.yaw = yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction
    ///
    /// `delta.0` moves along the camera's right axis, `delta.1` along its
    /// true up axis; both eye and target shift so the view direction holds.
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // Scale pan movement by distance for a consistent feel at any zoom
        let pan_scale = self.distance * 0.1;

        let movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;
        self.eye += movement;
        self.target += movement;
    }

    /// Updates the eye position after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye = calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: Some(16.0),
            min_pitch: -std::f32::consts::PI / 2.0 + f32::EPSILON,
            max_pitch: std::f32::consts::PI / 2.0 - f32::EPSILON,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_projection_sets_aspect() {
        let mut camera = OrbitCamera::new(3.0, 0.0, 0.0, Vector3::zero(), 1.0);
        camera.resize_projection(1600, 900);
        assert_eq!(camera.aspect, 1600.0 / 900.0);

        camera.resize_projection(800, 800);
        assert_eq!(camera.aspect, 1.0);
    }

    #[test]
    fn test_eye_sits_at_distance_from_target() {
        let camera = OrbitCamera::new(3.0, 0.4, 0.7, Vector3::zero(), 1.0);
        let len = camera.eye.magnitude();
        assert!((len - 3.0).abs() < 1e-5, "eye distance was {}", len);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = OrbitCamera::new(3.0, 0.0, 0.0, Vector3::zero(), 1.0);
        camera.set_pitch(10.0);
        assert!(camera.pitch <= std::f32::consts::PI / 2.0);
        camera.set_pitch(-10.0);
        assert!(camera.pitch >= -std::f32::consts::PI / 2.0);
    }
}
