use cgmath::{InnerSpace, Point3, Vector3};

pub const IDENTITY_MATRIX_4: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

// keep the orbit off the exact poles so `up` never lines up with the view
const PITCH_EPSILON: f64 = 1e-4;

pub struct CameraComponent {
    pub camera: Camera,
    pub camera_uniform: CameraUniform,
    pub camera_controller: OrbitController,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Point3<f64>,
    pub target: Point3<f64>,
    pub up: Vector3<f64>,
    pub aspect: f64,
    pub fovy: f64,
    pub znear: f64,
    pub zfar: f64,
}

impl Camera {
    /// Returns (view_proj, view, proj). The projection is OpenGL-style with
    /// clip-space z in [-1, 1]; renderers that want [0, 1] apply their own fixup.
    pub fn build_view_projection_matrix(
        &self,
    ) -> (
        cgmath::Matrix4<f64>,
        cgmath::Matrix4<f64>,
        cgmath::Matrix4<f64>,
    ) {
        let view = cgmath::Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = cgmath::perspective(cgmath::Deg(self.fovy), self.aspect, self.znear, self.zfar);
        (proj * view, view, proj)
    }

    pub fn distance(&self) -> f64 {
        (self.eye - self.target).magnitude()
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f64 / height as f64;
        }
    }
}

/// User gestures fed to the orbit controls.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlInput {
    /// Angles in radians; positive yaw orbits right, positive pitch orbits up.
    Rotate { yaw: f64, pitch: f64 },
    /// Multiplies the camera distance; values below 1 move closer.
    Zoom(f64),
}

/// Damped orbit around the camera target.
#[derive(Debug, Clone)]
pub struct OrbitController {
    damping_factor: f64,
    min_distance: f64,
    max_distance: f64,
    yaw_delta: f64,
    pitch_delta: f64,
    zoom_scale: f64,
    initial_eye: Point3<f64>,
}

impl OrbitController {
    pub fn new(
        damping_factor: f64,
        min_distance: f64,
        max_distance: f64,
        initial_eye: Point3<f64>,
    ) -> Self {
        Self {
            damping_factor,
            min_distance,
            max_distance,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            zoom_scale: 1.0,
            initial_eye,
        }
    }

    pub fn process_input(&mut self, input: ControlInput) -> bool {
        match input {
            ControlInput::Rotate { yaw, pitch } => {
                self.yaw_delta += yaw;
                self.pitch_delta += pitch;
                true
            }
            ControlInput::Zoom(scale) if scale > 0.0 => {
                self.zoom_scale *= scale;
                true
            }
            ControlInput::Zoom(_) => false,
        }
    }

    /// Applies a damped fraction of the pending rotation and all of the
    /// pending zoom. Leftover rotation decays over following frames.
    pub fn update_camera(&mut self, camera: &mut Camera) {
        let offset = camera.eye - camera.target;
        let radius = offset.magnitude();
        if radius == 0.0 {
            return;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        theta -= self.yaw_delta * self.damping_factor;
        phi -= self.pitch_delta * self.damping_factor;
        phi = phi.clamp(PITCH_EPSILON, std::f64::consts::PI - PITCH_EPSILON);

        let radius = (radius * self.zoom_scale).clamp(self.min_distance, self.max_distance);

        camera.eye = camera.target
            + Vector3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );

        self.yaw_delta *= 1.0 - self.damping_factor;
        self.pitch_delta *= 1.0 - self.damping_factor;
        self.zoom_scale = 1.0;
    }

    pub fn reset(&mut self, camera: &mut Camera) {
        self.yaw_delta = 0.0;
        self.pitch_delta = 0.0;
        self.zoom_scale = 1.0;
        camera.eye = self.initial_eye;
    }

    pub fn is_settled(&self) -> bool {
        self.yaw_delta.abs() < 1e-6 && self.pitch_delta.abs() < 1e-6
    }
}

// We need this for Rust to store our data correctly for the shaders
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj_matrix: [[f32; 4]; 4],
    pub view_matrix: [[f32; 4]; 4],
    pub proj_matrix: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        Self {
            view_proj_matrix: IDENTITY_MATRIX_4,
            view_matrix: IDENTITY_MATRIX_4,
            proj_matrix: IDENTITY_MATRIX_4,
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera) {
        let (view_proj_matrix, view_matrix, proj_matrix) = camera.build_view_projection_matrix();
        self.view_proj_matrix = crate::matrix4_to_array(view_proj_matrix);
        self.view_matrix = crate::matrix4_to_array(view_matrix);
        self.proj_matrix = crate::matrix4_to_array(proj_matrix);
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera {
            eye: Point3::new(0.0, 0.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            aspect: 1.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    #[test]
    fn zoom_is_clamped_to_distance_limits() {
        let mut cam = camera();
        let mut controls = OrbitController::new(0.05, 3.0, 10.0, cam.eye);
        controls.process_input(ControlInput::Zoom(0.1));
        controls.update_camera(&mut cam);
        assert!((cam.distance() - 3.0).abs() < 1e-9);

        controls.process_input(ControlInput::Zoom(100.0));
        controls.update_camera(&mut cam);
        assert!((cam.distance() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_is_damped_and_keeps_distance() {
        let mut cam = camera();
        let mut controls = OrbitController::new(0.05, 3.0, 10.0, cam.eye);
        assert!(controls.process_input(ControlInput::Rotate {
            yaw: 1.0,
            pitch: 0.0
        }));
        controls.update_camera(&mut cam);
        assert!((cam.distance() - 5.0).abs() < 1e-9);
        assert!(cam.eye.x.abs() > 0.0);
        assert!(!controls.is_settled());

        for _ in 0..1000 {
            controls.update_camera(&mut cam);
        }
        assert!(controls.is_settled());
    }

    #[test]
    fn reset_restores_initial_eye() {
        let mut cam = camera();
        let mut controls = OrbitController::new(0.05, 3.0, 10.0, cam.eye);
        controls.process_input(ControlInput::Rotate {
            yaw: 0.7,
            pitch: 0.3,
        });
        controls.process_input(ControlInput::Zoom(1.5));
        controls.update_camera(&mut cam);
        controls.reset(&mut cam);
        assert_eq!(cam.eye, Point3::new(0.0, 0.0, 5.0));
        assert!(controls.is_settled());
    }

    #[test]
    fn non_positive_zoom_is_ignored() {
        let mut controls = OrbitController::new(0.05, 3.0, 10.0, Point3::new(0.0, 0.0, 5.0));
        assert!(!controls.process_input(ControlInput::Zoom(0.0)));
    }

    #[test]
    fn uniform_is_three_mat4s() {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera());
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 3 * 16 * 4);
        assert_ne!(uniform.view_proj_matrix, IDENTITY_MATRIX_4);
    }
}
