use cgmath::Point3;

use crate::components::camera::{Camera, CameraComponent, CameraUniform, OrbitController};
use crate::config::CameraConfig;

pub struct CameraSystem {}

impl CameraSystem {
    pub fn create_camera(
        screen_width: u32,
        screen_height: u32,
        config: &CameraConfig,
    ) -> CameraComponent {
        let camera = Camera {
            // +z is out of the screen
            eye: (0.0, 0.0, config.distance).into(),
            target: (0.0, 0.0, 0.0).into(),
            up: cgmath::Vector3::unit_y(),
            aspect: screen_width.max(1) as f64 / screen_height.max(1) as f64,
            fovy: config.fovy,
            znear: config.znear,
            zfar: config.zfar,
        };

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera);

        let camera_controller = OrbitController::new(
            config.damping_factor,
            config.min_distance,
            config.max_distance,
            Point3::new(0.0, 0.0, config.distance),
        );

        CameraComponent {
            camera,
            camera_uniform,
            camera_controller,
        }
    }

    pub fn update(camera_component: &mut CameraComponent) {
        camera_component
            .camera_controller
            .update_camera(&mut camera_component.camera);
        camera_component
            .camera_uniform
            .update_view_proj(&camera_component.camera);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_starts_five_units_back() {
        let component = CameraSystem::create_camera(800, 600, &CameraConfig::default());
        assert_eq!(component.camera.eye, Point3::new(0.0, 0.0, 5.0));
        assert!((component.camera.aspect - 800.0 / 600.0).abs() < 1e-12);
    }

    #[test]
    fn zero_sized_viewport_does_not_divide_by_zero() {
        let component = CameraSystem::create_camera(0, 0, &CameraConfig::default());
        assert_eq!(component.camera.aspect, 1.0);
    }
}
