use cgmath::{InnerSpace, Matrix3, Point3, Rad, SquareMatrix, Vector3, Vector4};
use tracing::debug;

use crate::components::{camera::Camera, panel::ClickInfo};

use super::geospatial::{
    coordinates::{CoordinatesSystem, SpherePoint},
    regions::RegionSystem,
};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub dir: Vector3<f64>,
}

/// The globe as the click handler sees it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickTarget {
    pub radius: f64,
    pub rotation_y: f64,
    pub tolerance: f64,
}

pub struct WindowSystem {}

impl WindowSystem {
    /// Builds a world-space ray through a pixel of the canvas.
    pub fn screen_ray(
        screen_width: f64,
        screen_height: f64,
        position_x: f64,
        position_y: f64,
        camera: &Camera,
    ) -> Option<Ray> {
        if screen_width <= 0.0 || screen_height <= 0.0 {
            return None;
        }
        let (view_proj_matrix, _, _) = camera.build_view_projection_matrix();
        let inverse = view_proj_matrix.invert()?;

        let ndc_x = (position_x / screen_width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (position_y / screen_height) * 2.0;

        let near = inverse * Vector4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far = inverse * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        let dir = far - near;
        if dir.magnitude2() == 0.0 {
            return None;
        }

        Some(Ray {
            origin: Point3::new(near.x, near.y, near.z),
            dir: dir.normalize(),
        })
    }

    /// Nearest intersection in front of the ray origin with a sphere at the origin.
    pub fn intersect_sphere(ray: &Ray, radius: f64) -> Option<Point3<f64>> {
        let oc = ray.origin - Point3::new(0.0, 0.0, 0.0);
        let b = oc.dot(ray.dir);
        let c = oc.dot(oc) - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let discriminant_sqrt = discriminant.sqrt();
        let t1 = -b - discriminant_sqrt;
        let t2 = -b + discriminant_sqrt;
        let t = if t1 >= 0.0 {
            t1
        } else if t2 >= 0.0 {
            t2
        } else {
            return None;
        };

        Some(ray.origin + ray.dir * t)
    }

    /// Resolves a click to a geographic location and region, or `None` when
    /// the click misses the globe.
    pub fn handle_left_click(
        screen_width: f64,
        screen_height: f64,
        position_x: f64,
        position_y: f64,
        target: PickTarget,
        camera: &Camera,
    ) -> Option<ClickInfo> {
        let ray = Self::screen_ray(screen_width, screen_height, position_x, position_y, camera)?;
        let hit = Self::intersect_sphere(&ray, target.radius)?;

        // markers and texture turn with the globe, so resolve in its own frame
        let unspin = Matrix3::from_angle_y(Rad(-target.rotation_y));
        let local = SpherePoint::from(unspin * Vector3::new(hit.x, hit.y, hit.z));

        let geo = CoordinatesSystem::inverse_project_checked(local, target.radius, target.tolerance)?;
        let region = RegionSystem::classify_region(geo);
        debug!(
            lat = geo.latitude,
            lng = geo.longitude,
            region = region.name,
            "globe clicked"
        );

        Some(ClickInfo {
            local_point: local,
            geo,
            region,
        })
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
            aspect: 800.0 / 600.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    fn target(rotation_y: f64) -> PickTarget {
        PickTarget {
            radius: 2.0,
            rotation_y,
            tolerance: 0.01,
        }
    }

    #[test]
    fn centre_ray_points_down_negative_z() {
        let ray = WindowSystem::screen_ray(800.0, 600.0, 400.0, 300.0, &camera()).unwrap();
        assert!(ray.dir.x.abs() < 1e-9);
        assert!(ray.dir.y.abs() < 1e-9);
        assert!((ray.dir.z + 1.0).abs() < 1e-9);
    }

    #[test]
    fn centre_click_hits_front_of_globe() {
        let info =
            WindowSystem::handle_left_click(800.0, 600.0, 400.0, 300.0, target(0.0), &camera())
                .unwrap();
        assert!((info.local_point.z - 2.0).abs() < 1e-6);
        assert!(info.geo.latitude.abs() < 1e-6);
        assert!((info.geo.longitude + 90.0).abs() < 1e-6);
        assert!(!info.region.is_land());
    }

    #[test]
    fn rotated_globe_brings_amazon_under_the_cursor() {
        // lon -60 faces +z once the globe has turned by 30 degrees
        let info = WindowSystem::handle_left_click(
            800.0,
            600.0,
            400.0,
            300.0,
            target(30f64.to_radians()),
            &camera(),
        )
        .unwrap();
        assert!((info.geo.longitude + 60.0).abs() < 1e-6);
        assert_eq!(info.region.name, "Amazon rainforest");
    }

    #[test]
    fn corner_click_misses() {
        assert!(
            WindowSystem::handle_left_click(800.0, 600.0, 0.0, 0.0, target(0.0), &camera())
                .is_none()
        );
    }

    #[test]
    fn sphere_behind_the_ray_is_not_hit() {
        let ray = Ray {
            origin: Point3::new(0.0, 0.0, 5.0),
            dir: Vector3::new(0.0, 0.0, 1.0),
        };
        assert!(WindowSystem::intersect_sphere(&ray, 2.0).is_none());
    }

    #[test]
    fn ray_from_inside_hits_far_wall() {
        let ray = Ray {
            origin: Point3::new(0.0, 0.0, 0.0),
            dir: Vector3::new(1.0, 0.0, 0.0),
        };
        let hit = WindowSystem::intersect_sphere(&ray, 2.0).unwrap();
        assert!((hit.x - 2.0).abs() < 1e-12);
    }
}
