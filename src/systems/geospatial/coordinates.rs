use cgmath::{InnerSpace, Point3, Vector3};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A cartesian point on (or near) a sphere centred at the origin, +y up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SpherePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl SpherePoint {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_from_origin(&self) -> f64 {
        self.to_vector().magnitude()
    }

    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Point3<f64>> for SpherePoint {
    fn from(p: Point3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl From<Vector3<f64>> for SpherePoint {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<SpherePoint> for Point3<f64> {
    fn from(p: SpherePoint) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

pub struct CoordinatesSystem {}

impl CoordinatesSystem {
    /// Places a geographic coordinate on a sphere of `radius`.
    ///
    /// The azimuth is offset by 180° so the ±180° seam sits on +x and
    /// (0°, 0°) lands on -x. Out-of-range input is not rejected; it still
    /// yields a point, just not a meaningful one.
    pub fn forward_project(point: GeoPoint, radius: f64) -> SpherePoint {
        let phi = (90.0 - point.latitude).to_radians();
        let theta = (point.longitude + 180.0).to_radians();

        let x = phi.sin() * theta.cos() * radius;
        let y = phi.cos() * radius;
        let z = phi.sin() * theta.sin() * radius;

        SpherePoint::new(x, y, z)
    }

    /// Recovers latitude/longitude from a point on a sphere of `radius`.
    ///
    /// `y / radius` is clamped into [-1, 1] so hit points that drift just off
    /// the surface (ray intersections, accumulated rotation) never produce NaN.
    /// Longitude is undefined at the poles; whatever atan2 returns there is kept.
    pub fn inverse_project(point: SpherePoint, radius: f64) -> GeoPoint {
        let ratio = (point.y / radius).clamp(-1.0, 1.0);
        let latitude = 90.0 - ratio.acos().to_degrees();
        // undo the +180° azimuth offset: x = -r cos(lon), z = -r sin(lon)
        let longitude = (-point.z).atan2(-point.x).to_degrees();

        GeoPoint::new(latitude, longitude)
    }

    /// Like [`inverse_project`](Self::inverse_project) but treats points whose
    /// distance from the origin deviates from `radius` by more than
    /// `tolerance * radius` as "no geographic match".
    pub fn inverse_project_checked(
        point: SpherePoint,
        radius: f64,
        tolerance: f64,
    ) -> Option<GeoPoint> {
        let deviation = (point.distance_from_origin() - radius).abs();
        if deviation > tolerance * radius {
            return None;
        }
        Some(Self::inverse_project(point, radius))
    }
}
