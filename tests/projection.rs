use verdant_globe::systems::geospatial::{
    coordinates::{CoordinatesSystem, GeoPoint, SpherePoint},
    regions::RegionSystem,
};

const R: f64 = 2.0;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn origin_and_pole_land_where_expected() {
    let origin = CoordinatesSystem::forward_project(GeoPoint::new(0.0, 0.0), R);
    assert!(close(origin.x, -R) && close(origin.y, 0.0) && close(origin.z, 0.0));

    let pole = CoordinatesSystem::forward_project(GeoPoint::new(90.0, 0.0), R);
    assert!(close(pole.x, 0.0) && close(pole.y, R) && close(pole.z, 0.0));
}

#[test]
fn projected_points_lie_on_the_sphere() {
    for lat in (-80..=80).step_by(20) {
        for lon in (-170..=170).step_by(34) {
            let p = CoordinatesSystem::forward_project(GeoPoint::new(lat as f64, lon as f64), R);
            assert!((p.distance_from_origin() - R).abs() < 1e-9);
        }
    }
}

#[test]
fn inverse_recovers_the_grid() {
    for lat in (-80..=80).step_by(10) {
        for lon in (-170..=170).step_by(10) {
            let geo = GeoPoint::new(lat as f64, lon as f64);
            let back = CoordinatesSystem::inverse_project(CoordinatesSystem::forward_project(geo, R), R);
            assert!((back.latitude - geo.latitude).abs() < 1e-6);
            assert!((back.longitude - geo.longitude).abs() < 1e-6);
        }
    }
}

#[test]
fn overshooting_height_is_clamped_not_nan() {
    let geo = CoordinatesSystem::inverse_project(SpherePoint::new(0.0, R * 1.0001, 0.0), R);
    assert!(close(geo.latitude, 90.0));
}

#[test]
fn classification_follows_box_order() {
    assert_eq!(
        RegionSystem::classify_region(GeoPoint::new(-3.0, -60.0)).name,
        "Amazon rainforest"
    );
    assert_eq!(
        RegionSystem::classify_region(GeoPoint::new(10.0, 105.0)).name,
        "Southeast Asian rainforest"
    );
    assert_eq!(
        RegionSystem::classify_region(GeoPoint::new(45.0, -100.0)).name,
        "North American temperate forest"
    );
    assert_eq!(
        RegionSystem::classify_region(GeoPoint::new(-30.0, 140.0)).name,
        "Australian forest"
    );
    // edges are exclusive
    assert!(!RegionSystem::classify_region(GeoPoint::new(30.0, -60.0)).is_land());
    assert!(!RegionSystem::classify_region(GeoPoint::new(0.0, 0.0)).is_land());
}
