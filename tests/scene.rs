use std::time::Duration;

use cgmath::Point3;
use chrono::{TimeZone, Utc};
use verdant_globe::{
    components::{camera::ControlInput, earth::EarthAppearance, marker::Rgb},
    config::SceneConfig,
    scene::GlobeScene,
};

fn scene() -> GlobeScene {
    GlobeScene::build(
        SceneConfig::default(),
        (800, 600),
        EarthAppearance::Solid {
            color: Rgb(0x2233ff),
        },
        None,
    )
}

#[test]
fn markers_sit_on_the_placement_sphere_at_distinct_points() {
    let scene = scene();
    let markers = scene.markers();
    assert_eq!(markers.len(), 7);
    for marker in &markers {
        assert!((marker.position.distance_from_origin() - 2.05).abs() < 1e-9);
    }
    for (i, a) in markers.iter().enumerate() {
        for b in &markers[i + 1..] {
            assert_ne!(a.position, b.position);
        }
    }
    assert_eq!(scene.co2_points().len(), 5);
    assert_eq!(scene.marker_instances().len(), 12);
    assert_eq!(scene.world().entities_count, 12);
}

#[test]
fn camera_uniform_follows_zoom() {
    let mut scene = scene();
    let before = scene.camera_uniform();
    scene.control(ControlInput::Zoom(0.8));
    scene.tick(Duration::ZERO);
    let after = scene.camera_uniform();
    assert_ne!(before.view_matrix, after.view_matrix);
    assert_eq!(before.proj_matrix, after.proj_matrix);
}

#[test]
fn oversized_panel_lifetime_does_not_panic_on_click() {
    let config: SceneConfig =
        serde_json::from_str(r#"{ "panel_visible_secs": 1000000000000000 }"#).unwrap();
    let mut scene = GlobeScene::build(
        config,
        (800, 600),
        EarthAppearance::Solid {
            color: Rgb(0x2233ff),
        },
        None,
    );
    let now = Utc.with_ymd_and_hms(2024, 4, 22, 12, 0, 0).unwrap();
    assert!(scene.click(400.0, 300.0, now).is_some());
    assert!(scene.panel_text(now + chrono::Duration::hours(23)).is_some());
    assert!(scene.panel_text(now + chrono::Duration::days(2)).is_none());
}

#[test]
fn globe_only_turns_while_rotating() {
    let mut scene = scene();
    scene.tick(Duration::from_millis(16));
    assert!((scene.earth().rotation_y - 0.002).abs() < 1e-12);

    assert!(!scene.toggle_rotation());
    scene.tick(Duration::from_millis(32));
    assert!((scene.earth().rotation_y - 0.002).abs() < 1e-12);
    // clouds keep drifting either way
    assert!((scene.cloud_time() - 0.01).abs() < 1e-6);
}

#[test]
fn reset_view_restores_camera_and_rotation() {
    let mut scene = scene();
    assert!(scene.control(ControlInput::Rotate {
        yaw: 1.0,
        pitch: 0.5
    }));
    for frame in 0..10 {
        scene.tick(Duration::from_millis(16 * frame));
    }
    assert_ne!(scene.camera_component().camera.eye, Point3::new(0.0, 0.0, 5.0));

    scene.reset_view();
    assert_eq!(scene.camera_component().camera.eye, Point3::new(0.0, 0.0, 5.0));
    assert_eq!(scene.earth().rotation_y, 0.0);
}

#[test]
fn zoom_is_clamped_to_the_distance_limits() {
    let mut scene = scene();
    scene.control(ControlInput::Zoom(0.1));
    scene.tick(Duration::ZERO);
    assert!((scene.camera_component().camera.distance() - 3.0).abs() < 1e-9);

    scene.control(ControlInput::Zoom(100.0));
    scene.tick(Duration::ZERO);
    assert!((scene.camera_component().camera.distance() - 10.0).abs() < 1e-9);
}

#[test]
fn centre_click_fills_the_panel_until_it_expires() {
    let mut scene = scene();
    let now = Utc.with_ymd_and_hms(2024, 4, 22, 12, 0, 0).unwrap();

    let info = scene.click(400.0, 300.0, now).unwrap();
    assert!(!info.region.is_land());

    let text = scene.panel_text(now).unwrap();
    assert!(text.contains("Lng -90.0°"));
    assert!(text.contains("Ocean region"));

    let later = now + chrono::Duration::seconds(4);
    assert!(scene.panel_text(later).is_some());
    let expired = now + chrono::Duration::seconds(5);
    assert!(scene.panel_text(expired).is_none());
}

#[test]
fn missed_click_leaves_the_panel_alone() {
    let mut scene = scene();
    let now = Utc.with_ymd_and_hms(2024, 4, 22, 12, 0, 0).unwrap();
    assert!(scene.click(0.0, 0.0, now).is_none());
    assert!(scene.panel_text(now).is_none());
}

#[test]
fn resize_updates_aspect_and_ignores_zero() {
    let mut scene = scene();
    scene.resize(1000, 500);
    assert_eq!(scene.camera_component().camera.aspect, 2.0);
    scene.resize(0, 500);
    assert_eq!(scene.camera_component().camera.aspect, 2.0);
}
