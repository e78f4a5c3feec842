use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

pub const NASA_EARTH_TEXTURE: &str =
    "https://images-assets.nasa.gov/image/PIA03149/PIA03149~orig.jpg";
pub const APOLLO_EARTH_TEXTURE: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/9/97/The_Earth_seen_from_Apollo_17.jpg/1024px-The_Earth_seen_from_Apollo_17.jpg";
pub const CLOUD_TEXTURE: &str =
    "https://raw.githubusercontent.com/mrdoob/three.js/dev/examples/textures/planets/earth_clouds_1024.png";

/// Upper bound for how long the info panel stays up: one day.
pub const MAX_PANEL_VISIBLE_SECS: i64 = 86_400;

/// Everything the globe slide used to hard-code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Radius of the textured earth sphere; clicks are resolved against it.
    pub globe_radius: f64,
    /// Radius the vegetation markers are placed at.
    pub marker_radius: f64,
    pub co2_radius: f64,
    pub cloud_radius: f64,
    pub cloud_opacity: f32,
    /// Radians per frame.
    pub rotation_speed: f64,
    pub cloud_rotation_speed: f64,
    pub cloud_time_step: f32,
    /// Relative deviation from `globe_radius` beyond which a hit point is
    /// not treated as a geographic location.
    pub hit_tolerance: f64,
    pub panel_visible_secs: i64,
    pub readiness_timeout_ms: u64,
    pub fallback_color: u32,
    pub earth_textures: Vec<String>,
    pub cloud_textures: Vec<String>,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fovy: f64,
    pub znear: f64,
    pub zfar: f64,
    pub distance: f64,
    pub damping_factor: f64,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            globe_radius: 2.0,
            marker_radius: 2.05,
            co2_radius: 2.1,
            cloud_radius: 2.05,
            cloud_opacity: 0.3,
            rotation_speed: 0.002,
            cloud_rotation_speed: 0.0015,
            cloud_time_step: 0.005,
            hit_tolerance: 0.01,
            panel_visible_secs: 5,
            readiness_timeout_ms: 10_000,
            fallback_color: 0x2233ff,
            earth_textures: vec![
                NASA_EARTH_TEXTURE.to_string(),
                APOLLO_EARTH_TEXTURE.to_string(),
            ],
            cloud_textures: vec![CLOUD_TEXTURE.to_string()],
            camera: CameraConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            distance: 5.0,
            damping_factor: 0.05,
            min_distance: 3.0,
            max_distance: 10.0,
        }
    }
}

impl SceneConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: SceneConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.globe_radius > 0.0, "globe_radius must be positive");
        ensure!(self.marker_radius > 0.0, "marker_radius must be positive");
        ensure!(self.co2_radius > 0.0, "co2_radius must be positive");
        ensure!(self.hit_tolerance >= 0.0, "hit_tolerance must not be negative");
        ensure!(
            self.camera.min_distance > 0.0 && self.camera.min_distance <= self.camera.max_distance,
            "camera distance limits are inverted: {} > {}",
            self.camera.min_distance,
            self.camera.max_distance
        );
        ensure!(
            (0.0..=1.0).contains(&self.camera.damping_factor),
            "damping_factor must be within [0, 1]"
        );
        ensure!(
            (1..=MAX_PANEL_VISIBLE_SECS).contains(&self.panel_visible_secs),
            "panel_visible_secs must be within [1, {MAX_PANEL_VISIBLE_SECS}], got {}",
            self.panel_visible_secs
        );
        Ok(())
    }

    pub fn readiness_timeout(&self) -> Duration {
        Duration::from_millis(self.readiness_timeout_ms)
    }

    pub fn panel_visible_for(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.panel_visible_secs.clamp(0, MAX_PANEL_VISIBLE_SECS))
    }
}
