use std::time::Duration;

use crate::systems::geospatial::coordinates::{GeoPoint, SpherePoint};

/// 24-bit colour, stored the way hex literals are written (`0xRRGGBB`).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xffffff);

    pub fn channels(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xff) as u8,
            ((self.0 >> 8) & 0xff) as u8,
            (self.0 & 0xff) as u8,
        )
    }

    /// Normalised RGBA with the given alpha, ready for a shader uniform.
    pub fn to_rgba_f32(self, alpha: f32) -> [f32; 4] {
        let (r, g, b) = self.channels();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            alpha,
        ]
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VegetationCategory {
    TropicalRainforest,
    ConiferousForest,
    TemperateRainforest,
    AlpineGrassland,
}

impl VegetationCategory {
    pub fn color(self) -> Rgb {
        match self {
            VegetationCategory::TropicalRainforest => Rgb(0x4caf50),
            VegetationCategory::ConiferousForest => Rgb(0x8bc34a),
            VegetationCategory::TemperateRainforest => Rgb(0x2196f3),
            VegetationCategory::AlpineGrassland => Rgb(0xffc107),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VegetationCategory::TropicalRainforest => "tropical rainforest",
            VegetationCategory::ConiferousForest => "coniferous forest",
            VegetationCategory::TemperateRainforest => "temperate rainforest",
            VegetationCategory::AlpineGrassland => "alpine grassland",
        }
    }
}

/// A decorative annotation pinned to the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: GeoPoint,
    /// Radius of the marker's own sphere, not the globe it sits on.
    pub radius: f64,
    pub label: String,
    pub category: VegetationCategory,
    pub color: Rgb,
}

impl Marker {
    pub const DEFAULT_RADIUS: f64 = 0.05;

    pub fn new(latitude: f64, longitude: f64, label: &str, category: VegetationCategory) -> Self {
        Self {
            position: GeoPoint::new(latitude, longitude),
            radius: Self::DEFAULT_RADIUS,
            label: label.to_string(),
            category,
            color: category.color(),
        }
    }
}

pub fn vegetation_markers() -> Vec<Marker> {
    use VegetationCategory::*;

    vec![
        Marker::new(-3.0, -60.0, "Amazon rainforest", TropicalRainforest),
        Marker::new(0.0, 20.0, "Congo Basin", TropicalRainforest),
        Marker::new(10.0, 105.0, "Southeast Asian rainforest", TropicalRainforest),
        Marker::new(60.0, 100.0, "Siberian taiga", ConiferousForest),
        Marker::new(50.0, -100.0, "North American boreal forest", ConiferousForest),
        Marker::new(-45.0, 170.0, "New Zealand forest", TemperateRainforest),
        Marker::new(35.0, 100.0, "Tibetan Plateau grassland", AlpineGrassland),
    ]
}

/// Atmospheric CO₂ sample shown as a heat point above the globe surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Co2Reading {
    pub position: GeoPoint,
    pub ppm: f64,
    pub region: String,
}

impl Co2Reading {
    pub fn new(latitude: f64, longitude: f64, ppm: f64, region: &str) -> Self {
        Self {
            position: GeoPoint::new(latitude, longitude),
            ppm,
            region: region.to_string(),
        }
    }

    /// Sphere radius grows by 0.05 for every 10 ppm above 390.
    pub fn size(&self) -> f64 {
        (self.ppm - 390.0) / 10.0 * 0.05
    }

    pub fn color(&self) -> Rgb {
        if self.ppm < 400.0 {
            Rgb(0x4caf50)
        } else if self.ppm < 410.0 {
            Rgb(0xffc107)
        } else if self.ppm < 420.0 {
            Rgb(0xff9800)
        } else {
            Rgb(0xf44336)
        }
    }
}

pub fn co2_readings() -> Vec<Co2Reading> {
    vec![
        Co2Reading::new(40.0, -100.0, 420.0, "North American industrial belt"),
        Co2Reading::new(50.0, 10.0, 415.0, "Europe"),
        Co2Reading::new(35.0, 140.0, 425.0, "East Asian industrial belt"),
        Co2Reading::new(-30.0, -60.0, 395.0, "Amazon rainforest"),
        Co2Reading::new(0.0, 40.0, 410.0, "Africa"),
    ]
}

/// A vegetation marker placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerComponent {
    pub marker: Marker,
    pub position: SpherePoint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Co2Component {
    pub reading: Co2Reading,
    pub position: SpherePoint,
}

/// Markers breathe between full and 1.3x size, flipping once a second.
pub fn pulse_scale(elapsed: Duration) -> f64 {
    if elapsed.as_secs() % 2 == 1 {
        1.3
    } else {
        1.0
    }
}
