use std::fmt;

use super::coordinates::GeoPoint;

/// Coarse label for a clicked location.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionDescriptor {
    pub name: &'static str,
    pub icon: &'static str,
    pub forest_coverage_pct: Option<u8>,
    /// Million tonnes of carbon absorbed per year.
    pub annual_carbon_uptake_mt: Option<u32>,
    pub dominant_vegetation: &'static str,
}

impl RegionDescriptor {
    pub fn is_land(&self) -> bool {
        self.forest_coverage_pct.is_some()
    }
}

impl fmt::Display for RegionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.icon, self.name)?;
        match (self.forest_coverage_pct, self.annual_carbon_uptake_mt) {
            (Some(coverage), Some(uptake)) => write!(
                f,
                "\nForest coverage: {coverage}%\nAnnual carbon uptake: {uptake} Mt\nDominant vegetation: {}",
                self.dominant_vegetation
            ),
            _ => write!(f, "\n{}", self.dominant_vegetation),
        }
    }
}

/// Open-interval latitude/longitude box.
#[derive(Debug, Copy, Clone)]
struct RegionBox {
    lat: (f64, f64),
    lon: (f64, f64),
}

impl RegionBox {
    fn contains(&self, point: GeoPoint) -> bool {
        point.latitude > self.lat.0
            && point.latitude < self.lat.1
            && point.longitude > self.lon.0
            && point.longitude < self.lon.1
    }
}

// Checked in order, first hit wins. The boxes overlap real geography
// loosely and must not be reordered.
const REGIONS: [(RegionBox, RegionDescriptor); 4] = [
    (
        RegionBox {
            lat: (-30.0, 30.0),
            lon: (-80.0, -30.0),
        },
        RegionDescriptor {
            name: "Amazon rainforest",
            icon: "🌴",
            forest_coverage_pct: Some(85),
            annual_carbon_uptake_mt: Some(1200),
            dominant_vegetation: "tropical broadleaf forest",
        },
    ),
    (
        RegionBox {
            lat: (0.0, 60.0),
            lon: (90.0, 150.0),
        },
        RegionDescriptor {
            name: "Southeast Asian rainforest",
            icon: "🌲",
            forest_coverage_pct: Some(70),
            annual_carbon_uptake_mt: Some(800),
            dominant_vegetation: "mangrove and tropical rainforest",
        },
    ),
    (
        RegionBox {
            lat: (30.0, 60.0),
            lon: (-130.0, -60.0),
        },
        RegionDescriptor {
            name: "North American temperate forest",
            icon: "🍂",
            forest_coverage_pct: Some(45),
            annual_carbon_uptake_mt: Some(600),
            dominant_vegetation: "coniferous and deciduous forest",
        },
    ),
    (
        RegionBox {
            lat: (-40.0, -20.0),
            lon: (110.0, 155.0),
        },
        RegionDescriptor {
            name: "Australian forest",
            icon: "🌿",
            forest_coverage_pct: Some(35),
            annual_carbon_uptake_mt: Some(400),
            dominant_vegetation: "eucalyptus forest",
        },
    ),
];

pub const OCEAN: RegionDescriptor = RegionDescriptor {
    name: "Ocean region",
    icon: "🌊",
    forest_coverage_pct: None,
    annual_carbon_uptake_mt: None,
    dominant_vegetation: "Click on land to see vegetation details",
};

pub struct RegionSystem {}

impl RegionSystem {
    pub fn classify_region(point: GeoPoint) -> RegionDescriptor {
        REGIONS
            .iter()
            .find(|(bounds, _)| bounds.contains(point))
            .map(|(_, descriptor)| descriptor.clone())
            .unwrap_or(OCEAN)
    }
}
