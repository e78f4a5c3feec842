use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::systems::geospatial::{
    coordinates::{GeoPoint, SpherePoint},
    regions::RegionDescriptor,
};

/// Result of a click that landed on the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickInfo {
    /// Hit point in the globe's own (unrotated) frame.
    pub local_point: SpherePoint,
    pub geo: GeoPoint,
    pub region: RegionDescriptor,
}

impl fmt::Display for ClickInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lat {:.1}°, Lng {:.1}°\n{}",
            self.geo.latitude, self.geo.longitude, self.region
        )
    }
}

/// Region details popup that hides itself a fixed time after it was shown.
#[derive(Debug, Default)]
pub struct InfoPanel {
    content: Option<ClickInfo>,
    visible_until: Option<DateTime<Utc>>,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, info: ClickInfo, now: DateTime<Utc>, visible_for: Duration) {
        self.content = Some(info);
        // saturate instead of overflowing on absurd lifetimes
        self.visible_until =
            Some(now.checked_add_signed(visible_for).unwrap_or(DateTime::<Utc>::MAX_UTC));
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        self.visible_until.map_or(false, |until| now < until)
    }

    pub fn content(&self, now: DateTime<Utc>) -> Option<&ClickInfo> {
        if self.is_visible(now) {
            self.content.as_ref()
        } else {
            None
        }
    }

    pub fn text(&self, now: DateTime<Utc>) -> Option<String> {
        self.content(now).map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::geospatial::regions::OCEAN;

    fn info() -> ClickInfo {
        ClickInfo {
            local_point: SpherePoint::new(0.0, 0.0, 2.0),
            geo: GeoPoint::new(0.04, -90.0),
            region: OCEAN,
        }
    }

    #[test]
    fn panel_hides_after_its_window() {
        let mut panel = InfoPanel::new();
        let t0 = Utc::now();
        assert!(!panel.is_visible(t0));

        panel.show(info(), t0, Duration::seconds(5));
        assert!(panel.is_visible(t0 + Duration::seconds(4)));
        assert!(!panel.is_visible(t0 + Duration::seconds(5)));
        assert!(panel.text(t0 + Duration::seconds(6)).is_none());
    }

    #[test]
    fn huge_lifetime_saturates() {
        let mut panel = InfoPanel::new();
        let t0 = Utc::now();
        panel.show(info(), t0, Duration::weeks(1_000_000_000));
        assert!(panel.is_visible(t0 + Duration::days(365)));
    }

    #[test]
    fn negative_lifetime_never_shows() {
        let mut panel = InfoPanel::new();
        let t0 = Utc::now();
        panel.show(info(), t0, Duration::seconds(-5));
        assert!(panel.text(t0).is_none());
    }

    #[test]
    fn text_leads_with_rounded_coordinates() {
        let mut panel = InfoPanel::new();
        let t0 = Utc::now();
        panel.show(info(), t0, Duration::seconds(5));
        let text = panel.text(t0).unwrap();
        assert!(text.starts_with("Lat 0.0°, Lng -90.0°\n"));
        assert!(text.contains("Ocean region"));
    }
}
