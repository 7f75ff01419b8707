//! Map camera and marker-cluster policy.
//!
//! The tile map itself is rendered by the UI shell; this module only owns the
//! numbers it is configured with.

use crate::model::location::Coords;

/// Default camera centre (Maidan Nezalezhnosti, Kyiv).
pub const DEFAULT_CENTER: Coords = Coords::new(50.4501, 30.5234);
pub const DEFAULT_ZOOM: u8 = 12;
pub const MIN_ZOOM: u8 = 10;
pub const MAX_ZOOM: u8 = 16;
/// Zoom used when the list asks the map to fly to one location.
pub const FOCUS_ZOOM: u8 = 16;
pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const MAX_CLUSTER_RADIUS_PX: u32 = 80;
/// Markers are never clustered at or above this zoom.
pub const DISABLE_CLUSTERING_AT_ZOOM: u8 = 16;

/// Inclusive latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl MapBounds {
    pub fn contains(&self, coords: Coords) -> bool {
        (self.min_lat..=self.max_lat).contains(&coords.lat)
            && (self.min_lon..=self.max_lon).contains(&coords.lon)
    }

    /// Moves `coords` to the nearest point inside the rectangle.
    pub fn clamp(&self, coords: Coords) -> Coords {
        Coords::new(
            coords.lat.clamp(self.min_lat, self.max_lat),
            coords.lon.clamp(self.min_lon, self.max_lon),
        )
    }
}

/// The city area the map is locked to.
pub const CITY_BOUNDS: MapBounds = MapBounds {
    min_lat: 50.2133,
    max_lat: 50.5900,
    min_lon: 30.2394,
    max_lon: 30.8250,
};

/// Map camera position persisted between sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCamera {
    pub center: Coords,
    pub zoom: u8,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapCamera {
    /// Camera with zoom kept in `MIN_ZOOM..=MAX_ZOOM` and centre inside
    /// [`CITY_BOUNDS`]. Non-finite centres fall back to the default.
    pub fn clamped(center: Coords, zoom: u8) -> Self {
        let center = if center.lat.is_finite() && center.lon.is_finite() {
            CITY_BOUNDS.clamp(center)
        } else {
            DEFAULT_CENTER
        };
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Camera focused on one location.
    pub fn focused_on(coords: Coords) -> Self {
        Self::clamped(coords, FOCUS_ZOOM)
    }
}

/// Visual size bucket of a marker cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterSize {
    Small,
    Medium,
    Large,
}

impl ClusterSize {
    pub fn for_count(count: usize) -> Self {
        match count {
            0..=9 => Self::Small,
            10..=99 => Self::Medium,
            _ => Self::Large,
        }
    }

    /// CSS modifier used by the shell's cluster icon.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ClusterSize, MapCamera, CITY_BOUNDS, DEFAULT_CENTER, MAX_ZOOM, MIN_ZOOM};
    use crate::model::location::Coords;

    #[test]
    fn cluster_size_thresholds() {
        assert_eq!(ClusterSize::for_count(1), ClusterSize::Small);
        assert_eq!(ClusterSize::for_count(9), ClusterSize::Small);
        assert_eq!(ClusterSize::for_count(10), ClusterSize::Medium);
        assert_eq!(ClusterSize::for_count(99), ClusterSize::Medium);
        assert_eq!(ClusterSize::for_count(100), ClusterSize::Large);
    }

    #[test]
    fn camera_is_clamped_to_city() {
        let camera = MapCamera::clamped(Coords::new(49.0, 31.5), 3);
        assert_eq!(camera.center, Coords::new(CITY_BOUNDS.min_lat, CITY_BOUNDS.max_lon));
        assert_eq!(camera.zoom, MIN_ZOOM);

        let camera = MapCamera::clamped(Coords::new(f64::NAN, 30.5), 20);
        assert_eq!(camera.center, DEFAULT_CENTER);
        assert_eq!(camera.zoom, MAX_ZOOM);
    }
}
