use crate::config::MapConfig;
use crate::geometry::{mean_coordinate, LatLng, Point};
use crate::models::Station;

/// Equirectangular projection around the mean station coordinate.
///
/// Longitude differences are scaled by the cosine of a fixed reference
/// latitude rather than the data center, so the shape of the network does not
/// shift when stations are added at the edges. North is up (negative y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoProjector {
    center: LatLng,
    lng_factor: f64,
    scale: f64,
}

impl GeoProjector {
    /// Build a projector centered on the stations, or `None` when there are none
    #[must_use]
    pub fn from_stations(stations: &[Station], config: &MapConfig) -> Option<Self> {
        let coords: Vec<LatLng> = stations.iter().map(Station::coordinate).collect();
        let center = mean_coordinate(&coords)?;
        Some(Self::with_center(center, config))
    }

    #[must_use]
    pub fn with_center(center: LatLng, config: &MapConfig) -> Self {
        Self {
            center,
            lng_factor: config.reference_latitude.to_radians().cos(),
            scale: config.scale,
        }
    }

    #[must_use]
    pub fn center(&self) -> LatLng {
        self.center
    }

    #[must_use]
    pub fn project(&self, coord: LatLng) -> Point {
        Point::new(
            (coord.lng - self.center.lng) * self.lng_factor * self.scale,
            -(coord.lat - self.center.lat) * self.scale,
        )
    }

    /// Project every station, in input order
    #[must_use]
    pub fn project_all(&self, stations: &[Station]) -> Vec<Point> {
        stations.iter().map(|s| self.project(s.coordinate())).collect()
    }
}
