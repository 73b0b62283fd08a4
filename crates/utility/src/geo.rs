use std::{error::Error, fmt};

use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoError {
    /// An extent was requested for an empty set of coordinates.
    EmptyInput,
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "can not build an extent from zero coordinates"),
        }
    }
}

impl Error for GeoError {}

/// A latitude / longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Wraps the longitude into `[-180, 180)`. The latitude is kept as is.
    pub fn normalize(self) -> Self {
        if (-180.0..180.0).contains(&self.longitude) {
            return self;
        }
        let longitude = (self.longitude + 180.0).rem_euclid(360.0) - 180.0;
        Self::new(self.latitude, longitude)
    }

    /// Linear interpolation between `self` and `target`, applied to latitude and
    /// longitude independently. A progress of `1.0` or more yields `target`
    /// exactly.
    pub fn interpolate(self, target: Coordinate, progress: f64) -> Self {
        if progress >= 1.0 {
            return target;
        }
        if progress <= 0.0 {
            return self;
        }
        Self::new(
            self.latitude + progress * (target.latitude - self.latitude),
            self.longitude + progress * (target.longitude - self.longitude),
        )
    }

    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.latitude, self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// Axis aligned bounding box over latitude and longitude. Extents crossing the
/// antimeridian are not supported, min and max longitude are taken as is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extent {
    min_latitude: f64,
    max_latitude: f64,
    min_longitude: f64,
    max_longitude: f64,
}

impl Extent {
    /// The tightest extent containing all given coordinates.
    pub fn for_coordinates<I>(coordinates: I) -> Result<Self, GeoError>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let coordinates = coordinates.into_iter().collect::<Vec<_>>();
        let (min_latitude, max_latitude) =
            min_max(coordinates.iter().map(|c| c.latitude))?;
        let (min_longitude, max_longitude) =
            min_max(coordinates.iter().map(|c| c.longitude))?;
        Ok(Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        })
    }

    /// Approximate extent of a circle on the earth's surface.
    pub fn around(center: Coordinate, radius_km: f64) -> Self {
        let ((min_latitude, min_longitude), (max_latitude, max_longitude)) =
            calculate_bounding_box(center.latitude, center.longitude, radius_km);
        Self {
            min_latitude: min_latitude.min(max_latitude),
            max_latitude: min_latitude.max(max_latitude),
            min_longitude: min_longitude.min(max_longitude),
            max_longitude: min_longitude.max(max_longitude),
        }
    }

    pub fn min(&self) -> Coordinate {
        Coordinate::new(self.min_latitude, self.min_longitude)
    }

    pub fn max(&self) -> Coordinate {
        Coordinate::new(self.max_latitude, self.max_longitude)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_latitude + self.max_latitude) / 2.0,
            (self.min_longitude + self.max_longitude) / 2.0,
        )
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&coordinate.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&coordinate.longitude)
    }

    pub fn contains_extent(&self, other: &Extent) -> bool {
        self.contains(&other.min()) && self.contains(&other.max())
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extent{{min={}, max={}}}", self.min(), self.max())
    }
}

fn min_max<I: Iterator<Item = f64>>(values: I) -> Result<(f64, f64), GeoError> {
    match values.minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => Err(GeoError::EmptyInput),
        MinMaxResult::OneElement(value) => Ok((value, value)),
        MinMaxResult::MinMax(min, max) => Ok((min, max)),
    }
}

pub fn calculate_bounding_box(
    lat: f64,
    lon: f64,
    radius_km: f64,
) -> ((f64, f64), (f64, f64)) {
    // Convert latitude and longitude from degrees to radians
    let lat_rad = to_radians(lat);
    let lon_rad = to_radians(lon);

    // Latitude bounds
    let min_lat = lat_rad - radius_km / EARTH_RADIUS_KM;
    let max_lat = lat_rad + radius_km / EARTH_RADIUS_KM;

    // Longitude bounds (adjusted by latitude)
    let min_lon = lon_rad - radius_km / (EARTH_RADIUS_KM * lat_rad.cos());
    let max_lon = lon_rad + radius_km / (EARTH_RADIUS_KM * lat_rad.cos());

    ((to_degrees(min_lat), to_degrees(min_lon)), (to_degrees(max_lat), to_degrees(max_lon)))
}

pub fn haversine_distance(
    latitude_1: f64,
    longitude_1: f64,
    latitude_2: f64,
    longitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lon1_rad = to_radians(longitude_1);
    let lat2_rad = to_radians(latitude_2);
    let lon2_rad = to_radians(longitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = lon2_rad - lon1_rad;

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    fn karlsruhe() -> Vec<Coordinate> {
        vec![
            Coordinate::new(49.013517, 8.404435),
            Coordinate::new(49.015511, 8.323497),
            Coordinate::new(48.993284, 8.402186),
            Coordinate::new(49.020035, 8.412975),
        ]
    }

    #[test]
    fn extent_contains_every_input_point() {
        let extent = Extent::for_coordinates(karlsruhe()).unwrap();
        for coordinate in karlsruhe() {
            assert!(extent.contains(&coordinate));
        }
    }

    #[test]
    fn extent_is_tightest_box() {
        let extent = Extent::for_coordinates(karlsruhe()).unwrap();
        assert_eq!(extent.min(), Coordinate::new(48.993284, 8.323497));
        assert_eq!(extent.max(), Coordinate::new(49.020035, 8.412975));
    }

    #[test]
    fn extent_of_identical_points_is_degenerate() {
        let point = Coordinate::new(49.0, 8.4);
        let extent = Extent::for_coordinates([point, point]).unwrap();
        assert_eq!(extent.min(), point);
        assert_eq!(extent.max(), point);
        assert!(extent.contains(&point));
    }

    #[test]
    fn extent_of_nothing_fails() {
        let result = Extent::for_coordinates(Vec::new());
        assert_eq!(result, Err(GeoError::EmptyInput));
    }

    #[test]
    fn extent_around_contains_center() {
        let center = Coordinate::new(48.993284, 8.402186);
        let extent = Extent::around(center, 1.0);
        assert!(extent.contains(&center));
        assert!(extent.max().latitude > center.latitude);
        assert!(extent.min().longitude < center.longitude);
    }

    #[test]
    fn normalize_wraps_longitude() {
        assert_eq!(
            Coordinate::new(10.0, 180.0).normalize(),
            Coordinate::new(10.0, -180.0)
        );
        assert_eq!(
            Coordinate::new(10.0, 190.0).normalize(),
            Coordinate::new(10.0, -170.0)
        );
        assert_eq!(
            Coordinate::new(10.0, -540.0).normalize(),
            Coordinate::new(10.0, -180.0)
        );
        let inside = Coordinate::new(49.0, 8.4);
        assert_eq!(inside.normalize(), inside);
    }

    #[test]
    fn interpolate_halfway_and_end() {
        let from = Coordinate::new(0.0, 0.0);
        let to = Coordinate::new(1.0, 2.0);
        assert_eq!(from.interpolate(to, 0.5), Coordinate::new(0.5, 1.0));
        assert_eq!(from.interpolate(to, 1.0), to);
        assert_eq!(from.interpolate(to, 0.0), from);
    }

    #[test]
    fn interpolate_end_has_no_drift() {
        let from = Coordinate::new(49.013517, 8.404435);
        let to = Coordinate::new(48.993284, 8.402186);
        assert_eq!(from.interpolate(to, 1.0), to);
    }

    #[test]
    fn distance_between_castle_and_station() {
        let castle = Coordinate::new(49.013517, 8.404435);
        let station = Coordinate::new(48.993284, 8.402186);
        let distance = castle.distance_km(&station);
        assert!(distance > 2.0 && distance < 2.5, "distance: {}", distance);
    }

    #[test]
    fn coordinate_serializes_camel_case() {
        let json = serde_json::to_string(&Coordinate::new(1.5, 2.5)).unwrap();
        assert_eq!(json, r#"{"latitude":1.5,"longitude":2.5}"#);
    }
}
