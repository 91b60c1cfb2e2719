use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Represents a point in screen (pixel) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a point with both coordinates rounded to the nearest integer
    pub fn rounded(x: f64, y: f64) -> Self {
        Self::new(x.round(), y.round())
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn multiply_by(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    pub fn divide_by(&self, divider: f64) -> Point {
        Point::new(self.x / divider, self.y / divider)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn round(&self) -> Point {
        Point::rounded(self.x, self.y)
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }

    /// False if either coordinate is NaN or infinite; such points cannot be rendered
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

// `-0.0 == 0.0` under `PartialEq`, so both must hash alike.
impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        normalize_zero(self.x).to_bits().hash(state);
        normalize_zero(self.y).to_bits().hash(state);
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Represents a geographical coordinate with latitude and longitude
///
/// Always within `[-90, 90]` x `[-180, 180]`. On the wire it is the
/// two-element array `[lat, lng]`; Leaflet's `{"lat": .., "lng": ..}` object
/// form is accepted when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", try_from = "LatLngRepr")]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate, rejecting out-of-range values
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(MapError::InvalidArgument(format!(
                "latitude must be within [-90, 90], got {}",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(MapError::InvalidArgument(format!(
                "longitude must be within [-180, 180], got {}",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(value: LatLng) -> Self {
        [value.lat, value.lng]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LatLngRepr {
    Pair(f64, f64),
    Object {
        #[serde(alias = "latitude")]
        lat: f64,
        #[serde(alias = "lon", alias = "longitude")]
        lng: f64,
    },
}

impl TryFrom<LatLngRepr> for LatLng {
    type Error = MapError;

    fn try_from(repr: LatLngRepr) -> Result<Self> {
        match repr {
            LatLngRepr::Pair(lat, lng) | LatLngRepr::Object { lat, lng } => LatLng::new(lat, lng),
        }
    }
}

/// Represents a bounding box of geographical coordinates
///
/// The north-east corner is never south or west of the south-west corner.
/// Serialized as `[northEast, southWest]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[LatLng; 2]", try_from = "LatLngBoundsRepr")]
pub struct LatLngBounds {
    north_east: LatLng,
    south_west: LatLng,
}

impl LatLngBounds {
    pub fn new(north_east: LatLng, south_west: LatLng) -> Result<Self> {
        if north_east.lat < south_west.lat {
            return Err(MapError::InvalidArgument(format!(
                "north latitude {} must be greater than or equal to south latitude {}",
                north_east.lat, south_west.lat
            )));
        }
        if north_east.lng < south_west.lng {
            return Err(MapError::InvalidArgument(format!(
                "east longitude {} must be greater than or equal to west longitude {}",
                north_east.lng, south_west.lng
            )));
        }
        Ok(Self {
            north_east,
            south_west,
        })
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(north: f64, east: f64, south: f64, west: f64) -> Result<Self> {
        Self::new(LatLng::new(north, east)?, LatLng::new(south, west)?)
    }

    pub fn north_east(&self) -> LatLng {
        self.north_east
    }

    pub fn south_west(&self) -> LatLng {
        self.south_west
    }

    pub fn north(&self) -> f64 {
        self.north_east.lat
    }

    pub fn east(&self) -> f64 {
        self.north_east.lng
    }

    pub fn south(&self) -> f64 {
        self.south_west.lat
    }

    pub fn west(&self) -> f64 {
        self.south_west.lng
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        // Midpoint of two in-range corners is itself in range.
        LatLng {
            lat: (self.north() + self.south()) / 2.0,
            lng: (self.east() + self.west()) / 2.0,
        }
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south()
            && point.lat <= self.north()
            && point.lng >= self.west()
            && point.lng <= self.east()
    }
}

impl From<LatLngBounds> for [LatLng; 2] {
    fn from(value: LatLngBounds) -> Self {
        [value.north_east, value.south_west]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LatLngBoundsRepr {
    Pair(LatLng, LatLng),
    Object {
        #[serde(rename = "northEast", alias = "_northEast")]
        north_east: LatLng,
        #[serde(rename = "southWest", alias = "_southWest")]
        south_west: LatLng,
    },
}

impl TryFrom<LatLngBoundsRepr> for LatLngBounds {
    type Error = MapError;

    fn try_from(repr: LatLngBoundsRepr) -> Result<Self> {
        match repr {
            LatLngBoundsRepr::Pair(north_east, south_west)
            | LatLngBoundsRepr::Object {
                north_east,
                south_west,
            } => LatLngBounds::new(north_east, south_west),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(40.7128, -74.0060).unwrap();
        assert_eq!(coord.lat(), 40.7128);
        assert_eq!(coord.lng(), -74.0060);
    }

    #[test]
    fn test_lat_lng_range_is_enforced() {
        assert!(matches!(LatLng::new(91.0, 0.0), Err(MapError::InvalidArgument(_))));
        assert!(matches!(LatLng::new(0.0, 181.0), Err(MapError::InvalidArgument(_))));
        assert!(matches!(LatLng::new(f64::NAN, 0.0), Err(MapError::InvalidArgument(_))));
        assert!(LatLng::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_lat_lng_wire_forms() {
        let coord = LatLng::new(10.5, -20.25).unwrap();
        assert_eq!(serde_json::to_string(&coord).unwrap(), "[10.5,-20.25]");

        let from_object: LatLng = serde_json::from_str(r#"{"lat":10.5,"lng":-20.25}"#).unwrap();
        assert_eq!(from_object, coord);

        let out_of_range = serde_json::from_str::<LatLng>("[95.0, 0.0]");
        assert!(out_of_range.is_err());
    }

    #[test]
    fn test_bounds_ordering_is_enforced() {
        let result = LatLngBounds::from_coords(10.0, 10.0, 20.0, 20.0);
        assert!(matches!(result, Err(MapError::InvalidArgument(_))));
    }

    #[test]
    fn test_bounds_accessors() {
        let bounds = LatLngBounds::from_coords(41.0, -73.0, 40.0, -75.0).unwrap();
        assert_eq!(bounds.north(), 41.0);
        assert_eq!(bounds.south(), 40.0);
        assert_eq!(bounds.east(), -73.0);
        assert_eq!(bounds.west(), -75.0);
        assert_eq!(bounds.center(), LatLng::new(40.5, -74.0).unwrap());
        assert!(bounds.contains(&LatLng::new(40.5, -74.0).unwrap()));
        assert!(!bounds.contains(&LatLng::new(42.0, -74.0).unwrap()));
    }

    #[test]
    fn test_bounds_leaflet_object_form() {
        let json = r#"{"_southWest":{"lat":43.12,"lng":23.43},"_northEast":{"lat":67.0,"lng":78.9}}"#;
        let bounds: LatLngBounds = serde_json::from_str(json).unwrap();
        assert_eq!(bounds.north(), 67.0);
        assert_eq!(bounds.west(), 23.43);
    }

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1.5, 2.5);
        let b = Point::new(0.5, -0.5);

        assert_eq!(a.add(&b), Point::new(2.0, 2.0));
        assert_eq!(a.subtract(&b), Point::new(1.0, 3.0));
        assert_eq!(a.multiply_by(2.0), Point::new(3.0, 5.0));
        assert_eq!(a.divide_by(0.5), Point::new(3.0, 5.0));
        assert_eq!(Point::new(0.0, 0.0).distance_to(&Point::new(3.0, 4.0)), 5.0);
        assert_eq!(Point::new(1.4, 2.6).round(), Point::new(1.0, 3.0));
        assert_eq!(Point::new(1.9, -0.1).floor(), Point::new(1.0, -1.0));

        // operands are untouched
        assert_eq!(a, Point::new(1.5, 2.5));

        assert!(a.is_finite());
        assert!(!a.divide_by(0.0).is_finite());
    }
}
