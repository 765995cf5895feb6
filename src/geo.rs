//! Coordinates and great-circle helpers.
//!
//! `distance` is a haversine on a spherical Earth. `interpolate` is a plain
//! lat/lng lerp and is only meaningful between closely spaced polyline points.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MeetError;

/// Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A latitude/longitude pair in decimal degrees.
///
/// Values built through [`Coordinate::new`], [`Coordinate::parse`] or serde are
/// always finite and within range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = MeetError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    /// Validates and builds a coordinate.
    pub fn new(lat: f64, lng: f64) -> Result<Self, MeetError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(MeetError::InvalidInput(format!(
                "latitude {lat} outside [-90, 90]"
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(MeetError::InvalidInput(format!(
                "longitude {lng} outside [-180, 180]"
            )));
        }
        Ok(Self { lat, lng })
    }

    /// Parses latitude and longitude from separate form fields.
    pub fn parse(lat: &str, lng: &str) -> Result<Self, MeetError> {
        let lat = parse_degrees("latitude", lat)?;
        let lng = parse_degrees("longitude", lng)?;
        Self::new(lat, lng)
    }

    /// Builds a coordinate from values the crate derived itself.
    pub(crate) const fn from_degrees(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

fn parse_degrees(field: &str, value: &str) -> Result<f64, MeetError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| MeetError::InvalidInput(format!("{field} {value:?} is not a number")))
}

impl FromStr for Coordinate {
    type Err = MeetError;

    /// Parses `"lat,lng"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| {
            MeetError::InvalidInput(format!("{s:?} is not a \"lat,lng\" pair"))
        })?;
        Self::parse(lat, lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

/// Great-circle distance between two points in meters.
pub fn distance(p1: Coordinate, p2: Coordinate) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Linear interpolation in lat/lng space. `ratio` is not clamped.
pub fn interpolate(p1: Coordinate, p2: Coordinate, ratio: f64) -> Coordinate {
    Coordinate::from_degrees(
        p1.lat + (p2.lat - p1.lat) * ratio,
        p1.lng + (p2.lng - p1.lng) * ratio,
    )
}
