//! Polyline representation for route geometries.
//!
//! Routes are held as decoded coordinate sequences. Decoding from the compact
//! encoded-polyline format happens at the boundary, when receiving from OSRM.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::{self, Coordinate};

/// Precision factor of the encoded-polyline format used by OSRM
/// (`geometries=polyline`).
const PRECISION: f64 = 1e5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolylineError {
    #[error("invalid character at byte {0}")]
    InvalidCharacter(usize),
    #[error("encoded polyline ends mid-value")]
    Truncated,
    #[error("decoded point {0} is outside valid coordinate ranges")]
    OutOfRange(usize),
}

/// A route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decodes a precision-5 encoded polyline.
    pub fn decode(encoded: &str) -> Result<Self, PolylineError> {
        let bytes = encoded.as_bytes();
        let mut index = 0;
        let mut lat: i64 = 0;
        let mut lng: i64 = 0;
        let mut points = Vec::new();

        while index < bytes.len() {
            lat += decode_value(bytes, &mut index)?;
            lng += decode_value(bytes, &mut index)?;
            let point = Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION)
                .map_err(|_| PolylineError::OutOfRange(points.len()))?;
            points.push(point);
        }

        Ok(Self { points })
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of great-circle segment lengths in meters.
    pub fn geometric_length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| geo::distance(pair[0], pair[1]))
            .sum()
    }
}

fn decode_value(bytes: &[u8], index: &mut usize) -> Result<i64, PolylineError> {
    let mut result: i64 = 0;
    let mut shift = 0;
    loop {
        let byte = *bytes.get(*index).ok_or(PolylineError::Truncated)?;
        if !(63..=126).contains(&byte) || shift > 60 {
            return Err(PolylineError::InvalidCharacter(*index));
        }
        *index += 1;
        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}
