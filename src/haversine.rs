//! Haversine travel-time estimator (fallback when OSRM is unavailable).
//!
//! Uses great-circle distance to estimate travel time.
//! Less accurate than OSRM (ignores roads) but always available.
//! [`FallbackTravelTime`] wraps a primary service and switches to the estimate
//! per lookup when the primary fails.

use crate::error::MeetError;
use crate::geo::{self, Coordinate};
use crate::traits::{TravelLeg, TravelTimeService};

/// Average driving speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Estimates travel legs from straight-line distance and an assumed speed.
#[derive(Debug, Clone)]
pub struct HaversineTravelTime {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineTravelTime {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineTravelTime {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Convert a distance in meters to travel time in seconds.
    fn meters_to_seconds(&self, meters: f64) -> f64 {
        let hours = meters / 1000.0 / self.speed_kmh;
        (hours * 3600.0).round()
    }
}

impl TravelTimeService for HaversineTravelTime {
    fn travel_time(&self, from: Coordinate, to: Coordinate) -> Result<TravelLeg, MeetError> {
        if !self.speed_kmh.is_finite() || self.speed_kmh <= 0.0 {
            return Err(MeetError::unavailable(
                "travel-time",
                format!("invalid fallback speed {} km/h", self.speed_kmh),
            ));
        }
        let distance_meters = geo::distance(from, to);
        Ok(TravelLeg {
            duration_seconds: self.meters_to_seconds(distance_meters),
            distance_meters,
        })
    }
}

/// Travel times from a primary service, estimated by haversine when it fails.
#[derive(Debug, Clone)]
pub struct FallbackTravelTime<T> {
    primary: T,
    fallback: HaversineTravelTime,
}

impl<T: TravelTimeService> FallbackTravelTime<T> {
    pub fn new(primary: T, fallback_speed_kmh: f64) -> Self {
        Self {
            primary,
            fallback: HaversineTravelTime::new(fallback_speed_kmh),
        }
    }

    pub fn primary(&self) -> &T {
        &self.primary
    }
}

impl<T: TravelTimeService> TravelTimeService for FallbackTravelTime<T> {
    fn travel_time(&self, from: Coordinate, to: Coordinate) -> Result<TravelLeg, MeetError> {
        match self.primary.travel_time(from, to) {
            Ok(leg) => Ok(leg),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    speed_kmh = self.fallback.speed_kmh,
                    "travel lookup failed, using haversine estimate"
                );
                self.fallback.travel_time(from, to)
            }
        }
    }
}
