//! Collaborator interfaces for the meeting-point core.
//!
//! These are intentionally minimal. HTTP adapters live in `osrm` and
//! `overpass`; tests and host applications can provide their own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MeetError;
use crate::geo::Coordinate;
use crate::poi::CandidatePoi;
use crate::route::Route;

/// Travel from one point to another as reported by a travel-time collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelLeg {
    pub duration_seconds: f64,
    pub distance_meters: f64,
}

/// Provides routed paths between two endpoints.
pub trait RoutingService: Send + Sync {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<Route, MeetError>;

    /// A second route distinct from [`RoutingService::route`].
    ///
    /// Collaborators that cannot supply one report `CollaboratorUnavailable`.
    fn alternate_route(&self, from: Coordinate, to: Coordinate) -> Result<Route, MeetError> {
        let _ = (from, to);
        Err(MeetError::unavailable("routing", "alternate routes not supported"))
    }
}

/// Provides travel time and distance between two points.
pub trait TravelTimeService: Send + Sync {
    fn travel_time(&self, from: Coordinate, to: Coordinate) -> Result<TravelLeg, MeetError>;
}

/// Finds candidate meeting places around a center point.
///
/// `categories` holds category names (`food`, `activities`, `lodging`) or raw
/// type tags; empty means every known type.
pub trait PoiSearchService: Send + Sync {
    fn search_nearby(
        &self,
        center: Coordinate,
        radius_meters: f64,
        categories: &[String],
    ) -> Result<Vec<CandidatePoi>, MeetError>;
}

/// Opaque authenticated-user identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Authenticated(UserId),
    Unauthenticated,
}

impl Identity {
    pub fn user_id(&self) -> Option<&UserId> {
        match self {
            Identity::Authenticated(id) => Some(id),
            Identity::Unauthenticated => None,
        }
    }
}

/// Supplies the identity of the current caller.
pub trait IdentityProvider: Send + Sync {
    fn identity(&self) -> Identity;
}

impl IdentityProvider for Identity {
    fn identity(&self) -> Identity {
        self.clone()
    }
}
