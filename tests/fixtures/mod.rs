//! Test fixtures for meet-halfway.
//!
//! Provides:
//! - Real Las Vegas / Henderson locations (from OpenStreetMap)
//! - Builders for candidate POIs
//! - Scripted routing, travel-time and POI collaborators

#![allow(dead_code)]

pub mod las_vegas_locations;

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use meet_halfway::geo::{self, Coordinate};
use meet_halfway::poi::CandidatePoi;
use meet_halfway::polyline::Polyline;
use meet_halfway::route::Route;
use meet_halfway::traits::{PoiSearchService, RoutingService, TravelLeg, TravelTimeService};
use meet_halfway::MeetError;

pub use las_vegas_locations::*;

pub fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng).expect("fixture coordinate in range")
}

/// Builder for candidate POIs with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestPoi {
    id: String,
    location: Coordinate,
    kind: String,
    name: String,
}

impl TestPoi {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            location: coord(0.0, 0.0),
            kind: "restaurant".to_string(),
            name: id.to_string(),
        }
    }

    pub fn at(mut self, location: &Location) -> Self {
        self.location = location.coordinate();
        self.name = location.name.to_string();
        self
    }

    pub fn location(mut self, lat: f64, lng: f64) -> Self {
        self.location = coord(lat, lng);
        self
    }

    pub fn kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn build(self) -> CandidatePoi {
        CandidatePoi {
            id: self.id,
            location: self.location,
            kind: self.kind,
            name: self.name,
            address: None,
        }
    }
}

/// Straight two-leg route through a waypoint, with a truthful length.
pub fn route_via(from: Coordinate, via: Coordinate, to: Coordinate) -> Route {
    let polyline = Polyline::new(vec![from, via, to]);
    let length = polyline.geometric_length();
    Route::new(polyline, length, length / 10.0)
}

/// Routing collaborator returning fixed routes, or failing when unset.
#[derive(Default)]
pub struct ScriptedRouting {
    pub primary: Option<Route>,
    pub alternate: Option<Route>,
}

impl RoutingService for ScriptedRouting {
    fn route(&self, _from: Coordinate, _to: Coordinate) -> Result<Route, MeetError> {
        self.primary.clone().ok_or_else(|| MeetError::CollaboratorUnavailable {
            service: "routing",
            reason: "scripted outage".to_string(),
        })
    }

    fn alternate_route(&self, _from: Coordinate, _to: Coordinate) -> Result<Route, MeetError> {
        self.alternate.clone().ok_or_else(|| MeetError::CollaboratorUnavailable {
            service: "routing",
            reason: "no alternate".to_string(),
        })
    }
}

/// Travel-time collaborator with per-destination failures and a call log.
///
/// Durations are great-circle meters divided by 10 (36 km/h).
#[derive(Default)]
pub struct ScriptedTravel {
    pub failing_destinations: HashSet<String>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedTravel {
    pub fn failing_at(destinations: &[Coordinate]) -> Self {
        Self {
            failing_destinations: destinations.iter().map(Coordinate::to_string).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log").len()
    }
}

impl TravelTimeService for ScriptedTravel {
    fn travel_time(&self, from: Coordinate, to: Coordinate) -> Result<TravelLeg, MeetError> {
        self.calls
            .lock()
            .expect("call log")
            .push((from.to_string(), to.to_string()));
        if self.failing_destinations.contains(&to.to_string()) {
            return Err(MeetError::CollaboratorUnavailable {
                service: "travel-time",
                reason: "scripted failure".to_string(),
            });
        }
        let meters = geo::distance(from, to);
        Ok(TravelLeg {
            duration_seconds: (meters / 10.0).round(),
            distance_meters: meters,
        })
    }
}

/// POI collaborator returning a fixed candidate set and recording the last query.
#[derive(Default)]
pub struct ScriptedPois {
    pub candidates: Vec<CandidatePoi>,
    pub fail: bool,
    pub last_query: Mutex<Option<(Coordinate, f64, Vec<String>)>>,
}

impl ScriptedPois {
    pub fn with(candidates: Vec<CandidatePoi>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }
}

impl PoiSearchService for ScriptedPois {
    fn search_nearby(
        &self,
        center: Coordinate,
        radius_meters: f64,
        categories: &[String],
    ) -> Result<Vec<CandidatePoi>, MeetError> {
        *self.last_query.lock().expect("query log") =
            Some((center, radius_meters, categories.to_vec()));
        if self.fail {
            return Err(MeetError::CollaboratorUnavailable {
                service: "poi-search",
                reason: "scripted outage".to_string(),
            });
        }
        Ok(self.candidates.clone())
    }
}

/// Travel times keyed by POI id, for ranking tests that bypass collaborators.
pub fn times_table(
    rows: &[(&str, Option<f64>, Option<f64>)],
) -> HashMap<String, (Option<TravelLeg>, Option<TravelLeg>)> {
    let leg = |secs: Option<f64>| {
        secs.map(|s| TravelLeg {
            duration_seconds: s,
            distance_meters: s * 10.0,
        })
    };
    rows.iter()
        .map(|(id, a, b)| (id.to_string(), (leg(*a), leg(*b))))
        .collect()
}
