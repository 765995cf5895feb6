//! Midpoint resolution: along a routed polyline, or straight-line on the sphere.

use serde::{Deserialize, Serialize};

use crate::error::MeetError;
use crate::geo::{self, Coordinate};
use crate::route::{Route, RouteChoice};
use crate::traits::RoutingService;

/// How a midpoint was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    RouteBased,
    Geometric,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Midpoint {
    pub coordinate: Coordinate,
    pub provenance: Provenance,
}

/// Midpoint as held by a caller between requests.
///
/// `NotComputed` is distinct from any coordinate, including (0, 0).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "coordinate", rename_all = "kebab-case")]
pub enum MidpointState {
    #[default]
    NotComputed,
    Geometric(Coordinate),
    RouteBased(Coordinate),
}

impl MidpointState {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            MidpointState::NotComputed => None,
            MidpointState::Geometric(c) | MidpointState::RouteBased(c) => Some(*c),
        }
    }
}

impl From<Midpoint> for MidpointState {
    fn from(midpoint: Midpoint) -> Self {
        match midpoint.provenance {
            Provenance::RouteBased => MidpointState::RouteBased(midpoint.coordinate),
            Provenance::Geometric => MidpointState::Geometric(midpoint.coordinate),
        }
    }
}

/// Finds the point at half the route's length along its polyline.
///
/// If the polyline's own segments never reach half of `length_meters` (the
/// supplied length overstates the geometry), the point at the middle index is
/// returned instead.
pub fn resolve_route_midpoint(route: &Route) -> Result<Midpoint, MeetError> {
    let points = route.polyline.points();
    if points.len() < 2 || !route.length_meters.is_finite() || route.length_meters < 0.0 {
        return Err(MeetError::InvalidRoute {
            points: points.len(),
        });
    }

    let half = route.length_meters / 2.0;
    let mut travelled = 0.0;

    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let segment = geo::distance(start, end);
        if travelled + segment >= half {
            if segment == 0.0 {
                return Ok(route_based(start));
            }
            let ratio = (half - travelled) / segment;
            return Ok(route_based(geo::interpolate(start, end, ratio)));
        }
        travelled += segment;
    }

    tracing::debug!(
        geometric_length = travelled,
        supplied_length = route.length_meters,
        "route geometry shorter than half its length, using middle vertex"
    );
    Ok(route_based(points[points.len() / 2]))
}

fn route_based(coordinate: Coordinate) -> Midpoint {
    Midpoint {
        coordinate,
        provenance: Provenance::RouteBased,
    }
}

/// Great-circle midpoint of two coordinates, ignoring road topology.
pub fn resolve_geometric_midpoint(a: Coordinate, b: Coordinate) -> Midpoint {
    let lat1 = a.lat().to_radians();
    let lng1 = a.lng().to_radians();
    let lat2 = b.lat().to_radians();
    let delta_lng = (b.lng() - a.lng()).to_radians();

    let bx = lat2.cos() * delta_lng.cos();
    let by = lat2.cos() * delta_lng.sin();

    let lat = (lat1.sin() + lat2.sin()).atan2(((lat1.cos() + bx).powi(2) + by.powi(2)).sqrt());
    let lng = lng1 + by.atan2(lat1.cos() + bx);

    Midpoint {
        coordinate: Coordinate::from_degrees(lat.to_degrees(), normalize_lng(lng.to_degrees())),
        provenance: Provenance::Geometric,
    }
}

/// Wraps a longitude into [-180, 180).
fn normalize_lng(lng: f64) -> f64 {
    (lng + 540.0).rem_euclid(360.0) - 180.0
}

/// Resolves the meeting midpoint between two endpoints.
///
/// Uses the chosen route when the routing collaborator can supply one.
/// Otherwise falls back to the geometric midpoint, which the returned
/// provenance makes visible.
pub fn find_midpoint<R: RoutingService + ?Sized>(
    routing: &R,
    a: Coordinate,
    b: Coordinate,
    choice: RouteChoice,
) -> (Midpoint, Option<Route>) {
    let fetched = match choice {
        RouteChoice::Primary => routing.route(a, b),
        RouteChoice::Alternate => routing.alternate_route(a, b),
    };

    let resolved = fetched.and_then(|route| resolve_route_midpoint(&route).map(|m| (m, route)));
    match resolved {
        Ok((midpoint, route)) => (midpoint, Some(route)),
        Err(err) => {
            tracing::warn!(error = %err, ?choice, "falling back to geometric midpoint");
            (resolve_geometric_midpoint(a, b), None)
        }
    }
}
