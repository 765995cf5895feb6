//! A routed path between two endpoints, as supplied by a routing collaborator.

use serde::{Deserialize, Serialize};

use crate::polyline::Polyline;

/// One routed path: its geometry plus the collaborator's own totals.
///
/// `length_meters` is trusted as supplied and is never re-derived from the
/// geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub polyline: Polyline,
    pub length_meters: f64,
    pub duration_seconds: f64,
}

impl Route {
    pub fn new(polyline: Polyline, length_meters: f64, duration_seconds: f64) -> Self {
        Self {
            polyline,
            length_meters,
            duration_seconds,
        }
    }
}

/// Which of the collaborator's routes the midpoint should follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteChoice {
    #[default]
    Primary,
    Alternate,
}
