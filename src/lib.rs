//! meet-halfway core
//!
//! Fair meeting points between two parties: a midpoint along the driving route
//! (or on the great circle when no route is available) and nearby places
//! ranked by how evenly the travel time is shared.

pub mod config;
pub mod error;
pub mod geo;
pub mod haversine;
pub mod midpoint;
pub mod osrm;
pub mod overpass;
pub mod planner;
pub mod poi;
pub mod polyline;
pub mod ranking;
pub mod route;
pub mod saved;
pub mod scoring;
pub mod traits;

pub use error::MeetError;
pub use geo::Coordinate;
