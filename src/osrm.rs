//! OSRM HTTP adapter for routes and travel times.

use serde::Deserialize;

use crate::error::MeetError;
use crate::geo::Coordinate;
use crate::polyline::Polyline;
use crate::route::Route;
use crate::traits::{RoutingService, TravelLeg, TravelTimeService};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, from: Coordinate, to: Coordinate, query: &str) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}?{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            from.lng(),
            from.lat(),
            to.lng(),
            to.lat(),
            query
        )
    }

    fn fetch(&self, url: String, service: &'static str) -> Result<OsrmRouteResponse, MeetError> {
        tracing::debug!(%url, "OSRM request");
        let body = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|err| MeetError::unavailable(service, err))?;
        parse_response(&body, service)
    }

    fn fetch_routes(
        &self,
        from: Coordinate,
        to: Coordinate,
        alternatives: bool,
    ) -> Result<OsrmRouteResponse, MeetError> {
        let query = format!("overview=full&geometries=polyline&alternatives={alternatives}");
        self.fetch(self.route_url(from, to, &query), "routing")
    }
}

impl RoutingService for OsrmClient {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<Route, MeetError> {
        select_route(self.fetch_routes(from, to, false)?, 0)
    }

    fn alternate_route(&self, from: Coordinate, to: Coordinate) -> Result<Route, MeetError> {
        select_route(self.fetch_routes(from, to, true)?, 1)
    }
}

impl TravelTimeService for OsrmClient {
    fn travel_time(&self, from: Coordinate, to: Coordinate) -> Result<TravelLeg, MeetError> {
        let response = self.fetch(self.route_url(from, to, "overview=false"), "travel-time")?;
        response
            .routes
            .first()
            .map(|route| TravelLeg {
                duration_seconds: route.duration,
                distance_meters: route.distance,
            })
            .ok_or_else(|| MeetError::unavailable("travel-time", "no route returned"))
    }
}

/// Decodes `routes[index]`; index 0 is the primary route, 1 the first alternate.
fn select_route(response: OsrmRouteResponse, index: usize) -> Result<Route, MeetError> {
    let reason = if index == 0 {
        "no route returned"
    } else {
        "no alternate route returned"
    };
    response
        .routes
        .into_iter()
        .nth(index)
        .ok_or_else(|| MeetError::unavailable("routing", reason))?
        .into_route()
}

fn parse_response(body: &str, service: &'static str) -> Result<OsrmRouteResponse, MeetError> {
    let response: OsrmRouteResponse = serde_json::from_str(body)
        .map_err(|err| MeetError::unavailable(service, format!("invalid OSRM JSON: {err}")))?;
    if response.code != "Ok" {
        return Err(MeetError::unavailable(
            service,
            format!(
                "OSRM returned {}: {}",
                response.code,
                response.message.as_deref().unwrap_or("no message")
            ),
        ));
    }
    Ok(response)
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: Option<String>,
}

impl OsrmRoute {
    fn into_route(self) -> Result<Route, MeetError> {
        let encoded = self
            .geometry
            .ok_or_else(|| MeetError::unavailable("routing", "route has no geometry"))?;
        let polyline = Polyline::decode(&encoded).map_err(|err| {
            MeetError::unavailable("routing", format!("bad route geometry: {err}"))
        })?;
        Ok(Route::new(polyline, self.distance, self.duration))
    }
}
