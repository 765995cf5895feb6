//! Meeting planner: midpoint, nearby candidates, ranked results.

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::error::MeetError;
use crate::geo::Coordinate;
use crate::haversine::FallbackTravelTime;
use crate::midpoint::{Midpoint, find_midpoint};
use crate::osrm::OsrmClient;
use crate::overpass::OverpassClient;
use crate::ranking::{RankFilters, RankOptions, SortKey, rank};
use crate::route::{Route, RouteChoice};
use crate::scoring::ScoredPoi;
use crate::traits::{PoiSearchService, RoutingService, TravelLeg, TravelTimeService};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeetingRequest {
    pub from: Coordinate,
    pub to: Coordinate,
    #[serde(default)]
    pub route: RouteChoice,
    /// Category names or type tags passed to the POI search.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub filters: RankFilters,
    #[serde(default)]
    pub sort_key: SortKey,
    /// Overrides the configured search radius.
    #[serde(default)]
    pub radius_meters: Option<f64>,
}

impl MeetingRequest {
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        Self {
            from,
            to,
            route: RouteChoice::default(),
            categories: Vec::new(),
            filters: RankFilters::default(),
            sort_key: SortKey::default(),
            radius_meters: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingPlan {
    pub midpoint: Midpoint,
    /// The route the midpoint was taken from; `None` after a geometric fallback.
    pub route: Option<Route>,
    pub pois: Vec<ScoredPoi>,
}

/// Planner over the OSRM and Overpass HTTP adapters.
pub type HttpPlanner = MeetingPlanner<OsrmClient, FallbackTravelTime<OsrmClient>, OverpassClient>;

pub struct MeetingPlanner<R, T, P> {
    routing: R,
    travel: T,
    pois: P,
    config: PlannerConfig,
}

impl<R, T, P> MeetingPlanner<R, T, P>
where
    R: RoutingService,
    T: TravelTimeService,
    P: PoiSearchService,
{
    pub fn new(routing: R, travel: T, pois: P, config: PlannerConfig) -> Self {
        Self {
            routing,
            travel,
            pois,
            config,
        }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn routing(&self) -> &R {
        &self.routing
    }

    pub fn travel(&self) -> &T {
        &self.travel
    }

    pub fn poi_search(&self) -> &P {
        &self.pois
    }

    /// Computes the midpoint and the ranked POIs around it.
    ///
    /// Routing failures degrade to a geometric midpoint and failed travel
    /// lookups degrade to unknown times. A failed POI search is an error.
    pub fn plan(&self, request: &MeetingRequest) -> Result<MeetingPlan, MeetError> {
        let radius = request.radius_meters.unwrap_or(self.config.search_radius_meters);
        if !radius.is_finite() || radius <= 0.0 {
            return Err(MeetError::InvalidInput(format!("search radius {radius} must be positive")));
        }

        let (midpoint, route) =
            find_midpoint(&self.routing, request.from, request.to, request.route);
        let candidates = self
            .pois
            .search_nearby(midpoint.coordinate, radius, &request.categories)?;

        let options = RankOptions {
            filters: request.filters.clone(),
            sort_key: request.sort_key,
            max_concurrency: self.config.max_concurrency,
        };
        let pois = rank(
            &candidates,
            |poi| {
                (
                    self.leg(request.from, poi.location, &poi.id),
                    self.leg(request.to, poi.location, &poi.id),
                )
            },
            &options,
        );

        tracing::info!(
            midpoint = %midpoint.coordinate,
            provenance = ?midpoint.provenance,
            candidates = candidates.len(),
            ranked = pois.len(),
            "meeting plan ready"
        );

        Ok(MeetingPlan {
            midpoint,
            route,
            pois,
        })
    }

    fn leg(&self, from: Coordinate, to: Coordinate, poi_id: &str) -> Option<TravelLeg> {
        match self.travel.travel_time(from, to) {
            Ok(leg) => Some(leg),
            Err(err) => {
                tracing::debug!(poi = poi_id, error = %err, "travel lookup failed");
                None
            }
        }
    }
}

impl HttpPlanner {
    /// Builds the HTTP collaborators from `config`.
    ///
    /// Travel lookups that OSRM cannot answer are estimated by haversine at
    /// `fallback_speed_kmh`.
    pub fn from_config(config: PlannerConfig) -> Result<Self, MeetError> {
        let osrm = OsrmClient::new(config.osrm.clone())
            .map_err(|err| MeetError::unavailable("routing", err))?;
        let overpass = OverpassClient::new(config.overpass.clone())
            .map_err(|err| MeetError::unavailable("poi-search", err))?;
        let travel = FallbackTravelTime::new(osrm.clone(), config.fallback_speed_kmh);
        Ok(Self::new(osrm, travel, overpass, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::haversine::HaversineTravelTime;
    use crate::midpoint::Provenance;
    use crate::osrm::OsrmConfig;
    use crate::poi::CandidatePoi;

    struct NoRoutes;

    impl RoutingService for NoRoutes {
        fn route(&self, _from: Coordinate, _to: Coordinate) -> Result<Route, MeetError> {
            Err(MeetError::unavailable("routing", "offline"))
        }
    }

    struct FixedPois(Vec<CandidatePoi>);

    impl PoiSearchService for FixedPois {
        fn search_nearby(
            &self,
            _: Coordinate,
            _: f64,
            _: &[String],
        ) -> Result<Vec<CandidatePoi>, MeetError> {
            Ok(self.0.clone())
        }
    }

    fn no_pois() -> FixedPois {
        FixedPois(Vec::new())
    }

    fn haversine_planner() -> MeetingPlanner<NoRoutes, HaversineTravelTime, FixedPois> {
        MeetingPlanner::new(
            NoRoutes,
            HaversineTravelTime::default(),
            no_pois(),
            PlannerConfig::default(),
        )
    }

    fn unreachable_osrm() -> OsrmConfig {
        OsrmConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            ..OsrmConfig::default()
        }
    }

    fn coord(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let planner = haversine_planner();
        let mut request = MeetingRequest::new(coord(0.0, 0.0), coord(1.0, 1.0));
        request.radius_meters = Some(0.0);
        assert!(matches!(planner.plan(&request), Err(MeetError::InvalidInput(_))));
    }

    #[test]
    fn test_routing_outage_yields_geometric_plan() {
        let plan = haversine_planner()
            .plan(&MeetingRequest::new(coord(0.0, 0.0), coord(0.0, 2.0)))
            .unwrap();
        assert_eq!(plan.midpoint.provenance, Provenance::Geometric);
        assert!(plan.route.is_none());
        assert!(plan.pois.is_empty());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: MeetingRequest = serde_json::from_str(
            r#"{
                "from": {"lat": 1.0, "lng": 2.0},
                "to": {"lat": 3.0, "lng": 4.0},
                "route": "alternate"
            }"#,
        )
        .unwrap();
        assert_eq!(request.route, RouteChoice::Alternate);
        assert_eq!(request.sort_key, SortKey::TimeDifference);
        assert!(request.categories.is_empty());
    }

    #[test]
    fn test_osrm_outage_falls_back_to_haversine_legs() {
        let (a, b) = (coord(36.10, -115.20), coord(36.10, -115.10));
        let cafe = CandidatePoi {
            id: "node/1".to_string(),
            location: coord(36.12, -115.15),
            kind: "cafe".to_string(),
            name: "Cafe".to_string(),
            address: None,
        };
        let osrm = OsrmClient::new(unreachable_osrm()).unwrap();
        let planner = MeetingPlanner::new(
            NoRoutes,
            FallbackTravelTime::new(osrm, 40.0),
            FixedPois(vec![cafe.clone()]),
            PlannerConfig::default(),
        );

        let plan = planner.plan(&MeetingRequest::new(a, b)).unwrap();

        let estimate = HaversineTravelTime::new(40.0);
        let from_a = estimate.travel_time(a, cafe.location).unwrap();
        let from_b = estimate.travel_time(b, cafe.location).unwrap();
        let (from_a, from_b) = (from_a.duration_seconds, from_b.duration_seconds);
        assert_eq!(plan.pois.len(), 1);
        assert_eq!(plan.pois[0].time_from_a(), Some(from_a));
        assert_eq!(plan.pois[0].time_from_b(), Some(from_b));
        assert_eq!(plan.pois[0].total_time(), Some(from_a + from_b));
    }

    #[test]
    fn test_from_config_uses_configured_fallback_speed() {
        let config = PlannerConfig {
            osrm: unreachable_osrm(),
            fallback_speed_kmh: 20.0,
            ..PlannerConfig::default()
        };
        let planner = HttpPlanner::from_config(config.clone()).unwrap();
        assert_eq!(planner.config(), &config);

        let (a, b) = (coord(36.10, -115.20), coord(36.10, -115.10));
        let leg = planner.travel().travel_time(a, b).unwrap();
        let estimate = HaversineTravelTime::new(20.0);
        let expected = estimate.travel_time(a, b).unwrap();
        assert_eq!(leg, expected);
    }
}
