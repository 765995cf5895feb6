//! Planner configuration.
//!
//! Every field has a default; host applications can deserialize a partial
//! document or call [`PlannerConfig::from_env`].

use std::env;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::MeetError;
use crate::haversine::DEFAULT_SPEED_KMH;
use crate::osrm::OsrmConfig;
use crate::overpass::OverpassConfig;
use crate::ranking::DEFAULT_MAX_CONCURRENCY;

const ENV_PREFIX: &str = "MEET_HALFWAY_";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub osrm: OsrmConfig,
    pub overpass: OverpassConfig,
    pub search_radius_meters: f64,
    pub max_concurrency: usize,
    /// Speed used by the haversine estimator when OSRM is unavailable.
    pub fallback_speed_kmh: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            osrm: OsrmConfig::default(),
            overpass: OverpassConfig::default(),
            search_radius_meters: 1500.0,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            fallback_speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl PlannerConfig {
    /// Defaults overridden by `MEET_HALFWAY_*` environment variables.
    pub fn from_env() -> Result<Self, MeetError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, MeetError> {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        let mut config = Self::default();

        if let Some(url) = var("OSRM_URL") {
            config.osrm.base_url = url;
        }
        if let Some(profile) = var("OSRM_PROFILE") {
            config.osrm.profile = profile;
        }
        if let Some(value) = var("OSRM_TIMEOUT_SECS") {
            config.osrm.timeout_secs = parse_var("OSRM_TIMEOUT_SECS", &value)?;
        }
        if let Some(endpoint) = var("OVERPASS_URL") {
            config.overpass.endpoint = endpoint;
        }
        if let Some(value) = var("OVERPASS_TIMEOUT_SECS") {
            config.overpass.timeout_secs = parse_var("OVERPASS_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = var("SEARCH_RADIUS_METERS") {
            config.search_radius_meters = parse_var("SEARCH_RADIUS_METERS", &value)?;
        }
        if let Some(value) = var("MAX_CONCURRENCY") {
            config.max_concurrency = parse_var("MAX_CONCURRENCY", &value)?;
        }
        if let Some(value) = var("FALLBACK_SPEED_KMH") {
            config.fallback_speed_kmh = parse_var("FALLBACK_SPEED_KMH", &value)?;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T, MeetError> {
    value
        .trim()
        .parse()
        .map_err(|_| MeetError::InvalidInput(format!("{ENV_PREFIX}{name}={value:?} is not valid")))
}
