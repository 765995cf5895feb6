//! Overpass HTTP adapter for nearby POI search.
//!
//! Owns transport details only: query construction, timeout and HTTP error
//! mapping, and JSON decoding into candidate POIs.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use serde::Deserialize;

use crate::error::MeetError;
use crate::geo::Coordinate;
use crate::poi::{CandidatePoi, Category};
use crate::traits::PoiSearchService;

/// OSM tag keys whose values are treated as the POI type tag, in priority order.
const KIND_KEYS: [&str; 3] = ["amenity", "tourism", "leisure"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OverpassConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://overpass-api.de/api/interpreter".to_string(),
            timeout_secs: 25,
            user_agent: concat!("meet-halfway/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    config: OverpassConfig,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { config, client })
    }
}

impl PoiSearchService for OverpassClient {
    fn search_nearby(
        &self,
        center: Coordinate,
        radius_meters: f64,
        categories: &[String],
    ) -> Result<Vec<CandidatePoi>, MeetError> {
        let kinds = resolve_kinds(categories)?;
        let query = build_query(center, radius_meters, &kinds, self.config.timeout_secs);
        tracing::debug!(%center, radius_meters, kinds = kinds.len(), "Overpass request");

        let body = self
            .client
            .post(self.config.endpoint.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("data", query)])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|err| MeetError::unavailable("poi-search", err))?;

        parse_pois(&body)
    }
}

/// Expands category names into type tags; anything else is taken as a raw tag.
fn resolve_kinds(categories: &[String]) -> Result<Vec<String>, MeetError> {
    let mut kinds: Vec<String> = Vec::new();
    for entry in categories {
        match entry.parse::<Category>() {
            Ok(category) => kinds.extend(category.kinds().iter().map(|k| k.to_string())),
            Err(_) if is_tag_value(entry) => kinds.push(entry.clone()),
            Err(_) => {
                return Err(MeetError::InvalidInput(format!("unsupported POI type {entry:?}")));
            }
        }
    }
    if kinds.is_empty() {
        kinds = [Category::Food, Category::Activities, Category::Lodging]
            .into_iter()
            .flat_map(|category| category.kinds().iter().map(|k| k.to_string()))
            .collect();
    }
    let mut seen = HashSet::new();
    kinds.retain(|kind| seen.insert(kind.clone()));
    Ok(kinds)
}

fn is_tag_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

fn build_query(
    center: Coordinate,
    radius_meters: f64,
    kinds: &[String],
    timeout_secs: u64,
) -> String {
    format!(
        "[out:json][timeout:{timeout}];\
         nwr[~\"^({keys})$\"~\"^({values})$\"](around:{radius:.0},{lat:.6},{lng:.6});\
         out center;",
        timeout = timeout_secs.max(1),
        keys = KIND_KEYS.join("|"),
        values = kinds.join("|"),
        radius = radius_meters.max(1.0),
        lat = center.lat(),
        lng = center.lng(),
    )
}

fn parse_pois(body: &str) -> Result<Vec<CandidatePoi>, MeetError> {
    let decoded: OverpassResponseDto = serde_json::from_str(body).map_err(|err| {
        MeetError::unavailable("poi-search", format!("invalid Overpass JSON: {err}"))
    })?;
    let total = decoded.elements.len();
    let pois: Vec<CandidatePoi> = decoded
        .elements
        .into_iter()
        .filter_map(OverpassElementDto::into_candidate)
        .collect();
    if pois.len() < total {
        tracing::debug!(skipped = total - pois.len(), "skipped unnamed or unlocated elements");
    }
    Ok(pois)
}

#[derive(Debug, Deserialize)]
struct OverpassResponseDto {
    #[serde(default)]
    elements: Vec<OverpassElementDto>,
}

#[derive(Debug, Deserialize)]
struct OverpassElementDto {
    #[serde(rename = "type")]
    element_type: String,
    id: i64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenterDto>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenterDto {
    lat: f64,
    lon: f64,
}

impl OverpassElementDto {
    fn into_candidate(mut self) -> Option<CandidatePoi> {
        let (lat, lng) = match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lng), _) => (lat, lng),
            (_, _, Some(center)) => (center.lat, center.lon),
            _ => return None,
        };
        let location = Coordinate::new(lat, lng).ok()?;
        let kind = KIND_KEYS.iter().find_map(|key| self.tags.get(*key).cloned())?;
        let address = self.address();
        let name = self.tags.remove("name")?;

        Some(CandidatePoi {
            id: format!("{}/{}", self.element_type, self.id),
            location,
            kind,
            name,
            address,
        })
    }

    fn address(&self) -> Option<String> {
        let tag = |key: &str| self.tags.get(key).map(String::as_str);
        let street = match (tag("addr:housenumber"), tag("addr:street")) {
            (Some(number), Some(street)) => Some(format!("{number} {street}")),
            (None, Some(street)) => Some(street.to_string()),
            _ => None,
        };
        match (street, tag("addr:city")) {
            (Some(street), Some(city)) => Some(format!("{street}, {city}")),
            (Some(street), None) => Some(street),
            (None, Some(city)) => Some(city.to_string()),
            (None, None) => None,
        }
    }
}
