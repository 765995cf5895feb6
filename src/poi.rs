//! Candidate meeting places and their categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MeetError;
use crate::geo::Coordinate;

/// A nearby place returned by a POI search collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePoi {
    pub id: String,
    pub location: Coordinate,
    /// Type tag such as `restaurant` or `museum`.
    pub kind: String,
    pub name: String,
    pub address: Option<String>,
}

impl CandidatePoi {
    pub fn category(&self) -> Category {
        Category::for_kind(&self.kind)
    }
}

/// Coarse grouping of POI type tags used by the category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Activities,
    Lodging,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Food,
        Category::Activities,
        Category::Lodging,
        Category::Other,
    ];

    pub fn for_kind(kind: &str) -> Self {
        match kind {
            "restaurant" | "cafe" | "bar" | "pub" | "fast_food" => Category::Food,
            "park" | "cinema" | "theatre" | "museum" => Category::Activities,
            "hotel" | "hostel" | "guest_house" => Category::Lodging,
            _ => Category::Other,
        }
    }

    /// Type tags belonging to this category. Empty for `Other`.
    pub fn kinds(self) -> &'static [&'static str] {
        match self {
            Category::Food => &["restaurant", "cafe", "bar", "pub", "fast_food"],
            Category::Activities => &["park", "cinema", "theatre", "museum"],
            Category::Lodging => &["hotel", "hostel", "guest_house"],
            Category::Other => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Activities => "activities",
            Category::Lodging => "lodging",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = MeetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MeetError::InvalidInput(format!("unknown category {s:?}")))
    }
}
