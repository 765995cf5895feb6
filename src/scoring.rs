//! Travel-time symmetry scoring for a single candidate.

use serde::Serialize;

use crate::poi::CandidatePoi;
use crate::traits::TravelLeg;

/// A candidate enriched with travel data from both parties.
///
/// `total_time` and `time_difference` are only ever derived by [`score`]; both
/// are `None` unless both travel times are known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPoi {
    pub poi: CandidatePoi,
    time_from_a: Option<f64>,
    time_from_b: Option<f64>,
    pub distance_from_a: Option<f64>,
    pub distance_from_b: Option<f64>,
    total_time: Option<f64>,
    time_difference: Option<f64>,
}

impl ScoredPoi {
    pub fn time_from_a(&self) -> Option<f64> {
        self.time_from_a
    }

    pub fn time_from_b(&self) -> Option<f64> {
        self.time_from_b
    }

    pub fn total_time(&self) -> Option<f64> {
        self.total_time
    }

    pub fn time_difference(&self) -> Option<f64> {
        self.time_difference
    }
}

/// Scores a candidate from the two parties' travel times in seconds.
pub fn score(poi: CandidatePoi, time_from_a: Option<f64>, time_from_b: Option<f64>) -> ScoredPoi {
    let (total_time, time_difference) = match (time_from_a, time_from_b) {
        (Some(a), Some(b)) => (Some(a + b), Some((a - b).abs())),
        _ => (None, None),
    };

    ScoredPoi {
        poi,
        time_from_a,
        time_from_b,
        distance_from_a: None,
        distance_from_b: None,
        total_time,
        time_difference,
    }
}

/// Scores a candidate from full travel legs, keeping their distances.
pub fn score_legs(
    poi: CandidatePoi,
    from_a: Option<TravelLeg>,
    from_b: Option<TravelLeg>,
) -> ScoredPoi {
    ScoredPoi {
        distance_from_a: from_a.map(|leg| leg.distance_meters),
        distance_from_b: from_b.map(|leg| leg.distance_meters),
        ..score(
            poi,
            from_a.map(|leg| leg.duration_seconds),
            from_b.map(|leg| leg.duration_seconds),
        )
    }
}
