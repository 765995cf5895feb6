//! POI ranking: score every candidate, filter, then stable-sort.

use std::cmp::Ordering;
use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::poi::{CandidatePoi, Category};
use crate::scoring::{ScoredPoi, score_legs};
use crate::traits::TravelLeg;

/// Default number of concurrent travel-time lookups.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankFilters {
    /// Keep only POIs in this category.
    pub category: Option<Category>,
    /// Drop POIs whose known time difference exceeds this. Unknown passes.
    pub max_time_difference_seconds: Option<f64>,
    pub favorites_only: bool,
    pub favorite_ids: HashSet<String>,
}

impl RankFilters {
    pub fn accepts(&self, scored: &ScoredPoi) -> bool {
        if let Some(category) = self.category {
            if scored.poi.category() != category {
                return false;
            }
        }
        if let (Some(max), Some(difference)) =
            (self.max_time_difference_seconds, scored.time_difference())
        {
            if difference > max {
                return false;
            }
        }
        !self.favorites_only || self.favorite_ids.contains(&scored.poi.id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Name,
    DistanceFromA,
    DistanceFromB,
    TotalTime,
    #[default]
    TimeDifference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOptions {
    pub filters: RankFilters,
    pub sort_key: SortKey,
    /// Upper bound on concurrent lookups. `1` runs them on the calling thread.
    pub max_concurrency: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            filters: RankFilters::default(),
            sort_key: SortKey::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// Scores, filters and orders candidates.
///
/// `lookup` returns the travel legs from party A and party B to a candidate;
/// a `None` leg marks a failed lookup. Equal keys keep candidate order.
pub fn rank<F>(candidates: &[CandidatePoi], lookup: F, options: &RankOptions) -> Vec<ScoredPoi>
where
    F: Fn(&CandidatePoi) -> (Option<TravelLeg>, Option<TravelLeg>) + Sync,
{
    let scored = score_all(candidates, &lookup, options.max_concurrency);
    let mut kept = apply_filters(scored, &options.filters);
    sort_scored(&mut kept, options.sort_key);

    tracing::debug!(
        candidates = candidates.len(),
        kept = kept.len(),
        sort_key = ?options.sort_key,
        "ranked candidates"
    );
    kept
}

fn score_all<F>(candidates: &[CandidatePoi], lookup: &F, max_concurrency: usize) -> Vec<ScoredPoi>
where
    F: Fn(&CandidatePoi) -> (Option<TravelLeg>, Option<TravelLeg>) + Sync,
{
    let score_one = |poi: &CandidatePoi| {
        let (from_a, from_b) = lookup(poi);
        score_legs(poi.clone(), from_a, from_b)
    };

    if max_concurrency <= 1 || candidates.len() <= 1 {
        return candidates.iter().map(score_one).collect();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(max_concurrency.min(candidates.len()))
        .thread_name(|i| format!("poi-lookup-{i}"))
        .build();

    match pool {
        // Indexed collect keeps each result in its candidate's slot.
        Ok(pool) => pool.install(|| candidates.par_iter().map(score_one).collect()),
        Err(err) => {
            tracing::warn!(error = %err, "lookup pool unavailable, scoring sequentially");
            candidates.iter().map(score_one).collect()
        }
    }
}

/// Drops POIs rejected by `filters`. Applying it twice equals applying it once.
pub fn apply_filters(scored: Vec<ScoredPoi>, filters: &RankFilters) -> Vec<ScoredPoi> {
    scored.into_iter().filter(|poi| filters.accepts(poi)).collect()
}

/// Stable sort by `key`; absent numeric values sort last.
pub fn sort_scored(scored: &mut [ScoredPoi], key: SortKey) {
    match key {
        SortKey::Name => scored.sort_by(|a, b| a.poi.name.cmp(&b.poi.name)),
        SortKey::DistanceFromA => {
            scored.sort_by(|a, b| absent_last(a.distance_from_a, b.distance_from_a))
        }
        SortKey::DistanceFromB => {
            scored.sort_by(|a, b| absent_last(a.distance_from_b, b.distance_from_b))
        }
        SortKey::TotalTime => scored.sort_by(|a, b| absent_last(a.total_time(), b.total_time())),
        SortKey::TimeDifference => {
            scored.sort_by(|a, b| absent_last(a.time_difference(), b.time_difference()))
        }
    }
}

fn absent_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
