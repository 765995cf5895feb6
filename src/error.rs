//! Error taxonomy shared by the midpoint, ranking and adapter layers.

use thiserror::Error;

/// Errors surfaced by the meeting-point core.
///
/// Nothing here is retried internally; retry policy belongs to the
/// collaborator clients.
#[derive(Debug, Error)]
pub enum MeetError {
    /// Malformed or out-of-range coordinate supplied by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A route that cannot yield a midpoint.
    #[error("invalid route: {points} point(s), needs at least 2 and a finite non-negative length")]
    InvalidRoute { points: usize },

    /// Routing, travel-time or POI collaborator failed or timed out.
    #[error("{service} unavailable: {reason}")]
    CollaboratorUnavailable {
        service: &'static str,
        reason: String,
    },

    #[error("an authenticated user is required")]
    Unauthenticated,

    #[error("storage error: {0}")]
    Storage(String),
}

impl MeetError {
    pub(crate) fn unavailable(service: &'static str, reason: impl ToString) -> Self {
        MeetError::CollaboratorUnavailable {
            service,
            reason: reason.to_string(),
        }
    }
}
