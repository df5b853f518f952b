//! Error types for season construction.
//!
//! Only construction-time failures are errors. Rejected search moves are
//! reported as `false` by the mutating operations and never show up here.

use chrono::NaiveDate;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised while building pairings, rounds, schedules and seasons.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A participant was paired with themself.
    #[error("participant {participant} cannot be paired with themself")]
    InvalidPairing {
        /// Offending participant index.
        participant: usize,
    },

    /// A round violates one of its invariants at construction.
    #[error("invalid round on {date}: {reason}")]
    InvalidRound {
        /// Date of the round.
        date: NaiveDate,
        /// Which invariant is broken.
        reason: String,
    },

    /// No feasible round exists for a date.
    #[error(
        "cannot generate round on {date}: {eligible} eligible participants, {required} required"
    )]
    RoundGeneration {
        /// Date of the round.
        date: NaiveDate,
        /// Participants available on that date.
        eligible: usize,
        /// Participants needed to fill every court.
        required: usize,
    },

    /// The initial schedule could not be built.
    #[error("cannot generate schedule at round {index} ({date})")]
    ScheduleGeneration {
        /// Position of the failing round in the season.
        index: usize,
        /// Date of the failing round.
        date: NaiveDate,
        /// Underlying round failure.
        #[source]
        source: Box<ScheduleError>,
    },

    /// Season input failed validation.
    #[error("invalid season configuration: {}", join_messages(.0))]
    InvalidConfiguration(Vec<ValidationError>),

    /// A persisted season record is inconsistent.
    #[error("invalid season record: {0}")]
    InvalidRecord(String),

    /// JSON (de)serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for schedule operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
