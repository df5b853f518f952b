//! Season coordination.
//!
//! A [`Season`] owns its configuration, its play dates and exactly one
//! [`Schedule`]. It validates the input, generates the initial schedule,
//! hands it to the optimizer and converts it to the persisted record and
//! the exporter report.
//!
//! # Pipeline
//!
//! ```text
//! SeasonSettings ─into_parts─▶ (roster, SeasonConfig)
//!        │                           │
//!        └──────── Season::generate ◀─┘
//!                       │
//!                 Season::optimize ──▶ SeasonReport
//!                       │
//!                 SeasonRecord (JSON) ──▶ Season::from_record
//! ```

mod config;
mod report;

pub use config::{CalendarSettings, SeasonConfig, SeasonSettings, SubscriptionSettings};
pub use report::{ParticipantTally, RoundReport, SeasonReport};

use std::sync::Arc;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ScheduleError};
use crate::generation::generate_schedule;
use crate::models::{Pairing, Participant, Round, Schedule};
use crate::optimizer::{OptimizationOutcome, Optimizer};
use crate::scoring::{FairnessObjective, Objective, ScoreBreakdown};
use crate::validation::validate_input;

/// A season: configuration, play dates and schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    config: SeasonConfig,
    dates: Vec<NaiveDate>,
    schedule: Schedule,
}

/// Persisted form of a season.
///
/// Pairings are stored as participant index pairs, `[a, b]` or `[a, null]`
/// for a bye, one list per round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonRecord {
    /// Roster, in index order.
    pub players: Vec<Participant>,
    /// Season parameters.
    #[serde(flatten)]
    pub config: SeasonConfig,
    /// Pairings per round.
    pub schedule: Vec<Vec<Pairing>>,
}

impl Season {
    /// Validates the input and generates the initial schedule.
    ///
    /// # Errors
    /// - `InvalidConfiguration` with every validation problem found
    /// - `ScheduleGeneration` if some date has no feasible round
    pub fn generate<R: Rng + ?Sized>(
        participants: impl Into<Arc<[Participant]>>,
        config: SeasonConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let participants = participants.into();
        validate_input(&participants, &config).map_err(ScheduleError::InvalidConfiguration)?;

        let dates = config.dates();
        let schedule = generate_schedule(&dates, config.courts, participants, rng)?;

        info!(
            event = "season_generated",
            participants = schedule.participants().len(),
            dates = dates.len(),
            courts = config.courts,
            fixed_rounds = ?schedule.fixed_rounds(),
        );

        Ok(Self {
            config,
            dates,
            schedule,
        })
    }

    /// Generates a season from a settings document.
    pub fn from_settings<R: Rng + ?Sized>(settings: SeasonSettings, rng: &mut R) -> Result<Self> {
        let (participants, config) = settings.into_parts();
        Self::generate(participants, config, rng)
    }

    /// Season parameters.
    pub fn config(&self) -> &SeasonConfig {
        &self.config
    }

    /// Play dates, one per round.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// The schedule, for callers running their own search.
    pub fn schedule_mut(&mut self) -> &mut Schedule {
        &mut self.schedule
    }

    /// Roster.
    pub fn participants(&self) -> &[Participant] {
        self.schedule.participants()
    }

    /// Indices of rounds excluded from optimization.
    pub fn fixed_rounds(&self) -> Vec<usize> {
        self.schedule.fixed_rounds()
    }

    /// Optimizes the schedule against the default fairness objective.
    pub fn optimize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> OptimizationOutcome {
        self.optimize_with(&Optimizer::new(FairnessObjective::new()), rng)
    }

    /// Optimizes the schedule with a configured optimizer.
    pub fn optimize_with<O: Objective, R: Rng + ?Sized>(
        &mut self,
        optimizer: &Optimizer<O>,
        rng: &mut R,
    ) -> OptimizationOutcome {
        optimizer.run(&mut self.schedule, rng)
    }

    /// Score under the default fairness objective.
    pub fn score(&self) -> f64 {
        FairnessObjective::new().evaluate(&self.schedule)
    }

    /// Every term of the default fairness objective.
    pub fn breakdown(&self) -> ScoreBreakdown {
        FairnessObjective::new().breakdown(&self.schedule)
    }

    /// Exporter view of the season.
    pub fn report(&self) -> SeasonReport {
        SeasonReport::build(self)
    }

    /// Persisted form of the season.
    pub fn to_record(&self) -> SeasonRecord {
        SeasonRecord {
            players: self.participants().to_vec(),
            config: self.config.clone(),
            schedule: self
                .schedule
                .rounds()
                .iter()
                .map(|r| r.pairings().to_vec())
                .collect(),
        }
    }

    /// Restores a season from its persisted form.
    ///
    /// # Errors
    /// - `InvalidConfiguration` if roster or parameters fail validation
    /// - `InvalidRecord` if the round count does not match the dates
    /// - `InvalidRound` if a stored round breaks a round invariant
    pub fn from_record(record: SeasonRecord) -> Result<Self> {
        let SeasonRecord {
            players,
            config,
            schedule,
        } = record;
        validate_input(&players, &config).map_err(ScheduleError::InvalidConfiguration)?;

        let dates = config.dates();
        if dates.len() != schedule.len() {
            return Err(ScheduleError::InvalidRecord(format!(
                "{} rounds stored for {} dates",
                schedule.len(),
                dates.len()
            )));
        }

        let participants: Arc<[Participant]> = players.into();
        let rounds = dates
            .iter()
            .zip(schedule)
            .map(|(&date, pairings)| Round::new(date, config.courts, pairings, &participants))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            config,
            dates,
            schedule: Schedule::new(participants, rounds),
        })
    }

    /// Serializes the persisted form to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_record())?)
    }

    /// Restores a season from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: SeasonRecord = serde_json::from_str(json)?;
        Self::from_record(record)
    }
}
