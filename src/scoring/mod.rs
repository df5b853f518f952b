//! Schedule objective.
//!
//! Scores a schedule by how evenly it spreads opponents and playing time.
//! Lower is better; the value only has meaning relative to other
//! schedules of the same season.
//!
//! Scoring is a pure function of the schedule and its roster. It never
//! draws random numbers.
//!
//! # Terms
//!
//! | Term | Definition | Multiplier |
//! |------|------------|------------|
//! | Opponent balance | σ over all pairs of meetings / (w_p · w_q) | rounds |
//! | Participation balance | σ over participants of rounds played / w_p | rounds |
//! | Encounter spacing | Σ over pairs of σ of gaps between meetings | 1 |
//! | Participation spacing | Σ over participants of σ of gaps between rounds played | 1 |
//!
//! σ is the population standard deviation. Gap lists include the gap from
//! the season start to the first occurrence and from the last occurrence to
//! the season end. An entity occurring at most once scores the season length.

mod breakdown;

pub use breakdown::ScoreBreakdown;

use crate::models::Schedule;

/// A function to minimize over schedules.
pub trait Objective {
    /// Scores a schedule. Lower is better.
    fn evaluate(&self, schedule: &Schedule) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&Schedule) -> f64,
{
    fn evaluate(&self, schedule: &Schedule) -> f64 {
        self(schedule)
    }
}

/// Multipliers applied on top of the fixed term scaling.
///
/// The defaults (all 1.0) give the plain objective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Weight of opponent balance.
    pub opponent_balance: f64,
    /// Weight of participation balance.
    pub participation_balance: f64,
    /// Weight of encounter spacing.
    pub encounter_spacing: f64,
    /// Weight of participation spacing.
    pub participation_spacing: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            opponent_balance: 1.0,
            participation_balance: 1.0,
            encounter_spacing: 1.0,
            participation_spacing: 1.0,
        }
    }
}

impl ScoreWeights {
    /// Sets the opponent balance weight.
    pub fn with_opponent_balance(mut self, weight: f64) -> Self {
        self.opponent_balance = weight.max(0.0);
        self
    }

    /// Sets the participation balance weight.
    pub fn with_participation_balance(mut self, weight: f64) -> Self {
        self.participation_balance = weight.max(0.0);
        self
    }

    /// Sets the encounter spacing weight.
    pub fn with_encounter_spacing(mut self, weight: f64) -> Self {
        self.encounter_spacing = weight.max(0.0);
        self
    }

    /// Sets the participation spacing weight.
    pub fn with_participation_spacing(mut self, weight: f64) -> Self {
        self.participation_spacing = weight.max(0.0);
        self
    }
}

/// The fairness-and-spacing objective.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FairnessObjective {
    /// Term weights.
    pub weights: ScoreWeights,
}

impl FairnessObjective {
    /// Creates the objective with default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the term weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Computes every term and the weighted total.
    pub fn breakdown(&self, schedule: &Schedule) -> ScoreBreakdown {
        ScoreBreakdown::calculate(schedule, &self.weights)
    }
}

impl Objective for FairnessObjective {
    fn evaluate(&self, schedule: &Schedule) -> f64 {
        self.breakdown(schedule).total
    }
}
