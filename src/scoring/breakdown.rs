//! Objective term computation.
//!
//! Builds per-pair and per-participant tallies in one pass over the
//! schedule, then reduces them into the four terms.
//!
//! # Reference
//! Population standard deviation: σ = sqrt(E[x²] − E[x]²), computed with
//! the two-pass formula for stability.

use serde::Serialize;

use super::ScoreWeights;
use crate::models::Schedule;

/// Every objective term of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// σ of weighted meetings per pair (unscaled).
    pub opponent_balance: f64,
    /// σ of weighted rounds played per participant (unscaled).
    pub participation_balance: f64,
    /// Σ over pairs of the σ of gaps between meetings.
    pub encounter_spacing: f64,
    /// Σ over participants of the σ of gaps between rounds played.
    pub participation_spacing: f64,
    /// `rounds · (opponent + participation) + encounter + participation spacing`,
    /// each term multiplied by its weight.
    pub total: f64,
}

impl ScoreBreakdown {
    /// Computes all terms for a schedule.
    pub fn calculate(schedule: &Schedule, weights: &ScoreWeights) -> Self {
        let tally = Tally::collect(schedule);
        let n = schedule.participants().len();
        let season_len = schedule.len();
        let weight = |p: usize| schedule.participants()[p].weight();

        let mut weighted_meetings = Vec::with_capacity(tally.pair_rounds.len());
        for p in 0..n {
            for q in (p + 1)..n {
                let meetings = tally.pair_rounds[tally.pair_index(p, q)].len() as f64;
                weighted_meetings.push(meetings / (weight(p) * weight(q)));
            }
        }
        let opponent_balance = population_std(&weighted_meetings);

        let weighted_played: Vec<f64> = tally
            .participant_rounds
            .iter()
            .enumerate()
            .map(|(p, rounds)| rounds.len() as f64 / weight(p))
            .collect();
        let participation_balance = population_std(&weighted_played);

        let encounter_spacing: f64 = tally
            .pair_rounds
            .iter()
            .map(|rounds| gap_spread(rounds, season_len))
            .sum();
        let participation_spacing: f64 = tally
            .participant_rounds
            .iter()
            .map(|rounds| gap_spread(rounds, season_len))
            .sum();

        let scale = season_len as f64;
        let total = weights.opponent_balance * scale * opponent_balance
            + weights.participation_balance * scale * participation_balance
            + weights.encounter_spacing * encounter_spacing
            + weights.participation_spacing * participation_spacing;

        Self {
            opponent_balance,
            participation_balance,
            encounter_spacing,
            participation_spacing,
            total,
        }
    }
}

/// Round indices per pair (upper triangle, row-major) and per participant.
///
/// Index lists are ascending because rounds are visited in order.
struct Tally {
    n: usize,
    pair_rounds: Vec<Vec<usize>>,
    participant_rounds: Vec<Vec<usize>>,
}

impl Tally {
    fn collect(schedule: &Schedule) -> Self {
        let n = schedule.participants().len();
        let mut tally = Self {
            n,
            pair_rounds: vec![Vec::new(); n * n.saturating_sub(1) / 2],
            participant_rounds: vec![Vec::new(); n],
        };

        for (round_index, round) in schedule.rounds().iter().enumerate() {
            for pairing in round.pairings() {
                for p in pairing.participants() {
                    tally.participant_rounds[p].push(round_index);
                }
                if let Some(second) = pairing.second() {
                    let index = tally.pair_index(pairing.first(), second);
                    tally.pair_rounds[index].push(round_index);
                }
            }
        }
        tally
    }

    /// Position of pair `(p, q)`, `p < q`, in the upper triangle.
    #[inline]
    fn pair_index(&self, p: usize, q: usize) -> usize {
        p * self.n - p * (p + 1) / 2 + (q - p - 1)
    }
}

/// σ of the gaps between occurrences, including both season boundaries.
///
/// Occurring at most once yields the season length.
fn gap_spread(rounds: &[usize], season_len: usize) -> f64 {
    let (first, last) = match rounds {
        [first, .., last] => (*first, *last),
        _ => return season_len as f64,
    };
    let mut gaps: Vec<f64> = rounds
        .windows(2)
        .map(|w| (w[1] - w[0]) as f64)
        .collect();
    gaps.push(first as f64);
    gaps.push(season_len.saturating_sub(last) as f64);
    population_std(&gaps)
}

/// Population standard deviation; 0 for an empty slice.
fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}
