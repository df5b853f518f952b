//! Local-search optimization of a schedule.
//!
//! Hill climbing over three neighborhoods, swept in a fixed order on every
//! pass:
//!
//! 1. **Repair court** ([`moves::repair_courts`]): put any pairing of the
//!    roster on a court.
//! 2. **Intra-round swap** ([`moves::swap_within_rounds`]): exchange two
//!    participants between courts of one round.
//! 3. **Cross-round swap** ([`moves::swap_across_rounds`]): exchange the
//!    pairings of two courts, visiting candidates in random order.
//!
//! Only strict improvements are kept. The search stops after a pass in
//! which no neighborhood accepted a move, i.e. at a local optimum of all
//! three neighborhoods. Every accepted move strictly lowers a score that is
//! bounded below by zero, so the search terminates without an iteration cap.
//!
//! The search mutates the schedule in place and is single-threaded. For
//! several independent restarts see [`MultiStart`].
//!
//! # Reference
//! Hansen & Mladenović (2001), "Variable neighborhood search: Principles
//! and applications"

pub mod moves;
mod multistart;

pub use multistart::{MultiStart, MultiStartConfig, MultiStartResult};

use rand::Rng;
use tracing::info;

use crate::models::Schedule;
use crate::scoring::{FairnessObjective, Objective};

/// Neighborhood of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Move A: new pairing on a court.
    RepairCourt,
    /// Move B: participant exchange inside a round.
    IntraRoundSwap,
    /// Move C: pairing exchange between two courts.
    CrossRoundSwap,
}

/// Accepted moves per neighborhood.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveCounts {
    /// Accepted repair-court moves.
    pub repair_court: usize,
    /// Accepted intra-round swaps.
    pub intra_round_swap: usize,
    /// Accepted cross-round swaps.
    pub cross_round_swap: usize,
}

impl MoveCounts {
    /// Accepted moves of all kinds.
    pub fn total(&self) -> usize {
        self.repair_court + self.intra_round_swap + self.cross_round_swap
    }

    fn add(&mut self, other: MoveCounts) {
        self.repair_court += other.repair_court;
        self.intra_round_swap += other.intra_round_swap;
        self.cross_round_swap += other.cross_round_swap;
    }
}

/// Result of an optimizer run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationOutcome {
    /// Score before the first pass.
    pub initial_score: f64,
    /// Score at the local optimum.
    pub final_score: f64,
    /// Passes run, including the final pass without improvement.
    pub passes: usize,
    /// Accepted moves over all passes.
    pub accepted: MoveCounts,
}

/// Hill-climbing optimizer.
///
/// # Example
/// ```no_run
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_matchplan::optimizer::Optimizer;
/// use u_matchplan::models::Schedule;
///
/// # fn demo(schedule: &mut Schedule) {
/// let mut rng = SmallRng::seed_from_u64(42);
/// let outcome = Optimizer::default().run(schedule, &mut rng);
/// assert!(outcome.final_score <= outcome.initial_score);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Optimizer<O = FairnessObjective> {
    objective: O,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(FairnessObjective::new())
    }
}

impl<O: Objective> Optimizer<O> {
    /// Creates an optimizer minimizing `objective`.
    pub fn new(objective: O) -> Self {
        Self { objective }
    }

    /// The objective being minimized.
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Runs passes until one accepts no move.
    pub fn run<R: Rng + ?Sized>(
        &self,
        schedule: &mut Schedule,
        rng: &mut R,
    ) -> OptimizationOutcome {
        let initial_score = self.objective.evaluate(schedule);
        let mut current = initial_score;
        let mut accepted = MoveCounts::default();
        let mut passes = 0;

        info!(
            event = "optimize_start",
            rounds = schedule.len(),
            fixed_rounds = schedule.fixed_rounds().len(),
            score = initial_score,
        );

        loop {
            passes += 1;
            let counts = self.pass(schedule, &mut current, rng);
            accepted.add(counts);
            info!(
                event = "pass_end",
                pass = passes,
                repair_court = counts.repair_court,
                intra_round_swap = counts.intra_round_swap,
                cross_round_swap = counts.cross_round_swap,
                score = current,
            );
            if counts.total() == 0 {
                break;
            }
        }

        info!(
            event = "optimize_end",
            passes,
            accepted = accepted.total(),
            score = current,
        );

        OptimizationOutcome {
            initial_score,
            final_score: current,
            passes,
            accepted,
        }
    }

    /// One sweep of every neighborhood, in order.
    ///
    /// `current` must hold the score of `schedule`; it is kept up to date.
    pub fn pass<R: Rng + ?Sized>(
        &self,
        schedule: &mut Schedule,
        current: &mut f64,
        rng: &mut R,
    ) -> MoveCounts {
        let repair_court = moves::repair_courts(schedule, &self.objective, current);
        let intra_round_swap = moves::swap_within_rounds(schedule, &self.objective, current);
        let cross_round_swap = moves::swap_across_rounds(schedule, &self.objective, current, rng);
        MoveCounts {
            repair_court,
            intra_round_swap,
            cross_round_swap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::generate_schedule;
    use crate::models::Participant;
    use chrono::{Days, NaiveDate};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::sync::Arc;

    fn weekly(count: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        (0..count)
            .map(|i| start + Days::new(7 * i as u64))
            .collect()
    }

    fn roster(n: usize) -> Arc<[Participant]> {
        (0..n).map(|i| Participant::new(format!("P{i}"))).collect()
    }

    fn optimized(
        n: usize,
        courts: usize,
        rounds: usize,
        seed: u64,
    ) -> (Schedule, OptimizationOutcome) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut schedule = generate_schedule(&weekly(rounds), courts, roster(n), &mut rng).unwrap();
        let outcome = Optimizer::default().run(&mut schedule, &mut rng);
        (schedule, outcome)
    }

    fn matches_played(schedule: &Schedule) -> Vec<usize> {
        (0..schedule.participants().len())
            .map(|p| schedule.appearances(p).len())
            .collect()
    }

    #[test]
    fn test_run_never_worsens_and_stays_valid() {
        let (schedule, outcome) = optimized(6, 2, 8, 42);
        assert!(outcome.final_score <= outcome.initial_score);
        assert!(schedule.is_valid());
        assert!(outcome.passes >= 1);
        assert_eq!(outcome.final_score, FairnessObjective::new().evaluate(&schedule));
    }

    #[test]
    fn test_every_pair_meets_after_optimization() {
        let (schedule, _) = optimized(4, 2, 16, 7);
        for p in 0..4 {
            for q in (p + 1)..4 {
                let pairing = crate::models::Pairing::new(p, q).unwrap();
                assert!(!schedule.occurrences(&pairing).is_empty(), "{p} and {q} never meet");
            }
        }
    }

    #[test]
    fn test_equal_participation_with_one_court() {
        let (schedule, _) = optimized(4, 1, 8, 2);
        let played = matches_played(&schedule);
        assert!(played.iter().all(|&c| c == played[0]), "uneven: {played:?}");
    }

    #[test]
    fn test_participation_spread_at_most_one() {
        let (schedule, _) = optimized(5, 2, 10, 3);
        let played = matches_played(&schedule);
        let max = played.iter().max().unwrap();
        let min = played.iter().min().unwrap();
        assert!(max - min <= 1, "spread too large: {played:?}");
    }

    #[test]
    fn test_local_optimum_is_a_fixed_point() {
        let (mut schedule, outcome) = optimized(5, 2, 6, 9);
        let before = schedule.clone();
        let optimizer = Optimizer::default();
        let mut current = outcome.final_score;
        let mut rng = SmallRng::seed_from_u64(1234);

        let counts = optimizer.pass(&mut schedule, &mut current, &mut rng);
        assert_eq!(counts.total(), 0);
        assert_eq!(current, outcome.final_score);
        assert_eq!(schedule, before);
    }

    #[test]
    fn test_fixed_rounds_untouched() {
        let mut participants: Vec<Participant> =
            (0..4).map(|i| Participant::new(format!("P{i}"))).collect();
        let dates = weekly(6);
        participants[3] = Participant::new("P3").with_unavailable(dates[2]);
        let roster: Arc<[Participant]> = participants.into();

        let mut rng = SmallRng::seed_from_u64(21);
        let mut schedule = generate_schedule(&dates, 2, roster, &mut rng).unwrap();
        assert_eq!(schedule.fixed_rounds(), vec![2]);
        let fixed_before = schedule.rounds()[2].clone();

        Optimizer::default().run(&mut schedule, &mut rng);
        assert_eq!(schedule.rounds()[2], fixed_before);
        assert!(schedule.is_valid());
    }

    #[test]
    fn test_custom_objective() {
        // prefer participant 0 never playing
        let objective = |s: &Schedule| s.appearances(0).len() as f64;
        let optimizer = Optimizer::new(objective);
        let mut rng = SmallRng::seed_from_u64(2);
        let mut schedule = generate_schedule(&weekly(5), 1, roster(4), &mut rng).unwrap();
        let outcome = optimizer.run(&mut schedule, &mut rng);
        assert_eq!(outcome.final_score, 0.0);
        assert!(schedule.appearances(0).is_empty());
    }

    #[test]
    fn test_move_counts_total() {
        let counts = MoveCounts {
            repair_court: 2,
            intra_round_swap: 3,
            cross_round_swap: 4,
        };
        assert_eq!(counts.total(), 9);
    }
}
