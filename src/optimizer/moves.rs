//! Neighborhoods of the local search.
//!
//! Each function sweeps its whole neighborhood once over the schedule and
//! returns the number of accepted moves. A move is kept only if the
//! schedule stays valid and the score strictly decreases; otherwise it is
//! undone before the next candidate is tried. `current` always holds the
//! score of the schedule as it stands.
//!
//! Fixed rounds are skipped by every neighborhood.

use itertools::Itertools;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::MoveKind;
use crate::models::{Pairing, Schedule, Slot};
use crate::scoring::Objective;

/// Move A: try every pairing of the roster on every court.
///
/// Later candidates on a court are compared against the latest accepted
/// pairing, not the original one.
pub fn repair_courts<O: Objective + ?Sized>(
    schedule: &mut Schedule,
    objective: &O,
    current: &mut f64,
) -> usize {
    let n = schedule.participants().len();
    let mut accepted = 0;

    for round in 0..schedule.len() {
        if schedule.rounds()[round].is_fixed() {
            continue;
        }
        for court in 0..schedule.rounds()[round].pairings().len() {
            let slot = (round, court);
            let Some(mut incumbent) = schedule.pairing_at(slot) else {
                continue;
            };
            for (p, q) in (0..n).tuple_combinations() {
                let Ok(candidate) = Pairing::new(p, q) else {
                    continue;
                };
                if candidate == incumbent || !schedule.replace_pairing(slot, candidate) {
                    continue;
                }
                if try_accept(schedule, objective, current, MoveKind::RepairCourt) {
                    accepted += 1;
                    incumbent = candidate;
                } else {
                    let restored = schedule.replace_pairing(slot, incumbent);
                    debug_assert!(restored, "restoring a valid pairing cannot fail");
                }
            }
        }
    }
    accepted
}

/// Move B: exchange one participant of a court with one of another court
/// of the same round.
///
/// First improvement: after an accepted exchange the search moves on to
/// the next pair of courts.
pub fn swap_within_rounds<O: Objective + ?Sized>(
    schedule: &mut Schedule,
    objective: &O,
    current: &mut f64,
) -> usize {
    let mut accepted = 0;

    for round in 0..schedule.len() {
        if schedule.rounds()[round].is_fixed() {
            continue;
        }
        let courts = schedule.rounds()[round].pairings().len();
        for (first, second) in (0..courts).tuple_combinations() {
            let (Some(a), Some(b)) = (
                schedule.pairing_at((round, first)),
                schedule.pairing_at((round, second)),
            ) else {
                continue;
            };

            let exchanges = a.participants().cartesian_product(b.participants().collect_vec());
            for (p, q) in exchanges {
                if !schedule.swap_participants(round, (first, second), p, q) {
                    continue;
                }
                if try_accept(schedule, objective, current, MoveKind::IntraRoundSwap) {
                    accepted += 1;
                    break;
                }
                let restored = schedule.swap_participants(round, (first, second), p, q);
                debug_assert!(restored, "undoing an exchange cannot fail");
            }
        }
    }
    accepted
}

/// Move C: exchange the pairings of two courts anywhere in the schedule.
///
/// Candidates are visited in random order.
pub fn swap_across_rounds<O, R>(
    schedule: &mut Schedule,
    objective: &O,
    current: &mut f64,
    rng: &mut R,
) -> usize
where
    O: Objective + ?Sized,
    R: Rng + ?Sized,
{
    let mut candidates: Vec<(Slot, Slot)> = schedule.slots().into_iter().tuple_combinations().collect();
    candidates.shuffle(rng);

    let mut accepted = 0;
    for (first, second) in candidates {
        if schedule.rounds()[first.0].is_fixed() || schedule.rounds()[second.0].is_fixed() {
            continue;
        }
        if schedule.pairing_at(first) == schedule.pairing_at(second) {
            continue;
        }
        if !schedule.swap_pairings(first, second) {
            continue;
        }
        if try_accept(schedule, objective, current, MoveKind::CrossRoundSwap) {
            accepted += 1;
        } else {
            let restored = schedule.swap_pairings(first, second);
            debug_assert!(restored, "swapping back cannot fail");
        }
    }
    accepted
}

/// Scores the tentatively changed schedule and records a strict improvement.
fn try_accept<O: Objective + ?Sized>(
    schedule: &Schedule,
    objective: &O,
    current: &mut f64,
    kind: MoveKind,
) -> bool {
    let score = objective.evaluate(schedule);
    if score < *current {
        debug!(?kind, old_score = *current, new_score = score, "move accepted");
        *current = score;
        true
    } else {
        false
    }
}
