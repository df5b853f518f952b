//! Initial schedule generation.
//!
//! # Algorithm
//!
//! For each date, collect the participants available on it.
//!
//! - **Full round** (at least `2 × courts` eligible): for every court,
//!   shuffle the eligible participants and admit the first two-element
//!   combination that shares nobody with the pairings admitted so far.
//!   Exhausting the combinations is a `RoundGeneration` error.
//! - **Partial round** (fewer eligible): shuffle, pair them two by two and
//!   give the odd one out a bye. The round is fixed for the rest of the
//!   season.
//!
//! All randomness comes from the caller's generator.

use std::sync::Arc;

use chrono::NaiveDate;
use itertools::Itertools;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::error::{Result, ScheduleError};
use crate::models::{Pairing, Participant, Round, Schedule, can_extend};

/// Indices of participants available on `date`.
pub fn eligible_participants(date: NaiveDate, participants: &[Participant]) -> Vec<usize> {
    participants
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_available(date))
        .map(|(i, _)| i)
        .collect()
}

/// Generates one valid round for `date`.
///
/// # Errors
/// `ScheduleError::RoundGeneration` if no full round can be admitted.
pub fn generate_round<R: Rng + ?Sized>(
    date: NaiveDate,
    courts: usize,
    participants: &[Participant],
    rng: &mut R,
) -> Result<Round> {
    let mut eligible = eligible_participants(date, participants);
    let required = courts * 2;

    if eligible.len() < required {
        warn!(
            %date,
            eligible = eligible.len(),
            required,
            "not enough participants, generating partial round"
        );
        return partial_round(date, courts, eligible, participants, rng);
    }

    let mut pairings: Vec<Pairing> = Vec::with_capacity(courts);
    for _ in 0..courts {
        eligible.shuffle(rng);
        let admitted = eligible
            .iter()
            .copied()
            .tuple_combinations()
            .filter_map(|(p, q)| Pairing::new(p, q).ok())
            .find(|candidate| can_extend(&pairings, candidate));
        match admitted {
            Some(pairing) => pairings.push(pairing),
            None => {
                return Err(ScheduleError::RoundGeneration {
                    date,
                    eligible: eligible.len(),
                    required,
                })
            }
        }
    }

    Round::new(date, courts, pairings, participants)
}

fn partial_round<R: Rng + ?Sized>(
    date: NaiveDate,
    courts: usize,
    mut eligible: Vec<usize>,
    participants: &[Participant],
    rng: &mut R,
) -> Result<Round> {
    eligible.shuffle(rng);
    let mut pairings = Vec::with_capacity(eligible.len().div_ceil(2));
    for chunk in eligible.chunks(2) {
        let pairing = match chunk {
            &[p, q] => Pairing::new(p, q)?,
            &[p] => Pairing::bye(p),
            _ => continue,
        };
        pairings.push(pairing);
    }
    Round::new(date, courts, pairings, participants)
}

/// Generates one round per date.
///
/// # Errors
/// `ScheduleError::ScheduleGeneration` wrapping the first round that fails.
pub fn generate_schedule<R: Rng + ?Sized>(
    dates: &[NaiveDate],
    courts: usize,
    participants: Arc<[Participant]>,
    rng: &mut R,
) -> Result<Schedule> {
    let mut rounds = Vec::with_capacity(dates.len());
    for (index, &date) in dates.iter().enumerate() {
        let round = generate_round(date, courts, &participants, rng).map_err(|source| {
            ScheduleError::ScheduleGeneration {
                index,
                date,
                source: Box::new(source),
            }
        })?;
        debug!(%date, pairings = round.pairings().len(), fixed = round.is_fixed(), "round generated");
        rounds.push(round);
    }
    Ok(Schedule::new(participants, rounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn roster(n: usize) -> Vec<Participant> {
        (0..n).map(|i| Participant::new(format!("P{i}"))).collect()
    }

    #[test]
    fn test_eligible_participants() {
        let mut r = roster(3);
        r[1] = Participant::new("P1").with_unavailable(d("2024-01-01"));
        assert_eq!(eligible_participants(d("2024-01-01"), &r), vec![0, 2]);
        assert_eq!(eligible_participants(d("2024-01-08"), &r), vec![0, 1, 2]);
    }

    #[test]
    fn test_full_round_covers_courts() {
        let r = roster(6);
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let round = generate_round(d("2024-01-01"), 3, &r, &mut rng).unwrap();
            assert!(round.is_valid());
            assert!(!round.is_fixed());
            assert_eq!(round.pairings().len(), 3);
            assert_eq!(round.participants_present().len(), 6);
        }
    }

    #[test]
    fn test_full_round_respects_unavailability() {
        let mut r = roster(5);
        r[2] = Participant::new("P2").with_unavailable(d("2024-01-01"));
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let round = generate_round(d("2024-01-01"), 2, &r, &mut rng).unwrap();
            assert!(!round.plays(2));
            assert_eq!(round.participants_present().len(), 4);
        }
    }

    #[test]
    fn test_partial_round_with_bye() {
        let r = roster(3);
        let mut rng = SmallRng::seed_from_u64(1);
        let round = generate_round(d("2024-01-01"), 2, &r, &mut rng).unwrap();
        assert!(round.is_fixed());
        assert!(round.is_valid());
        assert_eq!(round.pairings().len(), 2);
        assert_eq!(round.pairings().iter().filter(|p| p.is_bye()).count(), 1);
        assert_eq!(round.pairings().iter().filter(|p| !p.is_bye()).count(), 1);
        assert_eq!(round.participants_present().len(), 3);
    }

    #[test]
    fn test_partial_round_without_anyone() {
        let r = vec![Participant::new("Solo").with_unavailable(d("2024-01-01"))];
        let mut rng = SmallRng::seed_from_u64(1);
        let round = generate_round(d("2024-01-01"), 1, &r, &mut rng).unwrap();
        assert!(round.is_fixed());
        assert!(round.pairings().is_empty());
    }

    #[test]
    fn test_three_participants_one_court_is_full() {
        let r = roster(3);
        let mut rng = SmallRng::seed_from_u64(3);
        let round = generate_round(d("2024-01-01"), 1, &r, &mut rng).unwrap();
        assert!(!round.is_fixed());
        assert_eq!(round.pairings().len(), 1);
    }

    #[test]
    fn test_generate_schedule() {
        let r: Arc<[Participant]> = roster(4).into();
        let dates = [d("2024-01-01"), d("2024-01-08"), d("2024-01-15")];
        let mut rng = SmallRng::seed_from_u64(42);
        let schedule = generate_schedule(&dates, 2, r, &mut rng).unwrap();
        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule.pairing_count(), 6);
        assert!(schedule.is_valid());
        for round in schedule.rounds() {
            assert_eq!(round.participants_present(), (0..4).collect());
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let r: Arc<[Participant]> = roster(7).into();
        let dates = [d("2024-01-01"), d("2024-01-08")];
        let a = generate_schedule(&dates, 2, Arc::clone(&r), &mut SmallRng::seed_from_u64(9));
        let b = generate_schedule(&dates, 2, r, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a.unwrap(), b.unwrap());
    }
}
