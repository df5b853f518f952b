//! Schedule (solution) model.
//!
//! A schedule is the ordered sequence of rounds of a season together with
//! the roster its pairings refer to. It is valid iff every round is valid.
//!
//! Rounds are owned exclusively by their schedule. The roster is shared
//! read-only (`Arc<[Participant]>`), so independently optimized schedules
//! can refer to the same participants.

use std::sync::Arc;

use super::{Pairing, Participant, Round};

/// Court coordinate: `(round index, court index)`.
pub type Slot = (usize, usize);

/// The rounds of a season and their roster.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    participants: Arc<[Participant]>,
    rounds: Vec<Round>,
}

impl Schedule {
    /// Creates a schedule from rounds built against `participants`.
    pub fn new(participants: Arc<[Participant]>, rounds: Vec<Round>) -> Self {
        Self {
            participants,
            rounds,
        }
    }

    /// The roster.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Shared handle to the roster.
    pub fn shared_participants(&self) -> Arc<[Participant]> {
        Arc::clone(&self.participants)
    }

    /// Rounds in date order.
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Round at `index`.
    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    /// Mutable round at `index`.
    ///
    /// Rounds only expose validated, rolling-back mutations, so handing
    /// them out cannot break the schedule.
    pub fn round_mut(&mut self, index: usize) -> Option<&mut Round> {
        self.rounds.get_mut(index)
    }

    /// Number of rounds.
    #[inline]
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Whether the schedule has no rounds.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Whether every round is valid.
    pub fn is_valid(&self) -> bool {
        self.rounds.iter().all(Round::is_valid)
    }

    /// Indices of fixed (partial) rounds.
    pub fn fixed_rounds(&self) -> Vec<usize> {
        self.rounds
            .iter()
            .enumerate()
            .filter(|(_, r)| r.is_fixed())
            .map(|(i, _)| i)
            .collect()
    }

    /// Every court coordinate of the schedule, in round then court order.
    pub fn slots(&self) -> Vec<Slot> {
        self.rounds
            .iter()
            .enumerate()
            .flat_map(|(i, r)| (0..r.pairings().len()).map(move |c| (i, c)))
            .collect()
    }

    /// Pairing at a court coordinate.
    pub fn pairing_at(&self, (round, court): Slot) -> Option<Pairing> {
        self.rounds.get(round)?.pairings().get(court).copied()
    }

    /// Total number of pairings.
    pub fn pairing_count(&self) -> usize {
        self.rounds.iter().map(|r| r.pairings().len()).sum()
    }

    /// Court coordinates where `participant` plays.
    pub fn appearances(&self, participant: usize) -> Vec<Slot> {
        self.find(|p| p.contains(participant))
    }

    /// Court coordinates where `pairing` is played.
    pub fn occurrences(&self, pairing: &Pairing) -> Vec<Slot> {
        self.find(|p| p == pairing)
    }

    fn find(&self, predicate: impl Fn(&Pairing) -> bool) -> Vec<Slot> {
        self.rounds
            .iter()
            .enumerate()
            .flat_map(|(i, r)| {
                r.pairings()
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| predicate(p))
                    .map(move |(c, _)| (i, c))
            })
            .collect()
    }

    /// Tentatively puts `pairing` at a court coordinate.
    ///
    /// See [`Round::replace_pairing_at`].
    pub fn replace_pairing(&mut self, (round, court): Slot, pairing: Pairing) -> bool {
        self.rounds
            .get_mut(round)
            .is_some_and(|r| r.replace_pairing_at(court, pairing))
    }

    /// Tentatively exchanges `p` and `q` between two courts of one round.
    ///
    /// See [`Round::swap_two_participants`].
    pub fn swap_participants(
        &mut self,
        round: usize,
        courts: (usize, usize),
        p: usize,
        q: usize,
    ) -> bool {
        self.rounds
            .get_mut(round)
            .is_some_and(|r| r.swap_two_participants(courts.0, courts.1, p, q))
    }

    /// Tentatively exchanges the pairings of two court coordinates.
    ///
    /// Returns `false`, with both rounds unchanged, if either round is
    /// fixed, a coordinate is out of range, or either round becomes
    /// invalid.
    pub fn swap_pairings(&mut self, first: Slot, second: Slot) -> bool {
        let (r1, c1) = first;
        let (r2, c2) = second;
        let in_range = |r: usize, c: usize| {
            self.rounds
                .get(r)
                .is_some_and(|round| c < round.pairings().len())
        };
        if !in_range(r1, c1) || !in_range(r2, c2) {
            return false;
        }
        if self.rounds[r1].is_fixed() || self.rounds[r2].is_fixed() {
            return false;
        }

        if r1 == r2 {
            self.rounds[r1].swap_courts(c1, c2);
            return true;
        }

        let a = self.rounds[r1].pairings()[c1];
        let b = self.rounds[r2].pairings()[c2];
        self.rounds[r1].put_pairing(c1, b);
        self.rounds[r2].put_pairing(c2, a);
        if self.rounds[r1].is_valid() && self.rounds[r2].is_valid() {
            return true;
        }
        self.rounds[r1].put_pairing(c1, a);
        self.rounds[r2].put_pairing(c2, b);
        false
    }
}
