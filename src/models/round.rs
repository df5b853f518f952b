//! Round model.
//!
//! A round is every pairing played on one date. It is valid iff:
//! - every participant appears in at most one pairing,
//! - no participant plays on a date they marked unavailable,
//! - it has no more pairings than courts, and
//! - a full round stays full: exactly `courts` real pairings.
//!
//! Rounds with fewer eligible participants than courts need are built as
//! partial rounds. Partial rounds are fixed: every mutating operation
//! refuses to touch them.
//!
//! Mutations are tentative. They write the change, re-validate the whole
//! round, and restore the previous pairings when the result is invalid.
//! A rejected mutation returns `false` and leaves the round unchanged.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::{Pairing, Participant};
use crate::error::{Result, ScheduleError};

/// All pairings of one date.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    date: NaiveDate,
    courts: usize,
    pairings: Vec<Pairing>,
    /// Availability on `date`, indexed by participant.
    available: Vec<bool>,
    partial: bool,
}

impl Round {
    /// Creates a round after validating it against the roster.
    ///
    /// The round is partial (and thus fixed) unless it holds exactly
    /// `courts` pairings without a bye.
    ///
    /// # Errors
    /// `ScheduleError::InvalidRound` naming the broken invariant.
    pub fn new(
        date: NaiveDate,
        courts: usize,
        pairings: Vec<Pairing>,
        participants: &[Participant],
    ) -> Result<Self> {
        let available: Vec<bool> = participants.iter().map(|p| p.is_available(date)).collect();

        if let Err(reason) = check_pairings(&pairings, courts, &available, participants) {
            return Err(ScheduleError::InvalidRound { date, reason });
        }

        let partial = !is_full(&pairings, courts);
        Ok(Self {
            date,
            courts,
            pairings,
            available,
            partial,
        })
    }

    /// Date of the round.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Target number of pairings.
    #[inline]
    pub fn courts(&self) -> usize {
        self.courts
    }

    /// Pairings in court order.
    pub fn pairings(&self) -> &[Pairing] {
        &self.pairings
    }

    /// Whether the round is partial and therefore excluded from mutation.
    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.partial
    }

    /// Whether every court holds a real pairing.
    pub fn is_full(&self) -> bool {
        is_full(&self.pairings, self.courts)
    }

    /// Real participants playing in this round.
    pub fn participants_present(&self) -> BTreeSet<usize> {
        self.pairings.iter().flat_map(|p| p.participants()).collect()
    }

    /// Whether `participant` plays in this round.
    pub fn plays(&self, participant: usize) -> bool {
        self.pairings.iter().any(|p| p.contains(participant))
    }

    /// Re-checks every invariant.
    pub fn is_valid(&self) -> bool {
        if check_indices(&self.pairings, &self.available).is_err() {
            return false;
        }
        if check_pairings_fast(&self.pairings, self.courts, &self.available).is_err() {
            return false;
        }
        self.partial || self.is_full()
    }

    /// Tentatively puts `pairing` on court `index`.
    ///
    /// Returns `false`, with the previous pairing restored, if the round
    /// becomes invalid. Fixed rounds and out-of-range courts are rejected
    /// without change.
    pub fn replace_pairing_at(&mut self, index: usize, pairing: Pairing) -> bool {
        if self.partial || index >= self.pairings.len() {
            return false;
        }
        let previous = std::mem::replace(&mut self.pairings[index], pairing);
        if self.is_valid() {
            return true;
        }
        self.pairings[index] = previous;
        false
    }

    /// Tentatively exchanges `p` and `q` between courts `first` and `second`.
    ///
    /// One of the two pairings must contain `p` and the other `q`; each
    /// participant moves to the other pairing. Calling it again with the
    /// same arguments undoes the exchange. Returns `false`, leaving the
    /// round unchanged, if the exchange is impossible or invalid.
    pub fn swap_two_participants(&mut self, first: usize, second: usize, p: usize, q: usize) -> bool {
        if self.partial
            || first == second
            || first >= self.pairings.len()
            || second >= self.pairings.len()
            || p == q
        {
            return false;
        }

        let a = self.pairings[first];
        let b = self.pairings[second];
        let exchanged = if a.contains(p) && b.contains(q) {
            (a.replace(p, q), b.replace(q, p))
        } else if a.contains(q) && b.contains(p) {
            (a.replace(q, p), b.replace(p, q))
        } else {
            return false;
        };

        let (new_a, new_b) = match exchanged {
            (Some(Ok(new_a)), Some(Ok(new_b))) => (new_a, new_b),
            _ => return false,
        };

        self.pairings[first] = new_a;
        self.pairings[second] = new_b;
        if self.is_valid() {
            return true;
        }
        self.pairings[first] = a;
        self.pairings[second] = b;
        false
    }

    /// Writes a pairing without validation, returning the previous one.
    ///
    /// Callers must re-validate and restore on failure.
    pub(crate) fn put_pairing(&mut self, index: usize, pairing: Pairing) -> Pairing {
        std::mem::replace(&mut self.pairings[index], pairing)
    }

    pub(crate) fn swap_courts(&mut self, first: usize, second: usize) {
        self.pairings.swap(first, second);
    }
}

fn is_full(pairings: &[Pairing], courts: usize) -> bool {
    pairings.len() == courts && pairings.iter().all(|p| !p.is_bye())
}

fn check_indices(pairings: &[Pairing], available: &[bool]) -> std::result::Result<(), String> {
    match pairings
        .iter()
        .flat_map(|p| p.participants())
        .find(|&i| i >= available.len())
    {
        Some(i) => Err(format!("unknown participant {i}")),
        None => Ok(()),
    }
}

/// Checks duplicates, availability and court count. Indices must be in range.
fn check_pairings_fast(
    pairings: &[Pairing],
    courts: usize,
    available: &[bool],
) -> std::result::Result<(), usize> {
    if pairings.len() > courts {
        return Err(usize::MAX);
    }
    let mut seen = vec![false; available.len()];
    for participant in pairings.iter().flat_map(|p| p.participants()) {
        if seen[participant] || !available[participant] {
            return Err(participant);
        }
        seen[participant] = true;
    }
    Ok(())
}

fn check_pairings(
    pairings: &[Pairing],
    courts: usize,
    available: &[bool],
    participants: &[Participant],
) -> std::result::Result<(), String> {
    check_indices(pairings, available)?;
    if pairings.len() > courts {
        return Err(format!(
            "{} pairings exceed {courts} courts",
            pairings.len()
        ));
    }
    let mut seen = vec![false; available.len()];
    for participant in pairings.iter().flat_map(|p| p.participants()) {
        let name = participants[participant].name();
        if seen[participant] {
            return Err(format!("{name} appears in more than one pairing"));
        }
        if !available[participant] {
            return Err(format!("{name} is unavailable"));
        }
        seen[participant] = true;
    }
    Ok(())
}
