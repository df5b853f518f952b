//! Pairing (match) primitive.
//!
//! A pairing is two distinct participant indices, or one participant with
//! a bye. The smaller index is always stored first, so `(a, b)` and
//! `(b, a)` are the same value for equality, ordering and hashing.
//!
//! # Wire format
//! Serialized as a two-element array: `[a, b]` for a match and `[a, null]`
//! for a bye.

use serde::{Deserialize, Serialize};

use super::Participant;
use crate::error::{Result, ScheduleError};

/// A canonical pairing of two participants, or one participant and a bye.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(usize, Option<usize>)", into = "(usize, Option<usize>)")]
pub struct Pairing {
    first: usize,
    second: Option<usize>,
}

impl Pairing {
    /// Pairs two participants.
    ///
    /// # Errors
    /// `ScheduleError::InvalidPairing` if `a == b`.
    pub fn new(a: usize, b: usize) -> Result<Self> {
        if a == b {
            return Err(ScheduleError::InvalidPairing { participant: a });
        }
        Ok(Self {
            first: a.min(b),
            second: Some(a.max(b)),
        })
    }

    /// A participant without an opponent.
    pub fn bye(participant: usize) -> Self {
        Self {
            first: participant,
            second: None,
        }
    }

    /// Whether this pairing is a bye.
    #[inline]
    pub fn is_bye(&self) -> bool {
        self.second.is_none()
    }

    /// The smaller participant index (the only one for a bye).
    #[inline]
    pub fn first(&self) -> usize {
        self.first
    }

    /// The larger participant index, `None` for a bye.
    #[inline]
    pub fn second(&self) -> Option<usize> {
        self.second
    }

    /// Real participants of this pairing (one element for a bye).
    pub fn participants(&self) -> impl Iterator<Item = usize> {
        std::iter::once(self.first).chain(self.second)
    }

    /// Whether `participant` is part of this pairing.
    #[inline]
    pub fn contains(&self, participant: usize) -> bool {
        self.first == participant || self.second == Some(participant)
    }

    /// The opponent of `participant`, if they play in this pairing and it is no bye.
    pub fn opponent_of(&self, participant: usize) -> Option<usize> {
        match self.second {
            Some(second) if self.first == participant => Some(second),
            Some(second) if second == participant => Some(self.first),
            _ => None,
        }
    }

    /// Substitutes `old` by `new`.
    ///
    /// Returns `None` if `old` is not part of this pairing.
    ///
    /// # Errors
    /// `ScheduleError::InvalidPairing` if the substitution pairs `new` with themself.
    pub fn replace(&self, old: usize, new: usize) -> Option<Result<Self>> {
        if !self.contains(old) {
            return None;
        }
        let result = match self.second {
            None => Ok(Self::bye(new)),
            Some(second) => {
                let other = if self.first == old { second } else { self.first };
                Self::new(new, other)
            }
        };
        Some(result)
    }

    /// Human-readable form, `"A vs B"` or `"A vs ..."` for a bye.
    pub fn describe(&self, participants: &[Participant]) -> String {
        let name = |i: usize| {
            participants
                .get(i)
                .map(|p| p.name().to_string())
                .unwrap_or_else(|| format!("#{i}"))
        };
        match self.second {
            Some(second) => format!("{} vs {}", name(self.first), name(second)),
            None => format!("{} vs ...", name(self.first)),
        }
    }
}

impl TryFrom<(usize, Option<usize>)> for Pairing {
    type Error = ScheduleError;

    fn try_from((a, b): (usize, Option<usize>)) -> Result<Self> {
        match b {
            Some(b) => Self::new(a, b),
            None => Ok(Self::bye(a)),
        }
    }
}

impl From<Pairing> for (usize, Option<usize>) {
    fn from(pairing: Pairing) -> Self {
        (pairing.first, pairing.second)
    }
}

/// Whether `candidate` shares no participant with any of `existing`.
///
/// This is the admission rule for building a round and for checking it.
pub fn can_extend(existing: &[Pairing], candidate: &Pairing) -> bool {
    !existing
        .iter()
        .any(|pairing| candidate.participants().any(|p| pairing.contains(p)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_self_pairing_rejected() {
        for a in 0..5 {
            assert!(matches!(
                Pairing::new(a, a),
                Err(ScheduleError::InvalidPairing { participant }) if participant == a
            ));
        }
    }

    #[test]
    fn test_pairing_is_canonical() {
        let ab = Pairing::new(3, 1).unwrap();
        let ba = Pairing::new(1, 3).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.first(), 1);
        assert_eq!(ab.second(), Some(3));

        let set: HashSet<Pairing> = [ab, ba].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_bye_pairing() {
        let bye = Pairing::bye(4);
        assert!(bye.is_bye());
        assert_eq!(bye.participants().collect::<Vec<_>>(), vec![4]);
        assert_eq!(bye.opponent_of(4), None);
        assert!(bye.contains(4));
    }

    #[test]
    fn test_participants_and_opponent() {
        let p = Pairing::new(2, 0).unwrap();
        assert_eq!(p.participants().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(p.opponent_of(0), Some(2));
        assert_eq!(p.opponent_of(2), Some(0));
        assert_eq!(p.opponent_of(1), None);
    }

    #[test]
    fn test_replace() {
        let p = Pairing::new(0, 1).unwrap();
        assert_eq!(p.replace(1, 5).unwrap().unwrap(), Pairing::new(0, 5).unwrap());
        assert!(p.replace(7, 5).is_none());
        assert!(p.replace(1, 0).unwrap().is_err());
        assert_eq!(Pairing::bye(2).replace(2, 3).unwrap().unwrap(), Pairing::bye(3));
    }

    #[test]
    fn test_can_extend() {
        let existing = vec![Pairing::new(0, 1).unwrap(), Pairing::new(2, 3).unwrap()];
        assert!(can_extend(&existing, &Pairing::new(4, 5).unwrap()));
        assert!(!can_extend(&existing, &Pairing::new(1, 4).unwrap()));
        assert!(!can_extend(&existing, &Pairing::bye(3)));
        assert!(can_extend(&[], &Pairing::new(0, 1).unwrap()));
    }

    #[test]
    fn test_describe() {
        let roster = vec![Participant::new("Max"), Participant::new("Ida")];
        assert_eq!(Pairing::new(1, 0).unwrap().describe(&roster), "Max vs Ida");
        assert_eq!(Pairing::bye(1).describe(&roster), "Ida vs ...");
    }

    #[test]
    fn test_wire_format() {
        let p = Pairing::new(2, 1).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1,2]");
        assert_eq!(serde_json::to_string(&Pairing::bye(3)).unwrap(), "[3,null]");

        let parsed: Pairing = serde_json::from_str("[5,4]").unwrap();
        assert_eq!(parsed, Pairing::new(4, 5).unwrap());
        assert!(serde_json::from_str::<Pairing>("[4,4]").is_err());
    }
}
