//! Participant model.
//!
//! A participant is an entry of the season roster: a unique name, the
//! dates on which they cannot play, and a fairness weight. Weights scale
//! how many matches a participant is expected to play relative to the
//! others (a weight of 2 asks for twice the share of a weight of 1).
//!
//! Participants are immutable once built. Schedules refer to them by their
//! index in the roster.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn default_weight() -> f64 {
    1.0
}

/// A roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    name: String,
    #[serde(rename = "cannot_play", default)]
    unavailable: BTreeSet<NaiveDate>,
    #[serde(default = "default_weight")]
    weight: f64,
}

impl Participant {
    /// Creates a participant who is always available, with weight 1.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unavailable: BTreeSet::new(),
            weight: default_weight(),
        }
    }

    /// Marks a date as unavailable.
    pub fn with_unavailable(mut self, date: NaiveDate) -> Self {
        self.unavailable.insert(date);
        self
    }

    /// Marks several dates as unavailable.
    pub fn with_unavailable_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.unavailable.extend(dates);
        self
    }

    /// Sets the fairness weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fairness weight.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Dates on which this participant cannot play.
    pub fn unavailable_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.unavailable
    }

    /// Whether this participant can play on `date`.
    #[inline]
    pub fn is_available(&self, date: NaiveDate) -> bool {
        !self.unavailable.contains(&date)
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_participant_defaults() {
        let p = Participant::new("Max");
        assert_eq!(p.name(), "Max");
        assert_eq!(p.weight(), 1.0);
        assert!(p.unavailable_dates().is_empty());
        assert!(p.is_available(d("2024-01-01")));
    }

    #[test]
    fn test_participant_unavailability() {
        let p = Participant::new("Peter")
            .with_unavailable(d("2024-01-08"))
            .with_unavailable_dates([d("2024-01-15"), d("2024-01-08")]);
        assert_eq!(p.unavailable_dates().len(), 2);
        assert!(!p.is_available(d("2024-01-08")));
        assert!(p.is_available(d("2024-01-01")));
    }

    #[test]
    fn test_participant_json_layout() {
        let json = r#"{"name": "Ida", "cannot_play": ["2024-01-01"], "weight": 2}"#;
        let p: Participant = serde_json::from_str(json).unwrap();
        assert_eq!(p.name(), "Ida");
        assert_eq!(p.weight(), 2.0);
        assert!(!p.is_available(d("2024-01-01")));

        let without_weight: Participant = serde_json::from_str(r#"{"name": "Bob"}"#).unwrap();
        assert_eq!(without_weight.weight(), 1.0);
    }
}
