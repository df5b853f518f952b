//! Season parameters and the settings document they are loaded from.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Participant;

/// Calendar metadata carried through for exporters.
///
/// Not used by generation or scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarSettings {
    /// Event title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Start time of play.
    #[serde(default = "default_time_start")]
    pub time_start: NaiveTime,
    /// End time of play.
    #[serde(default = "default_time_end")]
    pub time_end: NaiveTime,
}

fn default_title() -> String {
    "Tennisabo".to_string()
}

fn default_time_start() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default()
}

fn default_time_end() -> NaiveTime {
    NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default()
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            time_start: default_time_start(),
            time_end: default_time_end(),
        }
    }
}

/// Season parameters.
///
/// Dates run from `start` every `interval_days` days up to and including
/// `end`, skipping `excluded_dates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// First candidate date.
    pub start: NaiveDate,
    /// Last possible date (inclusive).
    pub end: NaiveDate,
    /// Courts (pairings) per round.
    #[serde(rename = "number_courts")]
    pub courts: usize,
    /// Days between consecutive candidate dates.
    #[serde(default = "default_interval_days")]
    pub interval_days: u32,
    /// Dates without play.
    #[serde(default)]
    pub excluded_dates: BTreeSet<NaiveDate>,
    /// Total cost of the season, split by [`SeasonReport`](super::SeasonReport).
    #[serde(default)]
    pub overall_cost: f64,
    /// Calendar metadata.
    #[serde(default)]
    pub calendar: CalendarSettings,
}

fn default_interval_days() -> u32 {
    7
}

impl SeasonConfig {
    /// Creates a weekly season without exclusions or cost.
    pub fn new(start: NaiveDate, end: NaiveDate, courts: usize) -> Self {
        Self {
            start,
            end,
            courts,
            interval_days: default_interval_days(),
            excluded_dates: BTreeSet::new(),
            overall_cost: 0.0,
            calendar: CalendarSettings::default(),
        }
    }

    /// Sets the number of days between dates.
    pub fn with_interval_days(mut self, days: u32) -> Self {
        self.interval_days = days;
        self
    }

    /// Adds a date without play.
    pub fn with_excluded_date(mut self, date: NaiveDate) -> Self {
        self.excluded_dates.insert(date);
        self
    }

    /// Adds several dates without play.
    pub fn with_excluded_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.excluded_dates.extend(dates);
        self
    }

    /// Sets the total cost.
    pub fn with_overall_cost(mut self, cost: f64) -> Self {
        self.overall_cost = cost;
        self
    }

    /// Sets the calendar metadata.
    pub fn with_calendar(mut self, calendar: CalendarSettings) -> Self {
        self.calendar = calendar;
        self
    }

    /// Play dates of the season, ascending.
    ///
    /// Empty if `end < start` or the interval is zero.
    pub fn dates(&self) -> Vec<NaiveDate> {
        if self.interval_days == 0 {
            return Vec::new();
        }
        let step = Days::new(u64::from(self.interval_days));
        std::iter::successors(Some(self.start), |d| d.checked_add_days(step))
            .take_while(|d| *d <= self.end)
            .filter(|d| !self.excluded_dates.contains(d))
            .collect()
    }
}

/// Subscription block of the settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionSettings {
    /// First candidate date.
    pub start: NaiveDate,
    /// Last possible date (inclusive).
    pub end: NaiveDate,
    /// Dates without play.
    #[serde(default)]
    pub excluded_dates: BTreeSet<NaiveDate>,
    /// Courts per round.
    pub number_courts: usize,
    /// Total cost of the season.
    #[serde(default)]
    pub overall_cost: f64,
}

/// Settings document as produced by a configuration loader.
///
/// ```json
/// {
///   "players": [{"name": "Max", "cannot_play": ["2024-01-08"], "weight": 1.0}],
///   "abo": {"start": "2024-01-01", "end": "2024-03-25", "excluded_dates": [],
///           "number_courts": 1, "overall_cost": 300.0},
///   "calendar": {"title": "Tennisabo", "time_start": "18:00:00", "time_end": "20:00:00"}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonSettings {
    /// Roster.
    pub players: Vec<Participant>,
    /// Date range, courts and cost.
    #[serde(rename = "abo")]
    pub subscription: SubscriptionSettings,
    /// Calendar metadata.
    #[serde(default)]
    pub calendar: CalendarSettings,
}

impl SeasonSettings {
    /// Parses a settings document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Splits the document into roster and weekly season parameters.
    pub fn into_parts(self) -> (Vec<Participant>, SeasonConfig) {
        let abo = self.subscription;
        let config = SeasonConfig::new(abo.start, abo.end, abo.number_courts)
            .with_excluded_dates(abo.excluded_dates)
            .with_overall_cost(abo.overall_cost)
            .with_calendar(self.calendar);
        (self.players, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_weekly_dates_inclusive_end() {
        let config = SeasonConfig::new(d("2024-01-01"), d("2024-01-29"), 1);
        assert_eq!(
            config.dates(),
            vec![
                d("2024-01-01"),
                d("2024-01-08"),
                d("2024-01-15"),
                d("2024-01-22"),
                d("2024-01-29"),
            ]
        );
    }

    #[test]
    fn test_excluded_dates_skipped() {
        let config = SeasonConfig::new(d("2024-01-01"), d("2024-01-28"), 1)
            .with_excluded_date(d("2024-01-08"))
            .with_excluded_date(d("2024-01-10"));
        assert_eq!(
            config.dates(),
            vec![d("2024-01-01"), d("2024-01-15"), d("2024-01-22")]
        );
    }

    #[test]
    fn test_custom_interval() {
        let config = SeasonConfig::new(d("2024-01-01"), d("2024-01-10"), 1).with_interval_days(3);
        assert_eq!(
            config.dates(),
            vec![d("2024-01-01"), d("2024-01-04"), d("2024-01-07"), d("2024-01-10")]
        );
    }

    #[test]
    fn test_degenerate_ranges() {
        let single = SeasonConfig::new(d("2024-01-01"), d("2024-01-01"), 1);
        assert_eq!(single.dates(), vec![d("2024-01-01")]);

        let backwards = SeasonConfig::new(d("2024-02-01"), d("2024-01-01"), 1);
        assert!(backwards.dates().is_empty());

        let stalled = single.with_interval_days(0);
        assert!(stalled.dates().is_empty());
    }

    #[test]
    fn test_settings_document() {
        let json = r#"{
            "players": [
                {"name": "Max", "cannot_play": ["2024-01-08"], "weight": 1.0},
                {"name": "Peter", "cannot_play": []},
                {"name": "Ida", "weight": 2.0}
            ],
            "abo": {
                "start": "2024-01-01",
                "end": "2024-01-29",
                "excluded_dates": ["2024-01-15"],
                "number_courts": 1,
                "overall_cost": 300.0
            },
            "calendar": {"title": "Dienstagsabo", "time_start": "19:00:00", "time_end": "21:00:00"}
        }"#;
        let settings = SeasonSettings::from_json(json).unwrap();
        let (players, config) = settings.into_parts();

        assert_eq!(players.len(), 3);
        assert!(!players[0].is_available(d("2024-01-08")));
        assert_eq!(players[2].weight(), 2.0);
        assert_eq!(config.courts, 1);
        assert_eq!(config.interval_days, 7);
        assert_eq!(config.overall_cost, 300.0);
        assert_eq!(config.calendar.title, "Dienstagsabo");
        assert_eq!(config.calendar.time_start, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
        assert_eq!(config.dates().len(), 4);
    }

    #[test]
    fn test_settings_defaults() {
        let json = r#"{
            "players": [{"name": "Max"}],
            "abo": {"start": "2024-01-01", "end": "2024-01-29", "number_courts": 2}
        }"#;
        let (_, config) = SeasonSettings::from_json(json).unwrap().into_parts();
        assert!(config.excluded_dates.is_empty());
        assert_eq!(config.overall_cost, 0.0);
        assert_eq!(config.calendar, CalendarSettings::default());
    }

    #[test]
    fn test_malformed_settings() {
        assert!(SeasonSettings::from_json(r#"{"players": []}"#).is_err());
        assert!(SeasonSettings::from_json("not json").is_err());
    }

    #[test]
    fn test_config_serde_names() {
        let config = SeasonConfig::new(d("2024-01-01"), d("2024-01-29"), 2);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["number_courts"], 2);
        assert_eq!(value["start"], "2024-01-01");
        let back: SeasonConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }
}
