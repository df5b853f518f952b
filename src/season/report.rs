//! Exporter view of a season.
//!
//! Flattens the schedule into plain, serializable rows and derives the
//! per-participant tallies exporters need for cost allocation.
//!
//! | Field | Definition |
//! |-------|-----------|
//! | `rounds_played` | Rounds in which the participant has a pairing (byes included) |
//! | `match_count` | `courts × rounds_played` |
//! | `cost_share` | `overall_cost × match_count / Σ match_count`, 0 if nobody plays |

use chrono::NaiveDate;
use serde::Serialize;

use super::Season;
use crate::models::Pairing;
use crate::scoring::ScoreBreakdown;

/// Everything an exporter needs about a finished season.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonReport {
    /// Calendar title.
    pub title: String,
    /// Rounds in date order.
    pub rounds: Vec<RoundReport>,
    /// Final score.
    pub score: f64,
    /// Terms of the final score.
    pub breakdown: ScoreBreakdown,
    /// One tally per participant, in roster order.
    pub participants: Vec<ParticipantTally>,
}

/// One round of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundReport {
    /// Date of play.
    pub date: NaiveDate,
    /// Whether the round was excluded from optimization.
    pub fixed: bool,
    /// Pairings by participant index.
    pub pairings: Vec<Pairing>,
    /// Pairings by name, e.g. `"Max vs Ida"`.
    pub matches: Vec<String>,
}

/// Participation of one participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantTally {
    /// Participant name.
    pub name: String,
    /// Rounds with a pairing for this participant.
    pub rounds_played: usize,
    /// `courts × rounds_played`.
    pub match_count: usize,
    /// Part of the overall cost.
    pub cost_share: f64,
}

impl SeasonReport {
    pub(super) fn build(season: &Season) -> Self {
        let schedule = season.schedule();
        let participants = schedule.participants();
        let courts = season.config().courts;

        let rounds = schedule
            .rounds()
            .iter()
            .map(|round| RoundReport {
                date: round.date(),
                fixed: round.is_fixed(),
                pairings: round.pairings().to_vec(),
                matches: round
                    .pairings()
                    .iter()
                    .map(|p| p.describe(participants))
                    .collect(),
            })
            .collect();

        let played: Vec<usize> = (0..participants.len())
            .map(|p| schedule.rounds().iter().filter(|r| r.plays(p)).count())
            .collect();
        let total_matches: usize = played.iter().map(|r| r * courts).sum();

        let tallies = participants
            .iter()
            .zip(&played)
            .map(|(participant, &rounds_played)| {
                let match_count = courts * rounds_played;
                let cost_share = if total_matches == 0 {
                    0.0
                } else {
                    season.config().overall_cost * match_count as f64 / total_matches as f64
                };
                ParticipantTally {
                    name: participant.name().to_string(),
                    rounds_played,
                    match_count,
                    cost_share,
                }
            })
            .collect();

        let breakdown = season.breakdown();
        Self {
            title: season.config().calendar.title.clone(),
            rounds,
            score: breakdown.total,
            breakdown,
            participants: tallies,
        }
    }

    /// Serializes the report to JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Participant;
    use crate::season::SeasonConfig;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn season(cost: f64) -> Season {
        let roster = vec![
            Participant::new("Max"),
            Participant::new("Peter"),
            Participant::new("Ida").with_unavailable(d("2024-01-08")),
        ];
        let config = SeasonConfig::new(d("2024-01-01"), d("2024-01-15"), 1).with_overall_cost(cost);
        Season::generate(roster, config, &mut SmallRng::seed_from_u64(4)).unwrap()
    }

    #[test]
    fn test_rounds_mirror_schedule() {
        let s = season(60.0);
        let report = s.report();
        assert_eq!(report.title, "Tennisabo");
        assert_eq!(report.rounds.len(), 3);
        assert_eq!(report.rounds[1].date, d("2024-01-08"));
        // only Max and Peter are free on the second date
        assert_eq!(report.rounds[1].matches, vec!["Max vs Peter".to_string()]);
        assert!(report.rounds.iter().all(|r| !r.fixed));
        assert_eq!(report.score, s.score());
    }

    #[test]
    fn test_tallies_and_cost_shares() {
        let report = season(60.0).report();
        let played: usize = report.participants.iter().map(|t| t.rounds_played).sum();
        // three one-court rounds, two players each
        assert_eq!(played, 6);
        for tally in &report.participants {
            assert_eq!(tally.match_count, tally.rounds_played);
            assert!((tally.cost_share - 60.0 * tally.match_count as f64 / 6.0).abs() < 1e-9);
        }
        let total: f64 = report.participants.iter().map(|t| t.cost_share).sum();
        assert!((total - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_cost() {
        let report = season(0.0).report();
        assert!(report.participants.iter().all(|t| t.cost_share == 0.0));
    }

    #[test]
    fn test_report_json() {
        let json = season(30.0).report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rounds"][1]["date"], "2024-01-08");
        assert_eq!(value["participants"][0]["name"], "Max");
        assert!(value["breakdown"]["total"].is_number());
    }
}
