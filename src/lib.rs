//! Fair round-robin match planning.
//!
//! Plans a season of recurring matches on a fixed number of courts: who
//! plays whom on which date, so that every participant plays about as
//! often as their weight asks for, meets every other participant about
//! equally often, and plays at evenly spaced dates.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Participant`, `Pairing`, `Round`, `Schedule`
//! - **`generation`**: Random feasible initial rounds (full or partial with byes)
//! - **`scoring`**: The fairness objective and its per-term breakdown
//! - **`optimizer`**: Hill climbing over three move neighborhoods, multi-start
//! - **`season`**: Dates, configuration, persisted record, exporter report
//! - **`validation`**: Input integrity checks (roster, dates, courts)
//! - **`error`**: Construction-time errors
//!
//! # Example
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use u_matchplan::season::{Season, SeasonSettings};
//!
//! # fn main() -> u_matchplan::error::Result<()> {
//! # let json = "";
//! let settings = SeasonSettings::from_json(json)?;
//! let mut rng = SmallRng::seed_from_u64(7);
//! let mut season = Season::from_settings(settings, &mut rng)?;
//! season.optimize(&mut rng);
//! println!("{}", season.report().to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! # References
//!
//! - Hansen & Mladenović (2001), "Variable neighborhood search"
//! - de Werra (1988), "Some models of graphs for scheduling sports competitions"

pub mod error;
pub mod generation;
pub mod models;
pub mod optimizer;
pub mod scoring;
pub mod season;
pub mod validation;

pub use error::{Result, ScheduleError};
pub use models::{Pairing, Participant, Round, Schedule};
pub use optimizer::{MultiStart, MultiStartConfig, OptimizationOutcome, Optimizer};
pub use scoring::{FairnessObjective, Objective, ScoreBreakdown, ScoreWeights};
pub use season::{Season, SeasonConfig, SeasonReport, SeasonSettings};
