//! Independent restarts of the generate-then-optimize pipeline.
//!
//! Each start builds its own season from the shared, immutable roster and
//! configuration, seeded with `seed + start index`, and optimizes it to a
//! local optimum. Starts share no mutable state; the best season is picked
//! once all of them have finished.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::info;

use super::{OptimizationOutcome, Optimizer};
use crate::error::Result;
use crate::models::Participant;
use crate::scoring::{FairnessObjective, Objective};
use crate::season::{Season, SeasonConfig};

/// Multi-start parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiStartConfig {
    /// Number of independent starts (at least 1).
    pub starts: usize,
    /// Seed of the first start; start `i` uses `seed + i`.
    pub seed: u64,
    /// Run starts on the rayon thread pool.
    pub parallel: bool,
}

impl Default for MultiStartConfig {
    fn default() -> Self {
        Self {
            starts: 4,
            seed: 0,
            parallel: true,
        }
    }
}

impl MultiStartConfig {
    /// Sets the number of starts, clamped to at least 1.
    pub fn with_starts(mut self, starts: usize) -> Self {
        self.starts = starts.max(1);
        self
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables parallel starts.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Best season of a multi-start run.
#[derive(Debug, Clone)]
pub struct MultiStartResult {
    /// Lowest-scoring season.
    pub season: Season,
    /// Optimizer outcome of that season.
    pub outcome: OptimizationOutcome,
    /// Index of the winning start.
    pub start: usize,
    /// Final score of every start, by start index.
    pub scores: Vec<f64>,
}

/// Runs several seeded starts and keeps the best.
#[derive(Debug, Clone)]
pub struct MultiStart<O = FairnessObjective> {
    optimizer: Optimizer<O>,
    config: MultiStartConfig,
}

impl Default for MultiStart {
    fn default() -> Self {
        Self::new(Optimizer::default(), MultiStartConfig::default())
    }
}

impl<O: Objective + Sync> MultiStart<O> {
    /// Creates a multi-start run.
    pub fn new(optimizer: Optimizer<O>, config: MultiStartConfig) -> Self {
        Self { optimizer, config }
    }

    /// Run parameters.
    pub fn config(&self) -> &MultiStartConfig {
        &self.config
    }

    /// Generates and optimizes every start, returning the lowest score.
    ///
    /// Ties go to the lowest start index.
    ///
    /// # Errors
    /// The first generation error of any start aborts the run.
    pub fn run(
        &self,
        participants: impl Into<Arc<[Participant]>>,
        season: &SeasonConfig,
    ) -> Result<MultiStartResult> {
        let participants = participants.into();
        let starts = self.config.starts.max(1);

        let mut results: Vec<(Season, OptimizationOutcome)> = if self.config.parallel {
            (0..starts)
                .into_par_iter()
                .map(|index| self.run_start(index, &participants, season))
                .collect::<Result<_>>()?
        } else {
            (0..starts)
                .map(|index| self.run_start(index, &participants, season))
                .collect::<Result<_>>()?
        };

        let scores: Vec<f64> = results.iter().map(|(_, o)| o.final_score).collect();
        let best = scores
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap_or(0);

        info!(
            event = "multistart_end",
            starts,
            best_start = best,
            best_score = scores[best],
        );

        let (season, outcome) = results.swap_remove(best);
        Ok(MultiStartResult {
            season,
            outcome,
            start: best,
            scores,
        })
    }

    fn run_start(
        &self,
        index: usize,
        participants: &Arc<[Participant]>,
        config: &SeasonConfig,
    ) -> Result<(Season, OptimizationOutcome)> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed.wrapping_add(index as u64));
        let mut season = Season::generate(Arc::clone(participants), config.clone(), &mut rng)?;
        let outcome = season.optimize_with(&self.optimizer, &mut rng);
        info!(event = "start_end", start = index, score = outcome.final_score);
        Ok((season, outcome))
    }
}
