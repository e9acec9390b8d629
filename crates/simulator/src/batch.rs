//! Batch runs
//!
//! Runs many independent matches in parallel, one simulator and one strategy per
//! run, and aggregates the score distribution. Runs share nothing but the
//! read-only config, the initializer and the strategy factory.

use crate::action::Strategy;
use crate::config::MatchConfig;
use crate::error::{ConfigError, Result, SimulationError};
use crate::simulator::MatchSimulator;
use crate::status::StatusInitializer;
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a batch of matches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of matches to run
    #[serde(default = "default_runs")]
    pub runs: usize,

    /// Seed of the first run; run `i` uses `base_seed + i`
    #[serde(default = "default_base_seed")]
    pub base_seed: u64,

    /// Worker threads (defaults to rayon's global pool)
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Match shape shared by every run
    #[serde(rename = "match", default)]
    pub match_config: MatchConfig,
}

fn default_runs() -> usize {
    100
}

fn default_base_seed() -> u64 {
    42
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            runs: default_runs(),
            base_seed: default_base_seed(),
            jobs: None,
            match_config: MatchConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.runs == 0 {
            return Err(ConfigError::Invalid("runs must be > 0".to_string()));
        }
        if self.jobs == Some(0) {
            return Err(ConfigError::Invalid("jobs must be > 0".to_string()));
        }
        self.match_config.validate()
    }

    /// Seeds for every run in order
    pub fn seeds(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.runs as u64).map(move |i| self.base_seed.wrapping_add(i))
    }
}

/// Outcome of one run in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub seed: u64,
    pub final_score: f64,
    pub points_auton: f64,
    pub points_teleop: f64,
    pub points_endgame: f64,
    pub samples: usize,
}

/// Summary statistics over a set of scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl ScoreStats {
    pub fn from_scores(scores: &[f64]) -> Self {
        if scores.is_empty() {
            return Self::default();
        }

        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }
}

/// Aggregate results of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub strategy: String,
    pub runs: usize,
    pub base_seed: u64,
    pub total: ScoreStats,
    pub auton: ScoreStats,
    pub teleop: ScoreStats,
    /// Per-run records, best score first
    pub records: Vec<RunRecord>,
}

/// Run `config.runs` independent matches in parallel.
///
/// `factory` builds a fresh strategy for each seed. The first failing run aborts
/// the batch and is reported with its seed.
pub fn run_batch<S, F>(
    config: &BatchConfig,
    initializer: Option<StatusInitializer>,
    factory: F,
) -> Result<BatchReport>
where
    S: Strategy,
    F: Fn(u64) -> S + Sync,
{
    config.validate()?;

    let run_one = |seed: u64| -> Result<(String, RunRecord)> {
        let strategy = factory(seed);
        let mut sim = match &initializer {
            Some(init) => {
                MatchSimulator::with_initializer(config.match_config.clone(), strategy, init.clone())
            }
            None => MatchSimulator::new(config.match_config.clone(), strategy),
        }?;

        let report = sim.run().map_err(|source| SimulationError::BatchRun {
            seed,
            source: Box::new(source),
        })?;

        Ok((
            report.strategy.clone(),
            RunRecord {
                seed,
                final_score: report.final_score(),
                points_auton: report.totals.auton,
                points_teleop: report.totals.teleop,
                points_endgame: report.totals.endgame,
                samples: report.times.len(),
            },
        ))
    };

    let seeds: Vec<u64> = config.seeds().collect();
    let results: Vec<Result<(String, RunRecord)>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .map_err(|e| SimulationError::ThreadPool(e.to_string()))?;
        pool.install(|| seeds.par_iter().map(|&seed| run_one(seed)).collect())
    } else {
        seeds.par_iter().map(|&seed| run_one(seed)).collect()
    };

    let mut strategy = String::new();
    let mut records = Vec::with_capacity(results.len());
    for result in results {
        let (name, record) = result?;
        strategy = name;
        records.push(record);
    }

    let totals: Vec<f64> = records.iter().map(|r| r.final_score).collect();
    let autons: Vec<f64> = records.iter().map(|r| r.points_auton).collect();
    let teleops: Vec<f64> = records.iter().map(|r| r.points_teleop).collect();

    records.sort_by(|a, b| b.final_score.total_cmp(&a.final_score).then(a.seed.cmp(&b.seed)));

    let report = BatchReport {
        strategy,
        runs: records.len(),
        base_seed: config.base_seed,
        total: ScoreStats::from_scores(&totals),
        auton: ScoreStats::from_scores(&autons),
        teleop: ScoreStats::from_scores(&teleops),
        records,
    };

    info!(
        "[{}] batch complete: {} runs, mean {:.2} (sd {:.2}, min {}, max {})",
        report.strategy,
        report.runs,
        report.total.mean,
        report.total.std_dev,
        report.total.min,
        report.total.max
    );

    Ok(report)
}
