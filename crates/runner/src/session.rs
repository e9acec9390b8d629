//! Runner sessions
//!
//! Config loading, one-off matches and Monte-Carlo batches.

use crate::roster::{BotOptions, RosterBot};
use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;
use stratometer_reefscape::initializer;
use stratometer_sim::{BatchConfig, BatchReport, MatchConfig, MatchReport, MatchSimulator, run_batch};

/// Load a match config, falling back to the defaults when no file is given
pub fn load_match_config(path: Option<&Path>) -> Result<MatchConfig> {
    match path {
        Some(path) => MatchConfig::from_file(path)
            .with_context(|| format!("loading match config {}", path.display())),
        None => Ok(MatchConfig::default()),
    }
}

/// Load a batch config, falling back to the defaults when no file is given
pub fn load_batch_config(path: Option<&Path>) -> Result<BatchConfig> {
    match path {
        Some(path) => BatchConfig::from_file(path)
            .with_context(|| format!("loading batch config {}", path.display())),
        None => Ok(BatchConfig::default()),
    }
}

/// Play one match on the Reefscape field
pub fn run_single(config: MatchConfig, options: &BotOptions, seed: Option<u64>) -> Result<MatchReport> {
    let bot = RosterBot::build(options, seed);
    info!("running {} (seed {:?})", options.kind, seed);

    let mut sim = MatchSimulator::with_initializer(config, bot, initializer(options.preloaded_coral))?;
    let report = sim.run().context("match failed")?;
    Ok(report)
}

/// Play `config.runs` matches, one freshly built robot per seed
pub fn run_monte_carlo(config: &BatchConfig, options: &BotOptions) -> Result<BatchReport> {
    info!(
        "running {} matches of {} from seed {}",
        config.runs, options.kind, config.base_seed
    );

    let report = run_batch(config, Some(initializer(options.preloaded_coral)), |seed| {
        RosterBot::build(options, Some(seed))
    })
    .context("batch failed")?;
    Ok(report)
}

/// Write `value` as pretty JSON, creating parent directories as needed
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let encoded = serde_json::to_vec_pretty(value)?;
    fs::write(path, encoded).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
