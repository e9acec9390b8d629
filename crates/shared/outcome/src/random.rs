//! Random outcome source
//!
//! Wraps a seedable RNG. Each robot owns its own source so that independent
//! matches never share random state.

use crate::{OutcomeError, OutcomeResult};
use rand::prelude::*;
use rand_distr::Normal;

/// Source of stochastic action outcomes
#[derive(Debug, Clone)]
pub struct RandomOutcome {
    rng: StdRng,
}

impl RandomOutcome {
    /// Create a source seeded from OS entropy (not reproducible)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a reproducible source
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create from an optional seed, falling back to entropy
    pub fn from_seed_opt(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Draw a duration from `N(mean, stddev)`.
    ///
    /// The draw is returned unchanged, so the normal tail can produce zero or
    /// negative values. Use [`draw_duration_at_least`](Self::draw_duration_at_least)
    /// when an action needs a floor.
    pub fn draw_duration(&mut self, mean: f64, stddev: f64) -> OutcomeResult<f64> {
        if !stddev.is_finite() || stddev < 0.0 {
            return Err(OutcomeError::InvalidStdDev(stddev));
        }

        let normal = Normal::new(mean, stddev).map_err(|_| OutcomeError::InvalidStdDev(stddev))?;
        Ok(normal.sample(&mut self.rng))
    }

    /// Draw a duration from `N(mean, stddev)` and floor it at `floor`
    pub fn draw_duration_at_least(
        &mut self,
        mean: f64,
        stddev: f64,
        floor: f64,
    ) -> OutcomeResult<f64> {
        Ok(self.draw_duration(mean, stddev)?.max(floor))
    }

    /// Bernoulli trial: true iff a uniform draw in `[0, 1)` is below `probability`.
    ///
    /// Probabilities outside `[0, 1]` saturate: `<= 0` never succeeds and
    /// `>= 1` always does.
    pub fn draw_success(&mut self, probability: f64) -> bool {
        self.rng.r#gen::<f64>() < probability
    }
}

impl Default for RandomOutcome {
    fn default() -> Self {
        Self::from_entropy()
    }
}
