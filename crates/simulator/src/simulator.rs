//! Match Simulator
//!
//! The phase loop that drives a strategy through one match.
//!
//! Each step asks the strategy for an action, performs it, and advances the
//! clock. A sample is recorded only while the clock is still strictly inside the
//! current period: an action that reaches or crosses the boundary is not credited.

use crate::action::Strategy;
use crate::config::MatchConfig;
use crate::error::{Result, SimulationError};
use crate::status::{MatchStatus, Phase, StatusInitializer};
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

/// Position of the simulator in the match state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimState {
    Auton,
    Teleop,
    EndgameSeal,
    Done,
}

/// Time/score samples, starting with `(0, 0)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSeries {
    times: Vec<f64>,
    scores: Vec<f64>,
}

impl SampleSeries {
    pub fn new() -> Self {
        Self {
            times: vec![0.0],
            scores: vec![0.0],
        }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: the seed sample is never removed
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn last_time(&self) -> f64 {
        self.times.last().copied().unwrap_or(0.0)
    }

    pub fn last_score(&self) -> f64 {
        self.scores.last().copied().unwrap_or(0.0)
    }

    /// Iterate `(time, score)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.scores.iter().copied())
    }

    fn push(&mut self, time: f64, score: f64) {
        self.times.push(time);
        self.scores.push(score);
    }

    fn repeat_last(&mut self) {
        let (time, score) = (self.last_time(), self.last_score());
        self.push(time, score);
    }
}

impl Default for SampleSeries {
    fn default() -> Self {
        Self::new()
    }
}

/// Points captured at each phase boundary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseTotals {
    pub auton: f64,
    pub teleop: f64,
    pub endgame: f64,
}

impl PhaseTotals {
    pub fn total(&self) -> f64 {
        self.auton + self.teleop + self.endgame
    }
}

/// What a single [`MatchSimulator::step`] did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepEvent {
    /// An action was performed
    Action {
        phase: Phase,
        /// Clock after the action (may overshoot the boundary)
        time: f64,
        points: f64,
        /// Whether the sample made it into the series
        recorded: bool,
    },
    /// A period reached its boundary and its points were captured
    PhaseComplete { phase: Phase, points: f64 },
    /// The final sample was appended and the match sealed
    MatchComplete { final_score: f64 },
}

/// Final results of a completed match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub strategy: String,
    pub times: Vec<f64>,
    pub scores: Vec<f64>,
    pub totals: PhaseTotals,
    pub status: MatchStatus,
}

impl MatchReport {
    pub fn final_score(&self) -> f64 {
        self.scores.last().copied().unwrap_or(0.0)
    }
}

/// Runs one match at a time for a single strategy
pub struct MatchSimulator<S> {
    config: MatchConfig,
    strategy: S,
    initializer: Option<StatusInitializer>,
    status: MatchStatus,
    series: SampleSeries,
    totals: PhaseTotals,
    state: SimState,
    /// Internal clock; may overshoot a boundary before the phase closes
    clock: f64,
    phase_actions: u64,
}

impl<S: Strategy> MatchSimulator<S> {
    /// Create a simulator without game-specific fields
    pub fn new(config: MatchConfig, strategy: S) -> Result<Self> {
        Self::build(config, strategy, None)
    }

    /// Create a simulator whose status is populated by `initializer`
    pub fn with_initializer(
        config: MatchConfig,
        strategy: S,
        initializer: StatusInitializer,
    ) -> Result<Self> {
        Self::build(config, strategy, Some(initializer))
    }

    fn build(
        config: MatchConfig,
        strategy: S,
        initializer: Option<StatusInitializer>,
    ) -> Result<Self> {
        config.validate()?;
        let status = MatchStatus::new(&config, initializer.as_ref());

        Ok(Self {
            config,
            strategy,
            initializer,
            status,
            series: SampleSeries::new(),
            totals: PhaseTotals::default(),
            state: SimState::Auton,
            clock: 0.0,
            phase_actions: 0,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn status(&self) -> &MatchStatus {
        &self.status
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Samples recorded so far (available while the match is running)
    pub fn series(&self) -> &SampleSeries {
        &self.series
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    pub fn into_strategy(self) -> S {
        self.strategy
    }

    pub fn is_complete(&self) -> bool {
        self.state == SimState::Done
    }

    /// Phase totals of a completed match
    pub fn phase_totals(&self) -> Result<PhaseTotals> {
        self.ensure_complete()?;
        Ok(self.totals)
    }

    /// Full results of a completed match
    pub fn report(&self) -> Result<MatchReport> {
        self.ensure_complete()?;
        Ok(MatchReport {
            strategy: self.strategy.name().to_string(),
            times: self.series.times().to_vec(),
            scores: self.series.scores().to_vec(),
            totals: self.totals,
            status: self.status.clone(),
        })
    }

    /// Run the match to completion
    pub fn run(&mut self) -> Result<MatchReport> {
        if self.state == SimState::Done {
            return Err(SimulationError::InvalidState(
                "match already complete; call reset() before running again".to_string(),
            ));
        }

        while self.state != SimState::Done {
            self.step()?;
        }

        self.report()
    }

    /// Advance the state machine by one action or one transition
    pub fn step(&mut self) -> Result<StepEvent> {
        match self.state {
            SimState::Auton => self.step_period(Phase::Auton, self.config.auton_duration),
            SimState::Teleop => self.step_period(Phase::Teleop, self.config.total_duration),
            SimState::EndgameSeal => Ok(self.seal()),
            SimState::Done => Err(SimulationError::InvalidState(
                "match already complete; call reset() before stepping again".to_string(),
            )),
        }
    }

    /// Reset field state for a new match, keeping the strategy (robot state) as is
    pub fn reset(&mut self) {
        self.status.reset(self.initializer.as_ref());
        self.series = SampleSeries::new();
        self.totals = PhaseTotals::default();
        self.state = SimState::Auton;
        self.clock = 0.0;
        self.phase_actions = 0;
    }

    fn step_period(&mut self, period: Phase, boundary: f64) -> Result<StepEvent> {
        if self.clock >= boundary {
            return Ok(self.close_period(period));
        }

        if let Some(max) = self.config.max_actions_per_phase {
            if self.phase_actions >= max {
                warn!(
                    "[{}] {} stalled after {} actions at t={:.3}",
                    self.strategy.name(),
                    period,
                    self.phase_actions,
                    self.clock
                );
                return Err(SimulationError::SimulationStalled {
                    phase: period,
                    actions: self.phase_actions,
                });
            }
        }

        let action = self.strategy.choose(&self.status);
        let outcome = action
            .perform(&mut self.status)
            .map_err(|source| SimulationError::Action {
                phase: period,
                time: self.clock,
                source,
            })?;

        if !outcome.elapsed.is_finite() || outcome.elapsed <= 0.0 {
            return Err(SimulationError::NonProgressingAction {
                phase: period,
                time: self.clock,
                elapsed: outcome.elapsed,
            });
        }

        self.phase_actions += 1;
        self.clock += outcome.elapsed;

        let recorded = self.clock < boundary;
        if recorded {
            let score = self.series.last_score() + outcome.points;
            self.series.push(self.clock, score);
            trace!(
                "[{}] {} t={:.3} +{} -> {}",
                self.strategy.name(),
                period,
                self.clock,
                outcome.points,
                score
            );
        } else {
            debug!(
                "[{}] {} action ending at t={:.3} crosses boundary {:.3}; {} points not credited",
                self.strategy.name(),
                period,
                self.clock,
                boundary,
                outcome.points
            );
        }

        self.status.set_time(self.clock.min(boundary));
        self.sync_endgame();

        Ok(StepEvent::Action {
            phase: period,
            time: self.clock,
            points: outcome.points,
            recorded,
        })
    }

    fn close_period(&mut self, period: Phase) -> StepEvent {
        let last = self.series.last_score();
        let points = match period {
            Phase::Auton => {
                self.totals.auton = last;

                // Hard reset: any overshoot past auton is discarded
                self.clock = self.config.auton_duration;
                self.status.set_time(self.clock);
                self.status.enter_phase(Phase::Teleop);
                self.sync_endgame();
                self.state = SimState::Teleop;
                self.totals.auton
            }
            _ => {
                self.totals.teleop = last - self.totals.auton;
                self.state = SimState::EndgameSeal;
                self.totals.teleop
            }
        };
        self.phase_actions = 0;

        debug!(
            "[{}] {} complete: {} points, {} samples",
            self.strategy.name(),
            period,
            points,
            self.series.len()
        );

        StepEvent::PhaseComplete { phase: period, points }
    }

    fn seal(&mut self) -> StepEvent {
        // Endgame scoring is not modeled: the final sample repeats the last one
        self.series.repeat_last();
        let final_score = self.series.last_score();
        self.totals.endgame = final_score - self.totals.auton - self.totals.teleop;

        self.clock = self.config.total_duration;
        self.status.set_time(self.clock);
        self.status.enter_phase(Phase::Endgame);
        self.status.seal();
        self.state = SimState::Done;

        info!(
            "[{}] match complete: {} points (auton {}, teleop {}, endgame {})",
            self.strategy.name(),
            final_score,
            self.totals.auton,
            self.totals.teleop,
            self.totals.endgame
        );

        StepEvent::MatchComplete { final_score }
    }

    fn sync_endgame(&mut self) {
        if !self.status.is_auton() && self.status.time() >= self.config.endgame_start {
            self.status.enter_phase(Phase::Endgame);
        }
    }

    fn ensure_complete(&self) -> Result<()> {
        if self.status.game_over() {
            Ok(())
        } else {
            Err(SimulationError::InvalidState(
                "simulation not complete".to_string(),
            ))
        }
    }
}
