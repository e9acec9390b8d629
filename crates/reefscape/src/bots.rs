//! Example Reefscape robots
//!
//! Robot-scoped state (what the robot is holding, whether it has run its auton)
//! lives on the bot itself. The simulator's reset never touches it; call
//! `reset_robot` between matches when a fresh robot is wanted.

use crate::field::{CORAL_FLOOR, CORAL_STATION, LEAVE_POINTS, ReefLevel};
use log::debug;
use stratometer_outcome::RandomOutcome;
use stratometer_sim::{
    ActionOutcome, ActionResult, BoxedAction, MatchStatus, Strategy, fixed,
};

/// Default idle time in seconds
const DEFAULT_SLEEP: f64 = 60.0;

/// Duration of the simple auton routine
const SIMPLE_AUTON_DURATION: f64 = 10.0;

/// Time burned by `simple_auton` once the routine has already run
const AUTON_COMPLETE_IDLE: f64 = 15.0;

/// Deliver-the-preload robot.
///
/// In auton it drops its preloaded coral on L1 and leaves the starting line;
/// for the rest of the match it sleeps.
#[derive(Debug, Clone, PartialEq)]
pub struct FrcBot {
    has_coral: bool,
    has_algae: bool,
    auton_complete: bool,
}

impl FrcBot {
    pub fn new() -> Self {
        Self {
            has_coral: true,
            has_algae: false,
            auton_complete: false,
        }
    }

    pub fn has_coral(&self) -> bool {
        self.has_coral
    }

    pub fn has_algae(&self) -> bool {
        self.has_algae
    }

    pub fn auton_complete(&self) -> bool {
        self.auton_complete
    }

    /// Restore the robot to its pre-match state
    pub fn reset_robot(&mut self) {
        *self = Self::new();
    }

    /// Do nothing for `seconds`
    pub fn sleep(&self, seconds: f64) -> BoxedAction<'static> {
        fixed(seconds, 0.0)
    }

    /// Deliver the held coral to L1 and leave the starting line.
    ///
    /// Worth 6 points (3 leave + 3 for L1) the first time; afterwards the robot
    /// just idles for 15 seconds.
    pub fn simple_auton(&mut self, status: &mut MatchStatus, duration: f64) -> ActionOutcome {
        if self.auton_complete {
            return ActionOutcome::idle(AUTON_COMPLETE_IDLE);
        }

        if self.has_coral {
            status.extra.increment(ReefLevel::L1.key(), 1);
            self.has_coral = false;
        }
        self.auton_complete = true;

        ActionOutcome::new(duration, LEAVE_POINTS + ReefLevel::L1.auton_points())
    }
}

impl Default for FrcBot {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for FrcBot {
    fn choose<'a>(&'a mut self, status: &MatchStatus) -> BoxedAction<'a> {
        if status.is_auton() {
            Box::new(move |status: &mut MatchStatus| -> ActionResult {
                Ok(self.simple_auton(status, SIMPLE_AUTON_DURATION))
            })
        } else {
            self.sleep(DEFAULT_SLEEP)
        }
    }

    fn name(&self) -> &str {
        "simple-coral"
    }
}

/// Configuration for the coral cycling robot
#[derive(Debug, Clone)]
pub struct CoralCycleConfig {
    /// Reef level every coral is aimed at
    pub target_level: ReefLevel,
    /// Mean seconds to drive to the station and intake a coral
    pub station_time_mean: f64,
    pub station_time_std: f64,
    /// Probability the intake succeeds
    pub pickup_probability: f64,
    /// Mean seconds to drive to the reef and place
    pub score_time_mean: f64,
    pub score_time_std: f64,
    /// Probability the placement scores
    pub score_probability: f64,
    /// Floor applied to every drawn duration
    pub min_duration: f64,
    /// Seconds to wait when the station is empty
    pub idle_time: f64,
    /// Random seed (for reproducibility)
    pub seed: Option<u64>,
}

impl Default for CoralCycleConfig {
    fn default() -> Self {
        Self {
            target_level: ReefLevel::L2,
            station_time_mean: 4.0,
            station_time_std: 1.0,
            pickup_probability: 0.95,
            score_time_mean: 3.0,
            score_time_std: 1.0,
            score_probability: 0.8,
            min_duration: 0.5,
            idle_time: 5.0,
            seed: None,
        }
    }
}

/// Station-to-reef cycling robot with random cycle times and misses
pub struct CoralCycleBot {
    config: CoralCycleConfig,
    rng: RandomOutcome,
    has_coral: bool,
    left_start: bool,
    scored: u32,
    missed: u32,
}

impl CoralCycleBot {
    pub fn new(config: CoralCycleConfig) -> Self {
        let rng = RandomOutcome::from_seed_opt(config.seed);

        Self {
            config,
            rng,
            has_coral: true,
            left_start: false,
            scored: 0,
            missed: 0,
        }
    }

    pub fn config(&self) -> &CoralCycleConfig {
        &self.config
    }

    pub fn has_coral(&self) -> bool {
        self.has_coral
    }

    /// Coral placed on the reef, boundary-crossing placements included
    pub fn scored(&self) -> u32 {
        self.scored
    }

    pub fn missed(&self) -> u32 {
        self.missed
    }

    /// Reload the preload and return to the starting line.
    ///
    /// The random stream keeps advancing so consecutive matches differ.
    pub fn reset_robot(&mut self) {
        self.has_coral = true;
        self.left_start = false;
        self.scored = 0;
        self.missed = 0;
    }

    /// Intake a coral from the station
    pub fn get_coral(&mut self, status: &mut MatchStatus) -> ActionResult {
        let elapsed = self.rng.draw_duration_at_least(
            self.config.station_time_mean,
            self.config.station_time_std,
            self.config.min_duration,
        )?;
        let bonus = self.leave_bonus(status);

        let available = status.extra.get_int(CORAL_STATION).unwrap_or(0);
        if available > 0 && self.rng.draw_success(self.config.pickup_probability) {
            status.extra.increment(CORAL_STATION, -1);
            self.has_coral = true;
        } else {
            debug!("coral-cycle: intake failed at t={:.2}", status.time());
        }

        Ok(ActionOutcome::new(elapsed, bonus))
    }

    /// Place the held coral on the target level; a miss drops it on the floor
    pub fn place_coral(&mut self, status: &mut MatchStatus) -> ActionResult {
        let elapsed = self.rng.draw_duration_at_least(
            self.config.score_time_mean,
            self.config.score_time_std,
            self.config.min_duration,
        )?;
        let mut points = self.leave_bonus(status);
        let level = self.config.target_level;

        if self.rng.draw_success(self.config.score_probability) {
            status.extra.increment(level.key(), 1);
            points += level.points(status.is_auton());
            self.scored += 1;
        } else {
            status.extra.increment(CORAL_FLOOR, 1);
            self.missed += 1;
            debug!("coral-cycle: missed {} at t={:.2}", level, status.time());
        }
        self.has_coral = false;

        Ok(ActionOutcome::new(elapsed, points))
    }

    fn leave_bonus(&mut self, status: &MatchStatus) -> f64 {
        if self.left_start || !status.is_auton() {
            return 0.0;
        }
        self.left_start = true;
        LEAVE_POINTS
    }
}

impl Strategy for CoralCycleBot {
    fn choose<'a>(&'a mut self, status: &MatchStatus) -> BoxedAction<'a> {
        if self.has_coral {
            Box::new(move |status: &mut MatchStatus| -> ActionResult { self.place_coral(status) })
        } else if status.extra.get_int(CORAL_STATION).unwrap_or(0) > 0 {
            Box::new(move |status: &mut MatchStatus| -> ActionResult { self.get_coral(status) })
        } else {
            fixed(self.config.idle_time, 0.0)
        }
    }

    fn name(&self) -> &str {
        "coral-cycle"
    }
}
