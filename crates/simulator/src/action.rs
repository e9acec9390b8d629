//! Strategy and Action contracts
//!
//! A [`Strategy`] inspects the status and hands back an [`Action`]. The action
//! performs the modeled robot behaviour and reports how long it took and how many
//! points it earned. Closures implement both traits, so simple strategies need no
//! boilerplate:
//!
//! ```
//! use stratometer_sim::{BoxedAction, MatchStatus, fixed};
//!
//! let mut strategy = |status: &MatchStatus| -> BoxedAction<'static> {
//!     if status.is_auton() { fixed(10.0, 6.0) } else { fixed(60.0, 0.0) }
//! };
//! # let _ = &mut strategy;
//! ```

use crate::error::ActionError;
use crate::status::MatchStatus;
use serde::{Deserialize, Serialize};

/// Result of performing one action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    /// Simulated seconds the action took (must be positive)
    pub elapsed: f64,
    /// Points earned by the action
    pub points: f64,
}

impl ActionOutcome {
    pub fn new(elapsed: f64, points: f64) -> Self {
        Self { elapsed, points }
    }

    /// An action that only consumes time
    pub fn idle(elapsed: f64) -> Self {
        Self {
            elapsed,
            points: 0.0,
        }
    }
}

impl From<(f64, f64)> for ActionOutcome {
    fn from((elapsed, points): (f64, f64)) -> Self {
        Self { elapsed, points }
    }
}

pub type ActionResult = std::result::Result<ActionOutcome, ActionError>;

/// One executable unit of robot behaviour.
///
/// An action runs once. It may read and mutate `status.extra` and any robot state
/// it borrowed from its strategy.
pub trait Action {
    fn perform(self: Box<Self>, status: &mut MatchStatus) -> ActionResult;
}

impl<F> Action for F
where
    F: FnOnce(&mut MatchStatus) -> ActionResult,
{
    fn perform(self: Box<Self>, status: &mut MatchStatus) -> ActionResult {
        (*self)(status)
    }
}

/// Action handed out by a strategy, possibly borrowing the strategy's robot state
pub type BoxedAction<'a> = Box<dyn Action + 'a>;

/// Action with a fixed duration and point value
pub fn fixed(elapsed: f64, points: f64) -> BoxedAction<'static> {
    Box::new(move |_: &mut MatchStatus| -> ActionResult {
        Ok(ActionOutcome::new(elapsed, points))
    })
}

/// Decision function selecting the next action from the current status.
///
/// Selection only reads the status; any mutation happens when the returned action
/// is performed.
pub trait Strategy {
    fn choose<'a>(&'a mut self, status: &MatchStatus) -> BoxedAction<'a>;

    /// Strategy name for logging and reports
    fn name(&self) -> &str {
        "Strategy"
    }
}

impl<F> Strategy for F
where
    F: FnMut(&MatchStatus) -> BoxedAction<'static>,
{
    fn choose<'a>(&'a mut self, status: &MatchStatus) -> BoxedAction<'a> {
        self(status)
    }
}
