//! Stratometer Simulation Core
//!
//! Discrete-event scoring simulator for a robotics-competition match:
//!
//! - **Status**: typed match state shared with strategies and actions
//! - **Strategy / Action**: the pluggable decision contract
//! - **Simulator**: the phase loop (autonomous, teleoperated, endgame seal)
//! - **Batch**: independent runs in parallel for aggregate statistics
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐  choose(&status)   ┌──────────────┐
//!   │   Strategy   │ ─────────────────▶ │    Action    │
//!   └──────────────┘                    └──────┬───────┘
//!          ▲                                   │ perform(&mut status)
//!          │ &status                           ▼
//!   ┌──────┴───────────────────────────────────────────┐
//!   │                 MatchSimulator                   │
//!   │   clock · phase boundaries · sample series       │
//!   └──────────────────────────────────────────────────┘
//! ```

pub mod action;
pub mod batch;
pub mod config;
pub mod error;
pub mod simulator;
pub mod status;

pub use action::{Action, ActionOutcome, ActionResult, BoxedAction, Strategy, fixed};
pub use batch::{BatchConfig, BatchReport, RunRecord, ScoreStats, run_batch};
pub use config::MatchConfig;
pub use error::{ActionError, ConfigError, Result, SimulationError};
pub use simulator::{MatchReport, MatchSimulator, PhaseTotals, SampleSeries, SimState, StepEvent};
pub use status::{FieldState, FieldValue, MatchStatus, Phase, StatusInitializer};
