//! Reefscape: 2025 FRC season
//!
//! Game-specific collaborators for the match simulator:
//!
//! - **Field**: reef, floor and coral-station counts stored in the status
//! - **FrcBot**: deterministic "deliver the preload" robot
//! - **CoralCycleBot**: stochastic station-to-reef cycling robot

pub mod bots;
pub mod field;

pub use bots::{CoralCycleBot, CoralCycleConfig, FrcBot};
pub use field::{
    CORAL_FLOOR, CORAL_STATION, DEFAULT_PRELOADED_CORAL, LEAVE_POINTS, ReefLevel,
    STARTING_FLOOR_CORAL, TOTAL_CORAL, init_game_status, initializer,
};
