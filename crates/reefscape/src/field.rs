//! Reefscape field state
//!
//! Coral counts live in the status' extra fields so that every action sees the
//! same field.

use std::str::FromStr;
use std::sync::Arc;
use stratometer_sim::{FieldState, StatusInitializer};

pub const CORAL_FLOOR: &str = "coral_floor";
pub const CORAL_STATION: &str = "coral_station";

/// Coral available to one alliance, preloads included
pub const TOTAL_CORAL: i64 = 60;

/// Coral lying on the field at match start
pub const STARTING_FLOOR_CORAL: i64 = 3;

/// Points for leaving the starting line in auton
pub const LEAVE_POINTS: f64 = 3.0;

/// Default coral preloaded on the alliance robots
pub const DEFAULT_PRELOADED_CORAL: i64 = 3;

/// Reef branch level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReefLevel {
    L1,
    L2,
    L3,
    L4,
}

impl ReefLevel {
    pub const ALL: [ReefLevel; 4] = [ReefLevel::L1, ReefLevel::L2, ReefLevel::L3, ReefLevel::L4];

    /// Status field counting coral scored on this level
    pub fn key(&self) -> &'static str {
        match self {
            ReefLevel::L1 => "coral_l1",
            ReefLevel::L2 => "coral_l2",
            ReefLevel::L3 => "coral_l3",
            ReefLevel::L4 => "coral_l4",
        }
    }

    pub fn auton_points(&self) -> f64 {
        match self {
            ReefLevel::L1 => 3.0,
            ReefLevel::L2 => 4.0,
            ReefLevel::L3 => 6.0,
            ReefLevel::L4 => 7.0,
        }
    }

    pub fn teleop_points(&self) -> f64 {
        match self {
            ReefLevel::L1 => 2.0,
            ReefLevel::L2 => 3.0,
            ReefLevel::L3 => 4.0,
            ReefLevel::L4 => 5.0,
        }
    }

    pub fn points(&self, auton: bool) -> f64 {
        if auton {
            self.auton_points()
        } else {
            self.teleop_points()
        }
    }
}

impl FromStr for ReefLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L1" | "1" => Ok(ReefLevel::L1),
            "L2" | "2" => Ok(ReefLevel::L2),
            "L3" | "3" => Ok(ReefLevel::L3),
            "L4" | "4" => Ok(ReefLevel::L4),
            other => Err(format!("unknown reef level '{other}' (expected L1-L4)")),
        }
    }
}

impl std::fmt::Display for ReefLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReefLevel::L1 => "L1",
            ReefLevel::L2 => "L2",
            ReefLevel::L3 => "L3",
            ReefLevel::L4 => "L4",
        };
        write!(f, "{name}")
    }
}

/// Populate Reefscape field elements.
///
/// `preloaded_coral` is the number of coral already held by the alliance robots;
/// the remainder starts in the coral station.
pub fn init_game_status(extra: &mut FieldState, preloaded_coral: i64) {
    for level in ReefLevel::ALL {
        extra.set(level.key(), 0);
    }
    extra.set(CORAL_FLOOR, STARTING_FLOOR_CORAL);
    extra.set(CORAL_STATION, TOTAL_CORAL - preloaded_coral);
}

/// Status initializer running [`init_game_status`]
pub fn initializer(preloaded_coral: i64) -> StatusInitializer {
    Arc::new(move |extra: &mut FieldState| init_game_status(extra, preloaded_coral))
}
