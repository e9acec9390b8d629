//! Match status
//!
//! The single mutable record describing a match in progress. Strategies read it,
//! actions mutate its game-specific [`FieldState`], and only the simulator moves
//! the clock, the phase, and the game-over flag.

use crate::config::MatchConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Named sub-interval of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// Autonomous period
    Auton,
    /// Teleoperated period before endgame
    Teleop,
    /// Final stretch of the teleoperated period
    Endgame,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Auton => "AUTON",
            Phase::Teleop => "TELEOP",
            Phase::Endgame => "ENDGAME",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Game-specific field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Typed extension map for game-specific state (object counts, field elements).
///
/// Opaque to the simulator: it is populated by the status initializer and mutated
/// by actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldState(BTreeMap<String, FieldValue>);

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(FieldValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(FieldValue::Float(v)) => Some(*v),
            Some(FieldValue::Int(v)) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(FieldValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Add `by` to an integer field and return the new value.
    ///
    /// A missing or non-integer field is treated as zero.
    pub fn increment(&mut self, key: &str, by: i64) -> i64 {
        let next = self.get_int(key).unwrap_or(0) + by;
        self.0.insert(key.to_string(), FieldValue::Int(next));
        next
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

/// Populates game-specific fields at construction and on every reset
pub type StatusInitializer = Arc<dyn Fn(&mut FieldState) + Send + Sync>;

/// Current state of a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatus {
    time: f64,
    phase: Phase,
    auton_duration: f64,
    total_duration: f64,
    endgame_start: f64,
    game_over: bool,
    /// Game-specific fields, owned by initializer and action code
    pub extra: FieldState,
}

impl MatchStatus {
    /// Create a status at `t = 0` in auton, running `initializer` once
    pub fn new(config: &MatchConfig, initializer: Option<&StatusInitializer>) -> Self {
        let mut status = Self {
            time: 0.0,
            phase: Phase::Auton,
            auton_duration: config.auton_duration,
            total_duration: config.total_duration,
            endgame_start: config.endgame_start,
            game_over: false,
            extra: FieldState::new(),
        };
        if let Some(init) = initializer {
            init(&mut status.extra);
        }
        status
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_auton(&self) -> bool {
        self.phase == Phase::Auton
    }

    pub fn is_endgame(&self) -> bool {
        self.phase == Phase::Endgame
    }

    pub fn auton_duration(&self) -> f64 {
        self.auton_duration
    }

    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    pub fn endgame_start(&self) -> f64 {
        self.endgame_start
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Seconds left in the current period (auton, or teleop through match end)
    pub fn time_remaining(&self) -> f64 {
        let boundary = if self.is_auton() {
            self.auton_duration
        } else {
            self.total_duration
        };
        (boundary - self.time).max(0.0)
    }

    /// Restore construction values and re-run the initializer.
    ///
    /// Only the fields this record owns are reset; robot-scoped state lives with
    /// the strategy.
    pub(crate) fn reset(&mut self, initializer: Option<&StatusInitializer>) {
        self.time = 0.0;
        self.phase = Phase::Auton;
        self.game_over = false;
        self.extra.clear();
        if let Some(init) = initializer {
            init(&mut self.extra);
        }
    }

    pub(crate) fn set_time(&mut self, time: f64) {
        self.time = time.clamp(0.0, self.total_duration);
    }

    /// Move to `phase`; earlier phases are never re-entered
    pub(crate) fn enter_phase(&mut self, phase: Phase) {
        if phase > self.phase {
            self.phase = phase;
        }
    }

    pub(crate) fn seal(&mut self) {
        self.game_over = true;
    }
}
