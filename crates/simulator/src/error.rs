use crate::status::Phase;
use stratometer_outcome::OutcomeError;
use thiserror::Error;

/// Errors raised by the match loop
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Non-progressing action in {phase} at t={time}: elapsed {elapsed}")]
    NonProgressingAction { phase: Phase, time: f64, elapsed: f64 },

    #[error("Simulation stalled in {phase}: {actions} actions without reaching the phase boundary")]
    SimulationStalled { phase: Phase, actions: u64 },

    #[error("Action failed in {phase} at t={time}: {source}")]
    Action {
        phase: Phase,
        time: f64,
        #[source]
        source: ActionError,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Batch run failed for seed {seed}: {source}")]
    BatchRun {
        seed: u64,
        #[source]
        source: Box<SimulationError>,
    },

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

/// Errors raised by an action while it executes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error(transparent)]
    Outcome(#[from] OutcomeError),

    #[error("{0}")]
    Failed(String),
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
