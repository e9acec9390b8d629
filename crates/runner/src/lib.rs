//! Stratometer Runner
//!
//! Drives the simulator from the command line:
//!
//! - **Roster**: named robots and how to build them for a seed
//! - **Session**: config loading, single matches, batches and JSON output

pub mod roster;
pub mod session;

pub use roster::{BotKind, BotOptions, RosterBot};
pub use session::{
    load_batch_config, load_match_config, run_monte_carlo, run_single, write_json,
};
