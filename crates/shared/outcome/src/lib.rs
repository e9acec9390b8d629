//! Stratometer Outcome
//!
//! Stochastic primitives used by robot actions:
//!
//! - **Durations**: normally distributed task times (cycle times, drive times)
//! - **Successes**: Bernoulli trials (did the pickup work, did the shot score)
//!
//! ## Usage
//!
//! ```
//! use stratometer_outcome::RandomOutcome;
//!
//! let mut outcome = RandomOutcome::seeded(7);
//! let drive_time = outcome.draw_duration(4.0, 0.5).unwrap();
//! let scored = outcome.draw_success(0.8);
//! # let _ = (drive_time, scored);
//! ```

mod error;
mod random;

pub use error::{OutcomeError, OutcomeResult};
pub use random::RandomOutcome;
