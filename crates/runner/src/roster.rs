//! Robot roster
//!
//! Maps the robot names accepted on the command line to strategies. Batches need
//! one concrete strategy type, so every robot is wrapped in [`RosterBot`].

use clap::ValueEnum;
use stratometer_reefscape::{CoralCycleBot, CoralCycleConfig, FrcBot, ReefLevel};
use stratometer_sim::{BoxedAction, MatchStatus, Strategy};

/// Robots available to the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BotKind {
    /// Deliver the preload on L1 in auton, then sleep
    SimpleCoral,
    /// Cycle coral from the station to the reef with random timings
    CoralCycle,
}

impl BotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BotKind::SimpleCoral => "simple-coral",
            BotKind::CoralCycle => "coral-cycle",
        }
    }
}

impl std::fmt::Display for BotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How to build a robot
#[derive(Debug, Clone)]
pub struct BotOptions {
    pub kind: BotKind,
    /// Target level for cycling robots (their default when unset)
    pub level: Option<ReefLevel>,
    /// Coral preloaded on the alliance robots
    pub preloaded_coral: i64,
}

impl BotOptions {
    pub fn new(kind: BotKind) -> Self {
        Self {
            kind,
            level: None,
            preloaded_coral: stratometer_reefscape::DEFAULT_PRELOADED_CORAL,
        }
    }
}

/// Any robot from the roster
pub enum RosterBot {
    SimpleCoral(FrcBot),
    CoralCycle(CoralCycleBot),
}

impl RosterBot {
    /// Build the robot described by `options`, seeding stochastic robots with `seed`
    pub fn build(options: &BotOptions, seed: Option<u64>) -> Self {
        match options.kind {
            BotKind::SimpleCoral => RosterBot::SimpleCoral(FrcBot::new()),
            BotKind::CoralCycle => {
                let mut config = CoralCycleConfig {
                    seed,
                    ..Default::default()
                };
                if let Some(level) = options.level {
                    config.target_level = level;
                }
                RosterBot::CoralCycle(CoralCycleBot::new(config))
            }
        }
    }
}

impl Strategy for RosterBot {
    fn choose<'a>(&'a mut self, status: &MatchStatus) -> BoxedAction<'a> {
        match self {
            RosterBot::SimpleCoral(bot) => bot.choose(status),
            RosterBot::CoralCycle(bot) => bot.choose(status),
        }
    }

    fn name(&self) -> &str {
        match self {
            RosterBot::SimpleCoral(bot) => bot.name(),
            RosterBot::CoralCycle(bot) => bot.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_cli_values() {
        for kind in BotKind::value_variants() {
            let bot = RosterBot::build(&BotOptions::new(*kind), Some(1));
            assert_eq!(bot.name(), kind.as_str());

            let parsed = BotKind::from_str(kind.as_str(), false).unwrap();
            assert_eq!(parsed, *kind);
        }
    }

    #[test]
    fn test_level_override() {
        let options = BotOptions {
            level: Some(ReefLevel::L3),
            ..BotOptions::new(BotKind::CoralCycle)
        };
        match RosterBot::build(&options, None) {
            RosterBot::CoralCycle(bot) => assert_eq!(bot.config().target_level, ReefLevel::L3),
            RosterBot::SimpleCoral(_) => panic!("expected a cycling robot"),
        }
    }
}
