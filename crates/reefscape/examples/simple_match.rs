//! One match for each example robot

use stratometer_reefscape::{CoralCycleBot, CoralCycleConfig, FrcBot, ReefLevel, initializer};
use stratometer_sim::{MatchConfig, MatchReport, MatchSimulator};

fn print_report(report: &MatchReport) {
    println!("=== {} ===", report.strategy);
    println!("Auton:   {}", report.totals.auton);
    println!("Teleop:  {}", report.totals.teleop);
    println!("Endgame: {}", report.totals.endgame);
    println!("Final:   {}", report.final_score());
    println!("Samples: {}", report.times.len());
    for (key, value) in report.status.extra.iter() {
        println!("  {key}: {value:?}");
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = MatchConfig::default();

    let mut sim = MatchSimulator::with_initializer(config.clone(), FrcBot::new(), initializer(3))?;
    print_report(&sim.run()?);

    let bot = CoralCycleBot::new(CoralCycleConfig {
        target_level: ReefLevel::L4,
        score_probability: 0.6,
        seed: Some(42),
        ..Default::default()
    });
    let mut sim = MatchSimulator::with_initializer(config, bot, initializer(3))?;
    print_report(&sim.run()?);

    Ok(())
}
