//! Full Reefscape matches
//!
//! Runs the example robots through the simulator with the Reefscape field and
//! checks scores, field bookkeeping and robot-state handling across resets.

use approx::assert_relative_eq;
use std::sync::Arc;
use stratometer_reefscape::{
    CORAL_FLOOR, CORAL_STATION, CoralCycleBot, CoralCycleConfig, FrcBot, ReefLevel,
    init_game_status, initializer,
};
use stratometer_sim::{
    BatchConfig, FieldState, MatchConfig, MatchSimulator, MatchStatus, StatusInitializer,
    run_batch,
};

fn steady_config(level: ReefLevel) -> CoralCycleConfig {
    CoralCycleConfig {
        target_level: level,
        station_time_std: 0.0,
        pickup_probability: 1.0,
        score_time_std: 0.0,
        score_probability: 1.0,
        seed: Some(0),
        ..Default::default()
    }
}

/// Coral owned by one robot's alliance share: field counts plus what it holds
fn coral_accounted(status: &MatchStatus, holding: bool) -> i64 {
    let extra = &status.extra;
    let reef: i64 = ReefLevel::ALL
        .iter()
        .map(|level| extra.get_int(level.key()).unwrap_or(0))
        .sum();
    reef + extra.get_int(CORAL_FLOOR).unwrap_or(0)
        + extra.get_int(CORAL_STATION).unwrap_or(0)
        + holding as i64
}

#[test]
fn test_simple_coral_match() {
    let _ = env_logger::try_init();

    let mut sim =
        MatchSimulator::with_initializer(MatchConfig::default(), FrcBot::new(), initializer(3))
            .unwrap();
    let report = sim.run().unwrap();

    assert_eq!(report.strategy, "simple-coral");
    assert_relative_eq!(report.final_score(), 6.0);
    assert_eq!(report.totals.auton, 6.0);
    assert_eq!(report.totals.teleop, 0.0);
    // simple_auton at 10, idle auton at 25, sleep at 90, end-of-match duplicate
    assert_eq!(report.times, vec![0.0, 10.0, 25.0, 90.0, 90.0]);
    assert_eq!(report.status.extra.get_int("coral_l1"), Some(1));
    assert_eq!(report.status.extra.get_int(CORAL_STATION), Some(57));
    assert_eq!(report.status.time(), 150.0);
}

#[test]
fn test_robot_state_survives_field_reset() {
    let mut sim =
        MatchSimulator::with_initializer(MatchConfig::default(), FrcBot::new(), initializer(3))
            .unwrap();
    assert_eq!(sim.run().unwrap().final_score(), 6.0);

    // Field is restored but the robot still believes its auton already ran
    sim.reset();
    assert_eq!(sim.status().extra.get_int("coral_l1"), Some(0));
    let rerun = sim.run().unwrap();
    assert_relative_eq!(rerun.final_score(), 0.0);
    assert!(sim.strategy().auton_complete());

    sim.reset();
    sim.strategy_mut().reset_robot();
    assert_eq!(sim.run().unwrap().final_score(), 6.0);
}

#[test]
fn test_steady_coral_cycle_match() {
    let config = MatchConfig::new(150.0, 15.0, 120.0);
    let bot = CoralCycleBot::new(steady_config(ReefLevel::L4));
    let mut sim = MatchSimulator::with_initializer(config, bot, initializer(3)).unwrap();
    let report = sim.run().unwrap();

    // Auton: leave + two L4 coral (7 each); the third placement crosses 15 s
    assert_relative_eq!(report.totals.auton, 17.0);
    // Teleop: 7 s cycles from 15 s, nineteen L4 coral at 5 each
    assert_relative_eq!(report.totals.teleop, 95.0);
    assert_relative_eq!(report.final_score(), 112.0);

    // Uncredited boundary actions still touch the field
    assert_eq!(report.status.extra.get_int("coral_l4"), Some(22));
    assert_eq!(report.status.extra.get_int(CORAL_STATION), Some(35));
    assert!(sim.strategy().has_coral());
}

#[test]
fn test_coral_is_conserved() {
    for seed in [3, 14, 15, 92, 65] {
        let config = CoralCycleConfig {
            seed: Some(seed),
            ..Default::default()
        };
        let mut sim = MatchSimulator::with_initializer(
            MatchConfig::default(),
            CoralCycleBot::new(config),
            initializer(3),
        )
        .unwrap();
        let report = sim.run().unwrap();

        // 57 in the station, 3 on the floor, 1 preloaded on this robot
        assert_eq!(
            coral_accounted(&report.status, sim.strategy().has_coral()),
            61,
            "seed {seed}"
        );
        assert!(report.scores.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn test_empty_station_does_not_go_negative() {
    let init: StatusInitializer = Arc::new(|extra: &mut FieldState| {
        init_game_status(extra, 3);
        extra.set(CORAL_STATION, 2);
    });

    let bot = CoralCycleBot::new(steady_config(ReefLevel::L1));
    let mut sim = MatchSimulator::with_initializer(MatchConfig::default(), bot, init).unwrap();
    let report = sim.run().unwrap();

    assert_eq!(report.status.extra.get_int(CORAL_STATION), Some(0));
    assert_eq!(report.status.extra.get_int("coral_l1"), Some(3));
    // Leave bonus plus the preload and both station coral, all placed in auton
    assert_relative_eq!(report.final_score(), 3.0 + 3.0 * 3.0);
    assert_eq!(report.totals.teleop, 0.0);
}

#[test]
fn test_coral_cycle_reproducible_by_seed() {
    let run = |seed: u64| {
        let config = CoralCycleConfig {
            seed: Some(seed),
            ..Default::default()
        };
        let mut sim = MatchSimulator::with_initializer(
            MatchConfig::default(),
            CoralCycleBot::new(config),
            initializer(3),
        )
        .unwrap();
        sim.run().unwrap()
    };

    assert_eq!(run(2025), run(2025));
}

#[test]
fn test_coral_cycle_batch() {
    let config = BatchConfig {
        runs: 24,
        base_seed: 100,
        jobs: Some(2),
        ..Default::default()
    };

    let report = run_batch(&config, Some(initializer(3)), |seed| {
        CoralCycleBot::new(CoralCycleConfig {
            seed: Some(seed),
            ..Default::default()
        })
    })
    .unwrap();

    assert_eq!(report.strategy, "coral-cycle");
    assert_eq!(report.runs, 24);
    assert!(report.total.mean > 0.0);
    assert!(report.total.min <= report.total.mean && report.total.mean <= report.total.max);
    assert!(
        report
            .records
            .windows(2)
            .all(|w| w[0].final_score >= w[1].final_score)
    );
}
