//! Match loop property tests
//!
//! Verifies the series and status invariants over complete matches:
//! - status clock stays inside the match after every step
//! - score series is non-decreasing and index-aligned with the time series
//! - phase totals add up to the final score
//! - reset + rerun reproduces a deterministic match exactly
//! - samples landing on a period boundary are discarded

use stratometer_outcome::RandomOutcome;
use stratometer_sim::{
    ActionOutcome, ActionResult, BoxedAction, MatchConfig, MatchSimulator, MatchStatus, Phase,
    SimState, StepEvent, Strategy, fixed,
};

const SEEDS: [u64; 6] = [1, 7, 42, 99, 1234, 31337];

fn frc_config() -> MatchConfig {
    MatchConfig::new(150.0, 15.0, 120.0)
}

/// Stochastic robot: normal cycle times, Bernoulli scoring
struct CycleBot {
    rng: RandomOutcome,
}

impl CycleBot {
    fn new(seed: u64) -> Self {
        Self {
            rng: RandomOutcome::seeded(seed),
        }
    }
}

impl Strategy for CycleBot {
    fn choose<'a>(&'a mut self, status: &MatchStatus) -> BoxedAction<'a> {
        let (mean, points) = if status.is_auton() { (4.0, 4.0) } else { (7.0, 3.0) };
        Box::new(move |_: &mut MatchStatus| -> ActionResult {
            let elapsed = self.rng.draw_duration_at_least(mean, 1.5, 0.5)?;
            let scored = self.rng.draw_success(0.7);
            Ok(ActionOutcome::new(elapsed, if scored { points } else { 0.0 }))
        })
    }

    fn name(&self) -> &str {
        "CycleBot"
    }
}

fn constant(elapsed: f64, points: f64) -> impl FnMut(&MatchStatus) -> BoxedAction<'static> {
    move |_: &MatchStatus| -> BoxedAction<'static> { fixed(elapsed, points) }
}

#[test]
fn test_time_stays_in_match_after_every_step() {
    let _ = env_logger::try_init();

    for seed in SEEDS {
        let mut sim = MatchSimulator::new(frc_config(), CycleBot::new(seed)).unwrap();
        while !sim.is_complete() {
            sim.step().unwrap();
            let t = sim.status().time();
            assert!(
                (0.0..=150.0).contains(&t),
                "seed {seed}: status time {t} left the match"
            );
        }
    }
}

#[test]
fn test_series_invariants_hold() {
    for seed in SEEDS {
        let mut sim = MatchSimulator::new(frc_config(), CycleBot::new(seed)).unwrap();
        let report = sim.run().unwrap();

        assert_eq!(report.times.len(), report.scores.len());
        assert_eq!((report.times[0], report.scores[0]), (0.0, 0.0));
        assert!(report.times.windows(2).all(|w| w[0] <= w[1]), "seed {seed}: times");
        assert!(report.scores.windows(2).all(|w| w[0] <= w[1]), "seed {seed}: scores");

        let last = *report.scores.last().unwrap();
        assert_eq!(report.totals.auton + report.totals.teleop, last);
        assert_eq!(report.totals.endgame, 0.0);
        assert!(report.status.game_over());
    }
}

#[test]
fn test_phase_is_monotonic() {
    let mut sim = MatchSimulator::new(frc_config(), CycleBot::new(5)).unwrap();
    let mut last = Phase::Auton;
    while !sim.is_complete() {
        sim.step().unwrap();
        let phase = sim.status().phase();
        assert!(phase >= last);
        last = phase;
    }
    assert_eq!(last, Phase::Endgame);
}

#[test]
fn test_reset_reproduces_deterministic_match() {
    let strategy = |status: &MatchStatus| -> BoxedAction<'static> {
        if status.is_auton() {
            fixed(4.0, 3.0)
        } else if status.is_endgame() {
            fixed(9.0, 1.0)
        } else {
            fixed(6.5, 2.0)
        }
    };

    let mut sim = MatchSimulator::new(frc_config(), strategy).unwrap();
    let first = sim.run().unwrap();

    sim.reset();
    assert_eq!(sim.state(), SimState::Auton);
    let second = sim.run().unwrap();

    assert_eq!(first.times, second.times);
    assert_eq!(first.scores, second.scores);
    assert_eq!(first.totals, second.totals);
}

#[test]
fn test_action_ending_on_boundary_not_recorded() {
    // 5 + 10 = 15: the second auton action lands exactly on the boundary
    let mut calls = 0u32;
    let strategy = move |_: &MatchStatus| -> BoxedAction<'static> {
        calls += 1;
        match calls {
            1 => fixed(5.0, 2.0),
            2 => fixed(10.0, 100.0),
            _ => fixed(200.0, 0.0),
        }
    };

    let mut sim = MatchSimulator::new(frc_config(), strategy).unwrap();
    let report = sim.run().unwrap();

    assert_eq!(report.totals.auton, 2.0);
    assert!(!report.times.contains(&15.0));
    assert!(!report.scores.contains(&102.0));
}

#[test]
fn test_scenario_auton_fixed_action() {
    let mut sim = MatchSimulator::new(frc_config(), constant(10.0, 6.0)).unwrap();

    let mut auton_samples = Vec::new();
    loop {
        match sim.step().unwrap() {
            StepEvent::Action {
                phase: Phase::Auton,
                time,
                recorded: true,
                ..
            } => auton_samples.push(time),
            StepEvent::PhaseComplete {
                phase: Phase::Auton,
                points,
            } => {
                assert_eq!(points, 6.0);
                break;
            }
            _ => {}
        }
    }

    assert_eq!(auton_samples, vec![10.0]);
    assert_eq!(sim.series().iter().last(), Some((10.0, 6.0)));
    assert_eq!(sim.status().time(), 15.0);

    sim.run().unwrap();
    assert_eq!(sim.phase_totals().unwrap().auton, 6.0);
}

#[test]
fn test_scenario_teleop_idle_seconds() {
    // Auton scores nothing and ends with a boundary-crossing action
    let strategy = |status: &MatchStatus| -> BoxedAction<'static> {
        if status.is_auton() {
            fixed(20.0, 0.0)
        } else {
            fixed(1.0, 0.0)
        }
    };

    let mut sim = MatchSimulator::new(frc_config(), strategy).unwrap();
    let report = sim.run().unwrap();

    assert_eq!(report.totals.teleop, 0.0);

    // Everything but the end-of-match duplicate
    let len = report.times.len();
    let teleop_samples = report.times[..len - 1]
        .iter()
        .filter(|&&t| t > 15.0)
        .count();
    // t = 16..=149; the action ending at 150 is dropped
    assert_eq!(teleop_samples, 134);

    // End-of-match duplicate repeats the last teleop sample
    assert_eq!(report.times[len - 1], report.times[len - 2]);
    assert_eq!(report.scores[len - 1], report.scores[len - 2]);
    assert_eq!(report.times[len - 1], 149.0);

    // Seed sample + teleop samples + duplicate
    assert_eq!(len, 1 + 134 + 1);
}

#[test]
fn test_teleop_action_ending_on_match_end_not_recorded() {
    // Teleop starts at 15: 15 + 5 * 27 = 150 lands exactly on the match end
    let strategy = |status: &MatchStatus| -> BoxedAction<'static> {
        if status.is_auton() {
            fixed(15.0, 0.0)
        } else if status.time() + 5.0 >= 150.0 {
            fixed(5.0, 100.0)
        } else {
            fixed(5.0, 1.0)
        }
    };

    let mut sim = MatchSimulator::new(frc_config(), strategy).unwrap();
    let report = sim.run().unwrap();

    assert!(!report.times.contains(&150.0));
    // 26 recorded actions at 1 point; the final 100 is not credited
    assert_eq!(report.totals.teleop, 26.0);
    assert_eq!(report.final_score(), 26.0);
    assert_eq!(report.times[report.times.len() - 1], 145.0);
    assert_eq!(report.status.time(), 150.0);
}

#[test]
fn test_stochastic_runs_are_reproducible_by_seed() {
    let run = |seed: u64| {
        let mut sim = MatchSimulator::new(frc_config(), CycleBot::new(seed)).unwrap();
        sim.run().unwrap()
    };

    let a = run(77);
    let b = run(77);
    let c = run(78);

    assert_eq!(a.scores, b.scores);
    assert_eq!(a.times, b.times);
    assert_ne!(a.times, c.times);
}

#[test]
fn test_strategy_state_survives_reset() {
    let mut sim = MatchSimulator::new(frc_config(), CycleBot::new(3)).unwrap();
    let first = sim.run().unwrap();
    sim.reset();
    let second = sim.run().unwrap();

    // The robot's RNG is robot-scoped: it keeps advancing across resets
    assert_ne!(first.times, second.times);
    assert_eq!(second.strategy, "CycleBot");
}
