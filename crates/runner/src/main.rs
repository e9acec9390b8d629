use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stratometer_reefscape::ReefLevel;
use stratometer_runner::{
    BotKind, BotOptions, load_batch_config, load_match_config, run_monte_carlo, run_single,
    write_json,
};

#[derive(Parser, Debug)]
#[command(name = "stratometer")]
#[command(about = "Score FRC match strategies with a discrete-time match simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a single match
    Run {
        #[arg(long, value_enum, default_value_t = BotKind::SimpleCoral)]
        bot: BotKind,
        /// Match config JSON (defaults to a 150 s match with 30 s auton)
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        seed: Option<u64>,
        /// Target reef level for cycling robots (L1-L4)
        #[arg(long)]
        level: Option<ReefLevel>,
        #[arg(long, default_value_t = 3)]
        preloaded: i64,
        /// Print the full report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Play many seeded matches and summarize the score distribution
    Batch {
        #[arg(long, value_enum, default_value_t = BotKind::CoralCycle)]
        bot: BotKind,
        /// Batch config JSON; flags below override its values
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        runs: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        jobs: Option<usize>,
        #[arg(long)]
        level: Option<ReefLevel>,
        #[arg(long, default_value_t = 3)]
        preloaded: i64,
        /// Write the JSON report here instead of printing a summary only
        #[arg(long)]
        output: Option<PathBuf>,
        /// Number of best runs to list
        #[arg(long, default_value_t = 5)]
        top: usize,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Commands::Run {
            bot,
            config,
            seed,
            level,
            preloaded,
            json,
        } => {
            let match_config = load_match_config(config.as_deref())?;
            let options = BotOptions {
                kind: bot,
                level,
                preloaded_coral: preloaded,
            };
            let report = run_single(match_config, &options, seed)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            println!("bot={}", report.strategy);
            println!("points_auton={}", report.totals.auton);
            println!("points_teleop={}", report.totals.teleop);
            println!("points_endgame={}", report.totals.endgame);
            println!("final_score={}", report.final_score());
            println!("samples={}", report.times.len());
            for (key, value) in report.status.extra.iter() {
                println!("{key}={}", serde_json::to_string(value)?);
            }
        }
        Commands::Batch {
            bot,
            config,
            runs,
            seed,
            jobs,
            level,
            preloaded,
            output,
            top,
        } => {
            let mut batch_config = load_batch_config(config.as_deref())?;
            if let Some(runs) = runs {
                batch_config.runs = runs;
            }
            if let Some(seed) = seed {
                batch_config.base_seed = seed;
            }
            if jobs.is_some() {
                batch_config.jobs = jobs;
            }
            let options = BotOptions {
                kind: bot,
                level,
                preloaded_coral: preloaded,
            };
            let report = run_monte_carlo(&batch_config, &options)?;

            println!("bot={}", report.strategy);
            println!("runs={}", report.runs);
            println!("base_seed={}", report.base_seed);
            println!(
                "total mean={:.2} sd={:.2} min={} max={}",
                report.total.mean, report.total.std_dev, report.total.min, report.total.max
            );
            println!("auton mean={:.2} sd={:.2}", report.auton.mean, report.auton.std_dev);
            println!("teleop mean={:.2} sd={:.2}", report.teleop.mean, report.teleop.std_dev);
            for record in report.records.iter().take(top) {
                println!(
                    "  seed={:<8} score={:<6} auton={:<6} teleop={}",
                    record.seed, record.final_score, record.points_auton, record.points_teleop
                );
            }

            if let Some(path) = output {
                write_json(&path, &report)?;
                println!("wrote={}", path.display());
            }
        }
    }

    Ok(())
}
