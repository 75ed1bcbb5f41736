use clap::Parser;
use rayon::prelude::*;
use std::path::PathBuf;
use tank_arena_simulator::scenario;
use tank_arena_simulator::simulation::DEFAULT_TICK_LENGTH;
use tank_arena_tools::{load_config, run_simulation, RunSummary};

#[derive(Parser, Debug)]
#[command(about = "Runs a scenario without a renderer using scripted input")]
struct Arguments {
    scenario: String,

    #[arg(short, long, default_value_t = 0)]
    seed: u32,

    /// Run this many consecutive seeds in parallel.
    #[arg(short = 'n', long, default_value_t = 1)]
    seeds: u32,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = scenario::MAX_TICKS)]
    max_ticks: u32,

    #[arg(long, default_value_t = DEFAULT_TICK_LENGTH)]
    dt: f64,

    /// Print the final snapshot of the first seed as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Arguments::parse();
    scenario::load(&args.scenario)?;
    let config = load_config(args.config.as_deref())?;

    if args.json {
        let (sim, _) = run_simulation(&args.scenario, args.seed, config, args.dt, args.max_ticks)?;
        println!("{}", serde_json::to_string_pretty(&sim.snapshot(0))?);
        return Ok(());
    }

    let summaries: Vec<RunSummary> = (args.seed..args.seed + args.seeds.max(1))
        .into_par_iter()
        .map(|seed| {
            run_simulation(&args.scenario, seed, config.clone(), args.dt, args.max_ticks)
                .map(|(_, summary)| summary)
        })
        .collect::<anyhow::Result<_>>()?;

    for summary in summaries.iter() {
        println!(
            "seed {:>4}: {:?} after {} ticks, Score : {}",
            summary.seed, summary.status, summary.ticks, summary.score
        );
    }
    let total: i64 = summaries.iter().map(|s| s.score).sum();
    log::info!(
        "Mean score {:.1} over {} runs",
        total as f64 / summaries.len() as f64,
        summaries.len()
    );
    Ok(())
}
