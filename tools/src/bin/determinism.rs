use clap::Parser;
use std::path::PathBuf;
use tank_arena_simulator::scenario;
use tank_arena_simulator::simulation::{Simulation, DEFAULT_TICK_LENGTH};
use tank_arena_simulator::snapshot::Snapshot;
use tank_arena_tools::{load_config, scripted_input, scripted_viewport};

#[derive(Parser, Debug)]
#[command()]
struct Arguments {
    scenario: String,

    #[arg(short, long)]
    seed: u32,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = scenario::MAX_TICKS)]
    max_ticks: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Arguments::parse();
    let config = load_config(args.config.as_deref())?;

    let mut sims = [0, 1]
        .iter()
        .map(|_| Simulation::with_config(&args.scenario, args.seed, config.clone()))
        .collect::<Result<Vec<_>, _>>()?;
    let viewport = scripted_viewport(sims[0].world_size());
    while sims[0].status() == scenario::Status::Running && sims[0].tick() < args.max_ticks {
        let hashes = sims.iter().map(|sim| sim.hash()).collect::<Vec<_>>();
        if hashes[0] != hashes[1] {
            println!("hashes differ at tick {}", sims[0].tick());
            diff_snapshots(&sims[0].snapshot(0), &sims[1].snapshot(0));
            anyhow::bail!("simulations diverged");
        }
        let input = scripted_input(&viewport, sims[0].tick(), DEFAULT_TICK_LENGTH, 15);
        sims.iter_mut()
            .for_each(|sim| sim.step(&input, DEFAULT_TICK_LENGTH));
    }

    log::info!(
        "{} ticks identical, final status {:?}",
        sims[0].tick(),
        sims[0].status()
    );
    Ok(())
}

fn diff_snapshots(a: &Snapshot, b: &Snapshot) {
    if a.tanks.len() != b.tanks.len() {
        println!("tank count differs");
        println!("  a: {}", a.tanks.len());
        println!("  b: {}", b.tanks.len());
    }

    for (i, (a, b)) in a.tanks.iter().zip(b.tanks.iter()).enumerate() {
        let epsilon = 0.0;

        if (a.position - b.position).magnitude() > epsilon {
            println!("tank {} position differs", i);
            println!("  a: {:?}", a.position);
            println!("  b: {:?}", b.position);
        }

        if (a.heading - b.heading).abs() > epsilon {
            println!("tank {} heading differs", i);
            println!("  a: {:?}", a.heading);
            println!("  b: {:?}", b.heading);
        }

        if (a.turret_heading - b.turret_heading).abs() > epsilon {
            println!("tank {} turret_heading differs", i);
            println!("  a: {:?}", a.turret_heading);
            println!("  b: {:?}", b.turret_heading);
        }

        if a.health != b.health {
            println!("tank {} health differs", i);
            println!("  a: {:?}", a.health);
            println!("  b: {:?}", b.health);
        }
    }

    if a.projectiles.len() != b.projectiles.len() {
        println!("projectile count differs");
        println!("  a: {}", a.projectiles.len());
        println!("  b: {}", b.projectiles.len());
    }

    if a.score != b.score {
        println!("score differs");
        println!("  a: {}", a.score);
        println!("  b: {}", b.score);
    }
}
