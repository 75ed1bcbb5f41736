use nalgebra::{point, vector};
use std::path::Path;
use tank_arena_simulator::config::ArenaConfig;
use tank_arena_simulator::input::{PlayerInput, Viewport};
use tank_arena_simulator::scenario::{self, Status};
use tank_arena_simulator::simulation::Simulation;

/// Window the scripted cursor moves in, framing the whole arena.
pub fn scripted_viewport(world_size: f64) -> Viewport {
    Viewport {
        center: point![0.0, 0.0],
        pixels_per_unit: 480.0 / world_size,
        width: 640.0,
        height: 480.0,
    }
}

/// Deterministic input for headless runs: the player weaves around the arena,
/// sweeps the cursor across the top of the window and fires every
/// `fire_period` ticks.
pub fn scripted_input(viewport: &Viewport, tick: u32, dt: f64, fire_period: u32) -> PlayerInput {
    let t = tick as f64 * dt;
    let cursor = point![
        viewport.width / 2.0 * (1.0 + 0.8 * (t * 0.25).sin()),
        viewport.height * 0.1
    ];
    PlayerInput {
        axes: vector![(t * 0.5).sin(), (t * 0.35).cos()],
        aim_point: viewport.screen_to_world(cursor),
        fire: fire_period > 0 && tick % fire_period == 0,
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<ArenaConfig> {
    Ok(match path {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    })
}

pub struct RunSummary {
    pub seed: u32,
    pub ticks: u32,
    pub status: Status,
    pub score: i64,
}

pub fn run_simulation(
    scenario_name: &str,
    seed: u32,
    config: ArenaConfig,
    dt: f64,
    max_ticks: u32,
) -> anyhow::Result<(Box<Simulation>, RunSummary)> {
    let mut sim = Simulation::with_config(scenario_name, seed, config)?;
    let viewport = scripted_viewport(sim.world_size());
    while sim.status() == Status::Running && sim.tick() < max_ticks.min(scenario::MAX_TICKS) {
        let input = scripted_input(&viewport, sim.tick(), dt, 15);
        sim.step(&input, dt);
    }
    let summary = RunSummary {
        seed,
        ticks: sim.tick(),
        status: sim.status(),
        score: sim.score().score(),
    };
    Ok((sim, summary))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_scripted_aim_in_far_half() {
        let viewport = scripted_viewport(24.0);
        for tick in (0..600).step_by(37) {
            let input = scripted_input(&viewport, tick, 1.0 / 60.0, 15);
            assert!(input.aim_point.y > 9.0 && input.aim_point.y < 12.0);
            assert!(input.aim_point.x.abs() < 13.0);
        }
        assert!(scripted_input(&viewport, 30, 1.0 / 60.0, 15).fire);
        assert!(!scripted_input(&viewport, 31, 1.0 / 60.0, 15).fire);
    }
}
