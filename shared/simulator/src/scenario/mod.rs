mod arena;
mod gallery;
mod test;

use crate::debug::{convert_color, Line};
use crate::error::Error;
use crate::simulation::Simulation;
use crate::spawner::SpawnPolicy;
use crate::tank::TankHandle;
use nalgebra::{vector, Point2};
use serde::{Deserialize, Serialize};

pub mod prelude {
    pub use super::Scenario;
    pub use super::Status;
    pub use super::{
        check_player_alive, require_player, spawn_point_lines, spawn_policy, MAX_TICKS,
    };
    pub use crate::collision::{add_obstacle, add_walls};
    pub use crate::debug::Line;
    pub use crate::error::Error;
    pub use crate::rng::{new_rng, SeededRng};
    pub use crate::simulation::Simulation;
    pub use crate::spawner::{SpawnPolicy, SpawnTemplate, TargetSpawner};
    pub use crate::tank::{self, player, target, turret, TankHandle};
    pub use nalgebra::{point, vector, Point2, Vector2};
    pub use rand::Rng;
    pub use std::f64::consts::{PI, TAU};
}

pub const MAX_TICKS: u32 = 60 * 60 * 3;

#[derive(PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Copy, Clone)]
pub enum Status {
    Running,
    Victory { team: i32 },
    Failed,
    Draw,
}

pub trait Scenario {
    fn name(&self) -> String;

    fn human_name(&self) -> String {
        self.name()
    }

    fn init(&mut self, sim: &mut Simulation, seed: u32) -> Result<(), Error>;

    fn tick(&mut self, _: &mut Simulation) {}

    fn status(&self, _: &Simulation) -> Status {
        Status::Running
    }

    fn lines(&self, _: &Simulation) -> Vec<Line> {
        vec![]
    }
}

pub fn load_safe(name: &str) -> Option<Box<dyn Scenario>> {
    let scenario: Option<Box<dyn Scenario>> = match name {
        "test" => Some(Box::new(test::TestScenario {})),
        "gallery" => Some(Box::new(gallery::Gallery::new())),
        "arena" => Some(Box::new(arena::Arena::new())),
        _ => None,
    };
    if let Some(scenario) = scenario.as_ref() {
        assert_eq!(scenario.name(), name);
    }
    scenario
}

pub fn load(name: &str) -> Result<Box<dyn Scenario>, Error> {
    load_safe(name).ok_or_else(|| Error::UnknownScenario(name.to_string()))
}

pub fn list() -> Vec<String> {
    vec!["gallery", "arena"]
        .iter()
        .map(|x| x.to_string())
        .collect()
}

/// The player handle, for scenarios whose actors need someone to shoot at.
pub fn require_player(sim: &Simulation) -> Result<TankHandle, Error> {
    sim.player()
        .filter(|&handle| sim.tank(handle).exists())
        .ok_or(Error::MissingReference("player"))
}

/// Failed once the player has been destroyed, Draw at the tick limit.
pub fn check_player_alive(sim: &Simulation, max_ticks: u32) -> Status {
    if require_player(sim).is_err() {
        Status::Failed
    } else if sim.tick() >= max_ticks {
        Status::Draw
    } else {
        Status::Running
    }
}

/// Configured spawn policy, falling back to the scenario's own.
pub fn spawn_policy(sim: &Simulation, default: SpawnPolicy) -> SpawnPolicy {
    sim.config().spawner.policy.unwrap_or(default)
}

pub fn spawn_point_lines(points: &[Point2<f64>]) -> Vec<Line> {
    let color = convert_color(0x49d9ff);
    let r = 0.25;
    let mut lines = vec![];
    for &p in points {
        lines.push(Line {
            a: p + vector![-r, 0.0],
            b: p + vector![r, 0.0],
            color,
        });
        lines.push(Line {
            a: p + vector![0.0, -r],
            b: p + vector![0.0, r],
            color,
        });
    }
    lines
}
