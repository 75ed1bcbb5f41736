use crate::error::Error;
use crate::events::GameEvent;
use crate::simulation::Simulation;
use crate::tank::{self, TankHandle};
use crate::timer::Interval;
use nalgebra::Point2;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SPAWN_TEAM: i32 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnPolicy {
    /// One randomly chosen vacant point per period.
    #[default]
    RandomVacant,
    /// Every vacant point per period.
    FillAllVacant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnTemplate {
    Target,
    Turret,
}

#[derive(Clone, Debug)]
pub struct SpawnPoint {
    pub position: Point2<f64>,
    pub occupant: Option<TankHandle>,
}

#[derive(Clone, Debug)]
pub struct TargetSpawner {
    points: Vec<SpawnPoint>,
    template: SpawnTemplate,
    policy: SpawnPolicy,
    interval: Interval,
}

impl TargetSpawner {
    pub fn new(
        positions: &[Point2<f64>],
        template: SpawnTemplate,
        policy: SpawnPolicy,
        start: f64,
        period: f64,
    ) -> Result<Self, Error> {
        if positions.is_empty() {
            return Err(Error::MissingReference("spawn points"));
        }
        Ok(TargetSpawner {
            points: positions
                .iter()
                .map(|&position| SpawnPoint {
                    position,
                    occupant: None,
                })
                .collect(),
            template,
            policy,
            interval: Interval::new(start, period),
        })
    }

    pub fn points(&self) -> &[SpawnPoint] {
        &self.points
    }

    pub fn template(&self) -> SpawnTemplate {
        self.template
    }

    pub fn policy(&self) -> SpawnPolicy {
        self.policy
    }

    pub fn interval(&self) -> &Interval {
        &self.interval
    }

    /// Indices of points whose occupant is absent or destroyed.
    pub fn vacant(&self, sim: &Simulation) -> Vec<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| match p.occupant {
                Some(handle) => !sim.tank(handle).exists(),
                None => true,
            })
            .map(|(i, _)| i)
            .collect()
    }

    pub fn tick(&mut self, sim: &mut Simulation) {
        if !self.interval.poll(sim.time()) {
            return;
        }
        let vacant = self.vacant(sim);
        if vacant.is_empty() {
            return;
        }
        match self.policy {
            SpawnPolicy::RandomVacant => {
                let choice = vacant[sim.rng.gen_range(0..vacant.len())];
                self.spawn(sim, choice);
            }
            SpawnPolicy::FillAllVacant => {
                for index in vacant {
                    self.spawn(sim, index);
                }
            }
        }
    }

    /// Fills every vacant point immediately, outside the periodic schedule.
    pub fn spawn_vacant(&mut self, sim: &mut Simulation) -> Vec<TankHandle> {
        self.vacant(sim)
            .into_iter()
            .map(|index| self.spawn(sim, index))
            .collect()
    }

    fn spawn(&mut self, sim: &mut Simulation, index: usize) -> TankHandle {
        let data = match self.template {
            SpawnTemplate::Target => tank::target(sim.config(), SPAWN_TEAM),
            SpawnTemplate::Turret => tank::turret(sim.config(), SPAWN_TEAM, sim.time()),
        };
        let position = self.points[index].position;
        let handle = tank::create(sim, position, 0.0, data);
        self.points[index].occupant = Some(handle);
        sim.events.push(GameEvent::Spawned {
            tank: handle.into(),
            spawn_point: index,
        });
        handle
    }
}
