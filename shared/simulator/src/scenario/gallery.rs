use super::prelude::*;

const VICTORY_SCORE: i64 = 450;

/// Shooting gallery: unarmed targets appear one at a time at random vacant
/// spawn points.
pub struct Gallery {
    spawn_points: Vec<Point2<f64>>,
}

impl Gallery {
    pub fn new() -> Self {
        Self {
            spawn_points: vec![
                point![-8.0, 6.0],
                point![-4.0, 8.0],
                point![0.0, 6.0],
                point![4.0, 8.0],
                point![8.0, 6.0],
            ],
        }
    }
}

impl Scenario for Gallery {
    fn name(&self) -> String {
        "gallery".into()
    }

    fn human_name(&self) -> String {
        "Shooting Gallery".into()
    }

    fn init(&mut self, sim: &mut Simulation, _seed: u32) -> Result<(), Error> {
        add_walls(sim);
        let data = player(sim.config());
        tank::create(sim, point![0.0, -8.0], 0.0, data);

        let spawner = TargetSpawner::new(
            &self.spawn_points,
            SpawnTemplate::Target,
            spawn_policy(sim, SpawnPolicy::RandomVacant),
            sim.time(),
            sim.config().spawner.interval,
        )?;
        sim.set_spawner(spawner);
        Ok(())
    }

    fn status(&self, sim: &Simulation) -> Status {
        if sim.score().score() >= VICTORY_SCORE {
            return Status::Victory { team: 0 };
        }
        check_player_alive(sim, MAX_TICKS)
    }

    fn lines(&self, _: &Simulation) -> Vec<Line> {
        spawn_point_lines(&self.spawn_points)
    }
}
