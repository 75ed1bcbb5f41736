use super::prelude::*;

/// Survival arena: armed turrets hold fixed positions around a field of
/// obstacles and are replaced as soon as they fall.
pub struct Arena {
    spawn_points: Vec<Point2<f64>>,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            spawn_points: vec![
                point![-9.0, 9.0],
                point![9.0, 9.0],
                point![-9.0, 0.0],
                point![9.0, 0.0],
            ],
        }
    }
}

impl Scenario for Arena {
    fn name(&self) -> String {
        "arena".into()
    }

    fn human_name(&self) -> String {
        "Turret Arena".into()
    }

    fn init(&mut self, sim: &mut Simulation, _seed: u32) -> Result<(), Error> {
        add_walls(sim);
        for (center, half_extents) in [
            (vector![-4.0, 4.0], vector![1.5, 0.5]),
            (vector![4.0, 4.0], vector![1.5, 0.5]),
            (vector![0.0, -2.0], vector![0.5, 2.0]),
            (vector![-6.0, -6.0], vector![1.0, 1.0]),
            (vector![6.0, -6.0], vector![1.0, 1.0]),
        ] {
            add_obstacle(sim, center, half_extents);
        }

        let data = player(sim.config());
        tank::create(sim, point![0.0, -9.0], 0.0, data);

        if sim.config().turret.armed {
            require_player(sim)?;
        }

        let mut spawner = TargetSpawner::new(
            &self.spawn_points,
            SpawnTemplate::Turret,
            spawn_policy(sim, SpawnPolicy::FillAllVacant),
            sim.time(),
            sim.config().spawner.interval,
        )?;
        spawner.spawn_vacant(sim);
        sim.set_spawner(spawner);
        Ok(())
    }

    fn status(&self, sim: &Simulation) -> Status {
        check_player_alive(sim, MAX_TICKS)
    }

    fn lines(&self, _: &Simulation) -> Vec<Line> {
        spawn_point_lines(&self.spawn_points)
    }
}
