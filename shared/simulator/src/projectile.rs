use crate::aim;
use crate::collision::{self, RayCaster, SceneQuery};
use crate::events::GameEvent;
use crate::simulation::Simulation;
use crate::tank;
use nalgebra::{Point2, UnitComplex, Vector2};
use rapier2d_f64::data::arena::Index;

#[derive(Hash, PartialEq, Eq, Copy, Clone, Debug)]
pub struct ProjectileHandle(pub Index);

impl ProjectileHandle {
    pub fn index(self) -> Index {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct ProjectileData {
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub team: i32,
    pub damage: i32,
    pub ttl: f64,
}

/// Launches a projectile along the forward axis of `rotation`.
pub fn create(
    sim: &mut Simulation,
    position: Point2<f64>,
    rotation: UnitComplex<f64>,
    team: i32,
) -> ProjectileHandle {
    let config = &sim.config().projectile;
    let data = ProjectileData {
        position,
        velocity: aim::forward(&rotation) * config.speed,
        team,
        damage: config.damage,
        ttl: config.ttl,
    };
    ProjectileHandle(sim.projectiles.insert(data))
}

pub fn destroy(sim: &mut Simulation, handle: ProjectileHandle) {
    sim.projectiles.remove(handle.index());
}

pub(crate) fn tick(sim: &mut Simulation, dt: f64) {
    let handles: Vec<ProjectileHandle> = sim
        .projectiles
        .iter()
        .map(|(index, _)| ProjectileHandle(index))
        .collect();
    for handle in handles {
        let (position, velocity, team, damage) = {
            let data = match sim.projectiles.get_mut(handle.index()) {
                Some(data) => data,
                None => continue,
            };
            data.ttl -= dt;
            if data.ttl <= 0.0 {
                destroy(sim, handle);
                continue;
            }
            (data.position, data.velocity, data.team, data.damage)
        };

        let step = velocity * dt;
        let hit = SceneQuery::new(sim).cast(
            position,
            step,
            step.norm(),
            &collision::projectile_filter(team),
        );

        match hit {
            Some(hit) => {
                let impact = position + step.normalize() * hit.distance;
                destroy(sim, handle);
                sim.events.push(GameEvent::Impact { position: impact });
                let owner = hit
                    .collider
                    .and_then(|collider| sim.collider_owners.get(&collider).copied());
                if let Some(owner) = owner {
                    tank::apply_damage(sim, owner, damage);
                }
            }
            None => {
                if let Some(data) = sim.projectiles.get_mut(handle.index()) {
                    data.position += step;
                }
            }
        }
    }
}

pub struct ProjectileAccessor<'a> {
    pub(crate) simulation: &'a Simulation,
    pub(crate) handle: ProjectileHandle,
}

impl<'a> ProjectileAccessor<'a> {
    pub fn exists(&self) -> bool {
        self.simulation.projectiles.contains(self.handle.index())
    }

    pub fn data(&self) -> &'a ProjectileData {
        self.simulation.projectiles.get(self.handle.index()).unwrap()
    }

    pub fn position(&self) -> Point2<f64> {
        self.data().position
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.data().velocity
    }
}
