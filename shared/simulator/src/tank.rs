use crate::aim;
use crate::cannon::Cannon;
use crate::collision::{self, SceneQuery};
use crate::config::ArenaConfig;
use crate::controller::{AxisSweepController, Body, BoundingBox, ControllerConfig};
use crate::debug;
use crate::events::GameEvent;
use crate::input::PlayerInput;
use crate::projectile::{self, ProjectileHandle};
use crate::score::ScoreValue;
use crate::simulation::Simulation;
use nalgebra::{Point2, UnitComplex, Vector2};
use rapier2d_f64::data::arena::Index;
use rapier2d_f64::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Hash, PartialEq, Eq, Copy, Clone, Debug)]
pub struct TankHandle(pub Index);

impl TankHandle {
    pub fn index(self) -> Index {
        self.0
    }
}

impl From<TankHandle> for u64 {
    fn from(handle: TankHandle) -> u64 {
        let (idx, gen) = handle.0.into_raw_parts();
        ((gen as u64) << 32) | idx as u64
    }
}

#[derive(Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub enum TankClass {
    Player,
    Turret,
    Target,
}

impl TankClass {
    pub fn name(&self) -> &'static str {
        match self {
            TankClass::Player => "player",
            TankClass::Turret => "turret",
            TankClass::Target => "target",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TankBody {
    pub position: Point2<f64>,
    pub half_extents: Vector2<f64>,
}

impl Body for TankBody {
    fn bounds(&self) -> BoundingBox {
        BoundingBox::from_center(self.position, self.half_extents)
    }

    fn translate(&mut self, delta: Vector2<f64>) {
        self.position += delta;
    }
}

#[derive(Clone, Debug)]
pub struct TankData {
    pub class: TankClass,
    pub team: i32,
    pub body: TankBody,
    pub base_rotation: UnitComplex<f64>,
    pub turret_rotation: UnitComplex<f64>,
    pub move_speed: f64,
    pub turn_rate: f64,
    pub health: i32,
    pub cannon: Option<Cannon>,
    pub reward: Option<ScoreValue>,
    /// Present for tanks that drive; built by [`create`] once the collider exists.
    pub controller: Option<AxisSweepController>,
    pub(crate) collider: ColliderHandle,
    mobile: bool,
}

impl Default for TankData {
    fn default() -> TankData {
        TankData {
            class: TankClass::Target,
            team: 1,
            body: TankBody {
                position: Point2::origin(),
                half_extents: Vector2::new(0.5, 0.5),
            },
            base_rotation: UnitComplex::identity(),
            turret_rotation: UnitComplex::identity(),
            move_speed: 0.0,
            turn_rate: 0.0,
            health: 1,
            cannon: None,
            reward: None,
            controller: None,
            collider: ColliderHandle::invalid(),
            mobile: false,
        }
    }
}

pub fn player(config: &ArenaConfig) -> TankData {
    let c = &config.player;
    TankData {
        class: TankClass::Player,
        team: 0,
        body: TankBody {
            position: Point2::origin(),
            half_extents: c.half_extents,
        },
        move_speed: c.move_speed,
        turn_rate: c.turn_rate,
        health: c.health,
        cannon: Some(Cannon::new(c.cooldown, 0.0, c.muzzle_offset)),
        mobile: true,
        ..Default::default()
    }
}

/// An enemy turret. Unarmed turrets only track the player.
pub fn turret(config: &ArenaConfig, team: i32, now: f64) -> TankData {
    let c = &config.turret;
    let cannon = if c.armed {
        Some(Cannon::new(c.cooldown, c.cooldown_jitter, c.muzzle_offset).cold(now))
    } else {
        None
    };
    TankData {
        class: TankClass::Turret,
        team,
        body: TankBody {
            position: Point2::origin(),
            half_extents: c.half_extents,
        },
        turn_rate: c.turn_rate,
        health: c.health,
        cannon,
        reward: Some(config.score),
        ..Default::default()
    }
}

pub fn target(config: &ArenaConfig, team: i32) -> TankData {
    let c = &config.target;
    TankData {
        class: TankClass::Target,
        team,
        body: TankBody {
            position: Point2::origin(),
            half_extents: c.half_extents,
        },
        health: c.health,
        reward: Some(config.score),
        ..Default::default()
    }
}

pub fn create(
    sim: &mut Simulation,
    position: Point2<f64>,
    heading: f64,
    mut data: TankData,
) -> TankHandle {
    data.body.position = position;
    data.base_rotation = UnitComplex::new(heading);
    data.turret_rotation = data.base_rotation;

    let half_extents = data.body.half_extents;
    let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y)
        .translation(position.coords)
        .collision_groups(collision::tank_interaction_groups(data.team))
        .build();
    let collider_handle = sim.colliders.insert(collider);
    data.collider = collider_handle;

    if data.mobile {
        let settings = &sim.config().controller;
        let config = ControllerConfig {
            filter: collision::movement_filter(collider_handle),
            horizontal_ray_count: settings.horizontal_ray_count,
            vertical_ray_count: settings.vertical_ray_count,
            skin_width: settings.skin_width,
        };
        data.controller = Some(AxisSweepController::new(config, data.body.bounds()));
    }

    let class = data.class;
    let handle = TankHandle(sim.tanks.insert(data));
    sim.collider_owners.insert(collider_handle, handle);
    if class == TankClass::Player {
        sim.player = Some(handle);
    }
    sim.query_pipeline.update(&sim.bodies, &sim.colliders);
    log::debug!(
        "Created {} {:?} at {:?}",
        class.name(),
        u64::from(handle),
        position
    );
    handle
}

pub fn destroy(sim: &mut Simulation, handle: TankHandle) {
    let data = match sim.tanks.remove(handle.index()) {
        Some(data) => data,
        None => return,
    };
    sim.collider_owners.remove(&data.collider);
    sim.colliders.remove(
        data.collider,
        &mut sim.island_manager,
        &mut sim.bodies,
        false,
    );
    sim.query_pipeline.update(&sim.bodies, &sim.colliders);
    log::debug!("Destroyed {} {:?}", data.class.name(), u64::from(handle));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    Hit,
    Destroyed,
}

/// Applies damage, emitting `Hit` or `Destroyed`. Destroyed tanks are removed.
pub fn apply_damage(
    sim: &mut Simulation,
    handle: TankHandle,
    damage: i32,
) -> Option<DamageOutcome> {
    let (class, health, reward) = {
        let data = sim.tanks.get_mut(handle.index())?;
        data.health -= damage;
        (data.class, data.health, data.reward)
    };
    let tank = u64::from(handle);
    if health <= 0 {
        sim.events.push(GameEvent::Destroyed {
            tank,
            class,
            reward: reward.map(|r| r.on_death).unwrap_or(0),
        });
        destroy(sim, handle);
        Some(DamageOutcome::Destroyed)
    } else {
        sim.events.push(GameEvent::Hit {
            tank,
            class,
            health,
            reward: reward.map(|r| r.on_hit).unwrap_or(0),
        });
        Some(DamageOutcome::Hit)
    }
}

/// Moves a mobile tank along `axes` scaled by its speed. Returns the
/// displacement actually applied.
pub fn drive(
    sim: &mut Simulation,
    handle: TankHandle,
    axes: Vector2<f64>,
    dt: f64,
) -> Option<Vector2<f64>> {
    let Simulation {
        tanks,
        bodies,
        colliders,
        query_pipeline,
        ..
    } = sim;
    let data = tanks.get_mut(handle.index())?;
    let displacement = axes * data.move_speed * dt;
    let resolved = {
        let TankData {
            controller, body, ..
        } = data;
        let controller = controller.as_mut()?;
        let caster = SceneQuery {
            bodies: &*bodies,
            colliders: &*colliders,
            pipeline: &*query_pipeline,
        };
        controller.move_body(body, &caster, displacement)
    };

    if axes.norm_squared() > 0.0 {
        data.base_rotation = aim::turn_towards(data.base_rotation, axes, data.turn_rate, dt);
    }

    if resolved.norm_squared() > 0.0 {
        if let Some(collider) = colliders.get_mut(data.collider) {
            collider.set_translation(data.body.position.coords);
        }
        query_pipeline.update(bodies, colliders);
    }

    debug::emit_sweep_rays(sim, handle);
    Some(resolved)
}

pub fn aim_at(sim: &mut Simulation, handle: TankHandle, point: Point2<f64>, dt: f64) {
    if let Some(data) = sim.tanks.get_mut(handle.index()) {
        let facing = point - data.body.position;
        data.turret_rotation = aim::turn_towards(data.turret_rotation, facing, data.turn_rate, dt);
    }
}

/// Fires the tank's cannon if it is ready.
pub fn fire(sim: &mut Simulation, handle: TankHandle) -> Option<ProjectileHandle> {
    let now = sim.time();
    let (muzzle, rotation, team) = {
        let Simulation { tanks, rng, .. } = sim;
        let data = tanks.get_mut(handle.index())?;
        let cannon = data.cannon.as_mut()?;
        if !cannon.try_fire(now, rng) {
            return None;
        }
        let muzzle =
            data.body.position + data.turret_rotation.transform_vector(&cannon.muzzle_offset);
        (muzzle, data.turret_rotation, data.team)
    };
    sim.events.push(GameEvent::Fired {
        tank: handle.into(),
        position: muzzle,
    });
    Some(projectile::create(sim, muzzle, rotation, team))
}

pub(crate) fn tick(sim: &mut Simulation, handle: TankHandle, input: &PlayerInput, dt: f64) {
    let class = match sim.tanks.get(handle.index()) {
        Some(data) => data.class,
        None => return,
    };
    match class {
        TankClass::Player => {
            drive(sim, handle, input.clamped_axes(), dt);
            aim_at(sim, handle, input.aim_point, dt);
            if input.fire {
                fire(sim, handle);
            }
        }
        TankClass::Turret => {
            if let Some(target) = sim.player_position() {
                aim_at(sim, handle, target, dt);
                fire(sim, handle);
            }
        }
        TankClass::Target => {}
    }
}

pub struct TankAccessor<'a> {
    pub(crate) simulation: &'a Simulation,
    pub(crate) handle: TankHandle,
}

impl<'a> TankAccessor<'a> {
    pub fn exists(&self) -> bool {
        self.simulation.tanks.contains(self.handle.index())
    }

    pub fn data(&self) -> &'a TankData {
        self.simulation.tanks.get(self.handle.index()).unwrap()
    }

    pub fn position(&self) -> Point2<f64> {
        self.data().body.position
    }

    pub fn bounds(&self) -> BoundingBox {
        self.data().body.bounds()
    }

    pub fn heading(&self) -> f64 {
        self.data().base_rotation.angle()
    }

    pub fn turret_heading(&self) -> f64 {
        self.data().turret_rotation.angle()
    }

    pub fn controller(&self) -> Option<&'a AxisSweepController> {
        self.data().controller.as_ref()
    }
}

pub struct TankAccessorMut<'a> {
    pub(crate) simulation: &'a mut Simulation,
    pub(crate) handle: TankHandle,
}

impl<'a> TankAccessorMut<'a> {
    pub fn data(&self) -> &TankData {
        self.simulation.tanks.get(self.handle.index()).unwrap()
    }

    pub fn data_mut(&mut self) -> &mut TankData {
        self.simulation.tanks.get_mut(self.handle.index()).unwrap()
    }

    pub fn drive(&mut self, axes: Vector2<f64>, dt: f64) -> Option<Vector2<f64>> {
        drive(self.simulation, self.handle, axes, dt)
    }

    pub fn aim_at(&mut self, point: Point2<f64>, dt: f64) {
        aim_at(self.simulation, self.handle, point, dt)
    }

    pub fn fire(&mut self) -> Option<ProjectileHandle> {
        fire(self.simulation, self.handle)
    }

    pub fn damage(&mut self, damage: i32) -> Option<DamageOutcome> {
        apply_damage(self.simulation, self.handle, damage)
    }
}
