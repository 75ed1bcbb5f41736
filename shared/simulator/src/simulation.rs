use crate::config::ArenaConfig;
use crate::debug::Line;
use crate::error::Error;
use crate::events::{EventListener, GameEvent};
use crate::input::PlayerInput;
use crate::projectile::{self, ProjectileAccessor, ProjectileData, ProjectileHandle};
use crate::scenario::{self, Scenario, Status};
use crate::score::ScoreBoard;
use crate::snapshot::*;
use crate::spawner::TargetSpawner;
use crate::tank::{self, TankAccessor, TankAccessorMut, TankData, TankHandle};
use instant::Instant;
use nalgebra::Point2;
use rand_chacha::ChaCha8Rng;
use rapier2d_f64::data::arena::Arena;
use rapier2d_f64::prelude::*;
use std::collections::HashMap;

pub const DEFAULT_TICK_LENGTH: f64 = 1.0 / 60.0;

pub struct Simulation {
    scenario: Option<Box<dyn Scenario>>,
    config: ArenaConfig,
    pub(crate) tanks: Arena<TankData>,
    pub(crate) projectiles: Arena<ProjectileData>,
    pub(crate) collider_owners: HashMap<ColliderHandle, TankHandle>,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    pub(crate) island_manager: IslandManager,
    pub(crate) query_pipeline: QueryPipeline,
    spawner: Option<TargetSpawner>,
    pub(crate) player: Option<TankHandle>,
    pub(crate) events: SimEvents,
    pub(crate) rng: ChaCha8Rng,
    score: ScoreBoard,
    listeners: Vec<Box<dyn EventListener>>,
    tick: u32,
    time: f64,
    seed: u32,
    timing: Timing,
}

impl Simulation {
    pub fn new(scenario_name: &str, seed: u32) -> Result<Box<Simulation>, Error> {
        Simulation::with_config(scenario_name, seed, ArenaConfig::default())
    }

    pub fn with_config(
        scenario_name: &str,
        seed: u32,
        config: ArenaConfig,
    ) -> Result<Box<Simulation>, Error> {
        log::info!("seed {seed}");
        let mut scenario = scenario::load(scenario_name)?;
        let mut sim = Box::new(Simulation {
            scenario: None,
            config: config.sanitize(),
            tanks: Arena::new(),
            projectiles: Arena::new(),
            collider_owners: HashMap::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
            spawner: None,
            player: None,
            events: SimEvents::new(),
            rng: crate::rng::new_rng(seed),
            score: ScoreBoard::new(),
            listeners: Vec::new(),
            tick: 0,
            time: 0.0,
            seed,
            timing: Default::default(),
        });

        scenario.init(&mut sim, seed)?;
        sim.query_pipeline.update(&sim.bodies, &sim.colliders);
        log::info!("Loaded scenario {}", scenario.name());
        sim.scenario = Some(scenario);

        Ok(sim)
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    pub fn world_size(&self) -> f64 {
        self.config.world_size
    }

    pub fn scenario_name(&self) -> String {
        self.scenario
            .as_ref()
            .map(|s| s.name())
            .unwrap_or_default()
    }

    pub fn status(&self) -> Status {
        match self.scenario.as_ref() {
            Some(scenario) => scenario.status(self),
            None => Status::Running,
        }
    }

    pub fn score(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn player(&self) -> Option<TankHandle> {
        self.player
    }

    pub fn player_position(&self) -> Option<Point2<f64>> {
        let handle = self.player?;
        self.tanks.get(handle.index()).map(|data| data.body.position)
    }

    pub fn tank_handles(&self) -> Vec<TankHandle> {
        self.tanks
            .iter()
            .map(|(index, _)| TankHandle(index))
            .collect()
    }

    pub fn projectile_handles(&self) -> Vec<ProjectileHandle> {
        self.projectiles
            .iter()
            .map(|(index, _)| ProjectileHandle(index))
            .collect()
    }

    pub fn tank(self: &Simulation, handle: TankHandle) -> TankAccessor {
        TankAccessor {
            simulation: self,
            handle,
        }
    }

    pub fn tank_mut(self: &mut Simulation, handle: TankHandle) -> TankAccessorMut {
        TankAccessorMut {
            simulation: self,
            handle,
        }
    }

    pub fn projectile(self: &Simulation, handle: ProjectileHandle) -> ProjectileAccessor {
        ProjectileAccessor {
            simulation: self,
            handle,
        }
    }

    pub fn spawner(&self) -> Option<&TargetSpawner> {
        self.spawner.as_ref()
    }

    pub fn set_spawner(&mut self, spawner: TargetSpawner) {
        self.spawner = Some(spawner);
    }

    pub fn add_listener(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    pub fn step(self: &mut Simulation, input: &PlayerInput, dt: f64) {
        // Events raised since the last step (direct damage, scenario spawns).
        self.dispatch_events();
        self.events.clear();
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.query_pipeline.update(&self.bodies, &self.colliders);

        let start_time = Instant::now();
        for handle in self.tank_handles() {
            tank::tick(self, handle, input, dt);
        }
        self.timing.tanks = (Instant::now() - start_time).as_secs_f64();

        let start_time = Instant::now();
        projectile::tick(self, dt);
        self.timing.projectiles = (Instant::now() - start_time).as_secs_f64();

        let start_time = Instant::now();
        let mut spawner = std::mem::take(&mut self.spawner);
        if let Some(spawner) = spawner.as_mut() {
            spawner.tick(self);
        }
        self.spawner = spawner;
        self.timing.spawner = (Instant::now() - start_time).as_secs_f64();

        self.dispatch_events();

        let start_time = Instant::now();
        let mut scenario = std::mem::take(&mut self.scenario);
        if let Some(scenario) = scenario.as_mut() {
            scenario.tick(self);
        }
        self.scenario = scenario;
        self.timing.scenario = (Instant::now() - start_time).as_secs_f64();

        self.tick += 1;
        self.time += dt;
    }

    fn dispatch_events(&mut self) {
        for event in self.events.game[self.events.dispatched..].iter() {
            self.score.on_event(event);
            for listener in self.listeners.iter_mut() {
                listener.on_event(event);
            }
        }
        self.events.dispatched = self.events.game.len();
    }

    pub fn events(&self) -> &SimEvents {
        &self.events
    }

    pub fn emit_debug_lines(&mut self, tank: TankHandle, lines: Vec<Line>) {
        self.events.debug_lines.push((tank.into(), lines));
    }

    pub fn hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher;
        let fixedpoint = |v: f64| (v * 1e9) as i64;
        let mut s = DefaultHasher::new();
        for (_, tank) in self.tanks.iter() {
            s.write_i64(fixedpoint(tank.body.position.x));
            s.write_i64(fixedpoint(tank.body.position.y));
            s.write_i64(fixedpoint(tank.base_rotation.angle()));
            s.write_i64(fixedpoint(tank.turret_rotation.angle()));
            s.write_i32(tank.health);
        }
        for (_, projectile) in self.projectiles.iter() {
            s.write_i64(fixedpoint(projectile.position.x));
            s.write_i64(fixedpoint(projectile.position.y));
        }
        s.write_i64(self.score.score());
        s.finish()
    }

    pub fn snapshot(&self, nonce: u32) -> Snapshot {
        let mut snapshot = Snapshot {
            nonce,
            tick: self.tick,
            time: self.time,
            status: self.status(),
            score: self.score.score(),
            score_text: self.score.display(),
            tanks: vec![],
            projectiles: vec![],
            scenario_lines: self
                .scenario
                .as_ref()
                .map(|s| s.lines(self))
                .unwrap_or_default(),
            debug_lines: self.events.debug_lines.clone(),
            events: self.events.game.clone(),
            timing: self.timing.clone(),
            world_size: self.world_size(),
        };

        for (index, tank) in self.tanks.iter() {
            snapshot.tanks.push(TankSnapshot {
                id: TankHandle(index).into(),
                class: tank.class,
                team: tank.team,
                position: tank.body.position,
                heading: tank.base_rotation.angle(),
                turret_heading: tank.turret_rotation.angle(),
                health: tank.health,
                cannon: tank.cannon.as_ref().map(|c| c.state()),
                collisions: tank.controller.as_ref().map(|c| c.collisions()),
            });
        }

        for (_, projectile) in self.projectiles.iter() {
            snapshot.projectiles.push(ProjectileSnapshot {
                position: projectile.position,
                velocity: projectile.velocity,
                team: projectile.team,
                ttl: projectile.ttl,
            });
        }

        snapshot
    }
}

pub struct SimEvents {
    pub game: Vec<GameEvent>,
    pub debug_lines: Vec<(u64, Vec<Line>)>,
    dispatched: usize,
}

impl SimEvents {
    pub fn new() -> Self {
        Self {
            game: Vec::new(),
            debug_lines: Vec::new(),
            dispatched: 0,
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        self.game.push(event);
    }

    pub fn clear(&mut self) {
        self.game.clear();
        self.debug_lines.clear();
        self.dispatched = 0;
    }
}

impl Default for SimEvents {
    fn default() -> Self {
        SimEvents::new()
    }
}
