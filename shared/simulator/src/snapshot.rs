use crate::cannon::CannonState;
use crate::controller::CollisionState;
use crate::debug::Line;
use crate::events::GameEvent;
use crate::scenario::Status;
use crate::tank::TankClass;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Snapshot {
    pub nonce: u32,
    pub tick: u32,
    pub time: f64,
    pub status: Status,
    pub score: i64,
    pub score_text: String,
    pub tanks: Vec<TankSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub scenario_lines: Vec<Line>,
    pub debug_lines: Vec<(u64, Vec<Line>)>,
    pub events: Vec<GameEvent>,
    pub timing: Timing,
    pub world_size: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TankSnapshot {
    pub id: u64,
    pub class: TankClass,
    pub team: i32,
    pub position: Point2<f64>,
    pub heading: f64,
    pub turret_heading: f64,
    pub health: i32,
    pub cannon: Option<CannonState>,
    pub collisions: Option<CollisionState>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProjectileSnapshot {
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub team: i32,
    pub ttl: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Timing {
    pub tanks: f64,
    pub projectiles: f64,
    pub spawner: f64,
    pub scenario: f64,
}
