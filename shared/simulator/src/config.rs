//! Arena tuning, loadable from JSON. Every field has a default so partial
//! files are accepted.

use crate::controller::DEFAULT_SKIN_WIDTH;
use crate::error::Error;
use crate::score::ScoreValue;
use crate::spawner::SpawnPolicy;
use nalgebra::{vector, Vector2};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub world_size: f64,
    pub controller: RayCastSettings,
    pub player: PlayerConfig,
    pub turret: TurretConfig,
    pub target: TargetConfig,
    pub projectile: ProjectileConfig,
    pub spawner: SpawnerConfig,
    pub score: ScoreValue,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayCastSettings {
    pub horizontal_ray_count: i32,
    pub vertical_ray_count: i32,
    pub skin_width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub move_speed: f64,
    pub turn_rate: f64,
    pub cooldown: f64,
    pub health: i32,
    pub half_extents: Vector2<f64>,
    pub muzzle_offset: Vector2<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretConfig {
    pub turn_rate: f64,
    pub cooldown: f64,
    pub cooldown_jitter: f64,
    pub armed: bool,
    pub health: i32,
    pub half_extents: Vector2<f64>,
    pub muzzle_offset: Vector2<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    pub health: i32,
    pub half_extents: Vector2<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub speed: f64,
    pub ttl: f64,
    pub damage: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    pub interval: f64,
    /// Overrides the scenario's spawn policy when set.
    pub policy: Option<SpawnPolicy>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        ArenaConfig {
            world_size: 24.0,
            controller: Default::default(),
            player: Default::default(),
            turret: Default::default(),
            target: Default::default(),
            projectile: Default::default(),
            spawner: Default::default(),
            score: Default::default(),
        }
    }
}

impl Default for RayCastSettings {
    fn default() -> Self {
        RayCastSettings {
            horizontal_ray_count: 4,
            vertical_ray_count: 4,
            skin_width: DEFAULT_SKIN_WIDTH,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            move_speed: 2.0,
            turn_rate: 10.0,
            cooldown: 0.5,
            health: 10,
            half_extents: vector![0.5, 0.5],
            muzzle_offset: vector![0.0, 0.8],
        }
    }
}

impl Default for TurretConfig {
    fn default() -> Self {
        TurretConfig {
            turn_rate: 10.0,
            cooldown: 3.0,
            cooldown_jitter: 0.2,
            armed: true,
            health: 3,
            half_extents: vector![0.5, 0.5],
            muzzle_offset: vector![0.0, 0.8],
        }
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        TargetConfig {
            health: 3,
            half_extents: vector![0.5, 0.5],
        }
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        ProjectileConfig {
            speed: 15.0,
            ttl: 5.0,
            damage: 1,
        }
    }
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        SpawnerConfig {
            interval: 2.0,
            policy: None,
        }
    }
}

fn non_negative(name: &str, value: &mut f64) {
    if !value.is_finite() || *value < 0.0 {
        log::warn!("{name} {value} out of range, using 0");
        *value = 0.0;
    }
}

fn positive(name: &str, value: &mut f64, fallback: f64) {
    if !value.is_finite() || *value <= 0.0 {
        log::warn!("{name} {value} out of range, using {fallback}");
        *value = fallback;
    }
}

fn at_least(name: &str, value: &mut i32, min: i32) {
    if *value < min {
        log::warn!("{name} {value} out of range, using {min}");
        *value = min;
    }
}

fn half_extents(name: &str, value: &mut Vector2<f64>, fallback: Vector2<f64>) {
    if !(value.x.is_finite() && value.y.is_finite() && value.x > 0.0 && value.y > 0.0) {
        log::warn!("{name} {value:?} out of range, using {fallback:?}");
        *value = fallback;
    }
}

impl ArenaConfig {
    pub fn from_json(json: &str) -> Result<ArenaConfig, Error> {
        let config: ArenaConfig = serde_json::from_str(json)?;
        Ok(config.sanitize())
    }

    pub fn load(path: &Path) -> Result<ArenaConfig, Error> {
        let json = std::fs::read_to_string(path)?;
        log::info!("Loading config from {}", path.display());
        ArenaConfig::from_json(&json)
    }

    /// Coerces out-of-range values instead of rejecting them.
    pub fn sanitize(mut self) -> ArenaConfig {
        let defaults = ArenaConfig::default();
        positive("world_size", &mut self.world_size, defaults.world_size);

        let controller = &mut self.controller;
        at_least(
            "controller.horizontal_ray_count",
            &mut controller.horizontal_ray_count,
            crate::controller::MIN_RAY_COUNT as i32,
        );
        at_least(
            "controller.vertical_ray_count",
            &mut controller.vertical_ray_count,
            crate::controller::MIN_RAY_COUNT as i32,
        );
        positive(
            "controller.skin_width",
            &mut controller.skin_width,
            defaults.controller.skin_width,
        );

        let player = &mut self.player;
        non_negative("player.move_speed", &mut player.move_speed);
        non_negative("player.turn_rate", &mut player.turn_rate);
        non_negative("player.cooldown", &mut player.cooldown);
        at_least("player.health", &mut player.health, 1);
        half_extents(
            "player.half_extents",
            &mut player.half_extents,
            defaults.player.half_extents,
        );

        let turret = &mut self.turret;
        non_negative("turret.turn_rate", &mut turret.turn_rate);
        non_negative("turret.cooldown", &mut turret.cooldown);
        non_negative("turret.cooldown_jitter", &mut turret.cooldown_jitter);
        at_least("turret.health", &mut turret.health, 1);
        half_extents(
            "turret.half_extents",
            &mut turret.half_extents,
            defaults.turret.half_extents,
        );

        at_least("target.health", &mut self.target.health, 1);
        half_extents(
            "target.half_extents",
            &mut self.target.half_extents,
            defaults.target.half_extents,
        );

        non_negative("projectile.speed", &mut self.projectile.speed);
        non_negative("projectile.ttl", &mut self.projectile.ttl);
        at_least("projectile.damage", &mut self.projectile.damage, 0);

        positive(
            "spawner.interval",
            &mut self.spawner.interval,
            defaults.spawner.interval,
        );

        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ArenaConfig::from_json(r#"{"player": {"move_speed": 4.0}}"#).unwrap();
        assert_eq!(config.player.move_speed, 4.0);
        assert_eq!(config.player.cooldown, 0.5);
        assert_eq!(config.turret, TurretConfig::default());
        assert_eq!(config.score.on_hit, 15);
    }

    #[test]
    fn test_sanitize_coerces() {
        let json = r#"{
            "controller": {"horizontal_ray_count": 0, "vertical_ray_count": -3, "skin_width": -1.0},
            "player": {"move_speed": -2.0},
            "spawner": {"interval": 0.0, "policy": "FillAllVacant"}
        }"#;
        let config = ArenaConfig::from_json(json).unwrap();
        assert_eq!(config.controller.horizontal_ray_count, 2);
        assert_eq!(config.controller.vertical_ray_count, 2);
        assert_eq!(config.controller.skin_width, DEFAULT_SKIN_WIDTH);
        assert_eq!(config.player.move_speed, 0.0);
        assert_eq!(config.spawner.interval, 2.0);
        assert_eq!(config.spawner.policy, Some(SpawnPolicy::FillAllVacant));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ArenaConfig::from_json("{\"world_size\": \"big\"}"),
            Err(Error::Config(_))
        ));
    }
}
