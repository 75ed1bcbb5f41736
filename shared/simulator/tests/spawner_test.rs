use nalgebra::point;
use tank_arena_simulator::config::ArenaConfig;
use tank_arena_simulator::error::Error;
use tank_arena_simulator::events::GameEvent;
use tank_arena_simulator::input::PlayerInput;
use tank_arena_simulator::simulation::Simulation;
use tank_arena_simulator::spawner::{SpawnPolicy, SpawnTemplate, TargetSpawner};
use tank_arena_simulator::tank::TankClass;
use test_log::test;

const DT: f64 = 1.0 / 60.0;

fn count(sim: &Simulation, class: TankClass) -> usize {
    sim.tank_handles()
        .into_iter()
        .filter(|&h| sim.tank(h).data().class == class)
        .count()
}

fn run_until(sim: &mut Simulation, time: f64) {
    let input = PlayerInput::idle();
    while sim.time() < time {
        sim.step(&input, DT);
    }
}

#[test]
fn test_random_vacant_spawns_one_per_period() {
    let mut sim = Simulation::new("gallery", 0).unwrap();
    assert_eq!(count(&sim, TankClass::Target), 0);

    run_until(&mut sim, 1.9);
    assert_eq!(count(&sim, TankClass::Target), 0);

    run_until(&mut sim, 2.1);
    assert_eq!(count(&sim, TankClass::Target), 1);

    run_until(&mut sim, 4.1);
    assert_eq!(count(&sim, TankClass::Target), 2);
}

#[test]
fn test_random_vacant_never_doubles_up() {
    let mut sim = Simulation::new("gallery", 3).unwrap();
    run_until(&mut sim, 30.0);

    let spawner = sim.spawner().unwrap();
    assert_eq!(count(&sim, TankClass::Target), spawner.points().len());
    assert!(spawner.vacant(&sim).is_empty());
    let mut positions: Vec<_> = sim
        .tank_handles()
        .into_iter()
        .filter(|&h| sim.tank(h).data().class == TankClass::Target)
        .map(|h| {
            let p = sim.tank(h).position();
            ((p.x * 1000.0) as i64, (p.y * 1000.0) as i64)
        })
        .collect();
    positions.sort();
    positions.dedup();
    assert_eq!(positions.len(), spawner.points().len());
}

#[test]
fn test_fill_all_vacant_policy_override() {
    let mut config = ArenaConfig::default();
    config.spawner.policy = Some(SpawnPolicy::FillAllVacant);
    let mut sim = Simulation::with_config("gallery", 0, config).unwrap();
    assert_eq!(sim.spawner().unwrap().policy(), SpawnPolicy::FillAllVacant);

    run_until(&mut sim, 2.1);
    assert_eq!(count(&sim, TankClass::Target), 5);
}

#[test]
fn test_destroyed_turret_is_replaced() {
    let mut sim = Simulation::new("arena", 0).unwrap();
    assert_eq!(count(&sim, TankClass::Turret), 4);

    let victim = sim
        .tank_handles()
        .into_iter()
        .find(|&h| sim.tank(h).data().class == TankClass::Turret)
        .unwrap();
    sim.tank_mut(victim).damage(100);
    assert_eq!(count(&sim, TankClass::Turret), 3);

    let mut spawned = vec![];
    let input = PlayerInput::idle();
    while sim.time() < 2.1 {
        sim.step(&input, DT);
        for e in sim.events().game.iter() {
            if let GameEvent::Spawned { spawn_point, .. } = e {
                spawned.push(*spawn_point);
            }
        }
    }
    assert_eq!(count(&sim, TankClass::Turret), 4);
    assert_eq!(spawned.len(), 1);
}

#[test]
fn test_no_spawn_points() {
    let result = TargetSpawner::new(
        &[],
        SpawnTemplate::Target,
        SpawnPolicy::RandomVacant,
        0.0,
        2.0,
    );
    assert!(matches!(result, Err(Error::MissingReference(_))));
}

#[test]
fn test_manual_spawner() {
    let mut sim = Simulation::new("test", 0).unwrap();
    let mut spawner = TargetSpawner::new(
        &[point![0.0, 0.0], point![3.0, 0.0]],
        SpawnTemplate::Target,
        SpawnPolicy::FillAllVacant,
        0.0,
        1.0,
    )
    .unwrap();
    assert_eq!(spawner.vacant(&sim), vec![0, 1]);

    let spawned = spawner.spawn_vacant(&mut sim);
    assert_eq!(spawned.len(), 2);
    assert!(spawner.vacant(&sim).is_empty());

    sim.tank_mut(spawned[1]).damage(100);
    assert_eq!(spawner.vacant(&sim), vec![1]);

    sim.set_spawner(spawner);
    run_until(&mut sim, 1.1);
    assert_eq!(count(&sim, TankClass::Target), 2);
    assert!(sim.spawner().unwrap().vacant(&sim).is_empty());
}
