use nalgebra::{point, vector};
use tank_arena_simulator::config::ArenaConfig;
use tank_arena_simulator::error::Error;
use tank_arena_simulator::input::PlayerInput;
use tank_arena_simulator::scenario::{self, check_player_alive, require_player, Status};
use tank_arena_simulator::simulation::Simulation;
use tank_arena_simulator::tank::TankClass;
use test_log::test;

const DT: f64 = 1.0 / 60.0;

fn scripted_input(tick: u32) -> PlayerInput {
    let t = tick as f64 * DT;
    PlayerInput {
        axes: vector![t.sin(), (t * 0.7).cos()],
        aim_point: point![8.0 * (t * 0.3).cos(), 8.0 * (t * 0.3).sin()],
        fire: tick % 20 == 0,
    }
}

#[test]
fn test_unknown_scenario() {
    assert!(matches!(
        Simulation::new("nonexistent", 0),
        Err(Error::UnknownScenario(_))
    ));
    assert!(scenario::load_safe("nonexistent").is_none());
}

#[test]
fn test_list_loads() {
    for name in scenario::list() {
        let sim = Simulation::new(&name, 0).unwrap();
        assert_eq!(sim.scenario_name(), name);
        assert_eq!(sim.status(), Status::Running);
        assert!(sim.player().is_some());
    }
}

#[test]
fn test_require_player() {
    let sim = Simulation::new("test", 0).unwrap();
    assert!(matches!(
        require_player(&sim),
        Err(Error::MissingReference("player"))
    ));
    assert_eq!(check_player_alive(&sim, 100), Status::Failed);

    let sim = Simulation::new("gallery", 0).unwrap();
    assert!(require_player(&sim).is_ok());
    assert_eq!(check_player_alive(&sim, 100), Status::Running);
    assert_eq!(check_player_alive(&sim, 0), Status::Draw);
}

#[test]
fn test_arena_fails_when_player_destroyed() {
    let mut sim = Simulation::new("arena", 0).unwrap();
    let player = sim.player().unwrap();
    sim.tank_mut(player).damage(1000);
    sim.step(&PlayerInput::idle(), DT);
    assert_eq!(sim.status(), Status::Failed);
}

#[test]
fn test_arena_turrets_wear_player_down() {
    let mut sim = Simulation::new("arena", 0).unwrap();
    let player = sim.player().unwrap();
    let initial_health = sim.tank(player).data().health;
    while sim.time() < 10.0 && sim.status() == Status::Running {
        sim.step(&PlayerInput::idle(), DT);
    }
    assert!(!sim.tank(player).exists() || sim.tank(player).data().health < initial_health);
}

#[test]
fn test_gallery_victory() {
    let mut config = ArenaConfig::default();
    config.target.health = 1;
    config.score.on_death = 500;
    let mut sim = Simulation::with_config("gallery", 0, config).unwrap();
    let target = loop {
        sim.step(&PlayerInput::idle(), DT);
        let found = sim
            .tank_handles()
            .into_iter()
            .find(|&h| sim.tank(h).data().class == TankClass::Target);
        if let Some(found) = found {
            break found;
        }
        assert!(sim.time() < 3.0);
    };

    // Line up under the target and shoot straight up.
    let aim_point = sim.tank(target).position();
    let player = sim.player().unwrap();
    let player_position = sim.tank(player).position();
    let mut ticks = 0;
    while sim.status() == Status::Running && ticks < 600 {
        let input = PlayerInput {
            axes: vector![(aim_point.x - sim.tank(player).position().x).signum(), 0.0],
            aim_point: point![aim_point.x, player_position.y + 100.0],
            fire: (sim.tank(player).position().x - aim_point.x).abs() < 0.05,
        };
        sim.step(&input, DT);
        ticks += 1;
    }
    assert_eq!(sim.status(), Status::Victory { team: 0 });
}

#[test]
fn test_determinism() {
    let mut a = Simulation::new("arena", 7).unwrap();
    let mut b = Simulation::new("arena", 7).unwrap();
    for tick in 0..600 {
        let input = scripted_input(tick);
        a.step(&input, DT);
        b.step(&input, DT);
        assert_eq!(a.hash(), b.hash(), "diverged at tick {tick}");
    }
}

#[test]
fn test_snapshot() {
    let mut sim = Simulation::new("arena", 0).unwrap();
    for tick in 0..30 {
        sim.step(&scripted_input(tick), DT);
    }
    let snapshot = sim.snapshot(42);
    assert_eq!(snapshot.nonce, 42);
    assert_eq!(snapshot.tick, 30);
    assert_eq!(snapshot.tanks.len(), 5);
    assert_eq!(snapshot.score_text, format!("Score : {}", snapshot.score));
    assert!(!snapshot.scenario_lines.is_empty());
    assert!(snapshot
        .tanks
        .iter()
        .any(|t| t.class == TankClass::Player && t.collisions.is_some()));

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"world_size\":24.0"));
}
