use nalgebra::point;
use std::cell::RefCell;
use std::rc::Rc;
use tank_arena_simulator::events::{EventListener, GameEvent};
use tank_arena_simulator::score::{ScoreBoard, ScoreValue};
use tank_arena_simulator::simulation::Simulation;
use tank_arena_simulator::tank::{self, target, DamageOutcome, TankClass};
use test_log::test;

#[test]
fn test_display() {
    let mut board = ScoreBoard::new();
    assert_eq!(board.display(), "Score : 0");
    board.add(60);
    assert_eq!(board.display(), "Score : 60");
}

#[test]
fn test_listener_awards_rewards() {
    let mut board = ScoreBoard::new();
    let value = ScoreValue::default();
    board.on_event(&GameEvent::Fired {
        tank: 1,
        position: point![0.0, 0.0],
    });
    board.on_event(&GameEvent::Hit {
        tank: 2,
        class: TankClass::Target,
        health: 2,
        reward: value.on_hit,
    });
    board.on_event(&GameEvent::Destroyed {
        tank: 2,
        class: TankClass::Target,
        reward: value.on_death,
    });
    board.on_event(&GameEvent::Impact {
        position: point![1.0, 1.0],
    });
    assert_eq!(board.score(), 60);
}

#[test]
fn test_damage_outcomes() {
    let mut sim = Simulation::new("test", 0).unwrap();
    let data = target(sim.config(), 1);
    let handle = tank::create(&mut sim, point![0.0, 0.0], 0.0, data);

    assert_eq!(sim.tank_mut(handle).damage(1), Some(DamageOutcome::Hit));
    assert_eq!(sim.tank(handle).data().health, 2);
    assert_eq!(sim.tank_mut(handle).damage(5), Some(DamageOutcome::Destroyed));
    assert!(!sim.tank(handle).exists());
    assert_eq!(sim.tank_mut(handle).damage(1), None);

    let events = &sim.events().game;
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], GameEvent::Hit { reward: 15, .. }));
    assert!(matches!(events[1], GameEvent::Destroyed { reward: 45, .. }));
}

#[test]
fn test_registered_listener_sees_events_once() {
    let mut sim = Simulation::new("test", 0).unwrap();
    let seen = Rc::new(RefCell::new(0));
    let counter = seen.clone();
    sim.add_listener(Box::new(move |e: &GameEvent| {
        if let GameEvent::Destroyed { class, .. } = e {
            assert_eq!(*class, TankClass::Target);
            *counter.borrow_mut() += 1;
        }
    }));

    let data = target(sim.config(), 1);
    tank::create(&mut sim, point![0.0, 5.0], 0.0, data);
    let data = tank::player(sim.config());
    tank::create(&mut sim, point![0.0, 0.0], 0.0, data);

    let input = tank_arena_simulator::input::PlayerInput {
        aim_point: point![0.0, 10.0],
        fire: true,
        ..Default::default()
    };
    for _ in 0..240 {
        sim.step(&input, 1.0 / 60.0);
    }
    assert_eq!(*seen.borrow(), 1);
    assert_eq!(sim.score().score(), 75);
}

#[test]
fn test_direct_damage_scored_on_next_step() {
    let mut sim = Simulation::new("test", 0).unwrap();
    let destroyed = Rc::new(RefCell::new(0));
    let counter = destroyed.clone();
    sim.add_listener(Box::new(move |e: &GameEvent| {
        if matches!(e, GameEvent::Destroyed { .. }) {
            *counter.borrow_mut() += 1;
        }
    }));

    let data = target(sim.config(), 1);
    let handle = tank::create(&mut sim, point![0.0, 0.0], 0.0, data);
    assert_eq!(sim.tank_mut(handle).damage(100), Some(DamageOutcome::Destroyed));
    assert_eq!(sim.score().score(), 0);

    let input = tank_arena_simulator::input::PlayerInput::idle();
    sim.step(&input, 1.0 / 60.0);
    assert_eq!(sim.score().score(), 45);
    assert_eq!(*destroyed.borrow(), 1);

    sim.step(&input, 1.0 / 60.0);
    assert_eq!(sim.score().score(), 45);
    assert_eq!(*destroyed.borrow(), 1);
}
