use crate::tank::TankClass;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired {
        tank: u64,
        position: Point2<f64>,
    },
    Hit {
        tank: u64,
        class: TankClass,
        health: i32,
        reward: i64,
    },
    Destroyed {
        tank: u64,
        class: TankClass,
        reward: i64,
    },
    /// A projectile struck something. Drivers draw the smoke effect here.
    Impact {
        position: Point2<f64>,
    },
    Spawned {
        tank: u64,
        spawn_point: usize,
    },
}

/// Receives every game event once, after the step that produced it.
pub trait EventListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventListener for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}
