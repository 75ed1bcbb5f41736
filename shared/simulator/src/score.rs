use crate::events::{EventListener, GameEvent};
use serde::{Deserialize, Serialize};

/// Points awarded when a tank carrying this value is hit or destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreValue {
    pub on_hit: i64,
    pub on_death: i64,
}

impl Default for ScoreValue {
    fn default() -> Self {
        ScoreValue {
            on_hit: 15,
            on_death: 45,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ScoreBoard {
    score: i64,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn add(&mut self, points: i64) {
        self.score += points;
    }

    pub fn display(&self) -> String {
        format!("Score : {}", self.score)
    }
}

impl EventListener for ScoreBoard {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Hit { reward, .. } | GameEvent::Destroyed { reward, .. } => {
                self.add(*reward)
            }
            _ => {}
        }
    }
}
