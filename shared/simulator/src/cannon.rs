use crate::rng::symmetric_jitter;
use crate::timer::Deadline;
use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CannonState {
    Ready,
    Cooling { until: Deadline },
}

#[derive(Clone, Debug)]
pub struct Cannon {
    pub cooldown: f64,
    /// Each cooldown is lengthened or shortened by up to this much.
    pub jitter: f64,
    /// Muzzle position in the turret's frame.
    pub muzzle_offset: Vector2<f64>,
    state: CannonState,
}

impl Cannon {
    pub fn new(cooldown: f64, jitter: f64, muzzle_offset: Vector2<f64>) -> Self {
        Cannon {
            cooldown: cooldown.max(0.0),
            jitter: jitter.abs(),
            muzzle_offset,
            state: CannonState::Ready,
        }
    }

    /// Starts cooling for one full cooldown from `now`.
    pub fn cold(mut self, now: f64) -> Self {
        self.state = CannonState::Cooling {
            until: Deadline::after(now, self.cooldown),
        };
        self
    }

    pub fn state(&self) -> CannonState {
        self.state
    }

    pub fn update(&mut self, now: f64) {
        if let CannonState::Cooling { until } = self.state {
            if until.is_due(now) {
                self.state = CannonState::Ready;
            }
        }
    }

    pub fn is_ready(&self, now: f64) -> bool {
        match self.state {
            CannonState::Ready => true,
            CannonState::Cooling { until } => until.is_due(now),
        }
    }

    /// Returns true if a shot was fired. Fire commands while cooling are ignored.
    pub fn try_fire<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> bool {
        self.update(now);
        if self.state != CannonState::Ready {
            return false;
        }
        let delay = self.cooldown + symmetric_jitter(rng, self.jitter);
        self.state = CannonState::Cooling {
            until: Deadline::after(now, delay),
        };
        true
    }
}
