//! Deadlines measured in simulation time.
//!
//! Timed waits are stored as a wake time and compared against the current
//! simulation time on every step.

use serde::{Deserialize, Serialize};

const EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deadline {
    at: f64,
}

impl Deadline {
    pub fn at(time: f64) -> Self {
        Deadline { at: time }
    }

    pub fn after(now: f64, delay: f64) -> Self {
        Deadline {
            at: now + delay.max(0.0),
        }
    }

    pub fn time(&self) -> f64 {
        self.at
    }

    pub fn is_due(&self, now: f64) -> bool {
        now + EPSILON >= self.at
    }

    pub fn remaining(&self, now: f64) -> f64 {
        (self.at - now).max(0.0)
    }
}

/// Fires once per period, first one period after `start`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Interval {
    period: f64,
    next: Deadline,
}

impl Interval {
    pub fn new(start: f64, period: f64) -> Self {
        Interval {
            period,
            next: Deadline::after(start, period),
        }
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn next(&self) -> Deadline {
        self.next
    }

    /// Returns true at most once per call when the deadline has passed, then
    /// schedules the following one relative to the missed deadline.
    pub fn poll(&mut self, now: f64) -> bool {
        if !self.next.is_due(now) {
            return false;
        }
        let mut at = self.next.time() + self.period;
        if at + EPSILON < now {
            at = now + self.period;
        }
        self.next = Deadline::at(at);
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use test_log::test;

    #[test]
    fn test_deadline() {
        let d = Deadline::after(1.0, 2.0);
        assert!(!d.is_due(2.9));
        assert!(d.is_due(3.0));
        assert_eq!(d.remaining(2.5), 0.5);
        assert_eq!(d.remaining(4.0), 0.0);
        assert_eq!(Deadline::after(1.0, -5.0).time(), 1.0);
    }

    #[test]
    fn test_interval() {
        let mut interval = Interval::new(0.0, 2.0);
        let dt = 0.5;
        let mut fired = vec![];
        for i in 0..=12 {
            let now = i as f64 * dt;
            if interval.poll(now) {
                fired.push(now);
            }
        }
        assert_eq!(fired, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_interval_skips_after_stall() {
        let mut interval = Interval::new(0.0, 1.0);
        assert!(interval.poll(10.0));
        assert!(!interval.poll(10.5));
        assert!(interval.poll(11.0));
    }
}
