//! Sensor event sources.
//!
//! Device pedometer and accelerometer backends live outside the core; they
//! deliver [`SensorEvent`]s which the caller drains and feeds into the
//! activity engine each turn. The core never talks to hardware.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// One accelerometer reading, axes in g.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl MotionSample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean magnitude of the acceleration vector.
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// A sensor observation ready for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SensorEvent {
    Motion(MotionSample),
    /// Step-count delta since the previous observation.
    Steps(u32),
}

/// A pollable source of sensor events.
///
/// Backends buffer hardware callbacks and hand them over when the event loop
/// polls, keeping sensor delivery and engine mutation on one logical thread.
pub trait SensorSource: Send {
    /// Drain every event observed since the last poll, oldest first.
    fn poll(&mut self) -> Vec<SensorEvent>;
}

/// Queue-backed source for tests, simulations, and replaying recordings.
#[derive(Debug, Default)]
pub struct ReplaySource {
    queue: VecDeque<SensorEvent>,
}

impl ReplaySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_motion(&mut self, sample: MotionSample) {
        self.queue.push_back(SensorEvent::Motion(sample));
    }

    pub fn push_steps(&mut self, steps: u32) {
        self.queue.push_back(SensorEvent::Steps(steps));
    }
}

impl SensorSource for ReplaySource {
    fn poll(&mut self) -> Vec<SensorEvent> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_of_unit_axes() {
        let sample = MotionSample::new(1.0, 0.0, 0.0);
        assert!((sample.magnitude() - 1.0).abs() < 1e-12);

        let sample = MotionSample::new(1.0, 1.0, 1.0);
        assert!((sample.magnitude() - 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn replay_source_drains_in_order() {
        let mut source = ReplaySource::new();
        source.push_steps(10);
        source.push_motion(MotionSample::new(0.0, 0.0, 1.5));

        let events = source.poll();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], SensorEvent::Steps(10)));
        assert!(matches!(events[1], SensorEvent::Motion(_)));
        assert!(source.poll().is_empty());
    }
}
