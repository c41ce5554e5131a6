//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::TIME_EPSILON;

/// World position (meters). y is up; the ground plane is x/z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub DVec3);

/// Stable identifier of a simulated entity, as seen from outside the ECS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks that advanced simulated time.
    pub tick: u64,
    /// Elapsed simulated time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    /// Distance on the ground plane, ignoring height.
    pub fn ground_range_to(&self, other: &Position) -> f64 {
        let d = other.0 - self.0;
        (d.x * d.x + d.z * d.z).sqrt()
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self(v)
    }
}

impl SimTime {
    /// Advance by an arbitrary step.
    pub fn advance_by(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Whether an accumulated timer has reached `threshold` seconds.
pub fn reached(elapsed: f64, threshold: f64) -> bool {
    elapsed + TIME_EPSILON >= threshold
}

/// Whether a countdown has run out.
pub fn expired(remaining: f64) -> bool {
    remaining <= TIME_EPSILON
}
