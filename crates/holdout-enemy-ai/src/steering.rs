//! Facing: smooth yaw blending toward a desired direction.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Yaw on the ground plane, radians, 0 = +z, increasing toward +x.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Facing {
    pub yaw: f64,
}

impl Facing {
    pub fn new(yaw: f64) -> Self {
        Self { yaw }
    }

    /// Yaw of a direction vector, or `None` if it has no ground component.
    pub fn yaw_of(direction: DVec3) -> Option<f64> {
        let flat = DVec3::new(direction.x, 0.0, direction.z);
        if flat.length_squared() < 1e-12 {
            return None;
        }
        Some(flat.x.atan2(flat.z))
    }

    /// Blend toward `direction` by `min(1, rate * dt)` of the remaining angle,
    /// taking the short way round.
    pub fn turn_toward(&mut self, direction: DVec3, rate: f64, dt: f64) {
        let Some(desired) = Self::yaw_of(direction) else {
            return;
        };
        let t = (rate * dt).clamp(0.0, 1.0);
        let diff = wrap_angle(desired - self.yaw);
        self.yaw = wrap_angle(self.yaw + diff * t);
    }
}

/// Wrap an angle into (-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let a = angle.rem_euclid(TAU);
    if a > PI {
        a - TAU
    } else {
        a
    }
}
