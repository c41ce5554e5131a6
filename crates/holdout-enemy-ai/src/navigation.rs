//! Movement capability driven by the enemy FSM.
//!
//! The FSM never moves an enemy itself; it asks a `Navigation` implementation
//! for a destination, stops and resumes it, and reads back its velocity.
//! `PathFollower` is the built-in implementation: straight-line steering on
//! the ground plane with arrival braking. Hosts with a real navmesh provide
//! their own.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::profiles::BehaviorProfile;

/// Path-follow capability consumed by the enemy FSM.
pub trait Navigation {
    /// Head for `point` (recomputes the path).
    fn set_destination(&mut self, point: DVec3);
    /// Current velocity (m/s).
    fn current_velocity(&self) -> DVec3;
    /// Halt in place, keeping the destination.
    fn stop(&mut self);
    /// Continue toward the destination after `stop`.
    fn resume(&mut self);
    fn is_stopped(&self) -> bool;
    /// Whether the agent can move at all right now.
    fn can_navigate(&self) -> bool;
    /// Permanently switch movement and collision response off.
    fn disable(&mut self);
}

/// Straight-line path follower.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathFollower {
    destination: Option<DVec3>,
    velocity: DVec3,
    max_speed: f64,
    acceleration: f64,
    stopping_distance: f64,
    stopped: bool,
    enabled: bool,
}

impl PathFollower {
    pub fn new(max_speed: f64, acceleration: f64, stopping_distance: f64) -> Self {
        Self {
            destination: None,
            velocity: DVec3::ZERO,
            max_speed,
            acceleration,
            stopping_distance,
            stopped: false,
            enabled: true,
        }
    }

    /// Follower tuned from an archetype profile.
    pub fn from_profile(profile: &BehaviorProfile) -> Self {
        Self::new(
            profile.move_speed,
            profile.acceleration,
            profile.stopping_distance(),
        )
    }

    pub fn destination(&self) -> Option<DVec3> {
        self.destination
    }

    pub fn stopping_distance(&self) -> f64 {
        self.stopping_distance
    }

    /// Integrate one step from `position` and return the new position.
    pub fn advance(&mut self, position: DVec3, dt: f64) -> DVec3 {
        if !self.enabled || self.stopped {
            self.velocity = DVec3::ZERO;
            return position;
        }

        let desired = match self.destination {
            Some(dest) => {
                let to = dest - position;
                let flat = DVec3::new(to.x, 0.0, to.z);
                let remaining = flat.length() - self.stopping_distance;
                if remaining > 0.0 {
                    // Arrival braking: never faster than what still lets us stop in time.
                    let speed = self
                        .max_speed
                        .min((2.0 * self.acceleration * remaining).sqrt());
                    flat.normalize_or_zero() * speed
                } else {
                    DVec3::ZERO
                }
            }
            None => DVec3::ZERO,
        };

        let delta = desired - self.velocity;
        let max_change = self.acceleration * dt;
        self.velocity += if delta.length() > max_change {
            delta.normalize_or_zero() * max_change
        } else {
            delta
        };

        position + self.velocity * dt
    }
}

impl Navigation for PathFollower {
    fn set_destination(&mut self, point: DVec3) {
        self.destination = Some(point);
    }

    fn current_velocity(&self) -> DVec3 {
        self.velocity
    }

    fn stop(&mut self) {
        self.stopped = true;
        self.velocity = DVec3::ZERO;
    }

    fn resume(&mut self) {
        self.stopped = false;
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn can_navigate(&self) -> bool {
        self.enabled
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.stopped = true;
        self.velocity = DVec3::ZERO;
    }
}
