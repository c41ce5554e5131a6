//! Archetype-specific behavioral profiles.
//!
//! Consolidates per-archetype tuning for the enemy FSM and its navigator.

use serde::{Deserialize, Serialize};

use holdout_core::constants::*;
use holdout_core::error::ConfigError;

/// Behavioral profile for an enemy archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorProfile {
    /// Distance at which an attack may start (m).
    pub attack_range: f64,
    /// Distance beyond which a running attack is abandoned (m).
    pub interrupt_range: f64,
    /// Damage per landed strike.
    pub attack_damage: u32,
    /// Cooldown after a completed attack cycle (s).
    pub attack_cooldown_secs: f64,
    /// Share of the full cooldown applied after an interrupt.
    pub interrupt_cooldown_fraction: f64,
    /// Attack animation length (s).
    pub attack_duration_secs: f64,
    /// Ordered offsets into the attack at which damage is dealt (s).
    pub damage_instants_secs: Vec<f64>,
    /// Speed below which the enemy counts as settled (m/s).
    pub settle_speed: f64,
    /// Top walking speed (m/s).
    pub move_speed: f64,
    /// Acceleration toward the desired velocity (m/s²).
    pub acceleration: f64,
    /// Facing blend rate (1/s).
    pub rotation_speed: f64,
    /// Minimum time between path recomputations (s).
    pub path_refresh_secs: f64,
    /// How far inside attack range the navigator stops (m).
    pub stopping_margin: f64,
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        Self::walker()
    }
}

impl BehaviorProfile {
    /// The baseline shambler.
    pub fn walker() -> Self {
        Self {
            attack_range: ATTACK_RANGE,
            interrupt_range: ATTACK_INTERRUPT_RANGE,
            attack_damage: ATTACK_DAMAGE,
            attack_cooldown_secs: ATTACK_COOLDOWN_SECS,
            interrupt_cooldown_fraction: INTERRUPT_COOLDOWN_FRACTION,
            attack_duration_secs: ATTACK_DURATION_SECS,
            damage_instants_secs: ATTACK_DAMAGE_INSTANTS_SECS.to_vec(),
            settle_speed: SETTLE_SPEED,
            move_speed: ENEMY_MOVE_SPEED,
            acceleration: ENEMY_ACCELERATION,
            rotation_speed: ENEMY_ROTATION_SPEED,
            path_refresh_secs: PATH_REFRESH_SECS,
            stopping_margin: STOPPING_MARGIN,
        }
    }

    /// Fast and fragile-hitting: one quick strike per cycle.
    pub fn runner() -> Self {
        Self {
            attack_damage: 3,
            attack_cooldown_secs: 1.2,
            attack_duration_secs: 0.8,
            damage_instants_secs: vec![0.35],
            move_speed: ENEMY_MOVE_SPEED * 1.6,
            acceleration: ENEMY_ACCELERATION * 1.5,
            rotation_speed: ENEMY_ROTATION_SPEED * 1.5,
            ..Self::walker()
        }
    }

    /// Slow, long reach, heavy two-handed swing.
    pub fn brute() -> Self {
        Self {
            attack_range: 2.4,
            interrupt_range: 3.0,
            attack_damage: 12,
            attack_cooldown_secs: 3.0,
            attack_duration_secs: 1.8,
            damage_instants_secs: vec![0.9, 1.4],
            move_speed: ENEMY_MOVE_SPEED * 0.7,
            acceleration: ENEMY_ACCELERATION * 0.6,
            rotation_speed: ENEMY_ROTATION_SPEED * 0.6,
            ..Self::walker()
        }
    }

    /// Where the navigator should stop short of the target.
    pub fn stopping_distance(&self) -> f64 {
        (self.attack_range - self.stopping_margin).max(0.0)
    }

    /// Cooldown applied when an attack is interrupted.
    pub fn interrupt_cooldown_secs(&self) -> f64 {
        self.attack_cooldown_secs * self.interrupt_cooldown_fraction
    }

    /// Check the profile is usable; `archetype` names it in the error.
    pub fn validate(&self, archetype: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidArchetype {
            archetype: archetype.to_string(),
            reason,
        };

        // Negated comparisons so NaN fails too.
        if !(self.attack_range > 0.0) {
            return Err(invalid(format!("attack range {} must be positive", self.attack_range)));
        }
        if !(self.interrupt_range > self.attack_range) {
            return Err(invalid(format!(
                "interrupt range {} must exceed attack range {}",
                self.interrupt_range, self.attack_range
            )));
        }
        if !(0.0..=1.0).contains(&self.interrupt_cooldown_fraction) {
            return Err(invalid(format!(
                "interrupt cooldown fraction {} outside [0, 1]",
                self.interrupt_cooldown_fraction
            )));
        }
        if !(self.attack_duration_secs > 0.0) || !(self.attack_cooldown_secs >= 0.0) {
            return Err(invalid("attack duration and cooldown must be positive".into()));
        }
        if self.damage_instants_secs.len() > MAX_DAMAGE_INSTANTS {
            return Err(invalid(format!(
                "{} damage instants, at most {MAX_DAMAGE_INSTANTS} allowed",
                self.damage_instants_secs.len()
            )));
        }
        let mut previous = 0.0;
        for &at in &self.damage_instants_secs {
            if !(at >= previous && at <= self.attack_duration_secs) {
                return Err(invalid(format!(
                    "damage instant {at} out of order or past the attack duration"
                )));
            }
            previous = at;
        }
        if !(self.move_speed > 0.0) || !(self.acceleration > 0.0) || !(self.rotation_speed > 0.0) {
            return Err(invalid("movement rates must be positive".into()));
        }
        if !(self.path_refresh_secs > 0.0) {
            return Err(invalid("path refresh interval must be positive".into()));
        }
        if !(self.settle_speed > 0.0) {
            return Err(invalid("settle speed must be positive".into()));
        }
        if !(0.0..self.attack_range).contains(&self.stopping_margin) {
            return Err(invalid(format!(
                "stopping margin {} must lie in [0, attack range)",
                self.stopping_margin
            )));
        }
        Ok(())
    }
}
