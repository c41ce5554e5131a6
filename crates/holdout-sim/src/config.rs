//! Encounter configuration.
//!
//! Everything the director and world setup need to run one encounter:
//! wave tuning, spawn points, archetypes, the target and pickups.
//! Validated once before the engine is built; a partially configured
//! encounter never ticks.

use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use holdout_core::constants::*;
use holdout_core::error::ConfigError;
use holdout_enemy_ai::profiles::BehaviorProfile;

/// Configuration for one encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterConfig {
    /// RNG seed. Same seed and same commands = same encounter.
    pub seed: u64,
    pub waves: WaveSettings,
    pub spawn_points: Vec<SpawnPoint>,
    pub archetypes: Vec<ArchetypeSpec>,
    /// The objective enemies attack. Required.
    pub target: Option<TargetSpec>,
    pub pickups: PickupSettings,
    /// How long a corpse stays in the world after death (s).
    pub corpse_grace_secs: f64,
}

/// Wave quotas, cadence and cooldown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSettings {
    /// Enemy count per wave, in order. One entry per wave.
    pub quotas: Vec<u32>,
    /// Delay before the first spawn of each wave (s).
    pub initial_spawn_delay_secs: f64,
    /// Cadence of the first wave (s).
    pub initial_spawn_interval_secs: f64,
    /// Cadence floor (s).
    pub min_spawn_interval_secs: f64,
    /// Cadence reduction applied when each cooldown ends (s).
    pub spawn_interval_decrement_secs: f64,
    /// Pause between waves (s).
    pub cooldown_secs: f64,
    pub score_per_kill: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: DVec3,
    /// Initial facing of enemies spawned here (radians, 0 = +z).
    #[serde(default)]
    pub yaw: f64,
}

/// One kind of enemy the director may spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeSpec {
    pub name: String,
    pub max_health: u32,
    #[serde(default)]
    pub behavior: BehaviorProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub position: DVec3,
    pub max_health: u32,
}

/// Health pickups placed after every cleared wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupSettings {
    /// Candidate locations. Empty disables pickups.
    pub points: Vec<DVec3>,
    pub min_per_wave: u32,
    pub max_per_wave: u32,
    pub heal_amount: u32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            waves: WaveSettings::default(),
            spawn_points: ring(4, 25.0)
                .map(|position| SpawnPoint {
                    yaw: (-position.x).atan2(-position.z),
                    position,
                })
                .collect(),
            archetypes: vec![
                ArchetypeSpec {
                    name: "walker".into(),
                    max_health: ENEMY_MAX_HEALTH,
                    behavior: BehaviorProfile::walker(),
                },
                ArchetypeSpec {
                    name: "runner".into(),
                    max_health: ENEMY_MAX_HEALTH * 6 / 10,
                    behavior: BehaviorProfile::runner(),
                },
                ArchetypeSpec {
                    name: "brute".into(),
                    max_health: ENEMY_MAX_HEALTH * 5 / 2,
                    behavior: BehaviorProfile::brute(),
                },
            ],
            target: Some(TargetSpec {
                position: DVec3::ZERO,
                max_health: TARGET_MAX_HEALTH,
            }),
            pickups: PickupSettings::default(),
            corpse_grace_secs: CORPSE_GRACE_SECS,
        }
    }
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            quotas: DEFAULT_WAVE_QUOTAS.to_vec(),
            initial_spawn_delay_secs: INITIAL_SPAWN_DELAY_SECS,
            initial_spawn_interval_secs: INITIAL_SPAWN_INTERVAL_SECS,
            min_spawn_interval_secs: MIN_SPAWN_INTERVAL_SECS,
            spawn_interval_decrement_secs: SPAWN_INTERVAL_DECREMENT_SECS,
            cooldown_secs: WAVE_COOLDOWN_SECS,
            score_per_kill: SCORE_PER_KILL,
        }
    }
}

impl Default for PickupSettings {
    fn default() -> Self {
        Self {
            points: ring(6, 8.0).collect(),
            min_per_wave: PICKUPS_MIN_PER_WAVE,
            max_per_wave: PICKUPS_MAX_PER_WAVE,
            heal_amount: PICKUP_HEAL_AMOUNT,
        }
    }
}

/// `count` evenly spaced ground points at `radius` around the origin.
fn ring(count: usize, radius: f64) -> impl Iterator<Item = DVec3> {
    (0..count).map(move |i| {
        let angle = i as f64 * std::f64::consts::TAU / count as f64;
        DVec3::new(radius * angle.sin(), 0.0, radius * angle.cos())
    })
}

impl WaveSettings {
    pub fn total_waves(&self) -> u32 {
        self.quotas.len() as u32
    }

    /// Quota of a 1-based wave index, 0 outside the configured range.
    pub fn quota(&self, wave: u32) -> u32 {
        wave.checked_sub(1)
            .and_then(|i| self.quotas.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Cadence of the wave after one with `interval`.
    pub fn next_interval(&self, interval: f64) -> f64 {
        (interval - self.spawn_interval_decrement_secs).max(self.min_spawn_interval_secs)
    }
}

impl EncounterConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Report the first configuration problem, if any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_points.is_empty() {
            return Err(ConfigError::NoSpawnPoints);
        }
        if self.archetypes.is_empty() {
            return Err(ConfigError::NoArchetypes);
        }
        if self.waves.quotas.is_empty() {
            return Err(ConfigError::NoWaveQuotas);
        }
        if let Some(i) = self.waves.quotas.iter().position(|&q| q == 0) {
            return Err(ConfigError::ZeroQuota { wave: i as u32 + 1 });
        }

        let target = self.target.as_ref().ok_or(ConfigError::MissingTarget)?;
        if target.max_health == 0 {
            return Err(ConfigError::InvalidTarget("max health must be positive".into()));
        }
        if !target.position.is_finite() {
            return Err(ConfigError::InvalidTarget(format!(
                "position {} is not finite",
                target.position
            )));
        }

        self.validate_timings()?;

        for archetype in &self.archetypes {
            if archetype.name.is_empty() {
                return Err(ConfigError::InvalidArchetype {
                    archetype: archetype.name.clone(),
                    reason: "name is empty".into(),
                });
            }
            if archetype.max_health == 0 {
                return Err(ConfigError::InvalidArchetype {
                    archetype: archetype.name.clone(),
                    reason: "max health must be positive".into(),
                });
            }
            archetype.behavior.validate(&archetype.name)?;
        }

        let pickups = &self.pickups;
        if pickups.min_per_wave > pickups.max_per_wave {
            return Err(ConfigError::InvalidPickups(format!(
                "min per wave {} exceeds max per wave {}",
                pickups.min_per_wave, pickups.max_per_wave
            )));
        }
        if !pickups.points.iter().all(|p| p.is_finite()) {
            return Err(ConfigError::InvalidPickups("pickup point is not finite".into()));
        }

        Ok(())
    }

    fn validate_timings(&self) -> Result<(), ConfigError> {
        let w = &self.waves;
        // (field, value, accepted)
        let checks = [
            (
                "initial_spawn_delay_secs",
                w.initial_spawn_delay_secs,
                w.initial_spawn_delay_secs >= 0.0,
            ),
            (
                "initial_spawn_interval_secs",
                w.initial_spawn_interval_secs,
                w.initial_spawn_interval_secs > 0.0,
            ),
            (
                "min_spawn_interval_secs",
                w.min_spawn_interval_secs,
                w.min_spawn_interval_secs > 0.0
                    && w.min_spawn_interval_secs <= w.initial_spawn_interval_secs,
            ),
            (
                "spawn_interval_decrement_secs",
                w.spawn_interval_decrement_secs,
                w.spawn_interval_decrement_secs >= 0.0,
            ),
            ("cooldown_secs", w.cooldown_secs, w.cooldown_secs >= 0.0),
            (
                "corpse_grace_secs",
                self.corpse_grace_secs,
                self.corpse_grace_secs >= 0.0,
            ),
        ];
        for (field, value, accepted) in checks {
            // NaN fails every comparison above, so it lands here too.
            if !accepted || !value.is_finite() {
                return Err(ConfigError::InvalidTiming { field, value });
            }
        }
        Ok(())
    }
}
