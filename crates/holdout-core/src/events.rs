//! Notifications emitted by the simulation for the presentation layer.
//!
//! These are the only outward channel of the core: UI, audio, animation and
//! pickup placement all react to them.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::DeathAnimation;
use crate::types::EntityId;

/// Presentation event. Emitted synchronously, in order, within a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    // --- Game state ---
    GameStarted,
    GamePaused,
    GameResumed,
    EncounterWon { waves_cleared: u32, score: u32 },
    EncounterLost { wave: u32, score: u32 },

    // --- Waves ---
    WaveStarted { wave: u32, quota: u32 },
    WaveProgress { wave: u32, killed: u32, quota: u32 },
    /// Whole seconds left before the next wave, reported when the value changes.
    WaveCooldown { next_wave: u32, remaining_secs: u32 },
    WaveCompleted { wave: u32 },
    /// Replace any placed pickups with new ones at these points.
    PickupSpawnRequest { wave: u32, points: Vec<DVec3> },

    // --- Enemies ---
    EnemySpawned {
        enemy: EntityId,
        archetype: String,
        position: DVec3,
    },
    /// Start the attack animation.
    EnemyAttackStarted { enemy: EntityId },
    /// One damage instant of an attack cycle fired. `landed` is false when the
    /// target had stepped out of attack range.
    EnemyAttackPerformed {
        enemy: EntityId,
        instant: u8,
        landed: bool,
    },
    EnemyDied {
        enemy: EntityId,
        animation: DeathAnimation,
    },
    /// Corpse removed after its grace delay.
    EnemyRemoved { enemy: EntityId },

    // --- Health ---
    DamageReceived {
        entity: EntityId,
        amount: u32,
        remaining: u32,
    },
}
